//! Interrupt line management
//!
//! The sensor signals new data on a platform interrupt line. The driver
//! requests the line while attaching, keeps it disabled until the input
//! consumer opens the device, and releases it when detaching.
//!
//! Delivery itself belongs to the platform: whatever dispatches the line
//! calls [`Adxl345::on_interrupt`](crate::Adxl345::on_interrupt). The handler
//! takes `&mut self`, so at most one handler body runs per device. Platforms
//! that can deliver the same line concurrently must put the device behind
//! their own mutex.
//!
//! With the `async` feature, `Adxl345::service_interrupts` is a ready-made
//! worker that waits for edges on an `embedded-hal-async` pin and runs the
//! handler for each one.

#[cfg(feature = "async")]
use crate::{Adxl345, input::EventSink};

/// A platform interrupt line bound to the driver's handler
pub trait InterruptLine {
    /// Error returned when the line cannot be requested or enabled
    type Error: core::fmt::Debug;

    /// Claim the line for the driver's handler
    ///
    /// # Errors
    ///
    /// Returns an error if the line is unavailable.
    fn request(&mut self, name: &'static str) -> Result<(), Self::Error>;

    /// Start delivering interrupts
    ///
    /// # Errors
    ///
    /// Returns an error if the line cannot be unmasked.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Stop delivering interrupts
    fn disable(&mut self);

    /// Release the line
    fn free(&mut self);
}

#[cfg(feature = "async")]
impl<I2C, IRQ, S> Adxl345<I2C, IRQ, S>
where
    I2C: embedded_hal::i2c::I2c,
    IRQ: InterruptLine,
    S: EventSink,
{
    /// Run the interrupt handler for every rising edge on `pin`
    ///
    /// Edges seen while the device is closed are consumed without reading the
    /// sensor. Runs until the pin reports an error.
    ///
    /// # Errors
    ///
    /// Returns the pin error that stopped the worker.
    pub async fn service_interrupts<P>(
        &mut self,
        pin: &mut P,
    ) -> Result<core::convert::Infallible, P::Error>
    where
        P: embedded_hal_async::digital::Wait,
    {
        loop {
            pin.wait_for_rising_edge().await?;
            self.on_interrupt();
        }
    }
}
