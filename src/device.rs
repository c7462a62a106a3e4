//! Device lifecycle and the interrupt-driven sampling pipeline
//!
//! An [`Adxl345`] exists only between a successful [`Adxl345::attach`] and
//! [`Adxl345::detach`]:
//!
//! ```text
//! attach ──► Closed ⇄ Opened ──► detach
//! ```
//!
//! Attaching acquires everything the device needs, in order: capability
//! check, input allocation and description, interrupt line (left disabled),
//! input registration, sensor configuration. A failure at any step releases
//! what the earlier steps acquired, in reverse order, and no device is
//! returned.
//!
//! Opening enables the interrupt line, closing disables it again. Each
//! interrupt reads the six data registers, decodes them, and reports the
//! sample unless it equals the last one reported.
//!
//! Detaching (or dropping the device) frees the interrupt line, unregisters
//! the input device and puts the sensor in standby.

use crate::config::SensorConfig;
use crate::input::{AbsInfo, EventReporter, EventSink, InputId};
use crate::interface::{Client, I2cInterface};
use crate::interrupt::InterruptLine;
use crate::registers::Adxl345 as RegisterDevice;
use crate::sample::{ChangeGate, RAW_BLOCK_START, RawBlock, SensorSample};
use crate::{AttachError, DRIVER_NAME, Error};

/// Attached device state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Attached, interrupt line disabled
    Closed,
    /// Interrupt line enabled, samples are reported
    Opened,
}

/// ADXL345 attached to an I2C bus, an interrupt line and an input consumer
pub struct Adxl345<I2C, IRQ, S>
where
    I2C: embedded_hal::i2c::I2c,
    IRQ: InterruptLine,
    S: EventSink,
{
    device: RegisterDevice<I2cInterface<I2C>>,
    irq: IRQ,
    reporter: EventReporter<S>,
    gate: ChangeGate,
    // Reused by every interrupt
    raw: RawBlock,
    state: State,
}

impl<I2C, IRQ, S> Adxl345<I2C, IRQ, S>
where
    I2C: embedded_hal::i2c::I2c,
    IRQ: InterruptLine,
    S: EventSink,
{
    /// Attach the driver with the default [`SensorConfig`]
    ///
    /// # Errors
    ///
    /// See [`attach_with_config`](Self::attach_with_config).
    pub fn attach(client: Client<I2C, IRQ>, input: S) -> Result<Self, AttachError<I2C::Error>> {
        Self::attach_with_config(client, input, SensorConfig::default())
    }

    /// Attach the driver
    ///
    /// On success the device is [`State::Closed`]: the interrupt line is
    /// requested but disabled, the input device is registered, and the
    /// sensor is configured and measuring.
    ///
    /// # Errors
    ///
    /// - [`AttachError::Unsupported`] if the adapter cannot issue combined
    ///   transfers; nothing was acquired
    /// - [`AttachError::OutOfMemory`] if the input device cannot be allocated
    /// - [`AttachError::Interrupt`] if the interrupt line cannot be requested
    /// - [`AttachError::InputRegistration`] if the consumer rejects the device
    /// - [`AttachError::Bus`] if a configuration write fails
    ///
    /// In every case the resources acquired before the failing step have
    /// been released again.
    pub fn attach_with_config(
        client: Client<I2C, IRQ>,
        mut input: S,
        config: SensorConfig,
    ) -> Result<Self, AttachError<I2C::Error>> {
        let Client {
            bus,
            address,
            mut irq,
            functionality,
        } = client;

        if !functionality.supports_combined_transfers() {
            log_error!("adapter does not support plain I2C transfers");
            return Err(AttachError::Unsupported);
        }

        if input.allocate().is_err() {
            log_error!("failed to allocate input device");
            return Err(AttachError::OutOfMemory);
        }

        let mut reporter = EventReporter::new(input);
        reporter.describe(&InputId::adxl345(address));

        if irq.request(DRIVER_NAME).is_err() {
            log_error!("failed to request interrupt line");
            reporter.sink_mut().free();
            return Err(AttachError::Interrupt);
        }
        // Stays masked until the consumer opens the device
        irq.disable();

        if reporter.sink_mut().register().is_err() {
            log_error!("failed to register input device");
            irq.free();
            reporter.sink_mut().free();
            return Err(AttachError::InputRegistration);
        }

        let mut device = RegisterDevice::new(I2cInterface::new(bus, address));
        if let Err(e) = configure(&mut device, &config) {
            log_error!("failed to configure sensor at {=u8:#x}", address);
            reporter.sink_mut().unregister();
            irq.free();
            return Err(AttachError::Bus(e));
        }

        Ok(Self {
            device,
            irq,
            reporter,
            gate: ChangeGate::new(),
            raw: RawBlock::default(),
            state: State::Closed,
        })
    }

    /// Enable the interrupt line
    ///
    /// Opening an already open device does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interrupt`] if the line cannot be enabled; the device
    /// stays closed.
    pub fn open(&mut self) -> Result<(), Error<I2C::Error>> {
        if self.state == State::Opened {
            return Ok(());
        }
        if self.irq.enable().is_err() {
            log_error!("failed to enable interrupt line");
            return Err(Error::Interrupt);
        }
        self.state = State::Opened;
        Ok(())
    }

    /// Disable the interrupt line
    ///
    /// The sensor keeps measuring.
    pub fn close(&mut self) {
        if self.state == State::Opened {
            self.irq.disable();
            self.state = State::Closed;
        }
    }

    /// Detach the driver
    ///
    /// Frees the interrupt line, unregisters the input device and puts the
    /// sensor in standby, whether or not the device was ever opened.
    /// Dropping the device has the same effect.
    pub fn detach(self) {
        drop(self);
    }

    /// Interrupt handler
    ///
    /// Reads one sample, and reports it if it differs from the last reported
    /// one. Returns the reported sample.
    ///
    /// Returns `None` without touching the sensor while the device is closed.
    /// A failed bus exchange drops the frame: nothing is reported and the
    /// last reported sample is kept.
    pub fn on_interrupt(&mut self) -> Option<SensorSample> {
        if self.state != State::Opened {
            return None;
        }

        let Ok(sample) = self.read_sample() else {
            log_debug!("data read failed, frame dropped");
            return None;
        };

        if !self.gate.admit(sample) {
            return None;
        }

        self.reporter.report(&sample);
        Some(sample)
    }

    /// Read and decode one sample without reporting it
    ///
    /// # Errors
    ///
    /// Returns an error if the bus exchange fails.
    pub fn read_sample(&mut self) -> Result<SensorSample, Error<I2C::Error>> {
        self.device
            .interface
            .read_block(RAW_BLOCK_START, self.raw.as_mut_bytes())?;
        Ok(self.raw.decode())
    }

    /// Read the `DEVID` register
    ///
    /// Should return 0xE5 for a genuine ADXL345
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_device_id(&mut self) -> Result<u8, Error<I2C::Error>> {
        let reg = self.device.dev_id().read()?;
        Ok(reg.devid())
    }

    /// Current state
    pub const fn state(&self) -> State {
        self.state
    }

    /// The most recently reported sample
    pub const fn last_reported(&self) -> Option<SensorSample> {
        self.gate.last()
    }

    /// Range declared for every axis
    pub const fn abs_info(&self) -> AbsInfo {
        self.reporter.abs_info()
    }

    /// Borrow the input consumer
    pub const fn input(&self) -> &S {
        self.reporter.sink()
    }
}

impl<I2C, IRQ, S> Drop for Adxl345<I2C, IRQ, S>
where
    I2C: embedded_hal::i2c::I2c,
    IRQ: InterruptLine,
    S: EventSink,
{
    fn drop(&mut self) {
        self.irq.free();
        self.reporter.sink_mut().unregister();
        if self.device.power_ctl().write(|_| {}).is_err() {
            log_warn!("failed to put sensor in standby");
        }
    }
}

/// Program rate, disable on-chip interrupts and FIFO, set the data format,
/// then start measuring
fn configure<I2C>(
    device: &mut RegisterDevice<I2cInterface<I2C>>,
    config: &SensorConfig,
) -> Result<(), I2C::Error>
where
    I2C: embedded_hal::i2c::I2c,
{
    device.bw_rate().write(|w| {
        w.set_rate(config.rate.bits());
    })?;
    device.int_enable().write(|_| {})?;
    device.fifo_ctl().write(|_| {})?;
    device.data_format().write(|w| {
        w.set_range(config.format.range.bits());
        w.set_justify(config.format.left_justify);
        w.set_full_res(config.format.full_resolution);
    })?;
    device.power_ctl().write(|w| {
        w.set_measure(true);
    })?;
    Ok(())
}
