//! Bus interface for the ADXL345
//!
//! The sensor is spoken to with two I2C transaction shapes:
//! - a plain two byte write `[register, value]`
//! - a combined write-then-read that sends the start register and reads a
//!   block back without releasing the bus, so the sensor's auto-incrementing
//!   register pointer cannot be disturbed by another bus participant
//!
//! [`I2cInterface`] implements both and plugs them into `device-driver` as a
//! [`RegisterInterface`].

use device_driver::RegisterInterface;

use crate::I2C_ADDRESS_ALT_LOW;

/// Transfer capabilities advertised by the bus adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Functionality {
    /// Plain I2C messages, including combined write-then-read transfers
    pub i2c: bool,
    /// SMBus byte data transfers only
    pub smbus_byte_data: bool,
}

impl Functionality {
    /// A full I2C adapter
    pub const fn i2c() -> Self {
        Self {
            i2c: true,
            smbus_byte_data: true,
        }
    }

    /// An SMBus-only adapter that cannot issue combined transfers
    pub const fn smbus_only() -> Self {
        Self {
            i2c: false,
            smbus_byte_data: true,
        }
    }

    /// Whether the adapter can carry the driver's block reads
    #[must_use]
    pub const fn supports_combined_transfers(&self) -> bool {
        self.i2c
    }
}

impl Default for Functionality {
    fn default() -> Self {
        Self::i2c()
    }
}

/// A bus connection handed to the driver when the device is attached
///
/// Bundles the I2C bus, the sensor's 7-bit address, the interrupt line wired
/// to the sensor and what the adapter is able to do.
pub struct Client<I2C, IRQ> {
    /// The I2C bus (or a shared-bus device proxy)
    pub bus: I2C,
    /// 7-bit device address
    pub address: u8,
    /// Interrupt line the sensor raises when a sample is ready
    pub irq: IRQ,
    /// Adapter capabilities
    pub functionality: Functionality,
}

impl<I2C, IRQ> Client<I2C, IRQ> {
    /// Create a client at the default address (0x53, ALT ADDRESS pin low)
    /// on a full I2C adapter
    pub const fn new(bus: I2C, irq: IRQ) -> Self {
        Self {
            bus,
            address: I2C_ADDRESS_ALT_LOW,
            irq,
            functionality: Functionality::i2c(),
        }
    }

    /// Use a different device address
    #[must_use]
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Override the adapter capabilities
    #[must_use]
    pub const fn with_functionality(mut self, functionality: Functionality) -> Self {
        self.functionality = functionality;
        self
    }
}

/// I2C interface for the ADXL345
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface for the device at `address`
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Device address used for every transaction
    pub const fn address(&self) -> u8 {
        self.address
    }
}

impl<I2C, E> I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    /// Write a single register
    ///
    /// Sends the two byte message `[register, value]`. Nothing is read back.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the adapter rejects the message.
    pub fn write_register(&mut self, register: u8, value: u8) -> Result<(), E> {
        self.i2c.write(self.address, &[register, value])
    }

    /// Read `buf.len()` consecutive registers starting at `start`
    ///
    /// Issued as one combined transfer: a one byte write segment holding
    /// `start`, then a read segment of `buf.len()` bytes, with a repeated start
    /// in between.
    ///
    /// # Errors
    ///
    /// Returns the bus error if the exchange fails. `buf` contents are then
    /// unspecified.
    pub fn read_block(&mut self, start: u8, buf: &mut [u8]) -> Result<(), E> {
        self.i2c.write_read(self.address, &[start], buf)
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for I2C
        self.read_block(address, read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Every ADXL345 register is one byte wide
        for (offset, &value) in write_data.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let register = address.wrapping_add(offset as u8);
            self.i2c.write(self.address, &[register, value])?;
        }
        Ok(())
    }
}
