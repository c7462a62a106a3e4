#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

#[macro_use]
mod fmt;

pub mod config;
pub mod device;
pub mod input;
pub mod interface;
pub mod interrupt;
pub mod registers;
pub mod sample;

// Re-export main types
pub use config::{DataFormat, DataRate, Range, SensorConfig};
pub use device::{Adxl345, State};
pub use input::{AbsInfo, Axis, BusType, EventReporter, EventSink, InputId};
pub use interface::{Client, Functionality, I2cInterface};
pub use interrupt::InterruptLine;
pub use sample::{ChangeGate, RawBlock, SensorSample, decode, decode_axis};

/// Name the input device is registered under
pub const DEVICE_NAME: &str = "adxl345 I2C Accelerometer";

/// Driver name, also used when requesting the interrupt line
pub const DRIVER_NAME: &str = "adxl345";

/// Device tree compatible string
pub const COMPATIBLE: &str = "accelerometer,adxl345";

/// I2C device id table
pub const I2C_ID_TABLE: &[&str] = &[DRIVER_NAME];

/// Device tree match table
pub const OF_MATCH_TABLE: &[&str] = &[COMPATIBLE];

/// ADXL345 I2C address when the ALT ADDRESS pin is low (default: 0x53)
pub const I2C_ADDRESS_ALT_LOW: u8 = 0x53;

/// ADXL345 I2C address when the ALT ADDRESS pin is high (alternative: 0x1D)
pub const I2C_ADDRESS_ALT_HIGH: u8 = 0x1D;

/// Expected value of the `DEVID` register
pub const DEVID_VALUE: u8 = 0xE5;

/// Largest magnitude reported on any axis
pub const AXIS_MAX: i32 = 4095;

/// Driver errors
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// The interrupt line could not be enabled
    Interrupt,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

/// Reasons attaching can fail
///
/// Every variant is reported after the resources acquired by earlier attach
/// steps have been released.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttachError<E> {
    /// The bus adapter cannot issue plain I2C (combined) transfers
    Unsupported,
    /// The input device could not be allocated
    OutOfMemory,
    /// The interrupt line could not be requested
    Interrupt,
    /// The input consumer refused to register the device
    InputRegistration,
    /// Writing the sensor configuration failed
    Bus(E),
}
