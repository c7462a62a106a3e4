//! Sensor configuration applied when the device is attached
//!
//! The sampling pipeline does not use the sensor's own interrupt logic or its
//! FIFO. Attaching therefore programs a data rate and a data format, clears
//! `INT_ENABLE`, puts the FIFO in bypass mode and sets the measure bit.
//!
//! # Example
//!
//! ```ignore
//! # use adxl345_input::{Adxl345, config::{DataFormat, DataRate, Range, SensorConfig}};
//! let config = SensorConfig {
//!     rate: DataRate::Hz200,
//!     format: DataFormat { range: Range::G4, ..Default::default() },
//! };
//! let adxl = Adxl345::attach_with_config(client, input, config)?;
//! ```

/// Output data rate (`BW_RATE.rate`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    /// 6.25 Hz
    Hz6_25 = 0x06,
    /// 12.5 Hz
    Hz12_5 = 0x07,
    /// 25 Hz
    Hz25 = 0x08,
    /// 50 Hz
    Hz50 = 0x09,
    /// 100 Hz (power-on default)
    Hz100 = 0x0A,
    /// 200 Hz
    Hz200 = 0x0B,
    /// 400 Hz
    Hz400 = 0x0C,
    /// 800 Hz
    Hz800 = 0x0D,
    /// 1600 Hz
    Hz1600 = 0x0E,
    /// 3200 Hz
    Hz3200 = 0x0F,
}

impl DataRate {
    /// Output data rate in Hz
    #[must_use]
    pub const fn rate_hz(self) -> f32 {
        match self {
            Self::Hz6_25 => 6.25,
            Self::Hz12_5 => 12.5,
            Self::Hz25 => 25.0,
            Self::Hz50 => 50.0,
            Self::Hz100 => 100.0,
            Self::Hz200 => 200.0,
            Self::Hz400 => 400.0,
            Self::Hz800 => 800.0,
            Self::Hz1600 => 1600.0,
            Self::Hz3200 => 3200.0,
        }
    }

    /// Register value for `BW_RATE.rate`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Measurement range (`DATA_FORMAT.range`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Range {
    /// ±2 g
    #[default]
    G2 = 0,
    /// ±4 g
    G4 = 1,
    /// ±8 g
    G8 = 2,
    /// ±16 g
    G16 = 3,
}

impl Range {
    /// Register value for `DATA_FORMAT.range`
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Data format (`DATA_FORMAT`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataFormat {
    /// g range
    pub range: Range,
    /// Full resolution: 4 mg/LSB at every range instead of 10-bit output
    pub full_resolution: bool,
    /// Left-justify the output
    pub left_justify: bool,
}

impl DataFormat {
    /// Raw `DATA_FORMAT` register byte
    #[must_use]
    pub const fn bits(&self) -> u8 {
        let mut value = self.range.bits();
        if self.left_justify {
            value |= 1 << 2;
        }
        if self.full_resolution {
            value |= 1 << 3;
        }
        value
    }
}

/// Configuration written to the sensor while attaching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfig {
    /// Output data rate
    pub rate: DataRate,
    /// Output format
    pub format: DataFormat,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            rate: DataRate::Hz100,
            format: DataFormat::default(),
        }
    }
}

/// `POWER_CTL` value that starts measurement
pub const POWER_CTL_MEASURE: u8 = 0x08;

/// `POWER_CTL` value that returns the sensor to standby
pub const POWER_CTL_STANDBY: u8 = 0x00;
