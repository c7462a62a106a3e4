//! Raw sample blocks, decoding and change detection
//!
//! Every interrupt reads the six data registers `DATAX0..=DATAZ1` in one
//! exchange. The block is laid out as
//! `[x_low, x_high, y_low, y_high, z_low, z_high]` and each axis is a
//! little-endian two's-complement 16-bit value.

use crate::registers::addr;

/// Number of bytes in one data register block
pub const RAW_BLOCK_LEN: usize = 6;

/// First register of the data block
pub const RAW_BLOCK_START: u8 = addr::DATAX0;

/// Bytes read from `DATAX0..=DATAZ1`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawBlock(pub [u8; RAW_BLOCK_LEN]);

impl RawBlock {
    /// Mutable access for the bus read
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }

    /// Decode the block into a sample
    #[must_use]
    pub const fn decode(&self) -> SensorSample {
        decode(&self.0)
    }
}

/// One decoded accelerometer reading (raw LSB per axis)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSample {
    /// X-axis acceleration (raw)
    pub x: i16,
    /// Y-axis acceleration (raw)
    pub y: i16,
    /// Z-axis acceleration (raw)
    pub z: i16,
}

impl SensorSample {
    /// Create a sample from its three axes
    #[must_use]
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Combine one axis' register pair
///
/// `high` carries the sign. The result is the two's-complement value of
/// `low | (high << 8)`.
#[must_use]
pub const fn decode_axis(low: u8, high: u8) -> i16 {
    i16::from_le_bytes([low, high])
}

/// Decode a six byte data block
///
/// No validation is done; any bit pattern decodes to some sample.
#[must_use]
pub const fn decode(raw: &[u8; RAW_BLOCK_LEN]) -> SensorSample {
    SensorSample {
        x: decode_axis(raw[0], raw[1]),
        y: decode_axis(raw[2], raw[3]),
        z: decode_axis(raw[4], raw[5]),
    }
}

/// Suppresses samples equal to the last one reported
///
/// Comparison is by value over the three axes. The cached sample only moves
/// when [`ChangeGate::admit`] lets a sample through, so it always holds the
/// most recently *reported* sample.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChangeGate {
    last: Option<SensorSample>,
}

impl ChangeGate {
    /// A gate that has not reported anything yet
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Decide whether `sample` should be reported
    ///
    /// Returns `true` and records `sample` if it differs from the last
    /// reported sample (or nothing was reported yet). Returns `false` and
    /// leaves the cache untouched otherwise.
    pub fn admit(&mut self, sample: SensorSample) -> bool {
        if self.last == Some(sample) {
            return false;
        }
        self.last = Some(sample);
        true
    }

    /// The most recently reported sample
    #[must_use]
    pub const fn last(&self) -> Option<SensorSample> {
        self.last
    }

    /// Forget the cached sample
    pub fn reset(&mut self) {
        self.last = None;
    }
}
