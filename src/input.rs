//! Input event boundary
//!
//! Decoded samples leave the driver as absolute-axis events followed by a
//! synchronisation marker, the shape used by evdev-style input layers. The
//! consumer side is abstracted by [`EventSink`]; [`EventReporter`] is the
//! driver's half that turns a [`SensorSample`] into those events.

use crate::sample::SensorSample;
use crate::{AXIS_MAX, DEVICE_NAME, DRIVER_NAME};

/// Absolute axis identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// `ABS_X`
    X = 0x00,
    /// `ABS_Y`
    Y = 0x01,
    /// `ABS_Z`
    Z = 0x02,
}

impl Axis {
    /// All axes in reporting order
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Event code of the axis
    #[must_use]
    pub const fn code(self) -> u16 {
        self as u16
    }
}

/// Bus the input device sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusType {
    /// `BUS_I2C`
    I2c = 0x18,
}

/// Parameters of one absolute axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AbsInfo {
    /// Minimum reported value
    pub minimum: i32,
    /// Maximum reported value
    pub maximum: i32,
    /// Noise filter threshold
    pub fuzz: i32,
    /// Dead zone around zero
    pub flat: i32,
}

impl AbsInfo {
    /// The range declared for each accelerometer axis
    pub const ACCEL: Self = Self {
        minimum: -AXIS_MAX,
        maximum: AXIS_MAX,
        fuzz: 0,
        flat: 0,
    };

    /// Clamp `value` into `[minimum, maximum]`
    #[must_use]
    pub const fn clamp(&self, value: i32) -> i32 {
        if value < self.minimum {
            self.minimum
        } else if value > self.maximum {
            self.maximum
        } else {
            value
        }
    }
}

/// Identity of the input device presented to the consumer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputId {
    /// Human readable device name
    pub name: &'static str,
    /// Bus type
    pub bus: BusType,
    /// Name of the parent (physical) device
    pub parent: &'static str,
    /// 7-bit I2C address of the parent device
    pub address: u8,
}

impl InputId {
    /// Identity of an ADXL345 at `address`
    #[must_use]
    pub const fn adxl345(address: u8) -> Self {
        Self {
            name: DEVICE_NAME,
            bus: BusType::I2c,
            parent: DRIVER_NAME,
            address,
        }
    }
}

/// The consumer of input events
///
/// A sink goes through `allocate` → (`set_identity`, `set_abs_params`) →
/// `register` while the driver attaches, and `unregister` when it detaches.
/// `free` releases an allocation that never got registered. Once registered
/// the consumer opens and closes the device through
/// [`Adxl345::open`](crate::Adxl345::open) and
/// [`Adxl345::close`](crate::Adxl345::close).
pub trait EventSink {
    /// Error returned by allocation or registration
    type Error: core::fmt::Debug;

    /// Reserve the consumer-side representation of the device
    ///
    /// # Errors
    ///
    /// Returns an error if the consumer is out of resources.
    fn allocate(&mut self) -> Result<(), Self::Error>;

    /// Describe the device
    fn set_identity(&mut self, id: &InputId);

    /// Declare an absolute axis
    fn set_abs_params(&mut self, axis: Axis, info: AbsInfo);

    /// Make the device visible to the consumer
    ///
    /// # Errors
    ///
    /// Returns an error if the consumer rejects the device.
    fn register(&mut self) -> Result<(), Self::Error>;

    /// Withdraw a registered device and release its allocation
    fn unregister(&mut self);

    /// Release an allocation that was never registered
    fn free(&mut self);

    /// Report an absolute axis value
    fn report_abs(&mut self, axis: Axis, value: i32);

    /// Mark the end of a frame
    fn sync(&mut self);
}

/// Pushes samples to an [`EventSink`]
pub struct EventReporter<S> {
    sink: S,
    abs: AbsInfo,
}

impl<S: EventSink> EventReporter<S> {
    /// Wrap a sink, reporting within [`AbsInfo::ACCEL`]
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            abs: AbsInfo::ACCEL,
        }
    }

    /// Declared parameters of every axis
    pub const fn abs_info(&self) -> AbsInfo {
        self.abs
    }

    /// Describe the device and declare its three axes on the sink
    pub fn describe(&mut self, id: &InputId) {
        self.sink.set_identity(id);
        for axis in Axis::ALL {
            self.sink.set_abs_params(axis, self.abs);
        }
    }

    /// Emit one frame: X, Y and Z clamped to the declared range, then a sync
    pub fn report(&mut self, sample: &SensorSample) {
        let values = [sample.x, sample.y, sample.z];
        for (axis, value) in Axis::ALL.into_iter().zip(values) {
            self.sink.report_abs(axis, self.abs.clamp(i32::from(value)));
        }
        self.sink.sync();
    }

    /// Borrow the sink
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the sink
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
