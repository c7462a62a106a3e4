//! Register definitions for the ADXL345
//!
//! The ADXL345 exposes a flat, byte-wide register file. Addresses that the
//! driver touches are available twice:
//! - as plain constants in [`addr`], used by the raw block reads of the
//!   sample pipeline and by anything that needs the symbolic map
//! - as typed registers generated by `device-driver`, used for the
//!   configuration writes performed while attaching and detaching
//!
//! Reference: ADXL345 datasheet, Rev. G, Table 19 "Register Map".

/// Symbolic register addresses
pub mod addr {
    /// Device ID (reads 0xE5)
    pub const DEVID: u8 = 0x00;

    /// X-axis offset trim
    pub const OFSX: u8 = 0x1E;
    /// Y-axis offset trim
    pub const OFSY: u8 = 0x1F;
    /// Z-axis offset trim
    pub const OFSZ: u8 = 0x20;

    /// Output data rate and low power control
    pub const BW_RATE: u8 = 0x2C;
    /// Power-saving features control, holds the measure bit
    pub const POWER_CTL: u8 = 0x2D;
    /// On-chip interrupt enable control
    pub const INT_ENABLE: u8 = 0x2E;
    /// Data format control
    pub const DATA_FORMAT: u8 = 0x31;

    /// X-axis data, low byte
    pub const DATAX0: u8 = 0x32;
    /// X-axis data, high byte
    pub const DATAX1: u8 = 0x33;
    /// Y-axis data, low byte
    pub const DATAY0: u8 = 0x34;
    /// Y-axis data, high byte
    pub const DATAY1: u8 = 0x35;
    /// Z-axis data, low byte
    pub const DATAZ0: u8 = 0x36;
    /// Z-axis data, high byte
    pub const DATAZ1: u8 = 0x37;

    /// FIFO control
    pub const FIFO_CTL: u8 = 0x38;
}

device_driver::create_device!(
    device_name: Adxl345,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = LE;
        }

        /// DEVID - Device ID (0x00)
        /// Expected value: 0xE5
        register DevId {
            const ADDRESS = 0x00;
            const SIZE_BITS = 8;

            /// Fixed device identifier
            devid: uint = 0..8,
        },

        /// BW_RATE - Data Rate and Power Mode Control (0x2C)
        register BwRate {
            const ADDRESS = 0x2C;
            const SIZE_BITS = 8;

            /// Output data rate code (0x0A = 100 Hz)
            rate: uint = 0..4,
            /// Reduced power operation
            low_power: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// POWER_CTL - Power-Saving Features Control (0x2D)
        register PowerCtl {
            const ADDRESS = 0x2D;
            const SIZE_BITS = 8;

            /// Reading frequency while asleep
            wakeup: uint = 0..2,
            /// Sleep mode
            sleep: bool = 2,
            /// Measurement mode (standby when cleared)
            measure: bool = 3,
            /// Automatic sleep on inactivity
            auto_sleep: bool = 4,
            /// Link activity and inactivity detection
            link: bool = 5,
            reserved_7_6: uint = 6..8,
        },

        /// INT_ENABLE - Interrupt Enable Control (0x2E)
        register IntEnable {
            const ADDRESS = 0x2E;
            const SIZE_BITS = 8;

            /// FIFO overrun
            overrun: bool = 0,
            /// FIFO watermark
            watermark: bool = 1,
            /// Free fall detection
            free_fall: bool = 2,
            /// Inactivity detection
            inactivity: bool = 3,
            /// Activity detection
            activity: bool = 4,
            /// Double tap detection
            double_tap: bool = 5,
            /// Single tap detection
            single_tap: bool = 6,
            /// New data available
            data_ready: bool = 7,
        },

        /// DATA_FORMAT - Data Format Control (0x31)
        register DataFormat {
            const ADDRESS = 0x31;
            const SIZE_BITS = 8;

            /// g range (0 = 2g, 1 = 4g, 2 = 8g, 3 = 16g)
            range: uint = 0..2,
            /// Left-justified (MSB) output
            justify: bool = 2,
            /// Full resolution (4 mg/LSB at every range)
            full_res: bool = 3,
            reserved_4: uint = 4..5,
            /// Interrupts active low
            int_invert: bool = 5,
            /// 3-wire SPI mode
            spi: bool = 6,
            /// Self-test force
            self_test: bool = 7,
        },

        /// FIFO_CTL - FIFO Control (0x38)
        register FifoCtl {
            const ADDRESS = 0x38;
            const SIZE_BITS = 8;

            /// Watermark / trigger sample count
            samples: uint = 0..5,
            /// Trigger event routed to INT2
            trigger: bool = 5,
            /// FIFO mode (0 = bypass)
            fifo_mode: uint = 6..8,
        }
    }
);
