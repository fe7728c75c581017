//! Register definitions for the ICM-42688-P
//!
//! The ICM-42688-P uses a bank-switching architecture: the meaning of an address
//! depends on the bank selected through `REG_BANK_SEL` (0x76), which is present
//! at the same address in every bank.
//!
//! ## Bank Architecture
//! - **Bank 0**: Configuration, sensor data, FIFO, interrupt status
//! - **Bank 1**: Gyroscope static configuration
//! - **Bank 2**: Accelerometer static configuration
//! - **Bank 3**: Clock divider
//! - **Bank 4**: APEX configuration, interrupt routing, user offsets
//!
//! Structured Bank 0 registers are described with `device-driver` below. The raw
//! address tables in [`bank0`] and [`bank4`] cover the registers that are driven
//! by fixed register/value sequences.

device_driver::create_device!(
    device_name: Icm42688,
    dsl: {
        config {
            type RegisterAddressType = u8;
            type DefaultByteOrder = BE;
        }

        /// DEVICE_CONFIG - Device Configuration (Bank 0, 0x11)
        register DeviceConfig {
            const ADDRESS = 0x11;
            const SIZE_BITS = 8;

            /// Software reset (self-clearing)
            soft_reset_config: bool = 0,
            reserved_3_1: uint = 1..4,
            /// SPI mode selection (0 = mode 0/3, 1 = mode 1/2)
            spi_mode: bool = 4,
            reserved_7_5: uint = 5..8,
        },

        /// FIFO_CONFIG - FIFO Mode (Bank 0, 0x16)
        register FifoConfig {
            const ADDRESS = 0x16;
            const SIZE_BITS = 8;

            reserved_5_0: uint = 0..6,
            /// 00 = bypass, 01 = stream-to-FIFO, 1x = stop-on-full
            fifo_mode: uint = 6..8,
        },

        /// FIFO_COUNTH/FIFO_COUNTL - FIFO Byte Count (Bank 0, 0x2E)
        register FifoCount {
            const ADDRESS = 0x2E;
            const SIZE_BITS = 16;

            /// Bytes (or records) currently stored in the FIFO
            fifo_count: uint = 0..16,
        },

        /// SIGNAL_PATH_RESET - Signal Path Reset (Bank 0, 0x4B)
        register SignalPathReset {
            const ADDRESS = 0x4B;
            const SIZE_BITS = 8;

            reserved_0: uint = 0..1,
            /// Flush the FIFO
            fifo_flush: bool = 1,
            /// Latch the timestamp counter
            tmst_strobe: bool = 2,
            /// Restart the ODR counter and signal path
            abort_and_reset: bool = 3,
            reserved_4: uint = 4..5,
            /// Reset DMP memory
            dmp_mem_reset_en: bool = 5,
            /// Start the DMP
            dmp_init_en: bool = 6,
            reserved_7: uint = 7..8,
        },

        /// PWR_MGMT0 - Power Management (Bank 0, 0x4E)
        register PwrMgmt0 {
            const ADDRESS = 0x4E;
            const SIZE_BITS = 8;

            /// Accelerometer mode (0/1 = off, 2 = low power, 3 = low noise)
            accel_mode: uint = 0..2,
            /// Gyroscope mode (0 = off, 1 = standby, 3 = low noise)
            gyro_mode: uint = 2..4,
            /// Keep RC oscillator on while sensors are off
            idle: bool = 4,
            /// Disable temperature sensor
            temp_dis: bool = 5,
            reserved_7_6: uint = 6..8,
        },

        /// GYRO_CONFIG0 - Gyroscope Full Scale and ODR (Bank 0, 0x4F)
        register GyroConfig0 {
            const ADDRESS = 0x4F;
            const SIZE_BITS = 8;

            /// Output data rate code
            gyro_odr: uint = 0..4,
            reserved_4: uint = 4..5,
            /// Full-scale select (0 = ±2000dps ... 7 = ±15.625dps)
            gyro_fs_sel: uint = 5..8,
        },

        /// ACCEL_CONFIG0 - Accelerometer Full Scale and ODR (Bank 0, 0x50)
        register AccelConfig0 {
            const ADDRESS = 0x50;
            const SIZE_BITS = 8;

            /// Output data rate code
            accel_odr: uint = 0..4,
            reserved_4: uint = 4..5,
            /// Full-scale select (0 = ±16g ... 3 = ±2g)
            accel_fs_sel: uint = 5..8,
        },

        /// WHO_AM_I - Device ID Register (Bank 0, 0x75)
        /// Expected value: 0x47
        register WhoAmI {
            const ADDRESS = 0x75;
            const SIZE_BITS = 8;

            /// Device ID (should read 0x47)
            who_am_i: uint = 0..8,
        },

        /// REG_BANK_SEL - Register Bank Selection (all banks, 0x76)
        register RegBankSel {
            const ADDRESS = 0x76;
            const SIZE_BITS = 8;

            /// Selected bank (0-4)
            bank_sel: uint = 0..3,
            reserved_7_3: uint = 3..8,
        }
    }
);

// Re-export commonly used types for convenience
pub use Icm42688 as RegisterDevice;

/// Bank-select register address, identical in every bank
pub const REG_BANK_SEL: u8 = 0x76;

/// Bank 0 register addresses
#[allow(missing_docs)]
pub mod bank0 {
    pub const DEVICE_CONFIG: u8 = 0x11;
    pub const FIFO_CONFIG: u8 = 0x16;
    pub const TEMP_DATA1: u8 = 0x1D;
    pub const ACCEL_DATA_X1: u8 = 0x1F;
    pub const GYRO_DATA_X1: u8 = 0x25;
    pub const FIFO_COUNTH: u8 = 0x2E;
    pub const FIFO_DATA: u8 = 0x30;
    pub const INT_STATUS2: u8 = 0x37;
    pub const INT_STATUS3: u8 = 0x38;
    pub const SIGNAL_PATH_RESET: u8 = 0x4B;
    pub const INTF_CONFIG1: u8 = 0x4D;
    pub const PWR_MGMT0: u8 = 0x4E;
    pub const GYRO_CONFIG0: u8 = 0x4F;
    pub const ACCEL_CONFIG0: u8 = 0x50;
    pub const GYRO_ACCEL_CONFIG0: u8 = 0x52;
    pub const ACCEL_CONFIG1: u8 = 0x53;
    pub const APEX_CONFIG0: u8 = 0x56;
    pub const SMD_CONFIG: u8 = 0x57;
    pub const FIFO_CONFIG1: u8 = 0x5F;
    pub const INT_SOURCE1: u8 = 0x66;
    pub const INT_SOURCE4: u8 = 0x69;
    pub const WHO_AM_I: u8 = 0x75;
}

/// Bank 4 register addresses
#[allow(missing_docs)]
pub mod bank4 {
    pub const APEX_CONFIG4: u8 = 0x43;
    pub const APEX_CONFIG5: u8 = 0x44;
    pub const APEX_CONFIG6: u8 = 0x45;
    pub const APEX_CONFIG7: u8 = 0x46;
    pub const APEX_CONFIG8: u8 = 0x47;
    pub const ACCEL_WOM_X_THR: u8 = 0x4A;
    pub const ACCEL_WOM_Y_THR: u8 = 0x4B;
    pub const ACCEL_WOM_Z_THR: u8 = 0x4C;
    pub const INT_SOURCE6: u8 = 0x4D;
    pub const INT_SOURCE7: u8 = 0x4E;
    /// First of the nine user offset registers (`OFFSET_USER0`..`OFFSET_USER8`)
    pub const OFFSET_USER0: u8 = 0x77;
    pub const OFFSET_USER4: u8 = 0x7B;
}
