//! FIFO (First In First Out) packet configuration
//!
//! The ICM-42688-P streams sensor data into a 2 KiB FIFO as fixed-layout
//! packets. Each packet starts with a header byte; the rest of the layout is
//! selected by the `FIFO_CONFIG1` enable bits. The driver supports the four
//! datasheet packet structures:
//!
//! | format | contents                                          | bytes |
//! |--------|---------------------------------------------------|-------|
//! | 1      | header, accel, 8-bit temperature                  | 8     |
//! | 2      | header, gyro, 8-bit temperature                   | 8     |
//! | 3      | header, accel, gyro, 8-bit temperature, timestamp | 16    |
//! | 4      | format 3 with 16-bit temperature and 20-bit data  | 20    |
//!
//! # Example
//!
//! ```ignore
//! # use icm42688::{Icm42688Driver, FifoFormat};
//! # let mut imu: Icm42688Driver<_> = todo!();
//! imu.configure_fifo(FifoFormat::AccelGyroTempTimestamp)?;
//!
//! let packet = imu.read_fifo()?;
//! if let Some(accel) = packet.accel() {
//!     // ...
//! }
//! # Ok::<(), icm42688::Error<()>>(())
//! ```

pub mod parser;

pub use parser::{FifoPacket, FifoTemperature};

/// Longest packet produced by any supported format
pub const MAX_PACKET_LEN: usize = 20;

/// `FIFO_CONFIG` value selecting stream-to-FIFO mode (`fifo_mode` = 0b01)
pub const FIFO_MODE_STREAM: u8 = 0b01;

/// FIFO packet structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoFormat {
    /// Accelerometer and 8-bit temperature
    AccelTemp = 1,
    /// Gyroscope and 8-bit temperature
    GyroTemp = 2,
    /// Accelerometer, gyroscope, 8-bit temperature and timestamp
    AccelGyroTempTimestamp = 3,
    /// Accelerometer, gyroscope, 16-bit temperature, timestamp and 20-bit extension
    HighResolution = 4,
}

impl FifoFormat {
    /// Packet length in bytes, header included
    #[must_use]
    pub const fn packet_len(self) -> usize {
        match self {
            Self::AccelTemp | Self::GyroTemp => 8,
            Self::AccelGyroTempTimestamp => 16,
            Self::HighResolution => MAX_PACKET_LEN,
        }
    }

    /// `FIFO_CONFIG1` enable bits for this format
    ///
    /// Bit 0 accel, bit 1 gyro, bit 2 temperature, bit 3 timestamp/FSYNC,
    /// bit 4 high resolution.
    #[must_use]
    pub const fn config1_bits(self) -> u8 {
        match self {
            Self::AccelTemp => 0b0_0101,
            Self::GyroTemp => 0b0_0110,
            Self::AccelGyroTempTimestamp => 0b0_1111,
            Self::HighResolution => 0b1_1111,
        }
    }

    /// Whether packets carry accelerometer data
    #[must_use]
    pub const fn has_accel(self) -> bool {
        !matches!(self, Self::GyroTemp)
    }

    /// Whether packets carry gyroscope data
    #[must_use]
    pub const fn has_gyro(self) -> bool {
        !matches!(self, Self::AccelTemp)
    }
}

impl TryFrom<u8> for FifoFormat {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::AccelTemp),
            2 => Ok(Self::GyroTemp),
            3 => Ok(Self::AccelGyroTempTimestamp),
            4 => Ok(Self::HighResolution),
            other => Err(other),
        }
    }
}
