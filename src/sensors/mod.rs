//! Sensor modules for the ICM-42688-P
//!
//! This module provides types, enums, and configuration structures for each sensor
//! in the ICM-42688-P:
//! - Accelerometer (3-axis)
//! - Gyroscope (3-axis)
//!
//! All sensor operations are performed through methods on `Icm42688Driver`.

pub mod accelerometer;
pub mod gyroscope;

use crate::registers::bank0;

// Re-export main types
pub use accelerometer::{AccelDataG, AccelFullScale, AccelOdr};
pub use gyroscope::{GyroDataDps, GyroFullScale, GyroOdr};

/// Number of user offset registers (`OFFSET_USER0`..`OFFSET_USER8`)
pub const USER_OFFSET_REGISTERS: usize = 9;

/// Index of the offset register shared between gyro Z and accel X
pub const SHARED_OFFSET_INDEX: usize = 4;

/// Inertial sensor selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sensor {
    /// Accelerometer
    Accel,
    /// Gyroscope
    Gyro,
}

impl Sensor {
    /// Bank 0 register holding the X-axis high byte of this sensor's output
    #[must_use]
    pub const fn data_register(self) -> u8 {
        match self {
            Self::Accel => bank0::ACCEL_DATA_X1,
            Self::Gyro => bank0::GYRO_DATA_X1,
        }
    }
}

/// Raw 3-axis sample (16-bit two's complement)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisData {
    /// X-axis (raw)
    pub x: i16,
    /// Y-axis (raw)
    pub y: i16,
    /// Z-axis (raw)
    pub z: i16,
}

impl AxisData {
    /// Assemble a sample from six big-endian bytes in X, Y, Z order
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([bytes[0], bytes[1]]),
            y: i16::from_be_bytes([bytes[2], bytes[3]]),
            z: i16::from_be_bytes([bytes[4], bytes[5]]),
        }
    }
}

/// Per-axis calibration offsets for one sensor
///
/// Offsets are 12-bit signed quantities stored in 16-bit fields. Only the low
/// 12 bits reach the device when the offsets are packed into `OFFSET_USERx`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Offset for X-axis
    pub offset_x: i16,
    /// Offset for Y-axis
    pub offset_y: i16,
    /// Offset for Z-axis
    pub offset_z: i16,
}

impl Calibration {
    /// Create a calibration from explicit offsets
    #[must_use]
    pub const fn new(offset_x: i16, offset_y: i16, offset_z: i16) -> Self {
        Self {
            offset_x,
            offset_y,
            offset_z,
        }
    }

    /// Apply calibration to a raw sample
    #[must_use]
    pub const fn apply(&self, raw: AxisData) -> AxisData {
        AxisData {
            x: raw.x.saturating_sub(self.offset_x),
            y: raw.y.saturating_sub(self.offset_y),
            z: raw.z.saturating_sub(self.offset_z),
        }
    }
}

impl From<AxisData> for Calibration {
    fn from(mean: AxisData) -> Self {
        Self::new(mean.x, mean.y, mean.z)
    }
}

/// Split an offset into its low byte and its 4-bit high nibble
#[allow(clippy::cast_sign_loss)]
const fn split_offset(offset: i16) -> (u8, u8) {
    let bits = (offset as u16) & 0x0FFF;
    ((bits & 0xFF) as u8, (bits >> 8) as u8)
}

/// Pack accelerometer and gyroscope offsets into `OFFSET_USER0..8`
///
/// | reg | contents                         |
/// |-----|----------------------------------|
/// | 0   | gyro X [7:0]                     |
/// | 1   | gyro Y [11:8] : gyro X [11:8]    |
/// | 2   | gyro Y [7:0]                     |
/// | 3   | gyro Z [7:0]                     |
/// | 4   | accel X [11:8] : gyro Z [11:8]   |
/// | 5   | accel X [7:0]                    |
/// | 6   | accel Y [7:0]                    |
/// | 7   | accel Z [11:8] : accel Y [11:8]  |
/// | 8   | accel Z [7:0]                    |
#[must_use]
pub const fn pack_user_offsets(
    accel: &Calibration,
    gyro: &Calibration,
) -> [u8; USER_OFFSET_REGISTERS] {
    let (gx_lo, gx_hi) = split_offset(gyro.offset_x);
    let (gy_lo, gy_hi) = split_offset(gyro.offset_y);
    let (gz_lo, gz_hi) = split_offset(gyro.offset_z);
    let (ax_lo, ax_hi) = split_offset(accel.offset_x);
    let (ay_lo, ay_hi) = split_offset(accel.offset_y);
    let (az_lo, az_hi) = split_offset(accel.offset_z);

    [
        gx_lo,
        (gy_hi << 4) | gx_hi,
        gy_lo,
        gz_lo,
        (ax_hi << 4) | gz_hi,
        ax_lo,
        ay_lo,
        (az_hi << 4) | ay_hi,
        az_lo,
    ]
}
