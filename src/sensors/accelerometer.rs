//! Accelerometer sensor types and configuration
//!
//! Provides types, enums, and utility functions for the ICM-42688-P's 3-axis accelerometer.

/// Accelerometer full-scale range (`ACCEL_CONFIG0.accel_fs_sel`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelFullScale {
    /// ±16g range (least sensitive, most range)
    G16 = 0,
    /// ±8g range
    G8 = 1,
    /// ±4g range
    G4 = 2,
    /// ±2g range (most sensitive, least range)
    G2 = 3,
}

impl AccelFullScale {
    /// Get the sensitivity in LSB/g (Least Significant Bit per g)
    ///
    /// This is used to convert raw sensor values to physical units.
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::G16 => 2048.0, // LSB/g
            Self::G8 => 4096.0,  // LSB/g
            Self::G4 => 8192.0,  // LSB/g
            Self::G2 => 16384.0, // LSB/g
        }
    }

    /// Get the maximum value in g
    #[must_use]
    pub const fn max_value(self) -> u8 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }
}

impl TryFrom<u8> for AccelFullScale {
    type Error = u8;

    /// Codes 4-7 are reserved for the accelerometer
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::G16),
            1 => Ok(Self::G8),
            2 => Ok(Self::G4),
            3 => Ok(Self::G2),
            other => Err(other),
        }
    }
}

/// Accelerometer output data rate (`ACCEL_CONFIG0.accel_odr`)
///
/// Rates above 1 kHz require low-noise mode; rates below 12.5 Hz are only
/// available in low-power mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelOdr {
    /// 32 kHz
    Hz32000 = 1,
    /// 16 kHz
    Hz16000 = 2,
    /// 8 kHz
    Hz8000 = 3,
    /// 4 kHz
    Hz4000 = 4,
    /// 2 kHz
    Hz2000 = 5,
    /// 1 kHz (default)
    Hz1000 = 6,
    /// 200 Hz
    Hz200 = 7,
    /// 100 Hz
    Hz100 = 8,
    /// 50 Hz
    Hz50 = 9,
    /// 25 Hz
    Hz25 = 10,
    /// 12.5 Hz
    Hz12_5 = 11,
    /// 6.25 Hz (low power only)
    Hz6_25 = 12,
    /// 3.125 Hz (low power only)
    Hz3_125 = 13,
    /// 1.5625 Hz (low power only)
    Hz1_5625 = 14,
    /// 500 Hz
    Hz500 = 15,
}

impl AccelOdr {
    /// Output data rate in Hz
    #[must_use]
    pub const fn hz(self) -> f32 {
        match self {
            Self::Hz32000 => 32000.0,
            Self::Hz16000 => 16000.0,
            Self::Hz8000 => 8000.0,
            Self::Hz4000 => 4000.0,
            Self::Hz2000 => 2000.0,
            Self::Hz1000 => 1000.0,
            Self::Hz200 => 200.0,
            Self::Hz100 => 100.0,
            Self::Hz50 => 50.0,
            Self::Hz25 => 25.0,
            Self::Hz12_5 => 12.5,
            Self::Hz6_25 => 6.25,
            Self::Hz3_125 => 3.125,
            Self::Hz1_5625 => 1.5625,
            Self::Hz500 => 500.0,
        }
    }

    /// Whether the tap detector can run at this rate
    #[must_use]
    pub const fn supports_tap_detection(self) -> bool {
        matches!(self, Self::Hz200 | Self::Hz500 | Self::Hz1000)
    }
}

impl TryFrom<u8> for AccelOdr {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            1 => Self::Hz32000,
            2 => Self::Hz16000,
            3 => Self::Hz8000,
            4 => Self::Hz4000,
            5 => Self::Hz2000,
            6 => Self::Hz1000,
            7 => Self::Hz200,
            8 => Self::Hz100,
            9 => Self::Hz50,
            10 => Self::Hz25,
            11 => Self::Hz12_5,
            12 => Self::Hz6_25,
            13 => Self::Hz3_125,
            14 => Self::Hz1_5625,
            15 => Self::Hz500,
            other => return Err(other),
        })
    }
}

/// Accelerometer data in physical units (g-force)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelDataG {
    /// X-axis acceleration in g
    pub x: f32,
    /// Y-axis acceleration in g
    pub y: f32,
    /// Z-axis acceleration in g
    pub z: f32,
}

impl AccelDataG {
    /// Create from a raw sample and the active full-scale range
    #[must_use]
    pub fn from_raw(raw: super::AxisData, full_scale: AccelFullScale) -> Self {
        let sensitivity = full_scale.sensitivity();
        Self {
            x: f32::from(raw.x) / sensitivity,
            y: f32::from(raw.y) / sensitivity,
            z: f32::from(raw.z) / sensitivity,
        }
    }

    /// Get the magnitude of the acceleration vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
