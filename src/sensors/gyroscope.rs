//! Gyroscope sensor types and configuration

/// Gyroscope full-scale range (`GYRO_CONFIG0.gyro_fs_sel`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroFullScale {
    /// ±2000°/s range
    Dps2000 = 0,
    /// ±1000°/s range
    Dps1000 = 1,
    /// ±500°/s range
    Dps500 = 2,
    /// ±250°/s range
    Dps250 = 3,
    /// ±125°/s range
    Dps125 = 4,
    /// ±62.5°/s range
    Dps62_5 = 5,
    /// ±31.25°/s range
    Dps31_25 = 6,
    /// ±15.625°/s range
    Dps15_625 = 7,
}

impl GyroFullScale {
    /// Get the sensitivity in LSB/(°/s)
    #[must_use]
    pub const fn sensitivity(self) -> f32 {
        match self {
            Self::Dps2000 => 16.4,
            Self::Dps1000 => 32.8,
            Self::Dps500 => 65.5,
            Self::Dps250 => 131.0,
            Self::Dps125 => 262.0,
            Self::Dps62_5 => 524.3,
            Self::Dps31_25 => 1048.6,
            Self::Dps15_625 => 2097.2,
        }
    }

    /// Get the maximum value in °/s
    #[must_use]
    pub const fn max_value(self) -> f32 {
        match self {
            Self::Dps2000 => 2000.0,
            Self::Dps1000 => 1000.0,
            Self::Dps500 => 500.0,
            Self::Dps250 => 250.0,
            Self::Dps125 => 125.0,
            Self::Dps62_5 => 62.5,
            Self::Dps31_25 => 31.25,
            Self::Dps15_625 => 15.625,
        }
    }
}

impl TryFrom<u8> for GyroFullScale {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Dps2000,
            1 => Self::Dps1000,
            2 => Self::Dps500,
            3 => Self::Dps250,
            4 => Self::Dps125,
            5 => Self::Dps62_5,
            6 => Self::Dps31_25,
            7 => Self::Dps15_625,
            other => return Err(other),
        })
    }
}

/// Gyroscope output data rate (`GYRO_CONFIG0.gyro_odr`)
///
/// Codes 12-14 are reserved on the gyroscope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroOdr {
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
    /// 500 Hz
    Hz500 = 15,
}

impl GyroOdr {
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
            Self::Hz500 => 500.0,
        }
    }
}

impl TryFrom<u8> for GyroOdr {
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
            15 => Self::Hz500,
            other => return Err(other),
        })
    }
}

/// Gyroscope data in degrees per second
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GyroDataDps {
    /// X-axis rotation rate in °/s
    pub x: f32,
    /// Y-axis rotation rate in °/s
    pub y: f32,
    /// Z-axis rotation rate in °/s
    pub z: f32,
}

impl GyroDataDps {
    /// Create from a raw sample and the active full-scale range
    #[must_use]
    pub fn from_raw(raw: super::AxisData, full_scale: GyroFullScale) -> Self {
        let sensitivity = full_scale.sensitivity();
        Self {
            x: f32::from(raw.x) / sensitivity,
            y: f32::from(raw.y) / sensitivity,
            z: f32::from(raw.z) / sensitivity,
        }
    }

    /// Rotation rates in radians per second, as `(x, y, z)`
    #[must_use]
    pub fn to_radians_per_sec(&self) -> (f32, f32, f32) {
        const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;
        (self.x * DEG_TO_RAD, self.y * DEG_TO_RAD, self.z * DEG_TO_RAD)
    }

    /// Get the magnitude of the rotation rate vector
    #[must_use]
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}
