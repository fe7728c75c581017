//! FIFO packet decoding
//!
//! Offsets below are relative to the start of the packet (byte 0 is the
//! header):
//!
//! | format | accel | gyro  | temp          | timestamp | extension |
//! |--------|-------|-------|---------------|-----------|-----------|
//! | 1      | 1-6   | -     | 7             | -         | -         |
//! | 2      | -     | 1-6   | 7             | -         | -         |
//! | 3      | 1-6   | 7-12  | 13            | 14-15     | -         |
//! | 4      | 1-6   | 7-12  | 13-14 (16bit) | 15-16     | 17-19     |

use super::FifoFormat;
use crate::sensors::AxisData;

/// Header bit set when the FIFO had no data to return
pub const HEADER_EMPTY: u8 = 0x80;

/// Temperature sample carried in a FIFO packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoTemperature {
    /// 8-bit sample (formats 1-3)
    Coarse(i8),
    /// 16-bit sample (format 4)
    Fine(i16),
}

impl FifoTemperature {
    /// Convert to degrees Celsius
    #[must_use]
    pub fn celsius(self) -> f32 {
        match self {
            Self::Coarse(raw) => f32::from(raw) / 2.07 + 25.0,
            Self::Fine(raw) => f32::from(raw) / 132.48 + 25.0,
        }
    }
}

/// One decoded FIFO packet
///
/// Fields absent from the configured format are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoPacket {
    /// Packet header byte
    pub header: u8,
    /// Raw accelerometer bytes (X, Y, Z big-endian)
    pub accel: Option<[u8; 6]>,
    /// Raw gyroscope bytes (X, Y, Z big-endian)
    pub gyro: Option<[u8; 6]>,
    /// Temperature sample
    pub temperature: Option<FifoTemperature>,
    /// 16-bit timestamp
    pub timestamp: Option<u16>,
    /// 20-bit extension bytes, one per axis
    ///
    /// Bits [7:4] extend the accelerometer axis, bits [3:0] the gyroscope axis.
    pub extension: Option<[u8; 3]>,
}

fn take<const N: usize>(bytes: &[u8], start: usize) -> Option<[u8; N]> {
    bytes.get(start..start + N)?.try_into().ok()
}

impl FifoPacket {
    /// Decode one packet laid out according to `format`
    ///
    /// Returns `None` when `bytes` is shorter than [`FifoFormat::packet_len`].
    /// Trailing bytes are ignored.
    #[must_use]
    pub fn decode(format: FifoFormat, bytes: &[u8]) -> Option<Self> {
        if bytes.len() < format.packet_len() {
            return None;
        }

        let header = bytes[0];
        let packet = match format {
            FifoFormat::AccelTemp => Self {
                header,
                accel: take(bytes, 1),
                gyro: None,
                temperature: Some(FifoTemperature::Coarse(i8::from_be_bytes([bytes[7]]))),
                timestamp: None,
                extension: None,
            },
            FifoFormat::GyroTemp => Self {
                header,
                accel: None,
                gyro: take(bytes, 1),
                temperature: Some(FifoTemperature::Coarse(i8::from_be_bytes([bytes[7]]))),
                timestamp: None,
                extension: None,
            },
            FifoFormat::AccelGyroTempTimestamp => Self {
                header,
                accel: take(bytes, 1),
                gyro: take(bytes, 7),
                temperature: Some(FifoTemperature::Coarse(i8::from_be_bytes([bytes[13]]))),
                timestamp: Some(u16::from_be_bytes([bytes[14], bytes[15]])),
                extension: None,
            },
            FifoFormat::HighResolution => Self {
                header,
                accel: take(bytes, 1),
                gyro: take(bytes, 7),
                temperature: Some(FifoTemperature::Fine(i16::from_be_bytes([
                    bytes[13], bytes[14],
                ]))),
                timestamp: Some(u16::from_be_bytes([bytes[15], bytes[16]])),
                extension: take(bytes, 17),
            },
        };

        Some(packet)
    }

    /// Whether the header flags an empty FIFO
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.header & HEADER_EMPTY != 0
    }

    /// Accelerometer sample, if present
    #[must_use]
    pub fn accel(&self) -> Option<AxisData> {
        self.accel.map(AxisData::from_be_bytes)
    }

    /// Gyroscope sample, if present
    #[must_use]
    pub fn gyro(&self) -> Option<AxisData> {
        self.gyro.map(AxisData::from_be_bytes)
    }

    /// 20-bit accelerometer sample (format 4 only), as `[x, y, z]`
    #[must_use]
    pub fn accel_high_res(&self) -> Option<[i32; 3]> {
        let base = self.accel()?;
        let ext = self.extension?;
        Some(widen(base, [ext[0] >> 4, ext[1] >> 4, ext[2] >> 4]))
    }

    /// 20-bit gyroscope sample (format 4 only), as `[x, y, z]`
    #[must_use]
    pub fn gyro_high_res(&self) -> Option<[i32; 3]> {
        let base = self.gyro()?;
        let ext = self.extension?;
        Some(widen(base, [ext[0] & 0x0F, ext[1] & 0x0F, ext[2] & 0x0F]))
    }
}

fn widen(base: AxisData, low: [u8; 3]) -> [i32; 3] {
    [
        (i32::from(base.x) << 4) | i32::from(low[0]),
        (i32::from(base.y) << 4) | i32::from(low[1]),
        (i32::from(base.z) << 4) | i32::from(low[2]),
    ]
}
