#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod apex;
pub mod device;
pub mod fifo;
pub mod interface;
pub mod interrupt;
pub mod registers;
pub mod sensors;

// Re-export main types
pub use apex::{R2wEvent, Step};
pub use device::Icm42688Driver;
pub use fifo::{FifoFormat, FifoPacket, FifoTemperature};
pub use interface::SpiInterface;
pub use interrupt::{ApexStatus, InterruptRoute, WomStatus};
pub use sensors::{
    AccelDataG, AccelFullScale, AccelOdr, AxisData, Calibration, GyroDataDps, GyroFullScale,
    GyroOdr, Sensor,
};

/// Expected value of `WHO_AM_I` register
pub const WHO_AM_I_VALUE: u8 = 0x47;

/// Register bank identifiers
///
/// Every register outside the bank-select register itself lives in one of
/// five banks. The driver re-selects the bank before each operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bank {
    /// Bank 0 - Configuration, sensor data, FIFO and interrupt status
    Bank0 = 0,
    /// Bank 1 - Gyroscope static configuration and interface config
    Bank1 = 1,
    /// Bank 2 - Accelerometer static configuration
    Bank2 = 2,
    /// Bank 3 - Clock divider
    Bank3 = 3,
    /// Bank 4 - APEX configuration, interrupt routing and user offsets
    Bank4 = 4,
}

impl Bank {
    /// Convert a raw bank number (0-4) into a [`Bank`]
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Bank0),
            1 => Some(Self::Bank1),
            2 => Some(Self::Bank2),
            3 => Some(Self::Bank3),
            4 => Some(Self::Bank4),
            _ => None,
        }
    }
}

/// Driver errors
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// Argument out of range (bank, FIFO format, burst length, field value, mode)
    InvalidArgument,
    /// FIFO read attempted before a packet format was configured
    NotConfigured,
    /// Feature is not implemented by this driver
    NotImplemented,
    /// Invalid `WHO_AM_I` register value (contains the actual value read)
    InvalidDevice(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}
