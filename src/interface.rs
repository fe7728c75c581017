//! SPI bus interface for the ICM-42688-P
//!
//! This module implements the `device-driver` register traits on top of an
//! `embedded-hal` [`SpiDevice`](embedded_hal::spi::SpiDevice).
//!
//! ## Framing
//!
//! Every transaction starts with a command byte: bit 7 is the read flag and
//! bits [6:0] are the register address. On reads the device clocks out one
//! don't-care byte while the command is being shifted in, so a read of `n`
//! bytes is a full-duplex exchange of `n + 1` bytes whose first received byte
//! is discarded.

use device_driver::RegisterInterface;
use embedded_hal::spi::Operation;

/// Read flag in the SPI command byte
pub const READ_FLAG: u8 = 0x80;

/// Register address bits in the SPI command byte
pub const ADDRESS_MASK: u8 = 0x7F;

/// Largest payload exchanged through the on-stack transfer buffer
///
/// Longer transfers fall back to a two-operation transaction.
pub const MAX_TRANSFER_LEN: usize = 32;

/// Filler clocked out after a read command
const DUMMY_BYTE: u8 = 0xFF;

/// Build the command byte for a register access
#[must_use]
pub const fn command_byte(address: u8, read: bool) -> u8 {
    if read {
        READ_FLAG | (address & ADDRESS_MASK)
    } else {
        address & ADDRESS_MASK
    }
}

/// SPI interface for the ICM-42688-P
///
/// # Note on Chip Select
///
/// This interface uses the `SpiDevice` trait from `embedded-hal`, which owns the
/// chip select (CS) line and asserts it for exactly one transaction. A
/// conforming implementation deasserts CS even when the transfer fails, so the
/// driver never has to manage the pin itself.
///
/// If using `embedded-hal-bus`, you would typically create an `SpiDevice` like:
/// ```ignore
/// let spi_device = embedded_hal_bus::spi::ExclusiveDevice::new(spi_bus, cs_pin, delay)?;
/// let interface = SpiInterface::new(spi_device);
/// ```
///
/// `&mut T` implements `SpiDevice` whenever `T` does, so the interface can also
/// borrow a device owned by the caller.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Create a new SPI interface with the given SPI device
    ///
    /// The SPI device should already include chip select management via the
    /// `SpiDevice` trait (e.g., using `embedded_hal_bus::spi::ExclusiveDevice`).
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Consume the interface and return the SPI device
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI, E> RegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal::spi::SpiDevice<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        let command = command_byte(address, true);

        if read_data.len() > MAX_TRANSFER_LEN {
            return self
                .spi
                .transaction(&mut [Operation::Write(&[command]), Operation::Read(read_data)]);
        }

        let mut buffer = [DUMMY_BYTE; MAX_TRANSFER_LEN + 1];
        let frame = &mut buffer[..=read_data.len()];
        frame[0] = command;
        self.spi.transfer_in_place(frame)?;

        // frame[0] was clocked in while the command went out
        read_data.copy_from_slice(&frame[1..]);
        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        let command = command_byte(address, false);

        if write_data.len() > MAX_TRANSFER_LEN {
            return self
                .spi
                .transaction(&mut [Operation::Write(&[command]), Operation::Write(write_data)]);
        }

        let mut buffer = [0u8; MAX_TRANSFER_LEN + 1];
        buffer[0] = command;
        buffer[1..=write_data.len()].copy_from_slice(write_data);

        self.spi.write(&buffer[..=write_data.len()])
    }
}

#[cfg(feature = "async")]
impl<SPI, E> device_driver::AsyncRegisterInterface for SpiInterface<SPI>
where
    SPI: embedded_hal_async::spi::SpiDevice<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    async fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in read_data.len() for SPI
        let command = command_byte(address, true);

        if read_data.len() > MAX_TRANSFER_LEN {
            return self
                .spi
                .transaction(&mut [Operation::Write(&[command]), Operation::Read(read_data)])
                .await;
        }

        let mut buffer = [DUMMY_BYTE; MAX_TRANSFER_LEN + 1];
        let frame = &mut buffer[..=read_data.len()];
        frame[0] = command;
        self.spi.transfer_in_place(frame).await?;

        read_data.copy_from_slice(&frame[1..]);
        Ok(())
    }

    async fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for SPI
        let command = command_byte(address, false);

        if write_data.len() > MAX_TRANSFER_LEN {
            return self
                .spi
                .transaction(&mut [Operation::Write(&[command]), Operation::Write(write_data)])
                .await;
        }

        let mut buffer = [0u8; MAX_TRANSFER_LEN + 1];
        buffer[0] = command;
        buffer[1..=write_data.len()].copy_from_slice(write_data);

        self.spi.write(&buffer[..=write_data.len()]).await
    }
}
