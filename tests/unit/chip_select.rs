//! Chip-select handling through `embedded-hal-bus`

use embedded_hal::spi::{ErrorKind, ErrorType, SpiBus};
use embedded_hal_bus::spi::{DeviceError, ExclusiveDevice};
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use icm42688::{Error, Icm42688Driver, SpiInterface};

/// SPI bus whose data transfers always fail
struct FailingBus;

impl ErrorType for FailingBus {
    type Error = ErrorKind;
}

impl SpiBus for FailingBus {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Err(ErrorKind::Other)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn cs_expectations(transactions: usize) -> Vec<PinTransaction> {
    let mut expected = vec![PinTransaction::set(PinState::High)];
    for _ in 0..transactions {
        expected.push(PinTransaction::set(PinState::Low));
        expected.push(PinTransaction::set(PinState::High));
    }
    expected
}

#[test]
fn test_chip_select_released_after_bus_error() {
    let mut cs = PinMock::new(&cs_expectations(1));
    let device = ExclusiveDevice::new_no_delay(FailingBus, cs.clone()).unwrap();
    let mut driver = Icm42688Driver::new(SpiInterface::new(device));

    let result = driver.read_register(0x75);

    assert!(matches!(
        result,
        Err(Error::Bus(DeviceError::Spi(ErrorKind::Other)))
    ));
    cs.done();
}

#[test]
fn test_chip_select_released_after_failed_burst() {
    let mut cs = PinMock::new(&cs_expectations(2));
    let device = ExclusiveDevice::new_no_delay(FailingBus, cs.clone()).unwrap();
    let mut driver = Icm42688Driver::new(SpiInterface::new(device));

    // Both the bank select and the burst fail, each releasing CS
    assert!(driver.write_register(0x76, 0).is_err());
    let mut buffer = [0u8; 6];
    assert!(driver.burst_read(0x1F, &mut buffer).is_err());
    cs.done();
}

#[test]
fn test_chip_select_framing_on_success() {
    let bus = SpiMock::new(&[
        SpiTransaction::transfer_in_place(vec![0xF5, 0xFF], vec![0x00, 0x47]),
        SpiTransaction::flush(),
    ]);
    let mut bus_handle = bus.clone();
    let mut cs = PinMock::new(&cs_expectations(1));
    let device = ExclusiveDevice::new_no_delay(bus, cs.clone()).unwrap();
    let mut driver = Icm42688Driver::new(SpiInterface::new(device));

    assert_eq!(driver.read_register(0x75).unwrap(), 0x47);

    bus_handle.done();
    cs.done();
}

#[test]
fn test_borrowed_device() {
    let mut bus = SpiMock::new(&[
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x76, 0x00]),
        SpiTransaction::transaction_end(),
    ]);

    {
        // `&mut SpiDevice` is itself an `SpiDevice`
        let mut driver = Icm42688Driver::new(SpiInterface::new(&mut bus));
        driver.select_bank(icm42688::Bank::Bank0).unwrap();
    }

    bus.done();
}
