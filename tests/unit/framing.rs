//! Wire-level framing checks against `embedded-hal-mock`

use device_driver::RegisterInterface;
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use icm42688::{Bank, Icm42688Driver, SpiInterface};

fn driver_with(
    expectations: &[SpiTransaction<u8>],
) -> (Icm42688Driver<SpiInterface<SpiMock<u8>>>, SpiMock<u8>) {
    let spi = SpiMock::new(expectations);
    let handle = spi.clone();
    (Icm42688Driver::new(SpiInterface::new(spi)), handle)
}

#[test]
fn test_single_register_read_frame() {
    let (mut driver, mut spi) = driver_with(&[
        SpiTransaction::transaction_start(),
        SpiTransaction::transfer_in_place(vec![0xF5, 0xFF], vec![0x00, 0x47]),
        SpiTransaction::transaction_end(),
    ]);

    assert_eq!(driver.read_register(0x75).unwrap(), 0x47);
    spi.done();
}

#[test]
fn test_single_register_write_frame() {
    let (mut driver, mut spi) = driver_with(&[
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x4E, 0x0F]),
        SpiTransaction::transaction_end(),
    ]);

    driver.write_register(0x4E, 0x0F).unwrap();
    spi.done();
}

#[test]
fn test_address_masked_to_seven_bits() {
    let (mut driver, mut spi) = driver_with(&[
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x76, 0x04]),
        SpiTransaction::transaction_end(),
    ]);

    // 0xF6 would look like a read without masking
    driver.write_register(0xF6, 0x04).unwrap();
    spi.done();
}

#[test]
fn test_select_bank_frame() {
    let (mut driver, mut spi) = driver_with(&[
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x76, 0x04]),
        SpiTransaction::transaction_end(),
    ]);

    driver.select_bank(Bank::Bank4).unwrap();
    spi.done();
}

#[test]
fn test_read_accel_frames() {
    let (mut driver, mut spi) = driver_with(&[
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x76, 0x00]),
        SpiTransaction::transaction_end(),
        SpiTransaction::transaction_start(),
        SpiTransaction::transfer_in_place(
            vec![0x9F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
            vec![0xEE, 0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC],
        ),
        SpiTransaction::transaction_end(),
    ]);

    let data = driver.read_accel().unwrap();
    assert_eq!(data.x, 0x1234);
    assert_eq!(data.y, 0x5678);
    assert_eq!(data.z, 0x9ABC_u16 as i16);
    spi.done();
}

#[test]
fn test_long_read_uses_split_transaction() {
    let response: Vec<u8> = (0..40).collect();
    let spi = SpiMock::new(&[
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0xB0]),
        SpiTransaction::read_vec(response.clone()),
        SpiTransaction::transaction_end(),
    ]);
    let mut handle = spi.clone();
    let mut interface = SpiInterface::new(spi);

    let mut buffer = [0u8; 40];
    interface.read_register(0x30, 320, &mut buffer).unwrap();
    assert_eq!(buffer.as_slice(), response.as_slice());
    handle.done();
}

#[test]
fn test_long_write_uses_split_transaction() {
    let payload = [0x5A; 34];
    let spi = SpiMock::new(&[
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(vec![0x77]),
        SpiTransaction::write_vec(payload.to_vec()),
        SpiTransaction::transaction_end(),
    ]);
    let mut handle = spi.clone();
    let mut interface = SpiInterface::new(spi);

    interface.write_register(0x77, 272, &payload).unwrap();
    handle.done();
}
