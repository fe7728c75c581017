//! Unit tests for full-scale, output data rate and sensor data reads

use crate::common::create_mock_driver;
use crate::common::test_utils::assert_float_eq;
use icm42688::{AccelFullScale, AccelOdr, Bank, Error, GyroFullScale, GyroOdr, Icm42688Driver, Sensor};

const ACCEL_CONFIG0: u8 = 0x50;
const GYRO_CONFIG0: u8 = 0x4F;

#[test]
fn test_set_full_scale_writes_upper_bits() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(Bank::Bank0, ACCEL_CONFIG0, 0x06);

    driver.set_full_scale(Sensor::Accel, 3).unwrap();

    // ODR bits untouched
    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG0), 0x66);
    assert_eq!(driver.full_scale(Sensor::Accel).unwrap(), 3);
}

#[test]
fn test_full_scale_per_sensor() {
    let (mut driver, spi) = create_mock_driver();

    driver.set_full_scale(Sensor::Gyro, 7).unwrap();

    assert_eq!(spi.get_register(Bank::Bank0, GYRO_CONFIG0), 0xE0);
    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG0), 0x00);
    assert_eq!(driver.full_scale(Sensor::Gyro).unwrap(), 7);
}

#[test]
fn test_full_scale_out_of_range() {
    let (mut driver, spi) = create_mock_driver();

    assert_eq!(
        driver.set_full_scale(Sensor::Accel, 8),
        Err(Error::InvalidArgument)
    );
    assert_eq!(spi.transaction_count(), 0);
}

#[test]
fn test_output_data_rate_lower_bits() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(Bank::Bank0, GYRO_CONFIG0, 0x60);

    driver.set_output_data_rate(Sensor::Gyro, 0xF).unwrap();

    assert_eq!(spi.get_register(Bank::Bank0, GYRO_CONFIG0), 0x6F);
    assert_eq!(driver.output_data_rate(Sensor::Gyro).unwrap(), 0xF);
    assert_eq!(
        driver.set_output_data_rate(Sensor::Gyro, 16),
        Err(Error::InvalidArgument)
    );
}

#[test]
fn test_typed_accel_settings() {
    let (mut driver, _spi) = create_mock_driver();

    driver.set_accel_full_scale(AccelFullScale::G4).unwrap();
    driver.set_accel_odr(AccelOdr::Hz200).unwrap();

    assert_eq!(driver.accel_full_scale().unwrap(), AccelFullScale::G4);
    assert_eq!(driver.accel_odr().unwrap(), AccelOdr::Hz200);
}

#[test]
fn test_typed_gyro_settings() {
    let (mut driver, _spi) = create_mock_driver();

    driver.set_gyro_full_scale(GyroFullScale::Dps125).unwrap();
    driver.set_gyro_odr(GyroOdr::Hz500).unwrap();

    assert_eq!(driver.gyro_full_scale().unwrap(), GyroFullScale::Dps125);
    assert_eq!(driver.gyro_odr().unwrap(), GyroOdr::Hz500);
}

#[test]
fn test_reserved_codes_rejected() {
    let (mut driver, spi) = create_mock_driver();

    // Accel full-scale 5 and gyro ODR 13 are reserved
    spi.set_register(Bank::Bank0, ACCEL_CONFIG0, 0xA0);
    spi.set_register(Bank::Bank0, GYRO_CONFIG0, 0x0D);

    assert_eq!(driver.accel_full_scale(), Err(Error::InvalidArgument));
    assert_eq!(driver.gyro_odr(), Err(Error::InvalidArgument));
}

#[test]
fn test_read_axis_big_endian() {
    let (mut driver, spi) = create_mock_driver();
    for (i, byte) in [0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC].into_iter().enumerate() {
        spi.set_register(Bank::Bank0, 0x1F + i as u8, byte);
    }

    let data = driver.read_axis_xyz(Sensor::Accel).unwrap();
    assert_eq!(data.x, 0x1234);
    assert_eq!(data.y, 0x5678);
    assert_eq!(data.z, 0x9ABCu16 as i16);
}

#[test]
fn test_read_gyro_from_own_registers() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_accel_data(1, 2, 3);
    spi.set_gyro_data(-100, 0, i16::MIN);

    let gyro = driver.read_gyro().unwrap();
    assert_eq!((gyro.x, gyro.y, gyro.z), (-100, 0, i16::MIN));

    let accel = driver.read_accel().unwrap();
    assert_eq!((accel.x, accel.y, accel.z), (1, 2, 3));
}

#[test]
fn test_read_scaled_data() {
    let (mut driver, spi) = create_mock_driver();
    driver.set_accel_full_scale(AccelFullScale::G2).unwrap();
    driver.set_gyro_full_scale(GyroFullScale::Dps2000).unwrap();
    spi.set_accel_data(0, -8192, 16384);
    spi.set_gyro_data(164, 0, -164);

    let accel = driver.read_accel_g().unwrap();
    assert_float_eq(accel.y, -0.5, 0.001);
    assert_float_eq(accel.z, 1.0, 0.001);

    let gyro = driver.read_gyro_dps().unwrap();
    assert_float_eq(gyro.x, 10.0, 0.01);
    assert_float_eq(gyro.z, -10.0, 0.01);
}

#[test]
fn test_read_temperature() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_temperature_data(1325);

    let raw = driver.read_temperature().unwrap();
    assert_eq!(raw, 1325);
    assert_float_eq(
        Icm42688Driver::<()>::temperature_to_celsius(raw),
        35.0,
        0.01,
    );
    assert_float_eq(Icm42688Driver::<()>::temperature_to_celsius(0), 25.0, 0.001);
}

#[test]
fn test_axis_read_failure() {
    let (mut driver, spi) = create_mock_driver();
    spi.fail_nth_read(0x25, 1);

    assert!(matches!(driver.read_gyro(), Err(Error::Bus(_))));
}
