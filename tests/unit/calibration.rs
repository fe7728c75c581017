//! Unit tests for sensor calibration

use crate::common::{MockDelay, RecordingDelay, create_mock_driver};
use icm42688::device::CALIBRATION_SAMPLES;
use icm42688::{Bank, Calibration, Error, Sensor};

const ACCEL_CONFIG0: u8 = 0x50;
const GYRO_CONFIG0: u8 = 0x4F;
const ACCEL_DATA_X1: u8 = 0x1F;
const GYRO_DATA_X1: u8 = 0x25;

#[test]
fn test_calibrate_accel_mean() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_accel_data(50, -30, 16384);

    let calibration = driver.calibrate(Sensor::Accel, &mut MockDelay).unwrap();

    assert_eq!(calibration, Calibration::new(50, -30, 16384));
    assert_eq!(driver.accel_calibration(), calibration);
    assert_eq!(driver.gyro_calibration(), Calibration::default());
}

#[test]
fn test_calibrate_gyro_stores_gyro_only() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_gyro_data(7, 8, 9);
    spi.set_accel_data(100, 100, 100);

    driver.calibrate(Sensor::Gyro, &mut MockDelay).unwrap();

    assert_eq!(driver.gyro_calibration(), Calibration::new(7, 8, 9));
    assert_eq!(driver.accel_calibration(), Calibration::default());
}

#[test]
fn test_calibrate_truncates_toward_zero() {
    let (mut driver, spi) = create_mock_driver();
    // Means of 0.5 and -0.5 truncate to 0; 1.5 truncates to 1
    spi.set_gyro_sequence(vec![[0, 0, 1], [1, -1, 2]]);

    let calibration = driver.calibrate(Sensor::Gyro, &mut MockDelay).unwrap();
    assert_eq!(calibration, Calibration::new(0, 0, 1));
}

#[test]
fn test_calibrate_does_not_overflow() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_accel_data(i16::MAX, i16::MIN, i16::MAX);

    let calibration = driver.calibrate(Sensor::Accel, &mut MockDelay).unwrap();
    assert_eq!(calibration, Calibration::new(i16::MAX, i16::MIN, i16::MAX));
}

#[test]
fn test_calibrate_sample_count_and_delays() {
    let (mut driver, spi) = create_mock_driver();
    let mut delay = RecordingDelay::default();

    driver.calibrate(Sensor::Accel, &mut delay).unwrap();

    let samples = usize::from(CALIBRATION_SAMPLES);
    assert_eq!(spi.read_count(Bank::Bank0, ACCEL_DATA_X1), samples);
    assert_eq!(delay.ms_calls.len(), samples);
    assert!(delay.ms_calls.iter().all(|&ms| ms == 1));
}

#[test]
fn test_calibrate_restores_full_scale() {
    let (mut driver, spi) = create_mock_driver();
    // Full-scale 1 (±8g) with ODR 6
    spi.set_register(Bank::Bank0, ACCEL_CONFIG0, 0x26);

    driver.calibrate(Sensor::Accel, &mut MockDelay).unwrap();

    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG0), 0x26);
    // Sampling ran at index 3
    let writes = spi.writes();
    assert_eq!(writes.first(), Some(&(Bank::Bank0, ACCEL_CONFIG0, 0x66)));
    assert_eq!(writes.last(), Some(&(Bank::Bank0, ACCEL_CONFIG0, 0x26)));
}

#[test]
fn test_calibrate_failure_mid_sampling() {
    let (mut driver, spi) = create_mock_driver();
    let previous = Calibration::new(1, 2, 3);
    driver.set_gyro_calibration(previous);
    spi.set_register(Bank::Bank0, GYRO_CONFIG0, 0x06);
    spi.fail_nth_read(GYRO_DATA_X1, 150);

    let result = driver.calibrate(Sensor::Gyro, &mut MockDelay);

    assert!(matches!(result, Err(Error::Bus(_))));
    assert_eq!(driver.gyro_calibration(), previous);
    // Full-scale restored even though sampling failed
    assert_eq!(spi.get_register(Bank::Bank0, GYRO_CONFIG0), 0x06);
    assert_eq!(spi.read_count(Bank::Bank0, GYRO_DATA_X1), 149);
}

#[test]
fn test_calibrate_restore_failure() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_accel_data(10, 10, 10);
    // First write sets index 3, second is the restore
    spi.fail_nth_write(ACCEL_CONFIG0, 2);

    let result = driver.calibrate(Sensor::Accel, &mut MockDelay);

    assert!(matches!(result, Err(Error::Bus(_))));
    assert_eq!(driver.accel_calibration(), Calibration::default());
}

#[test]
fn test_calibrate_initial_read_failure() {
    let (mut driver, spi) = create_mock_driver();
    spi.fail_nth_read(ACCEL_CONFIG0, 1);

    assert!(driver.calibrate(Sensor::Accel, &mut MockDelay).is_err());
    assert!(spi.writes().is_empty());
}

#[test]
fn test_calibration_accessors() {
    let (mut driver, _spi) = create_mock_driver();

    driver.set_accel_calibration(Calibration::new(-1, -2, -3));
    driver.set_gyro_calibration(Calibration::new(4, 5, 6));

    assert_eq!(driver.accel_calibration(), Calibration::new(-1, -2, -3));
    assert_eq!(driver.gyro_calibration(), Calibration::new(4, 5, 6));
}
