//! Unit tests for APEX motion features

use crate::common::{MockDelay, RecordingDelay, create_mock_driver};
use icm42688::{Bank, Error, InterruptRoute, R2wEvent};

const ACCEL_CONFIG0: u8 = 0x50;
const ACCEL_CONFIG1: u8 = 0x53;
const PWR_MGMT0: u8 = 0x4E;
const INTF_CONFIG1: u8 = 0x4D;
const GYRO_ACCEL_CONFIG0: u8 = 0x52;
const SIGNAL_PATH_RESET: u8 = 0x4B;
const APEX_CONFIG0: u8 = 0x56;
const SMD_CONFIG: u8 = 0x57;
const INT_SOURCE1: u8 = 0x66;
const INT_SOURCE4: u8 = 0x69;
const APEX_CONFIG4: u8 = 0x43;
const APEX_CONFIG7: u8 = 0x46;
const APEX_CONFIG8: u8 = 0x47;
const ACCEL_WOM_X_THR: u8 = 0x4A;
const INT_SOURCE6: u8 = 0x4D;
const INT_SOURCE7: u8 = 0x4E;

#[test]
fn test_wake_on_motion_int1() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(Bank::Bank0, ACCEL_CONFIG0, 0x66);
    spi.set_register(Bank::Bank0, PWR_MGMT0, 0x0F);
    let mut delay = RecordingDelay::default();

    driver
        .enable_wake_on_motion(InterruptRoute::Int1, &mut delay)
        .unwrap();

    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG0), 0x69);
    assert_eq!(spi.get_register(Bank::Bank0, PWR_MGMT0), 0x0E);
    for offset in 0..3 {
        assert_eq!(spi.get_register(Bank::Bank4, ACCEL_WOM_X_THR + offset), 98);
    }
    assert_eq!(spi.get_register(Bank::Bank0, INT_SOURCE1), 0b111);
    assert_eq!(spi.get_register(Bank::Bank0, INT_SOURCE4), 0);
    assert_eq!(spi.get_register(Bank::Bank0, SMD_CONFIG), 0b0110);
    assert_eq!(delay.ms_calls, vec![1, 1, 50]);
}

#[test]
fn test_wake_on_motion_unrouted() {
    let (mut driver, spi) = create_mock_driver();

    driver
        .enable_wake_on_motion(InterruptRoute::None, &mut MockDelay)
        .unwrap();

    assert_eq!(spi.get_register(Bank::Bank0, INT_SOURCE1), 0);
    assert_eq!(spi.get_register(Bank::Bank0, INT_SOURCE4), 0);
    assert_eq!(spi.get_register(Bank::Bank0, SMD_CONFIG), 0b0110);
}

#[test]
fn test_significant_motion_int2() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(Bank::Bank0, INT_SOURCE4, 0x01);

    driver
        .enable_significant_motion(InterruptRoute::Int2, &mut MockDelay)
        .unwrap();

    assert_eq!(spi.get_register(Bank::Bank0, INT_SOURCE4), 0x09);
    assert_eq!(spi.get_register(Bank::Bank0, INT_SOURCE1), 0);
    assert_eq!(spi.get_register(Bank::Bank0, SMD_CONFIG), 0b0111);
}

#[test]
fn test_tap_detection_low_noise_at_1khz() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(Bank::Bank0, ACCEL_CONFIG0, 0x66);
    let mut delay = RecordingDelay::default();

    driver
        .enable_tap_detection(InterruptRoute::Int1, &mut delay)
        .unwrap();

    // ODR kept
    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG0), 0x66);
    assert_eq!(spi.get_register(Bank::Bank0, PWR_MGMT0) & 0b11, 0x3);
    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG1), 0x10);
    assert_eq!(spi.get_register(Bank::Bank0, GYRO_ACCEL_CONFIG0), 0x00);
    assert_eq!(spi.get_register(Bank::Bank0, INTF_CONFIG1), 0x00);
    assert_eq!(spi.get_register(Bank::Bank4, APEX_CONFIG8), 0x5B);
    assert_eq!(spi.get_register(Bank::Bank4, APEX_CONFIG7), 0x46);
    assert_eq!(spi.get_register(Bank::Bank4, INT_SOURCE6), 0x01);
    assert_eq!(spi.get_register(Bank::Bank0, APEX_CONFIG0), 0x40);
    assert_eq!(delay.ms_calls, vec![1, 1, 50]);
}

#[test]
fn test_tap_detection_forces_500hz() {
    let (mut driver, spi) = create_mock_driver();
    // ±8g at 50 Hz
    spi.set_register(Bank::Bank0, ACCEL_CONFIG0, 0x29);

    driver
        .enable_tap_detection(InterruptRoute::Int2, &mut MockDelay)
        .unwrap();

    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG0), 0x2F);
    assert_eq!(spi.get_register(Bank::Bank0, PWR_MGMT0) & 0b11, 0x2);
    assert_eq!(spi.get_register(Bank::Bank0, INTF_CONFIG1), 0x08);
    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG1), 0x04);
    assert_eq!(spi.get_register(Bank::Bank0, GYRO_ACCEL_CONFIG0), 0x40);
    assert_eq!(spi.get_register(Bank::Bank4, INT_SOURCE7), 0x01);
    assert_eq!(spi.get_register(Bank::Bank4, INT_SOURCE6), 0x00);
    assert_eq!(spi.get_register(Bank::Bank0, APEX_CONFIG0), 0x40);
}

#[test]
fn test_tap_detection_keeps_200hz() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_register(Bank::Bank0, ACCEL_CONFIG0, 0x07);

    driver
        .enable_tap_detection(InterruptRoute::None, &mut MockDelay)
        .unwrap();

    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG0), 0x07);
    assert_eq!(spi.get_register(Bank::Bank0, GYRO_ACCEL_CONFIG0), 0x40);
}

#[test]
fn test_raise_to_wake_int1_wake() {
    let (mut driver, spi) = create_mock_driver();
    let mut delay = RecordingDelay::default();

    driver
        .enable_raise_to_wake(InterruptRoute::Int1, R2wEvent::Wake, &mut delay)
        .unwrap();

    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG0), 0x0A);
    assert_eq!(spi.get_register(Bank::Bank0, PWR_MGMT0), 0x02);
    assert_eq!(spi.get_register(Bank::Bank0, APEX_CONFIG0), 0x0A);
    assert_eq!(spi.get_register(Bank::Bank0, SIGNAL_PATH_RESET), 0x60);
    for offset in 0..3 {
        assert_eq!(spi.get_register(Bank::Bank4, APEX_CONFIG4 + offset), 0x38);
    }
    assert_eq!(spi.get_register(Bank::Bank4, INT_SOURCE6), 0x04);
    assert_eq!(spi.get_register(Bank::Bank4, INT_SOURCE7), 0x00);
    assert_eq!(delay.ms_calls, vec![1, 1, 1, 1, 1, 50]);
}

#[test]
fn test_raise_to_wake_int2_sleep() {
    let (mut driver, spi) = create_mock_driver();

    driver
        .enable_raise_to_wake(InterruptRoute::Int2, R2wEvent::Sleep, &mut MockDelay)
        .unwrap();

    assert_eq!(spi.get_register(Bank::Bank4, INT_SOURCE7), 0x02);
    assert_eq!(spi.get_register(Bank::Bank4, INT_SOURCE6), 0x00);
}

#[test]
fn test_sequence_aborts_on_failure() {
    let (mut driver, spi) = create_mock_driver();
    spi.fail_nth_write(ACCEL_WOM_X_THR + 1, 1);
    let mut delay = RecordingDelay::default();

    let result = driver.enable_wake_on_motion(InterruptRoute::Int1, &mut delay);

    assert!(matches!(result, Err(Error::Bus(_))));
    assert_eq!(spi.get_register(Bank::Bank4, ACCEL_WOM_X_THR), 98);
    // Steps already applied stay applied, later ones never run
    assert_eq!(spi.get_register(Bank::Bank0, ACCEL_CONFIG0) & 0x0F, 0x9);
    assert_eq!(spi.get_register(Bank::Bank0, INT_SOURCE1), 0);
    assert_eq!(spi.get_register(Bank::Bank0, SMD_CONFIG), 0);
    assert_eq!(delay.ms_calls, vec![1]);
}

#[test]
fn test_pedometer_and_tilt_not_implemented() {
    let (mut driver, spi) = create_mock_driver();

    for mode in 0..=2 {
        assert_eq!(
            driver.enable_pedometer(mode, InterruptRoute::Int1),
            Err(Error::NotImplemented)
        );
        assert_eq!(
            driver.enable_tilt_detection(mode, InterruptRoute::Int2),
            Err(Error::NotImplemented)
        );
    }
    assert_eq!(
        driver.enable_pedometer(3, InterruptRoute::Int1),
        Err(Error::InvalidArgument)
    );
    assert_eq!(
        driver.enable_tilt_detection(3, InterruptRoute::None),
        Err(Error::InvalidArgument)
    );
    assert_eq!(spi.transaction_count(), 0);
}

#[test]
fn test_read_apex_status_clears_flags() {
    let (mut driver, spi) = create_mock_driver();
    spi.set_apex_status(0x05, 0x21);

    let status = driver.read_apex_status().unwrap();
    assert!(status.wake_on_motion.x_motion);
    assert!(!status.wake_on_motion.y_motion);
    assert!(status.wake_on_motion.z_motion);
    assert!(status.tap);
    assert!(status.step);
    assert!(!status.significant_motion);

    let status = driver.read_apex_status().unwrap();
    assert!(!status.any_set());
}
