//! High-level driver API for the ICM-42688-P
//!
//! This module provides the register access layer (bank selection, single
//! register access, field updates and burst reads) and the configuration
//! sequences built on top of it: lifecycle, sampling, calibration, user
//! offsets, FIFO and APEX motion features.
//!
//! The driver never caches the selected bank. Every operation selects the
//! bank it needs before touching bank-specific registers, so the driver stays
//! correct after a soft reset or when another party changes `REG_BANK_SEL`.

use crate::apex::{self, R2wEvent, Sequence, Step};
use crate::fifo::{FIFO_MODE_STREAM, FifoFormat, FifoPacket, MAX_PACKET_LEN};
use crate::interrupt::{ApexStatus, InterruptRoute};
use crate::registers::{RegisterDevice, bank0, bank4};
use crate::sensors::{
    AccelDataG, AccelFullScale, AccelOdr, AxisData, Calibration, GyroDataDps, GyroFullScale,
    GyroOdr, Sensor, pack_user_offsets,
};
use crate::{Bank, Error, WHO_AM_I_VALUE};

// Only import RegisterInterface when not using async feature
#[cfg(not(feature = "async"))]
use device_driver::RegisterInterface;

/// Number of samples averaged by [`Icm42688Driver::calibrate`]
pub const CALIBRATION_SAMPLES: u16 = 200;

/// Full-scale index used while calibrating (±2g / ±250°/s)
pub const CALIBRATION_FULL_SCALE: u8 = 3;

/// Largest full-scale select code (3-bit field)
pub const MAX_FULL_SCALE_INDEX: u8 = 7;

/// Largest output data rate code (4-bit field)
pub const MAX_ODR_CODE: u8 = 15;

/// Settling time after a soft reset
const RESET_DELAY_MS: u32 = 1;

/// Gyroscope start-up time after leaving the off state
const SENSOR_STARTUP_MS: u32 = 45;

/// Accelerometer and gyroscope in low-noise mode
const LOW_NOISE_MODE: u8 = 0b11;

/// Replace the `mask << shift` field of `current` with `value`
const fn merge_field(current: u8, mask: u8, value: u8, shift: u8) -> u8 {
    (current & !(mask << shift)) | ((value & mask) << shift)
}

/// Per-axis mean of accumulated samples, truncating toward zero
#[allow(clippy::cast_possible_truncation)]
fn mean(sum: [i32; 3], samples: u16) -> AxisData {
    let samples = i32::from(samples);
    // The mean of i16 samples always fits in i16
    AxisData {
        x: (sum[0] / samples) as i16,
        y: (sum[1] / samples) as i16,
        z: (sum[2] / samples) as i16,
    }
}

fn accumulate(sum: &mut [i32; 3], sample: AxisData) {
    sum[0] += i32::from(sample.x);
    sum[1] += i32::from(sample.y);
    sum[2] += i32::from(sample.z);
}

fn validate_burst<E>(len: usize) -> Result<(), Error<E>> {
    if len >= 2 {
        Ok(())
    } else {
        Err(Error::InvalidArgument)
    }
}

fn validate_performance_mode<E>(mode: u8) -> Result<(), Error<E>> {
    if mode > apex::MAX_PERFORMANCE_MODE {
        Err(Error::InvalidArgument)
    } else {
        Err(Error::NotImplemented)
    }
}

/// Main driver for the ICM-42688-P
pub struct Icm42688Driver<I> {
    device: RegisterDevice<I>,
    fifo_format: Option<FifoFormat>,
    accel_calibration: Calibration,
    gyro_calibration: Calibration,
}

impl<I> Icm42688Driver<I> {
    /// Create a new ICM-42688-P driver instance
    ///
    /// No bus traffic is generated. Call [`test_comms`](Self::test_comms) to
    /// verify the device and [`configure_standard`](Self::configure_standard)
    /// to power the sensors up.
    pub fn new(interface: I) -> Self {
        Self {
            device: RegisterDevice::new(interface),
            fifo_format: None,
            accel_calibration: Calibration::default(),
            gyro_calibration: Calibration::default(),
        }
    }

    /// Consume the driver and return the underlying interface
    pub fn release(self) -> I {
        self.device.interface
    }

    /// Get a reference to the underlying register device (for advanced usage)
    pub const fn device(&self) -> &RegisterDevice<I> {
        &self.device
    }

    /// Get a mutable reference to the underlying register device (for advanced usage)
    pub const fn device_mut(&mut self) -> &mut RegisterDevice<I> {
        &mut self.device
    }

    /// FIFO packet format recorded by the last successful FIFO configuration
    pub const fn fifo_format(&self) -> Option<FifoFormat> {
        self.fifo_format
    }

    /// Get current accelerometer calibration
    pub const fn accel_calibration(&self) -> Calibration {
        self.accel_calibration
    }

    /// Set accelerometer calibration
    ///
    /// Takes effect on the device at the next [`apply_user_offset`](Self::apply_user_offset).
    pub const fn set_accel_calibration(&mut self, calibration: Calibration) {
        self.accel_calibration = calibration;
    }

    /// Get current gyroscope calibration
    pub const fn gyro_calibration(&self) -> Calibration {
        self.gyro_calibration
    }

    /// Set gyroscope calibration
    pub const fn set_gyro_calibration(&mut self, calibration: Calibration) {
        self.gyro_calibration = calibration;
    }

    /// Convert raw temperature to degrees Celsius
    #[must_use]
    pub fn temperature_to_celsius(raw: i16) -> f32 {
        // Datasheet: TEMP_DATA / 132.48 + 25
        f32::from(raw) / 132.48 + 25.0
    }

    const fn store_calibration(&mut self, sensor: Sensor, calibration: Calibration) {
        match sensor {
            Sensor::Accel => self.accel_calibration = calibration,
            Sensor::Gyro => self.gyro_calibration = calibration,
        }
    }

    /// Offset registers for the requested sensors; the other sensor packs as zero
    fn user_offsets(&self, apply_accel: bool, apply_gyro: bool) -> [u8; 9] {
        let accel = if apply_accel {
            self.accel_calibration
        } else {
            Calibration::default()
        };
        let gyro = if apply_gyro {
            self.gyro_calibration
        } else {
            Calibration::default()
        };
        pack_user_offsets(&accel, &gyro)
    }
}

#[cfg(not(feature = "async"))]
impl<I> Icm42688Driver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    // ==================== REGISTER ACCESS ====================

    /// Select a register bank
    ///
    /// Writes `REG_BANK_SEL` unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn select_bank(&mut self, bank: Bank) -> Result<(), Error<I::Error>> {
        self.device.reg_bank_sel().write(|w| {
            w.set_bank_sel(bank as u8);
        })?;
        Ok(())
    }

    /// Select a register bank by number
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` without touching the bus if `index > 4`, or
    /// an error if communication with the device fails.
    pub fn select_bank_index(&mut self, index: u8) -> Result<(), Error<I::Error>> {
        let bank = Bank::from_index(index).ok_or(Error::InvalidArgument)?;
        self.select_bank(bank)
    }

    /// Read one register in the currently selected bank
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_register(&mut self, address: u8) -> Result<u8, Error<I::Error>> {
        let mut value = [0u8; 1];
        self.device.interface.read_register(address, 8, &mut value)?;
        Ok(value[0])
    }

    /// Write one register in the currently selected bank
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.device.interface.write_register(address, 8, &[value])?;
        Ok(())
    }

    /// Update the field `mask << shift` of a register, preserving all other bits
    ///
    /// `value` is masked to `mask` before it is shifted into place.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `shift > 7` (no bus traffic), or an error
    /// if communication with the device fails.
    pub fn read_modify_write(
        &mut self,
        mask: u8,
        address: u8,
        value: u8,
        shift: u8,
    ) -> Result<(), Error<I::Error>> {
        if shift > 7 {
            return Err(Error::InvalidArgument);
        }
        let current = self.read_register(address)?;
        self.write_register(address, merge_field(current, mask, value, shift))
    }

    /// Read consecutive registers starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` without touching the bus if `buffer` holds
    /// fewer than 2 bytes, or an error if communication with the device fails.
    pub fn burst_read(&mut self, address: u8, buffer: &mut [u8]) -> Result<(), Error<I::Error>> {
        validate_burst(buffer.len())?;
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (buffer.len() * 8) as u32;
        self.device
            .interface
            .read_register(address, size_bits, buffer)?;
        Ok(())
    }

    // ==================== LIFECYCLE ====================

    /// Issue a soft reset
    ///
    /// All registers return to their reset values and the device selects bank 0.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn reset(&mut self) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Bank0)?;
        self.device.device_config().write(|w| {
            w.set_soft_reset_config(true);
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ICM-42688-P soft reset");

        Ok(())
    }

    /// Reset the device and enable accelerometer and gyroscope in low-noise mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_standard<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.reset()?;
        delay.delay_ms(RESET_DELAY_MS);

        self.device.pwr_mgmt_0().write(|w| {
            w.set_accel_mode(LOW_NOISE_MODE);
            w.set_gyro_mode(LOW_NOISE_MODE);
        })?;
        delay.delay_ms(SENSOR_STARTUP_MS);
        Ok(())
    }

    /// Reset the device and check its identity
    ///
    /// # Errors
    ///
    /// Returns `InvalidDevice` with the value read if `WHO_AM_I` is not 0x47,
    /// or an error if communication with the device fails.
    pub fn test_comms<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.reset()?;
        delay.delay_ms(RESET_DELAY_MS);
        let who_am_i = self.device.who_am_i().read()?.who_am_i();
        if who_am_i != WHO_AM_I_VALUE {
            return Err(Error::InvalidDevice(who_am_i));
        }
        Ok(())
    }

    /// Read the `WHO_AM_I` register
    ///
    /// Should return 0x47 for a valid ICM-42688-P
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        self.select_bank(Bank::Bank0)?;
        let reg = self.device.who_am_i().read()?;
        Ok(reg.who_am_i())
    }

    // ==================== SAMPLING CONFIGURATION ====================

    /// Set the full-scale select code (0-7) of a sensor
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `index > 7`, or an error if communication
    /// with the device fails.
    pub fn set_full_scale(&mut self, sensor: Sensor, index: u8) -> Result<(), Error<I::Error>> {
        if index > MAX_FULL_SCALE_INDEX {
            return Err(Error::InvalidArgument);
        }
        self.select_bank(Bank::Bank0)?;
        match sensor {
            Sensor::Accel => self.device.accel_config_0().modify(|w| {
                w.set_accel_fs_sel(index);
            })?,
            Sensor::Gyro => self.device.gyro_config_0().modify(|w| {
                w.set_gyro_fs_sel(index);
            })?,
        }
        Ok(())
    }

    /// Read the full-scale select code of a sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn full_scale(&mut self, sensor: Sensor) -> Result<u8, Error<I::Error>> {
        self.select_bank(Bank::Bank0)?;
        Ok(match sensor {
            Sensor::Accel => self.device.accel_config_0().read()?.accel_fs_sel(),
            Sensor::Gyro => self.device.gyro_config_0().read()?.gyro_fs_sel(),
        })
    }

    /// Set the output data rate code (0-15) of a sensor
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `code > 15`, or an error if communication
    /// with the device fails.
    pub fn set_output_data_rate(&mut self, sensor: Sensor, code: u8) -> Result<(), Error<I::Error>> {
        if code > MAX_ODR_CODE {
            return Err(Error::InvalidArgument);
        }
        self.select_bank(Bank::Bank0)?;
        match sensor {
            Sensor::Accel => self.device.accel_config_0().modify(|w| {
                w.set_accel_odr(code);
            })?,
            Sensor::Gyro => self.device.gyro_config_0().modify(|w| {
                w.set_gyro_odr(code);
            })?,
        }
        Ok(())
    }

    /// Read the output data rate code of a sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn output_data_rate(&mut self, sensor: Sensor) -> Result<u8, Error<I::Error>> {
        self.select_bank(Bank::Bank0)?;
        Ok(match sensor {
            Sensor::Accel => self.device.accel_config_0().read()?.accel_odr(),
            Sensor::Gyro => self.device.gyro_config_0().read()?.gyro_odr(),
        })
    }

    /// Set accelerometer full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_full_scale(&mut self, scale: AccelFullScale) -> Result<(), Error<I::Error>> {
        self.set_full_scale(Sensor::Accel, scale as u8)
    }

    /// Read accelerometer full-scale range
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the device holds a reserved code, or an
    /// error if communication with the device fails.
    pub fn accel_full_scale(&mut self) -> Result<AccelFullScale, Error<I::Error>> {
        let code = self.full_scale(Sensor::Accel)?;
        AccelFullScale::try_from(code).map_err(|_| Error::InvalidArgument)
    }

    /// Set gyroscope full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_full_scale(&mut self, scale: GyroFullScale) -> Result<(), Error<I::Error>> {
        self.set_full_scale(Sensor::Gyro, scale as u8)
    }

    /// Read gyroscope full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn gyro_full_scale(&mut self) -> Result<GyroFullScale, Error<I::Error>> {
        let code = self.full_scale(Sensor::Gyro)?;
        GyroFullScale::try_from(code).map_err(|_| Error::InvalidArgument)
    }

    /// Set accelerometer output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_accel_odr(&mut self, odr: AccelOdr) -> Result<(), Error<I::Error>> {
        self.set_output_data_rate(Sensor::Accel, odr as u8)
    }

    /// Read accelerometer output data rate
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the device holds a reserved code, or an
    /// error if communication with the device fails.
    pub fn accel_odr(&mut self) -> Result<AccelOdr, Error<I::Error>> {
        let code = self.output_data_rate(Sensor::Accel)?;
        AccelOdr::try_from(code).map_err(|_| Error::InvalidArgument)
    }

    /// Set gyroscope output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn set_gyro_odr(&mut self, odr: GyroOdr) -> Result<(), Error<I::Error>> {
        self.set_output_data_rate(Sensor::Gyro, odr as u8)
    }

    /// Read gyroscope output data rate
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the device holds a reserved code, or an
    /// error if communication with the device fails.
    pub fn gyro_odr(&mut self) -> Result<GyroOdr, Error<I::Error>> {
        let code = self.output_data_rate(Sensor::Gyro)?;
        GyroOdr::try_from(code).map_err(|_| Error::InvalidArgument)
    }

    // ==================== SENSOR DATA ====================

    /// Read the raw X, Y, Z output of a sensor in one burst
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_axis_xyz(&mut self, sensor: Sensor) -> Result<AxisData, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.select_bank(Bank::Bank0)?;
        self.burst_read(sensor.data_register(), &mut buffer)?;
        Ok(AxisData::from_be_bytes(buffer))
    }

    /// Read accelerometer data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_accel(&mut self) -> Result<AxisData, Error<I::Error>> {
        self.read_axis_xyz(Sensor::Accel)
    }

    /// Read gyroscope data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro(&mut self) -> Result<AxisData, Error<I::Error>> {
        self.read_axis_xyz(Sensor::Gyro)
    }

    /// Read accelerometer data in g, scaled by the configured full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the
    /// full-scale field holds a reserved code.
    pub fn read_accel_g(&mut self) -> Result<AccelDataG, Error<I::Error>> {
        let full_scale = self.accel_full_scale()?;
        let raw = self.read_accel()?;
        Ok(AccelDataG::from_raw(raw, full_scale))
    }

    /// Read gyroscope data in °/s, scaled by the configured full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_gyro_dps(&mut self) -> Result<GyroDataDps, Error<I::Error>> {
        let full_scale = self.gyro_full_scale()?;
        let raw = self.read_gyro()?;
        Ok(GyroDataDps::from_raw(raw, full_scale))
    }

    /// Read temperature sensor
    ///
    /// Returns raw 16-bit signed value, see [`temperature_to_celsius`](Self::temperature_to_celsius).
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_temperature(&mut self) -> Result<i16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.select_bank(Bank::Bank0)?;
        self.burst_read(bank0::TEMP_DATA1, &mut buffer)?;
        Ok(i16::from_be_bytes(buffer))
    }

    // ==================== CALIBRATION ====================

    /// Measure the resting offset of a sensor
    ///
    /// Switches the sensor to full-scale index 3, averages
    /// [`CALIBRATION_SAMPLES`] readings taken 1 ms apart, restores the previous
    /// full-scale and stores the mean as that sensor's calibration. The device
    /// must be stationary (and, for the accelerometer, level) while sampling.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. A failure
    /// while sampling still attempts to restore the previous full-scale; in
    /// every error case the stored calibration is left unchanged.
    pub fn calibrate<D>(
        &mut self,
        sensor: Sensor,
        delay: &mut D,
    ) -> Result<Calibration, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let saved = self.full_scale(sensor)?;
        self.set_full_scale(sensor, CALIBRATION_FULL_SCALE)?;

        let sampled = self.sample_mean(sensor, delay);
        let restored = self.set_full_scale(sensor, saved);

        let mean = match (sampled, restored) {
            (Ok(mean), Ok(())) => mean,
            (Ok(_), Err(e)) => return Err(e),
            (Err(e), restored) => {
                #[cfg(feature = "defmt")]
                if restored.is_err() {
                    defmt::warn!("Failed to restore full-scale {} after calibration", saved);
                }
                let _ = restored;
                return Err(e);
            }
        };

        let calibration = Calibration::from(mean);
        self.store_calibration(sensor, calibration);

        #[cfg(feature = "defmt")]
        defmt::debug!("{} calibration: {}", sensor, calibration);

        Ok(calibration)
    }

    fn sample_mean<D>(&mut self, sensor: Sensor, delay: &mut D) -> Result<AxisData, Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        let mut sum = [0i32; 3];
        for _ in 0..CALIBRATION_SAMPLES {
            accumulate(&mut sum, self.read_axis_xyz(sensor)?);
            delay.delay_ms(1);
        }
        Ok(mean(sum, CALIBRATION_SAMPLES))
    }

    /// Write stored calibration into the `OFFSET_USERx` registers
    ///
    /// Gyroscope offsets go to `OFFSET_USER0..3`, accelerometer offsets to
    /// `OFFSET_USER5..8`. `OFFSET_USER4` holds the upper nibbles of gyro Z and
    /// accel X and is written whenever either sensor is requested; the nibble
    /// of a sensor that is not requested is cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn apply_user_offset(
        &mut self,
        apply_accel: bool,
        apply_gyro: bool,
    ) -> Result<(), Error<I::Error>> {
        let offsets = self.user_offsets(apply_accel, apply_gyro);
        self.select_bank(Bank::Bank4)?;

        if apply_gyro {
            for index in 0..4 {
                self.write_register(bank4::OFFSET_USER0 + index, offsets[usize::from(index)])?;
            }
        }
        if apply_accel {
            for index in 5..9 {
                self.write_register(bank4::OFFSET_USER0 + index, offsets[usize::from(index)])?;
            }
        }
        if apply_accel || apply_gyro {
            self.write_register(bank4::OFFSET_USER4, offsets[4])?;
        }
        Ok(())
    }

    // ==================== FIFO ====================

    /// Configure the FIFO for stream mode with the given packet format
    ///
    /// The format is recorded only after both registers were written.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn configure_fifo(&mut self, format: FifoFormat) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Bank0)?;
        self.device.fifo_config().write(|w| {
            w.set_fifo_mode(FIFO_MODE_STREAM);
        })?;
        self.write_register(bank0::FIFO_CONFIG1, format.config1_bits())?;
        self.fifo_format = Some(format);

        #[cfg(feature = "defmt")]
        defmt::debug!("FIFO configured: {}", format);

        Ok(())
    }

    /// Configure the FIFO from a raw format number (1-4)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` without touching the bus for any other
    /// number, or an error if communication with the device fails.
    pub fn configure_fifo_index(&mut self, format: u8) -> Result<(), Error<I::Error>> {
        let format = FifoFormat::try_from(format).map_err(|_| Error::InvalidArgument)?;
        self.configure_fifo(format)
    }

    /// Read and decode one FIFO packet
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without touching the bus if no format was
    /// configured, or an error if communication with the device fails.
    pub fn read_fifo(&mut self) -> Result<FifoPacket, Error<I::Error>> {
        let format = self.fifo_format.ok_or(Error::NotConfigured)?;
        let mut buffer = [0u8; MAX_PACKET_LEN];
        let packet = &mut buffer[..format.packet_len()];

        self.select_bank(Bank::Bank0)?;
        self.burst_read(bank0::FIFO_DATA, packet)?;
        FifoPacket::decode(format, packet).ok_or(Error::InvalidArgument)
    }

    /// Get the number of bytes currently stored in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn fifo_count(&mut self) -> Result<u16, Error<I::Error>> {
        self.select_bank(Bank::Bank0)?;
        let reg = self.device.fifo_count().read()?;
        Ok(reg.fifo_count())
    }

    /// Discard all FIFO contents
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn flush_fifo(&mut self) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Bank0)?;
        self.device.signal_path_reset().write(|w| {
            w.set_fifo_flush(true);
        })?;
        Ok(())
    }

    // ==================== APEX ====================

    fn run_sequence<D>(&mut self, sequence: &Sequence, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        for step in sequence.steps() {
            match step {
                Step::SelectBank(bank) => self.select_bank(bank)?,
                Step::Write { address, value } => self.write_register(address, value)?,
                Step::Modify {
                    address,
                    mask,
                    value,
                    shift,
                } => self.read_modify_write(mask, address, value, shift)?,
                Step::DelayMs(ms) => delay.delay_ms(ms),
            }
        }
        Ok(())
    }

    /// Enable wake-on-motion on all three axes
    ///
    /// Puts the accelerometer in low-power mode at 50 Hz.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. Steps already
    /// applied are not rolled back.
    pub fn enable_wake_on_motion<D>(
        &mut self,
        route: InterruptRoute,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.run_sequence(&apex::wake_on_motion(route), delay)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Wake-on-motion enabled ({})", route);

        Ok(())
    }

    /// Enable significant motion detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_significant_motion<D>(
        &mut self,
        route: InterruptRoute,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.run_sequence(&apex::significant_motion(route), delay)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Significant motion detection enabled ({})", route);

        Ok(())
    }

    /// Enable tap detection
    ///
    /// Keeps an accelerometer rate of 200 Hz, 500 Hz or 1 kHz and switches any
    /// other rate to 500 Hz.
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_tap_detection<D>(
        &mut self,
        route: InterruptRoute,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.select_bank(Bank::Bank0)?;
        let accel_config0 = self.read_register(bank0::ACCEL_CONFIG0)?;
        self.run_sequence(&apex::tap_detection(accel_config0, route), delay)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Tap detection enabled ({})", route);

        Ok(())
    }

    /// Enable raise-to-wake, reporting `event` on the routed pin
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn enable_raise_to_wake<D>(
        &mut self,
        route: InterruptRoute,
        event: R2wEvent,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal::delay::DelayNs,
    {
        self.run_sequence(&apex::raise_to_wake(route, event), delay)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Raise-to-wake enabled ({}, {})", route, event);

        Ok(())
    }

    /// Pedometer (not supported)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `performance_mode > 2`, otherwise
    /// `NotImplemented`. No bus traffic is generated.
    #[allow(clippy::unused_self)]
    pub fn enable_pedometer(
        &mut self,
        performance_mode: u8,
        route: InterruptRoute,
    ) -> Result<(), Error<I::Error>> {
        let _ = route;
        validate_performance_mode(performance_mode)
    }

    /// Tilt detection (not supported)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `performance_mode > 2`, otherwise
    /// `NotImplemented`. No bus traffic is generated.
    #[allow(clippy::unused_self)]
    pub fn enable_tilt_detection(
        &mut self,
        performance_mode: u8,
        route: InterruptRoute,
    ) -> Result<(), Error<I::Error>> {
        let _ = route;
        validate_performance_mode(performance_mode)
    }

    /// Read and clear the APEX event flags
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub fn read_apex_status(&mut self) -> Result<ApexStatus, Error<I::Error>> {
        let mut status = [0u8; 2];
        self.select_bank(Bank::Bank0)?;
        self.burst_read(bank0::INT_STATUS2, &mut status)?;
        Ok(ApexStatus::from_raw(status[0], status[1]))
    }
}

#[cfg(feature = "async")]
impl<I> Icm42688Driver<I>
where
    I: device_driver::AsyncRegisterInterface<AddressType = u8>,
{
    // ==================== REGISTER ACCESS ====================

    /// Select a register bank
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn select_bank(&mut self, bank: Bank) -> Result<(), Error<I::Error>> {
        self.device
            .reg_bank_sel()
            .write_async(|w| {
                w.set_bank_sel(bank as u8);
            })
            .await?;
        Ok(())
    }

    /// Select a register bank by number
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` without touching the bus if `index > 4`, or
    /// an error if communication with the device fails.
    pub async fn select_bank_index(&mut self, index: u8) -> Result<(), Error<I::Error>> {
        let bank = Bank::from_index(index).ok_or(Error::InvalidArgument)?;
        self.select_bank(bank).await
    }

    /// Read one register in the currently selected bank
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_register(&mut self, address: u8) -> Result<u8, Error<I::Error>> {
        let mut value = [0u8; 1];
        self.device
            .interface
            .read_register(address, 8, &mut value)
            .await?;
        Ok(value[0])
    }

    /// Write one register in the currently selected bank
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn write_register(&mut self, address: u8, value: u8) -> Result<(), Error<I::Error>> {
        self.device
            .interface
            .write_register(address, 8, &[value])
            .await?;
        Ok(())
    }

    /// Update the field `mask << shift` of a register, preserving all other bits
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `shift > 7` (no bus traffic), or an error
    /// if communication with the device fails.
    pub async fn read_modify_write(
        &mut self,
        mask: u8,
        address: u8,
        value: u8,
        shift: u8,
    ) -> Result<(), Error<I::Error>> {
        if shift > 7 {
            return Err(Error::InvalidArgument);
        }
        let current = self.read_register(address).await?;
        self.write_register(address, merge_field(current, mask, value, shift))
            .await
    }

    /// Read consecutive registers starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` without touching the bus if `buffer` holds
    /// fewer than 2 bytes, or an error if communication with the device fails.
    pub async fn burst_read(
        &mut self,
        address: u8,
        buffer: &mut [u8],
    ) -> Result<(), Error<I::Error>> {
        validate_burst(buffer.len())?;
        #[allow(clippy::cast_possible_truncation)]
        let size_bits = (buffer.len() * 8) as u32;
        self.device
            .interface
            .read_register(address, size_bits, buffer)
            .await?;
        Ok(())
    }

    // ==================== LIFECYCLE ====================

    /// Issue a soft reset
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn reset(&mut self) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Bank0).await?;
        self.device
            .device_config()
            .write_async(|w| {
                w.set_soft_reset_config(true);
            })
            .await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("ICM-42688-P soft reset");

        Ok(())
    }

    /// Reset the device and enable accelerometer and gyroscope in low-noise mode
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn configure_standard<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.reset().await?;
        delay.delay_ms(RESET_DELAY_MS).await;

        self.device
            .pwr_mgmt_0()
            .write_async(|w| {
                w.set_accel_mode(LOW_NOISE_MODE);
                w.set_gyro_mode(LOW_NOISE_MODE);
            })
            .await?;
        delay.delay_ms(SENSOR_STARTUP_MS).await;
        Ok(())
    }

    /// Reset the device and check its identity
    ///
    /// # Errors
    ///
    /// Returns `InvalidDevice` with the value read if `WHO_AM_I` is not 0x47,
    /// or an error if communication with the device fails.
    pub async fn test_comms<D>(&mut self, delay: &mut D) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.reset().await?;
        delay.delay_ms(RESET_DELAY_MS).await;
        let who_am_i = self.device.who_am_i().read_async().await?.who_am_i();
        if who_am_i != WHO_AM_I_VALUE {
            return Err(Error::InvalidDevice(who_am_i));
        }
        Ok(())
    }

    /// Read the `WHO_AM_I` register
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_who_am_i(&mut self) -> Result<u8, Error<I::Error>> {
        self.select_bank(Bank::Bank0).await?;
        let reg = self.device.who_am_i().read_async().await?;
        Ok(reg.who_am_i())
    }

    // ==================== SAMPLING CONFIGURATION ====================

    /// Set the full-scale select code (0-7) of a sensor
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `index > 7`, or an error if communication
    /// with the device fails.
    pub async fn set_full_scale(
        &mut self,
        sensor: Sensor,
        index: u8,
    ) -> Result<(), Error<I::Error>> {
        if index > MAX_FULL_SCALE_INDEX {
            return Err(Error::InvalidArgument);
        }
        self.select_bank(Bank::Bank0).await?;
        match sensor {
            Sensor::Accel => {
                self.device
                    .accel_config_0()
                    .modify_async(|w| {
                        w.set_accel_fs_sel(index);
                    })
                    .await?;
            }
            Sensor::Gyro => {
                self.device
                    .gyro_config_0()
                    .modify_async(|w| {
                        w.set_gyro_fs_sel(index);
                    })
                    .await?;
            }
        }
        Ok(())
    }

    /// Read the full-scale select code of a sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn full_scale(&mut self, sensor: Sensor) -> Result<u8, Error<I::Error>> {
        self.select_bank(Bank::Bank0).await?;
        Ok(match sensor {
            Sensor::Accel => self.device.accel_config_0().read_async().await?.accel_fs_sel(),
            Sensor::Gyro => self.device.gyro_config_0().read_async().await?.gyro_fs_sel(),
        })
    }

    /// Set the output data rate code (0-15) of a sensor
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `code > 15`, or an error if communication
    /// with the device fails.
    pub async fn set_output_data_rate(
        &mut self,
        sensor: Sensor,
        code: u8,
    ) -> Result<(), Error<I::Error>> {
        if code > MAX_ODR_CODE {
            return Err(Error::InvalidArgument);
        }
        self.select_bank(Bank::Bank0).await?;
        match sensor {
            Sensor::Accel => {
                self.device
                    .accel_config_0()
                    .modify_async(|w| {
                        w.set_accel_odr(code);
                    })
                    .await?;
            }
            Sensor::Gyro => {
                self.device
                    .gyro_config_0()
                    .modify_async(|w| {
                        w.set_gyro_odr(code);
                    })
                    .await?;
            }
        }
        Ok(())
    }

    /// Read the output data rate code of a sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn output_data_rate(&mut self, sensor: Sensor) -> Result<u8, Error<I::Error>> {
        self.select_bank(Bank::Bank0).await?;
        Ok(match sensor {
            Sensor::Accel => self.device.accel_config_0().read_async().await?.accel_odr(),
            Sensor::Gyro => self.device.gyro_config_0().read_async().await?.gyro_odr(),
        })
    }

    /// Set accelerometer full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_accel_full_scale(
        &mut self,
        scale: AccelFullScale,
    ) -> Result<(), Error<I::Error>> {
        self.set_full_scale(Sensor::Accel, scale as u8).await
    }

    /// Read accelerometer full-scale range
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the device holds a reserved code, or an
    /// error if communication with the device fails.
    pub async fn accel_full_scale(&mut self) -> Result<AccelFullScale, Error<I::Error>> {
        let code = self.full_scale(Sensor::Accel).await?;
        AccelFullScale::try_from(code).map_err(|_| Error::InvalidArgument)
    }

    /// Set gyroscope full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_gyro_full_scale(
        &mut self,
        scale: GyroFullScale,
    ) -> Result<(), Error<I::Error>> {
        self.set_full_scale(Sensor::Gyro, scale as u8).await
    }

    /// Read gyroscope full-scale range
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn gyro_full_scale(&mut self) -> Result<GyroFullScale, Error<I::Error>> {
        let code = self.full_scale(Sensor::Gyro).await?;
        GyroFullScale::try_from(code).map_err(|_| Error::InvalidArgument)
    }

    /// Set accelerometer output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_accel_odr(&mut self, odr: AccelOdr) -> Result<(), Error<I::Error>> {
        self.set_output_data_rate(Sensor::Accel, odr as u8).await
    }

    /// Read accelerometer output data rate
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the device holds a reserved code, or an
    /// error if communication with the device fails.
    pub async fn accel_odr(&mut self) -> Result<AccelOdr, Error<I::Error>> {
        let code = self.output_data_rate(Sensor::Accel).await?;
        AccelOdr::try_from(code).map_err(|_| Error::InvalidArgument)
    }

    /// Set gyroscope output data rate
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn set_gyro_odr(&mut self, odr: GyroOdr) -> Result<(), Error<I::Error>> {
        self.set_output_data_rate(Sensor::Gyro, odr as u8).await
    }

    /// Read gyroscope output data rate
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the device holds a reserved code, or an
    /// error if communication with the device fails.
    pub async fn gyro_odr(&mut self) -> Result<GyroOdr, Error<I::Error>> {
        let code = self.output_data_rate(Sensor::Gyro).await?;
        GyroOdr::try_from(code).map_err(|_| Error::InvalidArgument)
    }

    // ==================== SENSOR DATA ====================

    /// Read the raw X, Y, Z output of a sensor in one burst
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_axis_xyz(&mut self, sensor: Sensor) -> Result<AxisData, Error<I::Error>> {
        let mut buffer = [0u8; 6];
        self.select_bank(Bank::Bank0).await?;
        self.burst_read(sensor.data_register(), &mut buffer).await?;
        Ok(AxisData::from_be_bytes(buffer))
    }

    /// Read accelerometer data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_accel(&mut self) -> Result<AxisData, Error<I::Error>> {
        self.read_axis_xyz(Sensor::Accel).await
    }

    /// Read gyroscope data
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gyro(&mut self) -> Result<AxisData, Error<I::Error>> {
        self.read_axis_xyz(Sensor::Gyro).await
    }

    /// Read accelerometer data in g
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails or the
    /// full-scale field holds a reserved code.
    pub async fn read_accel_g(&mut self) -> Result<AccelDataG, Error<I::Error>> {
        let full_scale = self.accel_full_scale().await?;
        let raw = self.read_accel().await?;
        Ok(AccelDataG::from_raw(raw, full_scale))
    }

    /// Read gyroscope data in °/s
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_gyro_dps(&mut self) -> Result<GyroDataDps, Error<I::Error>> {
        let full_scale = self.gyro_full_scale().await?;
        let raw = self.read_gyro().await?;
        Ok(GyroDataDps::from_raw(raw, full_scale))
    }

    /// Read temperature sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_temperature(&mut self) -> Result<i16, Error<I::Error>> {
        let mut buffer = [0u8; 2];
        self.select_bank(Bank::Bank0).await?;
        self.burst_read(bank0::TEMP_DATA1, &mut buffer).await?;
        Ok(i16::from_be_bytes(buffer))
    }

    // ==================== CALIBRATION ====================

    /// Measure the resting offset of a sensor
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails. A failure
    /// while sampling still attempts to restore the previous full-scale; in
    /// every error case the stored calibration is left unchanged.
    pub async fn calibrate<D>(
        &mut self,
        sensor: Sensor,
        delay: &mut D,
    ) -> Result<Calibration, Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let saved = self.full_scale(sensor).await?;
        self.set_full_scale(sensor, CALIBRATION_FULL_SCALE).await?;

        let sampled = self.sample_mean(sensor, delay).await;
        let restored = self.set_full_scale(sensor, saved).await;

        let mean = match (sampled, restored) {
            (Ok(mean), Ok(())) => mean,
            (Ok(_), Err(e)) => return Err(e),
            (Err(e), restored) => {
                #[cfg(feature = "defmt")]
                if restored.is_err() {
                    defmt::warn!("Failed to restore full-scale {} after calibration", saved);
                }
                let _ = restored;
                return Err(e);
            }
        };

        let calibration = Calibration::from(mean);
        self.store_calibration(sensor, calibration);

        #[cfg(feature = "defmt")]
        defmt::debug!("{} calibration: {}", sensor, calibration);

        Ok(calibration)
    }

    async fn sample_mean<D>(
        &mut self,
        sensor: Sensor,
        delay: &mut D,
    ) -> Result<AxisData, Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        let mut sum = [0i32; 3];
        for _ in 0..CALIBRATION_SAMPLES {
            accumulate(&mut sum, self.read_axis_xyz(sensor).await?);
            delay.delay_ms(1).await;
        }
        Ok(mean(sum, CALIBRATION_SAMPLES))
    }

    /// Write stored calibration into the `OFFSET_USERx` registers
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn apply_user_offset(
        &mut self,
        apply_accel: bool,
        apply_gyro: bool,
    ) -> Result<(), Error<I::Error>> {
        let offsets = self.user_offsets(apply_accel, apply_gyro);
        self.select_bank(Bank::Bank4).await?;

        if apply_gyro {
            for index in 0..4 {
                self.write_register(bank4::OFFSET_USER0 + index, offsets[usize::from(index)])
                    .await?;
            }
        }
        if apply_accel {
            for index in 5..9 {
                self.write_register(bank4::OFFSET_USER0 + index, offsets[usize::from(index)])
                    .await?;
            }
        }
        if apply_accel || apply_gyro {
            self.write_register(bank4::OFFSET_USER4, offsets[4]).await?;
        }
        Ok(())
    }

    // ==================== FIFO ====================

    /// Configure the FIFO for stream mode with the given packet format
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn configure_fifo(&mut self, format: FifoFormat) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Bank0).await?;
        self.device
            .fifo_config()
            .write_async(|w| {
                w.set_fifo_mode(FIFO_MODE_STREAM);
            })
            .await?;
        self.write_register(bank0::FIFO_CONFIG1, format.config1_bits())
            .await?;
        self.fifo_format = Some(format);

        #[cfg(feature = "defmt")]
        defmt::debug!("FIFO configured: {}", format);

        Ok(())
    }

    /// Configure the FIFO from a raw format number (1-4)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` without touching the bus for any other
    /// number, or an error if communication with the device fails.
    pub async fn configure_fifo_index(&mut self, format: u8) -> Result<(), Error<I::Error>> {
        let format = FifoFormat::try_from(format).map_err(|_| Error::InvalidArgument)?;
        self.configure_fifo(format).await
    }

    /// Read and decode one FIFO packet
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` without touching the bus if no format was
    /// configured, or an error if communication with the device fails.
    pub async fn read_fifo(&mut self) -> Result<FifoPacket, Error<I::Error>> {
        let format = self.fifo_format.ok_or(Error::NotConfigured)?;
        let mut buffer = [0u8; MAX_PACKET_LEN];
        let packet = &mut buffer[..format.packet_len()];

        self.select_bank(Bank::Bank0).await?;
        self.burst_read(bank0::FIFO_DATA, packet).await?;
        FifoPacket::decode(format, packet).ok_or(Error::InvalidArgument)
    }

    /// Get the number of bytes currently stored in the FIFO
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn fifo_count(&mut self) -> Result<u16, Error<I::Error>> {
        self.select_bank(Bank::Bank0).await?;
        let reg = self.device.fifo_count().read_async().await?;
        Ok(reg.fifo_count())
    }

    /// Discard all FIFO contents
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn flush_fifo(&mut self) -> Result<(), Error<I::Error>> {
        self.select_bank(Bank::Bank0).await?;
        self.device
            .signal_path_reset()
            .write_async(|w| {
                w.set_fifo_flush(true);
            })
            .await?;
        Ok(())
    }

    // ==================== APEX ====================

    async fn run_sequence<D>(
        &mut self,
        sequence: &Sequence,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        for step in sequence.steps() {
            match step {
                Step::SelectBank(bank) => self.select_bank(bank).await?,
                Step::Write { address, value } => self.write_register(address, value).await?,
                Step::Modify {
                    address,
                    mask,
                    value,
                    shift,
                } => self.read_modify_write(mask, address, value, shift).await?,
                Step::DelayMs(ms) => delay.delay_ms(ms).await,
            }
        }
        Ok(())
    }

    /// Enable wake-on-motion on all three axes
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn enable_wake_on_motion<D>(
        &mut self,
        route: InterruptRoute,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.run_sequence(&apex::wake_on_motion(route), delay).await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Wake-on-motion enabled ({})", route);

        Ok(())
    }

    /// Enable significant motion detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn enable_significant_motion<D>(
        &mut self,
        route: InterruptRoute,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.run_sequence(&apex::significant_motion(route), delay)
            .await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Significant motion detection enabled ({})", route);

        Ok(())
    }

    /// Enable tap detection
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn enable_tap_detection<D>(
        &mut self,
        route: InterruptRoute,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.select_bank(Bank::Bank0).await?;
        let accel_config0 = self.read_register(bank0::ACCEL_CONFIG0).await?;
        self.run_sequence(&apex::tap_detection(accel_config0, route), delay)
            .await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Tap detection enabled ({})", route);

        Ok(())
    }

    /// Enable raise-to-wake, reporting `event` on the routed pin
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn enable_raise_to_wake<D>(
        &mut self,
        route: InterruptRoute,
        event: R2wEvent,
        delay: &mut D,
    ) -> Result<(), Error<I::Error>>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        self.run_sequence(&apex::raise_to_wake(route, event), delay)
            .await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("Raise-to-wake enabled ({}, {})", route, event);

        Ok(())
    }

    /// Pedometer (not supported)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `performance_mode > 2`, otherwise
    /// `NotImplemented`.
    #[allow(clippy::unused_async, clippy::unused_self)]
    pub async fn enable_pedometer(
        &mut self,
        performance_mode: u8,
        route: InterruptRoute,
    ) -> Result<(), Error<I::Error>> {
        let _ = route;
        validate_performance_mode(performance_mode)
    }

    /// Tilt detection (not supported)
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `performance_mode > 2`, otherwise
    /// `NotImplemented`.
    #[allow(clippy::unused_async, clippy::unused_self)]
    pub async fn enable_tilt_detection(
        &mut self,
        performance_mode: u8,
        route: InterruptRoute,
    ) -> Result<(), Error<I::Error>> {
        let _ = route;
        validate_performance_mode(performance_mode)
    }

    /// Read and clear the APEX event flags
    ///
    /// # Errors
    ///
    /// Returns an error if communication with the device fails.
    pub async fn read_apex_status(&mut self) -> Result<ApexStatus, Error<I::Error>> {
        let mut status = [0u8; 2];
        self.select_bank(Bank::Bank0).await?;
        self.burst_read(bank0::INT_STATUS2, &mut status).await?;
        Ok(ApexStatus::from_raw(status[0], status[1]))
    }
}
