//! APEX motion feature sequences
//!
//! Each APEX feature is enabled by a fixed series of bank selections, register
//! writes, field updates and settling delays. The series are described here as
//! data and executed by the driver one [`Step`] at a time, aborting on the
//! first failed step.
//!
//! Every sequence has the same shape: setup steps, the optional interrupt
//! routing update, a 50 ms settling delay and the steps that switch the feature
//! on.

use crate::Bank;
use crate::interrupt::InterruptRoute;
use crate::registers::{bank0, bank4};
use crate::sensors::AccelOdr;

/// Delay between routing an interrupt and enabling the feature
pub const ROUTE_SETTLE_MS: u32 = 50;

/// Wake-on-motion threshold written to each axis (98/256 g, about 383 mg)
pub const WOM_THRESHOLD: u8 = 98;

/// Highest performance mode accepted by the pedometer and tilt detector
pub const MAX_PERFORMANCE_MODE: u8 = 2;

/// One register-level action of an APEX sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Select a register bank
    SelectBank(Bank),
    /// Write a whole register
    Write {
        /// Register address in the selected bank
        address: u8,
        /// Value to write
        value: u8,
    },
    /// Read-modify-write of a field
    Modify {
        /// Register address in the selected bank
        address: u8,
        /// Field mask before shifting
        mask: u8,
        /// Field value before shifting
        value: u8,
        /// Position of the field's least significant bit
        shift: u8,
    },
    /// Wait for the given number of milliseconds
    DelayMs(u32),
}

/// Raise-to-wake event routed to the interrupt pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum R2wEvent {
    /// Device raised (`INT_SOURCE6/7` bit 2)
    Wake,
    /// Device lowered (`INT_SOURCE6/7` bit 1)
    Sleep,
}

impl R2wEvent {
    const fn source_bit(self) -> u8 {
        match self {
            Self::Wake => 2,
            Self::Sleep => 1,
        }
    }
}

/// A complete APEX enable sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence {
    prologue: Option<Step>,
    setup: &'static [Step],
    route: Option<Step>,
    enable: &'static [Step],
}

impl Sequence {
    /// All steps in execution order
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.prologue
            .into_iter()
            .chain(self.setup.iter().copied())
            .chain(self.route)
            .chain(core::iter::once(Step::DelayMs(ROUTE_SETTLE_MS)))
            .chain(self.enable.iter().copied())
    }
}

const fn modify(address: u8, mask: u8, value: u8, shift: u8) -> Step {
    Step::Modify {
        address,
        mask,
        value,
        shift,
    }
}

const fn write(address: u8, value: u8) -> Step {
    Step::Write { address, value }
}

/// Set a single bit in the `INT1` or `INT2` source register
const fn route_bit(route: InterruptRoute, int1: u8, int2: u8, bit: u8) -> Option<Step> {
    match route {
        InterruptRoute::Int1 => Some(modify(int1, 0b1, 0b1, bit)),
        InterruptRoute::Int2 => Some(modify(int2, 0b1, 0b1, bit)),
        InterruptRoute::None => None,
    }
}

// Accelerometer at 50 Hz in low-power mode, WoM thresholds, back to bank 0
const MOTION_SETUP: &[Step] = &[
    Step::SelectBank(Bank::Bank0),
    modify(bank0::ACCEL_CONFIG0, 0b1111, 0x9, 0),
    modify(bank0::PWR_MGMT0, 0b11, 0x2, 0),
    Step::DelayMs(1),
    Step::SelectBank(Bank::Bank4),
    write(bank4::ACCEL_WOM_X_THR, WOM_THRESHOLD),
    write(bank4::ACCEL_WOM_Y_THR, WOM_THRESHOLD),
    write(bank4::ACCEL_WOM_Z_THR, WOM_THRESHOLD),
    Step::DelayMs(1),
    Step::SelectBank(Bank::Bank0),
];

const WOM_ENABLE: &[Step] = &[modify(bank0::SMD_CONFIG, 0b1111, 0b0110, 0)];

const SMD_ENABLE: &[Step] = &[modify(bank0::SMD_CONFIG, 0b1111, 0b0111, 0)];

const TAP_LOW_POWER: &[Step] = &[
    modify(bank0::PWR_MGMT0, 0b11, 0x2, 0),
    modify(bank0::INTF_CONFIG1, 0b1, 0x1, 3),
    modify(bank0::ACCEL_CONFIG1, 0b11, 0x2, 1),
    modify(bank0::GYRO_ACCEL_CONFIG0, 0b1111, 0x4, 4),
    Step::DelayMs(1),
    Step::SelectBank(Bank::Bank4),
    write(bank4::APEX_CONFIG8, 0x5B),
    write(bank4::APEX_CONFIG7, 0x46),
    Step::DelayMs(1),
];

const TAP_LOW_NOISE: &[Step] = &[
    modify(bank0::PWR_MGMT0, 0b11, 0x3, 0),
    modify(bank0::ACCEL_CONFIG1, 0b11, 0x2, 3),
    modify(bank0::GYRO_ACCEL_CONFIG0, 0b1111, 0x0, 4),
    Step::DelayMs(1),
    Step::SelectBank(Bank::Bank4),
    write(bank4::APEX_CONFIG8, 0x5B),
    write(bank4::APEX_CONFIG7, 0x46),
    Step::DelayMs(1),
];

const TAP_ENABLE: &[Step] = &[
    Step::SelectBank(Bank::Bank0),
    modify(bank0::APEX_CONFIG0, 0b1, 0x1, 6),
];

const R2W_SETUP: &[Step] = &[
    Step::SelectBank(Bank::Bank0),
    modify(bank0::ACCEL_CONFIG0, 0b1111, 0xA, 0),
    modify(bank0::PWR_MGMT0, 0b11, 0x2, 0),
    modify(bank0::INTF_CONFIG1, 0b1, 0x0, 3),
    modify(bank0::APEX_CONFIG0, 0b11, 0x2, 0),
    Step::DelayMs(1),
    // DMP memory reset
    write(bank0::SIGNAL_PATH_RESET, 0x20),
    Step::DelayMs(1),
    Step::SelectBank(Bank::Bank4),
    modify(bank4::APEX_CONFIG4, 0b111, 0x7, 3),
    Step::DelayMs(1),
    modify(bank4::APEX_CONFIG5, 0b111, 0x7, 3),
    Step::DelayMs(1),
    modify(bank4::APEX_CONFIG6, 0b111, 0x7, 3),
    Step::DelayMs(1),
    Step::SelectBank(Bank::Bank0),
    // DMP init
    modify(bank0::SIGNAL_PATH_RESET, 0b1, 0x1, 6),
    Step::SelectBank(Bank::Bank4),
];

const R2W_ENABLE: &[Step] = &[
    Step::SelectBank(Bank::Bank0),
    modify(bank0::APEX_CONFIG0, 0b1, 0x1, 3),
];

/// Wake-on-motion on all three axes
pub const fn wake_on_motion(route: InterruptRoute) -> Sequence {
    let route = match route {
        InterruptRoute::Int1 => Some(modify(bank0::INT_SOURCE1, 0b111, 0b111, 0)),
        InterruptRoute::Int2 => Some(modify(bank0::INT_SOURCE4, 0b111, 0b111, 0)),
        InterruptRoute::None => None,
    };

    Sequence {
        prologue: None,
        setup: MOTION_SETUP,
        route,
        enable: WOM_ENABLE,
    }
}

/// Significant motion detection
pub const fn significant_motion(route: InterruptRoute) -> Sequence {
    Sequence {
        prologue: None,
        setup: MOTION_SETUP,
        route: route_bit(route, bank0::INT_SOURCE1, bank0::INT_SOURCE4, 3),
        enable: SMD_ENABLE,
    }
}

/// Tap detection, given the current `ACCEL_CONFIG0` value
///
/// Tap detection runs at 200 Hz or 500 Hz in low-power mode and at 1 kHz in
/// low-noise mode. Any other accelerometer rate is replaced with 500 Hz,
/// keeping the full-scale bits.
pub fn tap_detection(accel_config0: u8, route: InterruptRoute) -> Sequence {
    let odr = AccelOdr::try_from(accel_config0 & 0x0F).ok();

    let prologue = match odr {
        Some(odr) if odr.supports_tap_detection() => None,
        _ => Some(write(
            bank0::ACCEL_CONFIG0,
            (accel_config0 & 0xF0) | AccelOdr::Hz500 as u8,
        )),
    };

    let setup = if odr == Some(AccelOdr::Hz1000) {
        TAP_LOW_NOISE
    } else {
        TAP_LOW_POWER
    };

    Sequence {
        prologue,
        setup,
        route: route_bit(route, bank4::INT_SOURCE6, bank4::INT_SOURCE7, 0),
        enable: TAP_ENABLE,
    }
}

/// Raise-to-wake, reporting `event` on the routed pin
pub const fn raise_to_wake(route: InterruptRoute, event: R2wEvent) -> Sequence {
    Sequence {
        prologue: None,
        setup: R2W_SETUP,
        route: route_bit(
            route,
            bank4::INT_SOURCE6,
            bank4::INT_SOURCE7,
            event.source_bit(),
        ),
        enable: R2W_ENABLE,
    }
}
