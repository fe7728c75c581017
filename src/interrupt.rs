//! Interrupt routing and APEX event status
//!
//! The ICM-42688-P has two interrupt pins. APEX features are routed to one of
//! them through the `INT_SOURCEx` registers, and their events are reported in
//! `INT_STATUS2` (wake-on-motion, significant motion) and `INT_STATUS3` (tap,
//! raise-to-wake, tilt, pedometer).
//!
//! # Example
//!
//! ```ignore
//! # use icm42688::{Icm42688Driver, InterruptRoute};
//! # let mut imu: Icm42688Driver<_> = todo!();
//! # let mut delay = todo!();
//! imu.enable_wake_on_motion(InterruptRoute::Int1, &mut delay)?;
//!
//! let status = imu.read_apex_status()?;
//! if status.wake_on_motion.any_motion() {
//!     // ...
//! }
//! # Ok::<(), icm42688::Error<()>>(())
//! ```

/// Interrupt pin an APEX event is routed to
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptRoute {
    /// Feature enabled without an interrupt pin
    #[default]
    None,
    /// Route to INT1
    Int1,
    /// Route to INT2
    Int2,
}

impl From<u8> for InterruptRoute {
    /// 1 selects INT1, 2 selects INT2, anything else leaves the event unrouted
    fn from(pin: u8) -> Self {
        match pin {
            1 => Self::Int1,
            2 => Self::Int2,
            _ => Self::None,
        }
    }
}

/// Wake-on-motion status for each axis
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WomStatus {
    /// Motion detected on X-axis
    pub x_motion: bool,
    /// Motion detected on Y-axis
    pub y_motion: bool,
    /// Motion detected on Z-axis
    pub z_motion: bool,
}

impl WomStatus {
    /// Check if motion was detected on any axis
    pub const fn any_motion(&self) -> bool {
        self.x_motion || self.y_motion || self.z_motion
    }

    /// Get number of axes with motion detected
    pub const fn motion_count(&self) -> u8 {
        (self.x_motion as u8) + (self.y_motion as u8) + (self.z_motion as u8)
    }
}

/// APEX event flags from `INT_STATUS2` and `INT_STATUS3`
///
/// Both registers clear on read, so one snapshot reports each event once.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(clippy::struct_excessive_bools)]
pub struct ApexStatus {
    /// Per-axis wake-on-motion flags
    pub wake_on_motion: WomStatus,
    /// Significant motion detected
    pub significant_motion: bool,
    /// Tap detected
    pub tap: bool,
    /// Raise-to-wake sleep event
    pub sleep: bool,
    /// Raise-to-wake wake event
    pub wake: bool,
    /// Tilt detected
    pub tilt: bool,
    /// Step counter overflow
    pub step_count_overflow: bool,
    /// Step detected
    pub step: bool,
}

impl ApexStatus {
    /// Decode raw `INT_STATUS2` and `INT_STATUS3` values
    pub const fn from_raw(int_status2: u8, int_status3: u8) -> Self {
        Self {
            wake_on_motion: WomStatus {
                x_motion: int_status2 & 0x01 != 0,
                y_motion: int_status2 & 0x02 != 0,
                z_motion: int_status2 & 0x04 != 0,
            },
            significant_motion: int_status2 & 0x08 != 0,
            tap: int_status3 & 0x01 != 0,
            sleep: int_status3 & 0x02 != 0,
            wake: int_status3 & 0x04 != 0,
            tilt: int_status3 & 0x08 != 0,
            step_count_overflow: int_status3 & 0x10 != 0,
            step: int_status3 & 0x20 != 0,
        }
    }

    /// Check if any event flag is set
    pub const fn any_set(&self) -> bool {
        self.wake_on_motion.any_motion()
            || self.significant_motion
            || self.tap
            || self.sleep
            || self.wake
            || self.tilt
            || self.step_count_overflow
            || self.step
    }
}
