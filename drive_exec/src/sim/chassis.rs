//! Simulated drivetrain

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::trace;
use serde::Serialize;

use crate::{eqpt::Actuator, swerve_ctrl::NUM_WHEELS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drivetrain which records the demands it receives. Steer axes are assumed
/// to reach their demand instantly.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SimChassis {
    /// Units: degrees
    str_abs_pos_deg: [f64; NUM_WHEELS],

    /// Units: normalised
    drv_speed_norm: [f64; NUM_WHEELS],

    num_str_dems: u64,
    num_drv_dems: u64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimChassis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn str_abs_pos_deg(&self) -> [f64; NUM_WHEELS] {
        self.str_abs_pos_deg
    }

    pub fn drv_speed_norm(&self) -> [f64; NUM_WHEELS] {
        self.drv_speed_norm
    }

    /// Total number of actuation calls received, steer and drive.
    pub fn num_dems(&self) -> u64 {
        self.num_str_dems + self.num_drv_dems
    }

    pub fn num_str_dems(&self) -> u64 {
        self.num_str_dems
    }

    pub fn num_drv_dems(&self) -> u64 {
        self.num_drv_dems
    }
}

impl Actuator for SimChassis {
    fn set_steer_angles(&mut self, angles_deg: [f64; NUM_WHEELS]) {
        trace!("SimChassis steer demand: {:?}", angles_deg);
        self.str_abs_pos_deg = angles_deg;
        self.num_str_dems += 1;
    }

    fn set_wheel_speeds(&mut self, speeds: [f64; NUM_WHEELS]) {
        trace!("SimChassis drive demand: {:?}", speeds);
        self.drv_speed_norm = speeds;
        self.num_drv_dems += 1;
    }
}
