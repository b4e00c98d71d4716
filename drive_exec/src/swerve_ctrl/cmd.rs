//! Commands passed into SwerveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Largest magnitude any chassis command component may take.
pub const MAX_CMD_MAGNITUDE: f64 = 1.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Demanded chassis motion, each component nominally between -1 and +1.
///
/// Frame: field, since the translation has already passed through field
/// orientation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ChassisCommand {
    /// Forward translation demand
    pub fwd: f64,

    /// Strafe (sideways) translation demand, positive to the right
    pub strafe: f64,

    /// Rotation demand, positive clockwise
    pub rcw: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ChassisCommand {

    pub fn new(fwd: f64, strafe: f64, rcw: f64) -> Self {
        Self { fwd, strafe, rcw }
    }

    /// Determine if the command is within range (no component magnitude over
    /// `MAX_CMD_MAGNITUDE`).
    pub fn is_valid(&self) -> bool {
        [self.fwd, self.strafe, self.rcw]
            .iter()
            .all(|v| v.abs() <= MAX_CMD_MAGNITUDE)
    }

    /// True if all three components are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.fwd == 0.0 && self.strafe == 0.0 && self.rcw == 0.0
    }
}
