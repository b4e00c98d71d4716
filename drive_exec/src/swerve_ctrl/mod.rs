//! Swerve control module
//!
//! Converts a chassis command (forward, strafe, rotate) into a steer angle and
//! normalised drive speed for each of the four independently steered wheels.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod cmd;
mod params;
mod state;
mod calc_swerve;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use cmd::*;
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The number of wheel modules (one steer and one drive axis each).
pub const NUM_WHEELS: usize = 4;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Wheel positions, in the order used by all per-wheel arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelId {
    FrontLeft = 0,
    FrontRight = 1,
    BackRight = 2,
    BackLeft = 3
}

/// Possible errors that can occur during SwerveCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum SwerveCtrlError {
    #[error("Could not load the SwerveCtrl parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Invalid chassis geometry, length ({0}) and width ({1}) must be positive")]
    InvalidGeometry(f64, f64),

    #[error("Could not initialise the SwerveCtrl archives: {0}")]
    ArchiveInitError(#[from] util::archive::ArchiveError),
}

impl WheelId {
    pub fn index(self) -> usize {
        self as usize
    }
}
