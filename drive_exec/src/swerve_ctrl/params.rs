//! Parameters structure for SwerveCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for swerve control.
///
/// Length and width may be in any unit as long as both use the same one, only
/// their ratio to the diagonal matters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Params {

    // ---- GEOMETRY ----

    /// Distance between the front and back wheel contact points.
    ///
    /// Units: inches
    pub length: f64,

    /// Distance between the left and right wheel contact points.
    ///
    /// Units: inches
    pub width: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Length of the wheelbase diagonal, `sqrt(length^2 + width^2)`.
    pub fn diagonal(&self) -> f64 {
        self.length.hypot(self.width)
    }

    /// Check the geometry describes a real wheelbase.
    pub fn is_valid(&self) -> bool {
        self.length > 0.0 && self.width > 0.0
    }
}

impl Default for Params {
    fn default() -> Self {
        Params {
            length: 14.5,
            width: 16.5
        }
    }
}
