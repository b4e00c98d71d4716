//! # Input conditioning
//!
//! Deadbanding of the raw operator axes. Values inside the deadband become
//! exactly zero, everything else passes through untouched (no rescaling or
//! response curve).

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use crate::eqpt::OperatorInput;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Axis magnitudes at or below this are treated as zero.
pub const DEADBAND: f64 = 0.10;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A snapshot of the operator's axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OiAxes {
    pub forward: f64,
    pub horizontal: f64,
    pub turn: f64,
    pub speed_coeff: f64
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Apply the deadband to a single raw axis value.
pub fn condition(raw: f64) -> f64 {
    if raw.abs() <= DEADBAND {
        0.0
    }
    else {
        raw
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl OiAxes {
    /// Poll all axes from the operator input.
    pub fn read<O: OperatorInput>(oi: &O) -> Self {
        Self {
            forward: oi.forward_axis(),
            horizontal: oi.horizontal_axis(),
            turn: oi.turn_axis(),
            speed_coeff: oi.drive_speed_coeff()
        }
    }

    /// Deadband the three motion axes. The speed coefficient is not an axis
    /// and is left alone.
    pub fn conditioned(&self) -> Self {
        Self {
            forward: condition(self.forward),
            horizontal: condition(self.horizontal),
            turn: condition(self.turn),
            speed_coeff: self.speed_coeff
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_condition() {
        for raw in [0.0, 0.05, -0.05, 0.1, -0.1].iter() {
            assert_eq!(condition(*raw), 0.0);
        }
        for raw in [0.1000001, -0.11, 0.5, -1.0, 1.0].iter() {
            assert_eq!(condition(*raw), *raw);
        }
    }

    #[test]
    fn test_conditioned_axes() {
        let axes = OiAxes {
            forward: 0.08,
            horizontal: -0.6,
            turn: 0.1,
            speed_coeff: 0.05
        };

        assert_eq!(axes.conditioned(), OiAxes {
            forward: 0.0,
            horizontal: -0.6,
            turn: 0.0,
            speed_coeff: 0.05
        });
    }
}
