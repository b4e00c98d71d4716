//! Heading hold parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the heading hold
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct Params {

    /// Heading controller proportional gain
    pub k_p: f64,

    /// Heading controller integral gain
    pub k_i: f64,

    /// Heading controller derivative gain
    pub k_d: f64,

    /// Largest correction the controller may output, in either direction.
    pub max_correction: f64,

    /// Time the turn axis must stay at zero before the hold engages.
    ///
    /// Units: seconds
    pub debounce_s: f64,

    /// Period at which the heading controller is recalculated.
    ///
    /// Units: seconds
    pub ctrl_period_s: f64
}

impl Default for Params {
    fn default() -> Self {
        // Kp: 0.5% rotation demand per degree of error. Kd estimates the
        // error half a second ahead (Td = 0.5 s, Kd = Kp * Td).
        Params {
            k_p: 0.005,
            k_i: 0.0,
            k_d: 0.0025,
            max_correction: 0.15,
            debounce_s: 0.1,
            ctrl_period_s: 0.05
        }
    }
}
