//! # Heading controller
//!
//! PID controller used by the heading hold. It owns its setpoint, enable flag
//! and output range, and publishes its result as a "last delivered output"
//! which the heading hold reads once per cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use serde::Serialize;

// Internal
use crate::eqpt::FeedbackController;
use util::maths::{clamp, wrap_deg_180};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PID controller
#[derive(Debug, Serialize, Clone)]
pub struct PidController {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Dervative gain
    k_d: f64,

    /// Output limits
    min_output: f64,
    max_output: f64,

    /// If true the process variable is an angle in degrees and the error is
    /// taken the short way round the circle.
    continuous_deg: bool,

    enabled: bool,

    setpoint: f64,

    /// Previous error
    prev_error: Option<f64>,

    /// The integral accumulation
    integral: f64,

    /// Last delivered output
    output: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl PidController {

    /// Create a new, disabled controller with the given gains and an output
    /// range of [-1, 1].
    pub fn new(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self {
            k_p, k_i, k_d,
            min_output: -1.0,
            max_output: 1.0,
            continuous_deg: false,
            enabled: false,
            setpoint: 0.0,
            prev_error: None,
            integral: 0.0,
            output: 0.0
        }
    }

    /// Create the controller used to hold heading from the hold parameters.
    pub fn from_params(params: &super::Params) -> Self {
        let mut pid = Self::new(params.k_p, params.k_i, params.k_d)
            .with_continuous_deg();
        pid.set_output_range(-params.max_correction, params.max_correction);
        pid
    }

    /// Treat the process variable as a heading in degrees which wraps at
    /// +/-180.
    pub fn with_continuous_deg(mut self) -> Self {
        self.continuous_deg = true;
        self
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Recalculate the output for the current process variable.
    ///
    /// `dt_s` is the time since the previous calculation. Does nothing while
    /// disabled.
    pub fn calculate(&mut self, process_var: f64, dt_s: f64) {
        if !self.enabled {
            return;
        }

        let error = if self.continuous_deg {
            wrap_deg_180(self.setpoint - process_var)
        }
        else {
            self.setpoint - process_var
        };

        // If there's no time difference neither integral nor derivative can
        // be computed, treat them as zero for this step
        let deriv = match self.prev_error {
            Some(e) if dt_s > 0.0 => (error - e) / dt_s,
            _ => 0.0
        };

        if dt_s > 0.0 {
            self.integral += error * dt_s;

            // Don't let the integral wind up past what the output can use
            if self.k_i != 0.0 {
                let lim = self.max_output.abs().max(self.min_output.abs()) / self.k_i.abs();
                self.integral = clamp(&self.integral, &-lim, &lim);
            }
        }

        let out = 
            self.k_p * error 
            + self.k_i * self.integral 
            + self.k_d * deriv;

        self.output = clamp(&out, &self.min_output, &self.max_output);
        self.prev_error = Some(error);

        trace!(
            "Heading PID: sp {:.3}, pv {:.3}, err {:.3}, out {:.4}", 
            self.setpoint, process_var, error, self.output
        );
    }
}

impl FeedbackController for PidController {
    fn reset(&mut self) {
        self.prev_error = None;
        self.integral = 0.0;
        self.output = 0.0;
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.output = 0.0;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_setpoint(&mut self, setpoint: f64) {
        self.setpoint = setpoint;
    }

    fn set_output_range(&mut self, min: f64, max: f64) {
        self.min_output = min;
        self.max_output = max;
        self.output = clamp(&self.output, &min, &max);
    }

    fn output(&self) -> f64 {
        self.output
    }
}
