//! # Equipment interfaces
//!
//! Traits describing the collaborators the drive control law talks to each
//! cycle: the operator's controls, the heading sensor, the heading feedback
//! controller, the debounce timer and the drivetrain actuators.
//!
//! Simulated implementations live in [`crate::sim`], the PID implementation
//! of [`FeedbackController`] in [`crate::head_hold::PidController`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use util::time::{Clock, StopWatch};

use crate::swerve_ctrl::NUM_WHEELS;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Operator input provider. Values are polled once per cycle.
pub trait OperatorInput {
    /// Overall drive speed multiplier, between 0 and 1.
    fn drive_speed_coeff(&self) -> f64;

    /// Forward axis, between -1 and +1. Positive is forward.
    fn forward_axis(&self) -> f64;

    /// Horizontal (strafe) axis, between -1 and +1. Positive is right.
    fn horizontal_axis(&self) -> f64;

    /// Turn axis, between -1 and +1. Positive is clockwise.
    fn turn_axis(&self) -> f64;
}

/// Heading sensor and field orientation transform.
pub trait HeadingSensor {
    /// Current heading of the chassis.
    ///
    /// Units: degrees, clockwise positive
    fn heading_deg(&self) -> f64;

    /// Rotate a robot frame demand (`x` strafe, `y` forward) into the field
    /// frame using the current heading, so that "forward" is field absolute.
    ///
    /// Returns `(forward, strafe)`.
    fn field_oriented_vector(&self, x: f64, y: f64) -> (f64, f64);
}

/// Closed loop controller driven by the heading hold.
///
/// The controller computes on its own schedule; `output` returns the last
/// value it delivered rather than computing a fresh one.
pub trait FeedbackController {
    /// Clear integral and derivative history and the delivered output.
    fn reset(&mut self);

    fn enable(&mut self);

    /// Stop computing. The delivered output drops to zero.
    fn disable(&mut self);

    fn is_enabled(&self) -> bool;

    fn set_setpoint(&mut self, setpoint: f64);

    /// Bound every output the controller delivers to `[min, max]`.
    fn set_output_range(&mut self, min: f64, max: f64);

    /// Last delivered output.
    fn output(&self) -> f64;
}

/// Monotonic, resettable timer.
pub trait MonotonicTimer {
    /// Start accumulating time. Does nothing if already running.
    fn start(&mut self);

    fn stop(&mut self);

    /// Zero the accumulated time.
    fn reset(&mut self);

    fn has_elapsed_at_least(&self, period_s: f64) -> bool;
}

/// Drivetrain actuation. Demands are fire-and-forget.
///
/// Wheels are ordered front-left, front-right, back-right, back-left.
pub trait Actuator {
    /// Units: degrees
    fn set_steer_angles(&mut self, angles_deg: [f64; NUM_WHEELS]);

    /// Units: normalised, 0 to 1
    fn set_wheel_speeds(&mut self, speeds: [f64; NUM_WHEELS]);
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<C: Clock> MonotonicTimer for StopWatch<C> {
    fn start(&mut self) {
        StopWatch::start(self)
    }

    fn stop(&mut self) {
        StopWatch::stop(self)
    }

    fn reset(&mut self) {
        StopWatch::reset(self)
    }

    fn has_elapsed_at_least(&self, period_s: f64) -> bool {
        self.elapsed_s() >= period_s
    }
}
