//! # Drive library.
//!
//! Teleoperated control law for a four wheel swerve drivetrain, plus the
//! simulated equipment used to exercise it from `drive_exec`.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Data store - global state of the drive executable
pub mod data_store;

/// Drive cycle - one tick of the control law, from operator input to wheel demands
pub mod drive_cycle;

/// Equipment interfaces - traits for the operator input, heading sensor, controller, timer and
/// drivetrain
pub mod eqpt;

/// Heading hold - keeps the chassis pointing the same way once the operator stops turning
pub mod head_hold;

/// Input conditioning - deadbanding of the operator axes
pub mod input_cond;

/// Drive executable parameters
pub mod params;

/// Simulated equipment
pub mod sim;

/// Swerve control module - converts a chassis command into individual wheel commands
pub mod swerve_ctrl;
