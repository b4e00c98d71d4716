//! Cyclic module interface
//!
//! A cyclic module is set up once from a parameter file, then called every
//! exec cycle with that cycle's input. `drive_exec`'s swerve control is
//! driven this way from the drive cycle.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::session::Session;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// Init-then-process lifecycle of a cyclic module.
///
/// Modules whose processing cannot fail use `std::convert::Infallible` as
/// their `ProcError`, letting callers match the error away.
pub trait State {
    /// Passed to `init`, normally the parameter file name under
    /// `$SWERVE_SW_ROOT/params`.
    type InitData;
    type InitError;

    /// One cycle's worth of input.
    type InputData;
    type OutputData;

    /// Diagnostics describing how the last output was produced.
    type StatusReport;
    type ProcError;

    /// Load parameters and open the module's archives in `session`.
    fn init(&mut self, init_data: Self::InitData, session: &Session)
        -> Result<(), Self::InitError>;

    /// Run one cycle, returning the output and its status report.
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>;
}
