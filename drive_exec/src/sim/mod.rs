//! # Simulated equipment
//!
//! Stand-ins for the real operator controls, heading sensor and drivetrain,
//! used by the executable when no hardware is attached and by the tests.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod chassis;
mod heading;
mod oi;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use chassis::SimChassis;
pub use heading::SimHeading;
pub use oi::ScriptedOi;
