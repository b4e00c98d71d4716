//! # Heading hold module
//!
//! While the operator is turning the chassis their turn demand passes
//! straight through. Once they let go of the turn axis, and have kept off it
//! for a short debounce period, the heading at that instant is captured and a
//! feedback controller adds a small rotation correction to hold it. Touching
//! the turn axis again releases the hold immediately.
//!
//! ```text
//!              turn == 0                 debounce elapsed
//!  Released ─────────────▶ Debouncing ─────────────────────▶ Holding
//!     ▲                        │                                │
//!     └────────────────────────┴────────────────────────────────┘
//!                              turn != 0
//! ```

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod controllers;
mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use controllers::*;
pub use params::Params;
pub use state::*;
