//! # Data Store

use log::debug;

use crate::drive_cycle::TickOutcome;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Session elapsed time at the start of the cycle
    pub sim_time_s: f64,

    /// Time the heading controller was last stepped
    pub last_ctrl_step_s: Option<f64>,

    // Drive cycle
    pub last_outcome: Option<TickOutcome>,

    // Monitoring Counters
    /// Number of ticks rejected for an out of range command
    pub num_rejected_ticks: u64,

    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform actions required at the start of a cycle.
    ///
    /// Clears the last outcome and sets the 1Hz cycle flag.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        let cycles_per_s = (cycle_frequency_hz.round() as u128).max(1);
        self.is_1_hz_cycle = self.num_cycles % cycles_per_s == 0;

        self.last_outcome = None;

        self.sim_time_s = util::session::get_elapsed_seconds();
    }

    /// Record the outcome of this cycle's drive tick.
    pub fn record_outcome(&mut self, outcome: TickOutcome) {
        if let TickOutcome::Rejected(cmd) = outcome {
            self.num_rejected_ticks += 1;
            debug!("Rejected tick #{}: {:?}", self.num_rejected_ticks, cmd);
        }

        self.last_outcome = Some(outcome);
    }

    /// Return the time step since the heading controller was last stepped,
    /// if at least `period_s` has passed. The first call always steps, with
    /// a time step of one period.
    pub fn ctrl_step_due(&mut self, period_s: f64) -> Option<f64> {
        match self.last_ctrl_step_s {
            Some(t) if self.sim_time_s - t < period_s => None,
            Some(t) => {
                self.last_ctrl_step_s = Some(self.sim_time_s);
                Some(self.sim_time_s - t)
            },
            None => {
                self.last_ctrl_step_s = Some(self.sim_time_s);
                Some(period_s)
            }
        }
    }
}
