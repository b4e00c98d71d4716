//! Heading hold state machine

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::debug;
use serde::Serialize;

// Internal
use super::Params;
use crate::eqpt::{FeedbackController, MonotonicTimer};
use util::{
    archive::{Archived, Archiver, ArchiveError},
    session::{self, Session}};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Heading hold, generic over the feedback controller and debounce timer.
pub struct HeadHold<F, T> {
    params: Params,

    /// Heading controller, enabled only while holding
    ctrl: F,

    /// Debounce timer, running only while debouncing
    timer: T,

    state: HeadHoldState,

    /// Heading captured when the hold engaged
    ///
    /// Units: degrees
    hold_heading_deg: f64,

    report: StatusReport,
    arch_report: Archiver
}

/// Status report for heading hold processing.
#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq)]
pub struct StatusReport {
    pub state: HeadHoldState,

    /// Heading being held, `None` unless holding.
    ///
    /// Units: degrees
    pub setpoint_deg: Option<f64>,

    /// Correction added to the rotation demand this cycle
    pub correction: f64
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// States of the heading hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HeadHoldState {
    /// Operator is turning, rotation demand passes through untouched
    Released,

    /// Turn axis is at zero, waiting for the debounce period
    Debouncing,

    /// Controller is holding the captured heading
    Holding
}

impl Default for HeadHoldState {
    fn default() -> Self {
        HeadHoldState::Released
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<F, T> HeadHold<F, T>
where
    F: FeedbackController,
    T: MonotonicTimer
{
    /// Create a new heading hold in the released state.
    ///
    /// The controller's output range is set here, once, to
    /// `+/-params.max_correction`.
    pub fn new(params: Params, mut ctrl: F, mut timer: T) -> Self {
        ctrl.set_output_range(-params.max_correction, params.max_correction);
        ctrl.disable();
        ctrl.reset();

        timer.stop();
        timer.reset();

        Self {
            params,
            ctrl,
            timer,
            state: HeadHoldState::Released,
            hold_heading_deg: 0.0,
            report: StatusReport::default(),
            arch_report: Archiver::default()
        }
    }

    /// Start archiving the status report in the given session.
    pub fn init_archive(&mut self, session: &Session) -> Result<(), ArchiveError> {
        self.arch_report = Archiver::from_path(
            session, "head_hold/status_report.csv"
        )?;
        Ok(())
    }

    /// Compute the rotation demand for this cycle.
    ///
    /// `turn` is the deadbanded turn axis and `heading_deg` the currently
    /// sensed heading. A non-zero turn is returned unchanged, otherwise the
    /// controller's correction is returned once the hold has engaged.
    pub fn calc_rotation(&mut self, turn: f64, heading_deg: f64) -> f64 {
        let prev_state = self.state;
        self.report = StatusReport::default();

        if turn != 0.0 {
            self.release();
        }
        else {
            match self.state {
                HeadHoldState::Released | HeadHoldState::Debouncing => {
                    self.timer.start();

                    if self.timer.has_elapsed_at_least(self.params.debounce_s) {
                        self.engage(heading_deg);
                    }
                    else {
                        self.state = HeadHoldState::Debouncing;
                    }
                },
                HeadHoldState::Holding => ()
            }
        }

        let correction = match self.state {
            HeadHoldState::Holding => self.ctrl.output(),
            _ => 0.0
        };

        if self.state != prev_state {
            debug!("Heading hold {:?} -> {:?}", prev_state, self.state);
        }

        self.report.state = self.state;
        self.report.correction = correction;
        if self.state == HeadHoldState::Holding {
            self.report.setpoint_deg = Some(self.hold_heading_deg);
        }

        turn + correction
    }

    /// Go to released: stop the controller and clear the debounce timer.
    fn release(&mut self) {
        self.ctrl.disable();
        self.ctrl.reset();

        self.timer.stop();
        self.timer.reset();

        self.state = HeadHoldState::Released;
    }

    /// Go to holding, capturing the heading at this instant.
    fn engage(&mut self, heading_deg: f64) {
        self.timer.stop();

        self.ctrl.enable();
        self.ctrl.set_setpoint(heading_deg);
        self.hold_heading_deg = heading_deg;

        self.state = HeadHoldState::Holding;
    }

    pub fn state(&self) -> HeadHoldState {
        self.state
    }

    pub fn report(&self) -> StatusReport {
        self.report
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn ctrl(&self) -> &F {
        &self.ctrl
    }

    /// Mutable access to the controller, so the exec can step it on its own
    /// period.
    pub fn ctrl_mut(&mut self) -> &mut F {
        &mut self.ctrl
    }
}

impl<F, T> Archived for HeadHold<F, T> {
    fn write(&mut self) -> Result<(), ArchiveError> {
        #[derive(Serialize)]
        struct Record {
            time_s: f64,
            state: HeadHoldState,
            setpoint_deg: Option<f64>,
            correction: f64
        }

        self.arch_report.serialise(Record {
            time_s: session::get_elapsed_seconds(),
            state: self.report.state,
            setpoint_deg: self.report.setpoint_deg,
            correction: self.report.correction
        })
    }
}
