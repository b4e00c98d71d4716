//! Implementations for the SwerveCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use std::convert::Infallible;
use serde::Serialize;

// Internal
use super::{Params, ChassisCommand, SwerveCtrlError, NUM_WHEELS};
use util::{
    params, 
    module::State,
    archive::{Archived, Archiver, ArchiveError},
    session::{self, Session}};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Swerve control module state
#[derive(Default)]
pub struct SwerveCtrl {

    pub(crate) params: Params,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    pub(crate) current_cmd: Option<ChassisCommand>,

    /// Steer angles of the last non-zero command. Held while the chassis
    /// command is zero so the wheels keep pointing the same way.
    ///
    /// Units: degrees
    pub(crate) last_angles_deg: [f64; NUM_WHEELS],

    pub(crate) output: Option<WheelCommands>,
    arch_output: Archiver
}

/// Input data to Swerve Control.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputData {
    /// The range-checked chassis command to execute
    pub cmd: ChassisCommand,

    /// Overall speed multiplier from the operator, between 0 and 1
    pub speed_coeff: f64
}

/// Per-wheel demands, ordered front-left, front-right, back-right, back-left.
#[derive(Clone, Copy, Serialize, Debug, Default, PartialEq)]
pub struct WheelCommands {
    /// Steer axis absolute position demand, in (-180, 180].
    /// 
    /// Units: degrees
    pub str_abs_pos_deg: [f64; NUM_WHEELS],

    /// Drive axis speed demand.
    /// 
    /// Units: normalised, 0 to 1
    pub drv_speed_norm: [f64; NUM_WHEELS]
}

/// Status report for SwerveCtrl processing.
#[derive(Clone, Copy, Default, Serialize, Debug, PartialEq)]
pub struct StatusReport {
    /// Largest of the four wheel speeds before normalisation
    pub max_raw_speed: f64,

    /// True if the wheel speeds were scaled down to keep them within 1
    pub speeds_scaled: bool,

    /// True if the command was zero and the previous steer angles were held
    pub angles_held: bool,

    /// True if the command was out of range and no wheel demands were
    /// computed. The output is then the one still held by the drivetrain.
    pub cmd_rejected: bool
}

/// Flattened output record written to the archive each cycle.
#[derive(Serialize)]
struct OutputRecord {
    time_s: f64,
    rejected: bool,
    fwd: Option<f64>,
    strafe: Option<f64>,
    rcw: Option<f64>,
    str_fl_deg: f64,
    str_fr_deg: f64,
    str_br_deg: f64,
    str_bl_deg: f64,
    drv_fl: f64,
    drv_fr: f64,
    drv_br: f64,
    drv_bl: f64,
}

/// Flattened status report record.
#[derive(Serialize)]
struct ReportRecord {
    time_s: f64,
    max_raw_speed: f64,
    speeds_scaled: bool,
    angles_held: bool,
    cmd_rejected: bool
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for SwerveCtrl {
    type InitData = &'static str;
    type InitError = SwerveCtrlError;
    
    type InputData = InputData;
    type OutputData = WheelCommands;
    type StatusReport = StatusReport;
    type ProcError = Infallible;

    /// Initialise the SwerveCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session) 
        -> Result<(), Self::InitError> 
    {
        // Load and check the parameters
        let params: Params = params::load(init_data)?;
        *self = Self::from_params(params)?;

        // Initialise the archivers
        self.arch_report = Archiver::from_path(
            session, "swerve_ctrl/status_report.csv"
        )?;
        self.arch_output = Archiver::from_path(
            session, "swerve_ctrl/output.csv"
        )?;

        Ok(())
    }

    /// Perform cyclic processing of Swerve Control.
    ///
    /// This never fails, the command is expected to have been range checked
    /// by the caller (see [`SwerveCtrl::reject`]).
    fn proc(&mut self, input_data: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> 
    {
        Ok(self.calc_wheel_cmds(&input_data.cmd, input_data.speed_coeff))
    }
}

impl Archived for SwerveCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        let time_s = session::get_elapsed_seconds();

        self.arch_report.serialise(ReportRecord {
            time_s,
            max_raw_speed: self.report.max_raw_speed,
            speeds_scaled: self.report.speeds_scaled,
            angles_held: self.report.angles_held,
            cmd_rejected: self.report.cmd_rejected
        })?;

        let out = self.output.unwrap_or_default();
        self.arch_output.serialise(OutputRecord {
            time_s,
            rejected: self.report.cmd_rejected,
            fwd: self.current_cmd.map(|c| c.fwd),
            strafe: self.current_cmd.map(|c| c.strafe),
            rcw: self.current_cmd.map(|c| c.rcw),
            str_fl_deg: out.str_abs_pos_deg[0],
            str_fr_deg: out.str_abs_pos_deg[1],
            str_br_deg: out.str_abs_pos_deg[2],
            str_bl_deg: out.str_abs_pos_deg[3],
            drv_fl: out.drv_speed_norm[0],
            drv_fr: out.drv_speed_norm[1],
            drv_br: out.drv_speed_norm[2],
            drv_bl: out.drv_speed_norm[3],
        })?;

        Ok(())
    }
}

impl SwerveCtrl {

    /// Build a SwerveCtrl from already loaded parameters, without archives.
    pub fn from_params(params: Params) -> Result<Self, SwerveCtrlError> {
        if !params.is_valid() {
            return Err(SwerveCtrlError::InvalidGeometry(params.length, params.width));
        }

        Ok(Self {
            params,
            ..Default::default()
        })
    }

    /// Compute the wheel demands for the given command.
    ///
    /// Steer angles are only recalculated for a non-zero command, a zero
    /// command keeps the last angles and demands zero speed.
    pub fn calc_wheel_cmds(
        &mut self, 
        cmd: &ChassisCommand, 
        speed_coeff: f64
    ) -> (WheelCommands, StatusReport) {
        // Clear the status report
        self.report = StatusReport::default();

        self.current_cmd = Some(*cmd);

        let terms = self.calc_terms(cmd);
        let drv_speed_norm = self.calc_speeds(&terms, speed_coeff);

        if cmd.is_zero() {
            self.report.angles_held = true;
        }
        else {
            self.last_angles_deg = self.calc_angles(&terms);
        }

        let output = WheelCommands {
            str_abs_pos_deg: self.last_angles_deg,
            drv_speed_norm
        };

        trace!("SwerveCtrl output:\n    drv: {:?}\n    str: {:?}", 
            output.drv_speed_norm, 
            output.str_abs_pos_deg);

        self.output = Some(output);

        (output, self.report)
    }

    /// Record an out of range command that was not executed.
    ///
    /// The previous output is kept, as that is what the drivetrain is still
    /// doing, but the status report and archives flag the rejection.
    pub fn reject(&mut self, cmd: &ChassisCommand) {
        self.report = StatusReport {
            cmd_rejected: true,
            ..Default::default()
        };
        self.current_cmd = Some(*cmd);
    }

    /// Forget the held steer angles, pointing all wheels straight ahead.
    pub fn zero_angles(&mut self) {
        self.last_angles_deg = [0.0; NUM_WHEELS];
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn last_angles_deg(&self) -> [f64; NUM_WHEELS] {
        self.last_angles_deg
    }
}
