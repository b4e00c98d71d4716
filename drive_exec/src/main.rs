//! Main drive executable entry point.
//! 
//! # Architecture
//! 
//! The general execution methodology consists of:
//! 
//!     - Initialise all modules
//!     - Main loop:
//!         - Operator input acquisition from the script
//!         - Heading controller step, on its own period
//!         - Drive cycle processing
//!         - Simulated chassis and heading update
//!         - Archiving
//!
//! # Usage
//!
//! ```text
//! drive_exec <script>
//! ```
//!
//! The script is a sequence of timed operator input frames, see
//! `drive_lib::sim::ScriptedOi`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, warn};
use std::env;
use std::thread;
use std::time::{Duration, Instant};
use color_eyre::{Report, eyre::{WrapErr, eyre}};

// Internal
use drive_lib::{
    data_store::DataStore,
    drive_cycle::{DriveCycle, TickOutcome},
    eqpt::HeadingSensor,
    head_hold::{self, HeadHold, PidController},
    params::DriveExecParams,
    sim::{ScriptedOi, SimChassis, SimHeading},
    swerve_ctrl::SwerveCtrl
};
use util::{
    archive::Archived,
    logger::{logger_init, parse_level, LevelFilter},
    module::State,
    script_interpreter::ScriptInterpreter,
    session::Session,
    time::{StopWatch, SystemClock}
};

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "drive_exec", 
        "sessions"
    ).wrap_err("Failed to create the session")?;

    let exec_params: DriveExecParams = util::params::load(
        "drive_exec.toml"
    ).wrap_err("Could not load exec params")?;

    // Initialise logger
    let min_level = parse_level(&exec_params.log_level)
        .wrap_err("Invalid exec log level")?;
    let module_levels = exec_params.module_log_levels
        .iter()
        .map(|(target, level)| parse_level(level).map(|l| (target.clone(), l)))
        .collect::<Result<Vec<(String, LevelFilter)>, _>>()
        .wrap_err("Invalid module log level")?;

    logger_init(min_level, &module_levels, &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Swerve Drive Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    if exec_params.cycle_period_s <= 0.0 {
        return Err(eyre!(
            "Cycle period must be positive, found {}", exec_params.cycle_period_s
        ));
    }
    let cycle_frequency_hz = 1.0 / exec_params.cycle_period_s;

    info!("Exec parameters loaded");

    // ---- LOAD SCRIPT ----

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    if args.len() != 2 {
        return Err(eyre!(
            "Expected exactly one argument (script path), found {}", args.len() - 1)
        );
    }

    info!("Loading script from \"{}\"", &args[1]);

    let mut oi = ScriptedOi::new(
        ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?
    );

    info!(
        "Loaded script lasts {:.02} s and contains {} frames\n",
        oi.duration_s(),
        oi.num_frames()
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    let mut swerve_ctrl = SwerveCtrl::default();
    swerve_ctrl.init("swerve_ctrl.toml", &session)
        .wrap_err("Failed to initialise SwerveCtrl")?;
    info!("SwerveCtrl init complete");

    let hh_params: head_hold::Params = util::params::load("head_hold.toml")
        .wrap_err("Could not load head hold params")?;
    let mut head_hold = HeadHold::new(
        hh_params, 
        PidController::from_params(&hh_params), 
        StopWatch::new(SystemClock::new())
    );
    head_hold.init_archive(&session)
        .wrap_err("Failed to initialise HeadHold archive")?;
    info!("HeadHold init complete");

    let mut heading = SimHeading::new(
        swerve_ctrl.params(),
        exec_params.sim_max_yaw_rate_degs,
        exec_params.sim_drift_rate_degs
    );
    let mut chassis = SimChassis::new();

    let mut drive = DriveCycle::new(head_hold, swerve_ctrl);
    drive.init(&mut chassis);

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(cycle_frequency_hz);

        // ---- OPERATOR INPUT ----

        if !oi.update(ds.sim_time_s) {
            info!("End of script reached, stopping");
            break
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        // The heading controller runs slower than the drive cycle
        if let Some(dt_s) = ds.ctrl_step_due(hh_params.ctrl_period_s) {
            drive.head_hold_mut().ctrl_mut().calculate(heading.heading_deg(), dt_s);
        }

        ds.record_outcome(drive.proc(&oi, &heading, &mut chassis));

        // ---- SIMULATION ----

        heading.step(&chassis, exec_params.cycle_period_s);

        // ---- WRITE ARCHIVES ----

        if let Err(e) = drive.write() {
            warn!("Could not write archives: {}", e);
        }

        // ---- STATUS ----

        if ds.is_1_hz_cycle {
            let hh_rpt = drive.head_hold().report();
            match ds.last_outcome {
                Some(TickOutcome::Actuated(out)) => info!(
                    "heading {:7.2} deg, hold {:?}, str {:?} deg, drv {:?}",
                    heading.heading_deg(),
                    hh_rpt.state,
                    out.str_abs_pos_deg,
                    out.drv_speed_norm
                ),
                Some(TickOutcome::Rejected(cmd)) => info!(
                    "heading {:7.2} deg, hold {:?}, command rejected: {:?}",
                    heading.heading_deg(),
                    hh_rpt.state,
                    cmd
                ),
                None => ()
            }
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(exec_params.cycle_period_s)
            .checked_sub(cycle_dur)
        {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            },
            None => {
                warn!(
                    "Cycle overran by {:.06} s", 
                    cycle_dur.as_secs_f64() - exec_params.cycle_period_s
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    info!(
        "Executed {} cycles, {} ticks rejected, final heading {:.2} deg",
        ds.num_cycles,
        ds.num_rejected_ticks,
        heading.heading_deg()
    );
    info!("End of execution");

    Ok(())
}
