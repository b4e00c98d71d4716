//! # Drive cycle
//!
//! One tick of the teleoperated drive:
//!
//! 1. Read and deadband the operator axes
//! 2. Rotate the translation demand into the field frame
//! 3. Add the heading hold correction to the turn demand
//! 4. Reject the tick if any component is out of range
//! 5. Compute the wheel demands
//! 6. Send steer angles, then wheel speeds, to the drivetrain
//!
//! A rejected tick issues no actuation at all, the drivetrain keeps whatever
//! it was last told.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use crate::{
    eqpt::{Actuator, FeedbackController, HeadingSensor, MonotonicTimer, OperatorInput},
    head_hold::HeadHold,
    input_cond::OiAxes,
    swerve_ctrl::{self, ChassisCommand, SwerveCtrl, WheelCommands, NUM_WHEELS}
};
use util::{
    archive::{Archived, ArchiveError},
    module::State
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Drive control law, owning the heading hold and swerve kinematics.
pub struct DriveCycle<F, T> {
    head_hold: HeadHold<F, T>,
    swerve_ctrl: SwerveCtrl
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// The wheel demands were computed and sent to the drivetrain
    Actuated(WheelCommands),

    /// A component of the command exceeded 1, nothing was sent
    Rejected(ChassisCommand)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<F, T> DriveCycle<F, T>
where
    F: FeedbackController,
    T: MonotonicTimer
{
    pub fn new(head_hold: HeadHold<F, T>, swerve_ctrl: SwerveCtrl) -> Self {
        Self {
            head_hold,
            swerve_ctrl
        }
    }

    /// Point every wheel straight ahead. Must be called before the first
    /// tick.
    pub fn init<A: Actuator>(&mut self, actuator: &mut A) {
        actuator.set_steer_angles([0.0; NUM_WHEELS]);
        self.swerve_ctrl.zero_angles();

        debug!("DriveCycle initialised, steer angles zeroed");
    }

    /// Run one tick of the control law.
    pub fn proc<O, H, A>(
        &mut self, 
        oi: &O, 
        heading: &H, 
        actuator: &mut A
    ) -> TickOutcome 
    where
        O: OperatorInput,
        H: HeadingSensor,
        A: Actuator
    {
        let axes = OiAxes::read(oi).conditioned();

        let (fwd, strafe) = heading.field_oriented_vector(axes.horizontal, axes.forward);

        let rcw = self.head_hold.calc_rotation(axes.turn, heading.heading_deg());

        let cmd = ChassisCommand::new(fwd, strafe, rcw);
        if !cmd.is_valid() {
            debug!("Chassis command out of range, tick rejected: {:?}", cmd);
            self.swerve_ctrl.reject(&cmd);
            return TickOutcome::Rejected(cmd);
        }

        let input = swerve_ctrl::InputData {
            cmd,
            speed_coeff: axes.speed_coeff
        };
        let (output, _) = match self.swerve_ctrl.proc(&input) {
            Ok(o) => o,
            Err(e) => match e {}
        };

        actuator.set_steer_angles(output.str_abs_pos_deg);
        actuator.set_wheel_speeds(output.drv_speed_norm);

        TickOutcome::Actuated(output)
    }

    pub fn head_hold(&self) -> &HeadHold<F, T> {
        &self.head_hold
    }

    pub fn head_hold_mut(&mut self) -> &mut HeadHold<F, T> {
        &mut self.head_hold
    }

    pub fn swerve_ctrl(&self) -> &SwerveCtrl {
        &self.swerve_ctrl
    }

}

impl<F, T> Archived for DriveCycle<F, T> {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.head_hold.write()?;
        self.swerve_ctrl.write()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        head_hold::{self, HeadHoldState, PidController},
        sim::{SimChassis, SimHeading},
        swerve_ctrl
    };
    use util::time::{SimClock, StopWatch};

    type TestCycle = DriveCycle<PidController, StopWatch<SimClock>>;

    const EPS: f64 = 1e-9;

    fn cycle() -> (TestCycle, SimClock) {
        let clock = SimClock::default();
        let params = head_hold::Params::default();
        let hh = HeadHold::new(
            params, 
            PidController::from_params(&params), 
            StopWatch::new(clock.clone())
        );
        let sc = SwerveCtrl::from_params(swerve_ctrl::Params::default()).unwrap();

        (DriveCycle::new(hh, sc), clock)
    }

    fn heading() -> SimHeading {
        SimHeading::new(&swerve_ctrl::Params::default(), 180.0, 0.0)
    }

    fn axes(forward: f64, horizontal: f64, turn: f64) -> OiAxes {
        OiAxes {
            forward,
            horizontal,
            turn,
            speed_coeff: 1.0
        }
    }

    #[test]
    fn test_init_zeroes_steer() {
        let (mut dc, _) = cycle();
        let mut chassis = SimChassis::new();

        dc.init(&mut chassis);

        assert_eq!(chassis.num_str_dems(), 1);
        assert_eq!(chassis.num_drv_dems(), 0);
        assert_eq!(chassis.str_abs_pos_deg(), [0.0; NUM_WHEELS]);
        assert_eq!(dc.swerve_ctrl().last_angles_deg(), [0.0; NUM_WHEELS]);
    }

    #[test]
    fn test_forward_tick() {
        let (mut dc, _) = cycle();
        let mut chassis = SimChassis::new();
        dc.init(&mut chassis);

        let outcome = dc.proc(&axes(1.0, 0.0, 0.0), &heading(), &mut chassis);

        match outcome {
            TickOutcome::Actuated(out) => {
                assert_eq!(out.drv_speed_norm, [1.0; NUM_WHEELS]);
                assert_eq!(out.str_abs_pos_deg, [0.0; NUM_WHEELS]);
            },
            o => panic!("Expected actuation, got {:?}", o)
        }
        assert_eq!(chassis.num_str_dems(), 2);
        assert_eq!(chassis.num_drv_dems(), 1);
        assert_eq!(chassis.drv_speed_norm(), [1.0; NUM_WHEELS]);
    }

    #[test]
    fn test_deadband_applied() {
        let (mut dc, _) = cycle();
        let mut chassis = SimChassis::new();

        // Stick noise only, wheels stop and hold their angles
        let outcome = dc.proc(&axes(0.05, -0.08, 0.0), &heading(), &mut chassis);

        match outcome {
            TickOutcome::Actuated(out) => {
                assert_eq!(out.drv_speed_norm, [0.0; NUM_WHEELS]);
            },
            o => panic!("Expected actuation, got {:?}", o)
        }
        assert!(dc.swerve_ctrl().report.angles_held);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let (mut dc, _) = cycle();
        let mut chassis = SimChassis::new();
        let mut h = heading();

        // Establish some wheel state first
        dc.proc(&axes(0.0, 1.0, 0.0), &h, &mut chassis);
        let dems_before = chassis.num_dems();
        let angles_before = chassis.str_abs_pos_deg();
        let speeds_before = chassis.drv_speed_norm();

        // Full diagonal at 45 degrees gives a forward component of sqrt(2)
        h.set_heading_deg(45.0);
        let outcome = dc.proc(&axes(1.0, 1.0, 0.0), &h, &mut chassis);

        match outcome {
            TickOutcome::Rejected(cmd) => assert!(cmd.fwd > 1.0),
            o => panic!("Expected rejection, got {:?}", o)
        }
        assert_eq!(chassis.num_dems(), dems_before);
        assert_eq!(chassis.str_abs_pos_deg(), angles_before);
        assert_eq!(chassis.drv_speed_norm(), speeds_before);
    }

    /// Actuator recording the order of the calls it receives.
    #[derive(Default)]
    struct CallLog {
        calls: Vec<&'static str>
    }

    impl Actuator for CallLog {
        fn set_steer_angles(&mut self, _: [f64; NUM_WHEELS]) {
            self.calls.push("steer");
        }

        fn set_wheel_speeds(&mut self, _: [f64; NUM_WHEELS]) {
            self.calls.push("speed");
        }
    }

    #[test]
    fn test_steer_sent_before_speeds() {
        let (mut dc, _) = cycle();
        let mut log = CallLog::default();

        dc.init(&mut log);
        assert_eq!(log.calls, vec!["steer"]);

        dc.proc(&axes(0.4, -0.5, 0.2), &heading(), &mut log);
        dc.proc(&axes(0.0, 0.0, 0.0), &heading(), &mut log);

        assert_eq!(log.calls, vec!["steer", "steer", "speed", "steer", "speed"]);
    }

    #[test]
    fn test_rotation_out_of_range_rejected() {
        let (mut dc, _) = cycle();
        let mut chassis = SimChassis::new();
        dc.init(&mut chassis);
        let dems_before = chassis.num_dems();

        // A turn demand passes through the heading hold unchanged
        let outcome = dc.proc(&axes(0.0, 0.0, 1.2), &heading(), &mut chassis);

        match outcome {
            TickOutcome::Rejected(cmd) => assert_eq!(cmd.rcw, 1.2),
            o => panic!("Expected rejection, got {:?}", o)
        }
        assert_eq!(chassis.num_dems(), dems_before);
        assert_eq!(dc.head_hold().state(), HeadHoldState::Released);
    }

    #[test]
    fn test_strafe_out_of_range_rejected() {
        let (mut dc, _) = cycle();
        let mut chassis = SimChassis::new();
        let mut h = heading();
        dc.init(&mut chassis);
        let dems_before = chassis.num_dems();

        // Field diagonal with the chassis turned 45 degrees anticlockwise is
        // pure chassis strafe of sqrt(2)
        h.set_heading_deg(-45.0);
        let outcome = dc.proc(&axes(1.0, 1.0, 0.0), &h, &mut chassis);

        match outcome {
            TickOutcome::Rejected(cmd) => {
                assert!(cmd.strafe > 1.0);
                assert!(cmd.fwd.abs() < EPS);
            },
            o => panic!("Expected rejection, got {:?}", o)
        }
        assert_eq!(chassis.num_dems(), dems_before);
    }

    #[test]
    fn test_rejection_reported() {
        let (mut dc, _) = cycle();
        let mut chassis = SimChassis::new();

        let first = match dc.proc(&axes(0.6, 0.0, 0.0), &heading(), &mut chassis) {
            TickOutcome::Actuated(out) => out,
            o => panic!("Expected actuation, got {:?}", o)
        };
        assert!(!dc.swerve_ctrl().report.cmd_rejected);

        dc.proc(&axes(0.0, 0.0, -1.5), &heading(), &mut chassis);

        // Report flags the rejection, output is what the drivetrain still has
        assert!(dc.swerve_ctrl().report.cmd_rejected);
        assert_eq!(dc.swerve_ctrl().output, Some(first));
        assert_eq!(dc.swerve_ctrl().current_cmd.map(|c| c.rcw), Some(-1.5));

        dc.proc(&axes(0.6, 0.0, 0.0), &heading(), &mut chassis);
        assert!(!dc.swerve_ctrl().report.cmd_rejected);
    }

    #[test]
    fn test_field_oriented_tick() {
        let (mut dc, _) = cycle();
        let mut chassis = SimChassis::new();
        let mut h = heading();

        // Chassis turned to face right, field forward is the chassis' left
        h.set_heading_deg(90.0);
        let outcome = dc.proc(&axes(1.0, 0.0, 0.0), &h, &mut chassis);

        match outcome {
            TickOutcome::Actuated(out) => {
                for i in 0..NUM_WHEELS {
                    assert!((out.str_abs_pos_deg[i] + 90.0).abs() < EPS);
                    assert!((out.drv_speed_norm[i] - 1.0).abs() < EPS);
                }
            },
            o => panic!("Expected actuation, got {:?}", o)
        }
    }

    #[test]
    fn test_zero_command_holds_angles() {
        let (mut dc, _) = cycle();
        let mut chassis = SimChassis::new();
        let h = heading();

        dc.proc(&axes(0.0, -1.0, 0.0), &h, &mut chassis);
        let angles = chassis.str_abs_pos_deg();

        dc.proc(&axes(0.0, 0.0, 0.0), &h, &mut chassis);

        assert_eq!(chassis.str_abs_pos_deg(), angles);
        assert_eq!(chassis.drv_speed_norm(), [0.0; NUM_WHEELS]);
    }

    #[test]
    fn test_head_hold_engages_through_cycle() {
        let (mut dc, clock) = cycle();
        let mut chassis = SimChassis::new();
        let mut h = heading();
        h.set_heading_deg(12.0);

        for _ in 0..10 {
            dc.proc(&axes(0.5, 0.0, 0.0), &h, &mut chassis);
            clock.advance(0.02);
        }
        dc.proc(&axes(0.5, 0.0, 0.0), &h, &mut chassis);

        assert_eq!(dc.head_hold().state(), HeadHoldState::Holding);
        assert_eq!(dc.head_hold().report().setpoint_deg, Some(12.0));

        // Turning releases straight away
        dc.proc(&axes(0.5, 0.0, 0.3), &h, &mut chassis);
        assert_eq!(dc.head_hold().state(), HeadHoldState::Released);
    }
}
