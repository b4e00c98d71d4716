//! Simulated heading sensor
//!
//! Integrates the chassis yaw rate implied by the wheel demands, plus a
//! constant drift, so the heading hold has something to correct.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Rotation2, Vector2};

use super::SimChassis;
use crate::{
    eqpt::HeadingSensor,
    swerve_ctrl::{self, NUM_WHEELS}
};
use util::maths::wrap_deg_180;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Simulated heading sensor with field orientation.
#[derive(Clone, Debug)]
pub struct SimHeading {
    /// Units: degrees, clockwise positive
    heading_deg: f64,

    /// Unit (strafe, forward) velocity of each wheel for a pure clockwise
    /// rotation, used to pull the rotation rate out of the wheel demands.
    rot_tangents: [Vector2<f64>; NUM_WHEELS],

    /// Yaw rate of the chassis at a full rotation demand.
    ///
    /// Units: degrees/second
    max_yaw_rate_degs: f64,

    /// Yaw rate added regardless of the wheels.
    ///
    /// Units: degrees/second
    drift_rate_degs: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimHeading {
    pub fn new(
        geometry: &swerve_ctrl::Params, 
        max_yaw_rate_degs: f64, 
        drift_rate_degs: f64
    ) -> Self {
        let r = geometry.diagonal();
        let l = geometry.length / r;
        let w = geometry.width / r;

        Self {
            heading_deg: 0.0,
            rot_tangents: [
                Vector2::new(-l, w),
                Vector2::new(-l, -w),
                Vector2::new(l, -w),
                Vector2::new(l, w)
            ],
            max_yaw_rate_degs,
            drift_rate_degs
        }
    }

    pub fn set_heading_deg(&mut self, heading_deg: f64) {
        self.heading_deg = wrap_deg_180(heading_deg);
    }

    /// Estimate the normalised rotation the wheels are producing.
    ///
    /// Translation components cancel out across the four tangents, leaving
    /// the average rotational speed.
    pub fn wheel_rotation(&self, chassis: &SimChassis) -> f64 {
        let angles = chassis.str_abs_pos_deg();
        let speeds = chassis.drv_speed_norm();

        let sum: f64 = (0..NUM_WHEELS)
            .map(|i| {
                let a = angles[i].to_radians();
                let v = Vector2::new(a.sin(), a.cos()) * speeds[i];
                v.dot(&self.rot_tangents[i])
            })
            .sum();

        sum / NUM_WHEELS as f64
    }

    /// Advance the heading by `dt_s` seconds.
    pub fn step(&mut self, chassis: &SimChassis, dt_s: f64) {
        let rate_degs = self.wheel_rotation(chassis) * self.max_yaw_rate_degs 
            + self.drift_rate_degs;

        self.heading_deg = wrap_deg_180(self.heading_deg + rate_degs * dt_s);
    }
}

impl HeadingSensor for SimHeading {
    fn heading_deg(&self) -> f64 {
        self.heading_deg
    }

    fn field_oriented_vector(&self, x: f64, y: f64) -> (f64, f64) {
        // A clockwise chassis heading means field axes appear rotated
        // anticlockwise in the chassis frame
        let v = Rotation2::new(self.heading_deg.to_radians()) * Vector2::new(x, y);

        (v[1], v[0])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::eqpt::Actuator;
    use crate::swerve_ctrl::{ChassisCommand, SwerveCtrl};

    const EPS: f64 = 1e-9;

    fn sensor() -> SimHeading {
        SimHeading::new(&swerve_ctrl::Params::default(), 180.0, 0.0)
    }

    fn chassis_for(cmd: ChassisCommand) -> SimChassis {
        let mut sc = SwerveCtrl::from_params(swerve_ctrl::Params::default()).unwrap();
        let (out, _) = sc.calc_wheel_cmds(&cmd, 1.0);
        let mut chassis = SimChassis::new();
        chassis.set_steer_angles(out.str_abs_pos_deg);
        chassis.set_wheel_speeds(out.drv_speed_norm);
        chassis
    }

    #[test]
    fn test_field_orientation() {
        let mut h = sensor();

        // Facing downfield, no change
        let (fwd, strafe) = h.field_oriented_vector(0.2, 0.7);
        assert!((fwd - 0.7).abs() < EPS && (strafe - 0.2).abs() < EPS);

        // Turned 90 degrees clockwise, field forward is to the chassis' left
        h.set_heading_deg(90.0);
        let (fwd, strafe) = h.field_oriented_vector(0.0, 1.0);
        assert!(fwd.abs() < EPS);
        assert!((strafe + 1.0).abs() < EPS);

        // Turned around, field right is chassis left and field forward is
        // chassis backward
        h.set_heading_deg(180.0);
        let (fwd, strafe) = h.field_oriented_vector(1.0, 0.5);
        assert!((fwd + 0.5).abs() < EPS);
        assert!((strafe + 1.0).abs() < EPS);
    }

    #[test]
    fn test_wheel_rotation() {
        let h = sensor();

        let rot = h.wheel_rotation(&chassis_for(ChassisCommand::new(0.0, 0.0, 0.5)));
        assert!((rot - 0.5).abs() < 1e-6);

        let trans = h.wheel_rotation(&chassis_for(ChassisCommand::new(0.6, -0.3, 0.0)));
        assert!(trans.abs() < 1e-6);
    }

    #[test]
    fn test_step_and_wrap() {
        let mut h = SimHeading::new(&swerve_ctrl::Params::default(), 180.0, 10.0);
        let still = SimChassis::new();

        h.set_heading_deg(175.0);
        h.step(&still, 1.0);
        assert!((h.heading_deg() + 175.0).abs() < EPS);

        let mut h = sensor();
        h.step(&chassis_for(ChassisCommand::new(0.0, 0.0, 1.0)), 0.5);
        assert!((h.heading_deg() - 90.0).abs() < 1e-4);
    }
}
