//! Swerve inverse kinematics calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;
use util::maths::{clamp, wrap_deg_180};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Intermediate wheel velocity components.
///
/// `a` and `b` are the strafe components of the front and back wheel pairs,
/// `c` and `d` the forward components of the right and left pairs.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SwerveTerms {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SwerveTerms {
    /// The (strafe, forward) components of each wheel, in wheel order.
    fn components(&self) -> [(f64, f64); NUM_WHEELS] {
        [
            (self.a, self.d),
            (self.a, self.c),
            (self.b, self.c),
            (self.b, self.d)
        ]
    }
}

impl SwerveCtrl {

    /// Split the command into the wheel velocity components.
    ///
    /// The rotation demand contributes a velocity tangent to the wheelbase
    /// diagonal, so its strafe and forward parts are weighted by the length
    /// and width over the diagonal.
    pub(crate) fn calc_terms(&self, cmd: &ChassisCommand) -> SwerveTerms {
        let r = self.params.diagonal();
        let len_ratio = self.params.length / r;
        let wid_ratio = self.params.width / r;

        SwerveTerms {
            a: cmd.strafe - cmd.rcw * len_ratio,
            b: cmd.strafe + cmd.rcw * len_ratio,
            c: cmd.fwd - cmd.rcw * wid_ratio,
            d: cmd.fwd + cmd.rcw * wid_ratio
        }
    }

    /// Calculate the normalised drive speeds.
    ///
    /// If any wheel would need to go faster than 1 all wheels are scaled by
    /// the same factor, keeping the ratios between them (and so the path
    /// curvature) intact. The result is then multiplied by the operator's
    /// speed coefficient.
    pub(crate) fn calc_speeds(
        &mut self, 
        terms: &SwerveTerms, 
        speed_coeff: f64
    ) -> [f64; NUM_WHEELS] {
        let mut speeds = [0f64; NUM_WHEELS];

        for (i, (x, y)) in terms.components().iter().enumerate() {
            speeds[i] = x.hypot(*y);
        }

        let max_speed = speeds.iter().cloned().fold(0f64, f64::max);

        let scale = if max_speed > 1.0 {
            self.report.speeds_scaled = true;
            1.0 / max_speed
        }
        else {
            1.0
        };
        self.report.max_raw_speed = max_speed;

        let coeff = clamp(&speed_coeff, &0.0, &1.0);

        for s in speeds.iter_mut() {
            *s *= scale * coeff;
        }

        speeds
    }

    /// Calculate the steer angle of each wheel in degrees.
    ///
    /// A wheel with no velocity at all gets an angle of zero rather than the
    /// meaningless `atan2(0, 0)`.
    pub(crate) fn calc_angles(&self, terms: &SwerveTerms) -> [f64; NUM_WHEELS] {
        let mut angles = [0f64; NUM_WHEELS];

        for (i, (x, y)) in terms.components().iter().enumerate() {
            angles[i] = if *x == 0.0 && *y == 0.0 {
                0.0
            }
            else {
                wrap_deg_180(x.atan2(*y).to_degrees())
            };
        }

        angles
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const EPS: f64 = 1e-9;

    fn ctrl() -> SwerveCtrl {
        SwerveCtrl::from_params(Params { length: 14.5, width: 16.5 }).unwrap()
    }

    fn assert_close(a: &[f64], b: &[f64]) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < EPS, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_straight_forward() {
        let mut sc = ctrl();
        let (out, rpt) = sc.calc_wheel_cmds(&ChassisCommand::new(1.0, 0.0, 0.0), 1.0);

        assert_close(&out.drv_speed_norm, &[1.0; 4]);
        assert_close(&out.str_abs_pos_deg, &[0.0; 4]);
        assert!(!rpt.speeds_scaled);
        assert!((rpt.max_raw_speed - 1.0).abs() < EPS);
    }

    #[test]
    fn test_pure_rotation() {
        let mut sc = ctrl();
        let (out, rpt) = sc.calc_wheel_cmds(&ChassisCommand::new(0.0, 0.0, 1.0), 1.0);

        // r = sqrt(14.5^2 + 16.5^2) ~= 21.966, each wheel is tangent to the
        // diagonal so all raw speeds are exactly 1
        assert!((sc.params.diagonal() - 482.5f64.sqrt()).abs() < EPS);
        assert_close(&out.drv_speed_norm, &[1.0; 4]);
        assert!((rpt.max_raw_speed - 1.0).abs() < EPS);

        // atan(14.5 / 16.5) ~= 41.308 deg
        let alpha = 14.5f64.atan2(16.5).to_degrees();
        assert!((alpha - 41.308).abs() < 1e-3);
        assert_close(
            &out.str_abs_pos_deg, 
            &[-alpha, -(180.0 - alpha), 180.0 - alpha, alpha]
        );
    }

    #[test]
    fn test_diagonal_translation_scaled() {
        let mut sc = ctrl();
        let (out, rpt) = sc.calc_wheel_cmds(&ChassisCommand::new(1.0, 1.0, 0.0), 0.5);

        // Raw speeds are sqrt(2), scaled back to 1 then halved
        assert!(rpt.speeds_scaled);
        assert!((rpt.max_raw_speed - 2f64.sqrt()).abs() < EPS);
        assert_close(&out.drv_speed_norm, &[0.5; 4]);
        assert_close(&out.str_abs_pos_deg, &[45.0; 4]);
    }

    #[test]
    fn test_strafe_left() {
        let mut sc = ctrl();
        let (out, _) = sc.calc_wheel_cmds(&ChassisCommand::new(0.0, -0.5, 0.0), 1.0);

        assert_close(&out.drv_speed_norm, &[0.5; 4]);
        assert_close(&out.str_abs_pos_deg, &[-90.0; 4]);
    }

    #[test]
    fn test_reverse_is_180_not_minus_180() {
        let mut sc = ctrl();
        let (out, _) = sc.calc_wheel_cmds(&ChassisCommand::new(-1.0, -0.0, 0.0), 1.0);

        assert_close(&out.str_abs_pos_deg, &[180.0; 4]);
    }

    #[test]
    fn test_ratios_preserved() {
        let mut sc = ctrl();
        let cmd = ChassisCommand::new(1.0, 0.0, 1.0);

        let terms = sc.calc_terms(&cmd);
        let raw: Vec<f64> = terms.components()
            .iter()
            .map(|(x, y)| x.hypot(*y))
            .collect();

        let coeff = 0.8;
        let (out, rpt) = sc.calc_wheel_cmds(&cmd, coeff);

        assert!(rpt.speeds_scaled);
        let max_out = out.drv_speed_norm.iter().cloned().fold(0f64, f64::max);
        assert!(max_out <= coeff + EPS);
        assert!((max_out - coeff).abs() < EPS);

        for i in 0..NUM_WHEELS {
            for j in 0..NUM_WHEELS {
                assert!(
                    (raw[i] / raw[j] - out.drv_speed_norm[i] / out.drv_speed_norm[j]).abs() 
                    < 1e-9
                );
            }
        }
    }

    #[test]
    fn test_normalisation_grid() {
        let mut sc = ctrl();
        let steps = [-1.0, -0.55, 0.0, 0.3, 1.0];

        for fwd in steps.iter() {
            for strafe in steps.iter() {
                for rcw in steps.iter() {
                    let cmd = ChassisCommand::new(*fwd, *strafe, *rcw);
                    let (out, _) = sc.calc_wheel_cmds(&cmd, 0.7);
                    for s in out.drv_speed_norm.iter() {
                        assert!(*s >= 0.0 && *s <= 0.7 + EPS, "{:?} -> {:?}", cmd, out);
                    }
                    for a in out.str_abs_pos_deg.iter() {
                        assert!(*a > -180.0 && *a <= 180.0);
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_cmd_holds_angles() {
        let mut sc = ctrl();
        let (first, _) = sc.calc_wheel_cmds(&ChassisCommand::new(0.5, 0.5, 0.2), 1.0);
        let (second, rpt) = sc.calc_wheel_cmds(&ChassisCommand::default(), 1.0);

        assert!(rpt.angles_held);
        assert_eq!(second.str_abs_pos_deg, first.str_abs_pos_deg);
        assert_eq!(second.drv_speed_norm, [0.0; 4]);
    }

    #[test]
    fn test_degenerate_wheel_angle_is_zero() {
        let mut sc = ctrl();

        // Rotation and strafe chosen so the front-left wheel has no velocity
        let r = sc.params.diagonal();
        let rcw = 0.5;
        let cmd = ChassisCommand::new(
            -rcw * (sc.params.width / r), 
            rcw * (sc.params.length / r), 
            rcw
        );
        let (out, _) = sc.calc_wheel_cmds(&cmd, 1.0);

        assert_eq!(out.drv_speed_norm[WheelId::FrontLeft.index()], 0.0);
        assert_eq!(out.str_abs_pos_deg[WheelId::FrontLeft.index()], 0.0);
        assert!(out.drv_speed_norm[WheelId::BackRight.index()] > 0.0);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(matches!(
            SwerveCtrl::from_params(Params { length: 0.0, width: 16.5 }),
            Err(SwerveCtrlError::InvalidGeometry(_, _))
        ));
    }
}
