//! # Drive Executable Parameters
//!
//! This module provide parameters for the drive executable.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::BTreeMap;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// STRUCTS
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct DriveExecParams {

    /// Target period of one cycle.
    ///
    /// Units: seconds
    pub cycle_period_s: f64,

    /// Minimum log level, "info", "debug" or "trace"
    pub log_level: String,

    /// Per target log level overrides, e.g. `"drive_lib::swerve_ctrl" = "info"`
    #[serde(default)]
    pub module_log_levels: BTreeMap<String, String>,

    /// Yaw rate of the simulated chassis at a full rotation demand.
    ///
    /// Units: degrees/second
    pub sim_max_yaw_rate_degs: f64,

    /// Constant yaw drift of the simulated chassis.
    ///
    /// Units: degrees/second
    #[serde(default)]
    pub sim_drift_rate_degs: f64
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse() {
        let p: DriveExecParams = util::params::from_str(r#"
            cycle_period_s = 0.02
            log_level = "debug"
            sim_max_yaw_rate_degs = 180.0

            [module_log_levels]
            "drive_lib::swerve_ctrl" = "info"
        "#).unwrap();

        assert_eq!(p.cycle_period_s, 0.02);
        assert_eq!(p.sim_drift_rate_degs, 0.0);
        assert_eq!(p.module_log_levels["drive_lib::swerve_ctrl"], "info");
    }
}
