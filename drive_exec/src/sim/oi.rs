//! Scripted operator input

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::debug;

use crate::{eqpt::OperatorInput, input_cond::OiAxes};
use util::script_interpreter::{Pending, ScriptInterpreter};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Operator input replayed from a script of timed axis frames, for example
///
/// ```text
/// 0.0: {"forward": 0.0, "horizontal": 0.0, "turn": 0.0, "speed_coeff": 1.0};
/// 1.0: {"forward": 0.8, "horizontal": 0.0, "turn": 0.0, "speed_coeff": 1.0};
/// ```
///
/// Each frame holds until the next one is due.
pub struct ScriptedOi {
    interp: ScriptInterpreter<OiAxes>,

    current: OiAxes
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptedOi {
    pub fn new(interp: ScriptInterpreter<OiAxes>) -> Self {
        Self {
            interp,
            current: OiAxes::default()
        }
    }

    /// Apply all frames due by `time_s`.
    ///
    /// Returns `false` once the script has been exhausted.
    pub fn update(&mut self, time_s: f64) -> bool {
        match self.interp.get_pending(time_s) {
            Pending::None => true,
            Pending::Some(frames) => {
                if let Some(f) = frames.last() {
                    debug!("New operator input frame: {:?}", f);
                    self.current = *f;
                }
                true
            },
            Pending::EndOfScript => false
        }
    }

    pub fn current(&self) -> OiAxes {
        self.current
    }

    pub fn duration_s(&self) -> f64 {
        self.interp.get_duration()
    }

    pub fn num_frames(&self) -> usize {
        self.interp.get_num_items()
    }
}

impl OperatorInput for ScriptedOi {
    fn drive_speed_coeff(&self) -> f64 {
        self.current.drive_speed_coeff()
    }

    fn forward_axis(&self) -> f64 {
        self.current.forward_axis()
    }

    fn horizontal_axis(&self) -> f64 {
        self.current.horizontal_axis()
    }

    fn turn_axis(&self) -> f64 {
        self.current.turn_axis()
    }
}

/// A fixed set of axes is itself an operator input.
impl OperatorInput for OiAxes {
    fn drive_speed_coeff(&self) -> f64 {
        self.speed_coeff
    }

    fn forward_axis(&self) -> f64 {
        self.forward
    }

    fn horizontal_axis(&self) -> f64 {
        self.horizontal
    }

    fn turn_axis(&self) -> f64 {
        self.turn
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_scripted_oi() {
        let interp = ScriptInterpreter::parse_str(
            "0.0: {\"forward\": 0.0, \"horizontal\": 0.0, \"turn\": 0.0, \"speed_coeff\": 1.0};\n\
             1.0: {\"forward\": 0.8, \"horizontal\": -0.2, \"turn\": 0.5, \"speed_coeff\": 0.5};\n"
        ).unwrap();
        let mut oi = ScriptedOi::new(interp);

        assert_eq!(oi.num_frames(), 2);
        assert_eq!(oi.duration_s(), 1.0);

        assert!(oi.update(0.5));
        assert_eq!(oi.forward_axis(), 0.0);
        assert_eq!(oi.drive_speed_coeff(), 1.0);

        assert!(oi.update(1.2));
        assert_eq!(oi.forward_axis(), 0.8);
        assert_eq!(oi.horizontal_axis(), -0.2);
        assert_eq!(oi.turn_axis(), 0.5);
        assert_eq!(oi.drive_speed_coeff(), 0.5);

        // Last frame holds until the script is found to be empty
        assert!(!oi.update(2.0));
        assert_eq!(oi.forward_axis(), 0.8);
    }
}
