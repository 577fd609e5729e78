// Keyboard-driven policy

use super::{Key, Solver, SolverInfo};
use crate::action::Action;
use crate::environment::Environment;

/// Plays the last key pressed; keeps the heading until then
#[derive(Debug, Default)]
pub struct Human {
    pressed: Option<Action>,
}

impl Human {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Solver for Human {
    fn info(&self) -> SolverInfo {
        SolverInfo {
            long_name: "Human",
            short_name: "human",
            abbreviation: "hu",
        }
    }

    fn next_action(&mut self, environment: &Environment) -> Action {
        let heading = environment.snake().action;
        match self.pressed {
            // A reversal would be fatal, treat it as no input
            Some(action) if !action.is_reverse(heading) => action,
            _ => heading,
        }
    }

    fn user_input(&mut self, key: Key) {
        self.pressed = Some(key.action());
    }

    fn reset(&mut self) {
        self.pressed = None;
    }
}
