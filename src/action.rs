// Snake actions
//
// The four cardinal moves plus a null action. The movement actions form a
// ring in the order left, up, right, down; relative turns walk that ring.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vector::Vector;

/// A single snake move
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    None,
    Left,
    Up,
    Right,
    Down,
}

impl Action {
    /// Movement actions in ring order
    pub const ALL: [Action; 4] = [Action::Left, Action::Up, Action::Right, Action::Down];

    /// Unit vector for this action
    pub fn vector(&self) -> Vector {
        match self {
            Action::None => Vector::ZERO,
            Action::Left => Vector::new(-1, 0),
            Action::Up => Vector::new(0, -1),
            Action::Right => Vector::new(1, 0),
            Action::Down => Vector::new(0, 1),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::None => "none",
            Action::Left => "left",
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
        }
    }

    /// Maps a unit cardinal vector back to its action.
    ///
    /// Returns `None` for the zero vector, diagonals, and anything longer
    /// than one tile.
    pub fn from_vector(vector: Vector) -> Option<Action> {
        Action::ALL.iter().copied().find(|a| a.vector() == vector)
    }

    /// The action a quarter turn to the snake's left. `None` stays `None`.
    pub fn relative_left(&self) -> Action {
        self.turn(Action::ALL.len() - 1)
    }

    /// The action a quarter turn to the snake's right. `None` stays `None`.
    pub fn relative_right(&self) -> Action {
        self.turn(1)
    }

    /// Left turn, straight on, right turn
    pub fn forward_actions(&self) -> [Action; 3] {
        [self.relative_left(), *self, self.relative_right()]
    }

    pub fn is_reverse(&self, other: Action) -> bool {
        self.vector().is_reverse(other.vector())
    }

    fn turn(&self, steps: usize) -> Action {
        match Action::ALL.iter().position(|a| a == self) {
            Some(i) => Action::ALL[(i + steps) % Action::ALL.len()],
            None => Action::None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
