// Integer 2D vectors
//
// A Vector is used both as an absolute tile position and as a direction
// delta. Which one it is depends on context; the type does not track it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// 2D integer vector, `y` grows downwards
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Vector {
    pub x: i32,
    pub y: i32,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Vector { x, y }
    }

    /// Points the opposite way
    pub fn reverse(&self) -> Vector {
        -*self
    }

    pub fn is_reverse(&self, other: Vector) -> bool {
        self.reverse() == other
    }

    /// Rotates 90 degrees clockwise in screen space (right becomes down)
    pub fn rotate(&self) -> Vector {
        Vector {
            x: -self.y,
            y: self.x,
        }
    }

    /// True when neither component exceeds `distance` in magnitude
    pub fn within_distance(&self, distance: i32) -> bool {
        self.x.abs() <= distance && self.y.abs() <= distance
    }

    /// True when the vector moves along both axes at once
    pub fn is_diagonal(&self) -> bool {
        self.x != 0 && self.y != 0
    }

    pub fn manhattan_distance(&self, other: Vector) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// The four orthogonal neighbours, in search order: left, up, right, down
    pub fn neighbours(&self) -> [Vector; 4] {
        [
            Vector::new(self.x - 1, self.y),
            Vector::new(self.x, self.y - 1),
            Vector::new(self.x + 1, self.y),
            Vector::new(self.x, self.y + 1),
        ]
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, other: Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
