// Hamiltonian cycle construction and following
//
// The cycle is built once from the snake's head to its tail and then walked
// forever. It is only rebuilt after `reset`.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use thiserror::Error;

use super::longest::longest_path;
use super::{action_between, fallback_action, Solver, SolverInfo};
use crate::action::Action;
use crate::environment::Environment;
use crate::vector::Vector;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CycleError {
    #[error("there is no snake to build a cycle around")]
    NoSnake,
    #[error("no path from head to tail")]
    NoPath,
    #[error("path covers {covered} of {required} open tiles")]
    IncompleteCoverage { covered: usize, required: usize },
}

/// Builds a closed walk over every open tile, starting and ending at the
/// snake's head.
///
/// The returned sequence has `available_tiles_count() + 1` entries; the
/// last one repeats the head.
pub fn build_cycle(environment: &Environment) -> Result<Vec<Vector>, CycleError> {
    let snake = environment.snake();
    let (Some(head), Some(tail)) = (snake.head(), snake.tail()) else {
        return Err(CycleError::NoSnake);
    };

    // A lone head is its own tail; aim for a neighbour instead
    let target = if head == tail {
        let offset = if tail.x > 1 {
            Vector::new(-1, 0)
        } else {
            Vector::new(1, 0)
        };
        tail + offset
    } else {
        tail
    };

    let mut path = longest_path(environment, head, target, snake.action.vector())
        .ok_or(CycleError::NoPath)?;

    let required = environment.available_tiles_count();
    if path.len() != required {
        return Err(CycleError::IncompleteCoverage {
            covered: path.len(),
            required,
        });
    }

    path.push(head);
    Ok(path)
}

/// A built cycle with a cursor marking the head's position on it
#[derive(Debug, Clone)]
pub struct Cycle {
    vectors: Vec<Vector>,
    positions: HashMap<Vector, usize>,
    cursor: usize,
}

impl Cycle {
    /// Wraps a closed walk from `build_cycle`; the closing repeat is dropped
    /// and the cursor starts on the first tile.
    pub fn from_closed(mut closed: Vec<Vector>) -> Self {
        if closed.len() > 1 && closed.first() == closed.last() {
            closed.pop();
        }
        let positions = closed.iter().enumerate().map(|(i, v)| (*v, i)).collect();
        Cycle {
            vectors: closed,
            positions,
            cursor: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn index_of(&self, vector: Vector) -> Option<usize> {
        self.positions.get(&vector).copied()
    }

    /// Steps needed to go from index `from` to index `to` following the cycle
    pub fn distance(&self, from: usize, to: usize) -> usize {
        if self.vectors.is_empty() {
            return 0;
        }
        let n = self.len();
        (to % n + n - from % n) % n
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len().max(1)
    }

    /// Moves the cursor onto `head` if the two have drifted apart
    pub fn sync(&mut self, head: Vector) {
        if self.vectors.get(self.cursor) == Some(&head) {
            return;
        }
        if let Some(index) = self.index_of(head) {
            debug!("Cycle cursor moved from {} to {}", self.cursor, index);
            self.cursor = index;
        }
    }

    /// Action for the next tile in cycle order; moves the cursor there
    pub fn advance(&mut self, head: Vector) -> Action {
        self.sync(head);
        let next = self.next_index(self.cursor);
        let action = action_between(self.vectors[self.cursor], self.vectors[next]);
        self.cursor = next;
        action
    }

    pub fn jump_to(&mut self, index: usize) {
        self.cursor = index % self.len().max(1);
    }
}

/// Follows a Hamiltonian cycle, eating fruit whenever the cycle passes it
#[derive(Debug)]
pub struct HamiltonianCycle {
    cycle: Option<Cycle>,
    /// Drives the random turn of the fallback move
    rng: StdRng,
}

impl Default for HamiltonianCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl HamiltonianCycle {
    pub fn new() -> Self {
        HamiltonianCycle {
            cycle: None,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        HamiltonianCycle {
            cycle: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn cycle(&self) -> Option<&Cycle> {
        self.cycle.as_ref()
    }

    /// Survival move for ticks without a cycle
    pub(crate) fn fallback(&mut self, environment: &Environment) -> Action {
        fallback_action(environment, &mut self.rng)
    }

    /// Returns the cached cycle, building it first when there is none.
    /// `None` means this tick's build failed.
    pub fn ensure_cycle(&mut self, environment: &Environment) -> Option<&mut Cycle> {
        if self.cycle.is_none() {
            match build_cycle(environment) {
                Ok(closed) => {
                    info!("Built Hamiltonian cycle over {} tiles", closed.len() - 1);
                    self.cycle = Some(Cycle::from_closed(closed));
                }
                Err(e) => warn!("Hamiltonian cycle build failed: {}", e),
            }
        }
        self.cycle.as_mut()
    }
}

impl Solver for HamiltonianCycle {
    fn info(&self) -> SolverInfo {
        SolverInfo {
            long_name: "Hamiltonian Cycle",
            short_name: "hamiltonian_cycle",
            abbreviation: "hc",
        }
    }

    fn next_action(&mut self, environment: &Environment) -> Action {
        let Some(head) = environment.snake().head() else {
            return environment.snake().action;
        };
        match self.ensure_cycle(environment) {
            Some(cycle) => cycle.advance(head),
            None => fallback_action(environment, &mut self.rng),
        }
    }

    fn reset(&mut self) {
        self.cycle = None;
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
