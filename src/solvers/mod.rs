// Snake policies
//
// A solver looks at the environment once per tick and answers with the next
// action. Solvers may cache plans between ticks; the runner calls `reset`
// whenever a new episode starts.

pub mod hamiltonian;
pub mod human;
pub mod longest;
pub mod optimised;
pub mod shortest;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::action::Action;
use crate::config::SafetyConfig;
use crate::environment::{Environment, Tile};
use crate::vector::Vector;

pub use hamiltonian::{build_cycle, Cycle, CycleError, HamiltonianCycle};
pub use human::Human;
pub use longest::{expand_path, longest_path, BreadthFirstSearchLongest};
pub use optimised::{safety_margin, HamiltonianCycleOptimised};
pub use shortest::{shortest_path, BreadthFirstSearchShortest};

/// Display names of a solver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverInfo {
    pub long_name: &'static str,
    pub short_name: &'static str,
    pub abbreviation: &'static str,
}

impl SolverInfo {
    /// True when `name` matches any of the three names, ignoring case
    pub fn matches(&self, name: &str) -> bool {
        [self.long_name, self.short_name, self.abbreviation]
            .iter()
            .any(|n| n.eq_ignore_ascii_case(name))
    }
}

/// Keyboard input forwarded to interactive solvers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Up,
    Right,
    Down,
}

impl Key {
    pub fn action(&self) -> Action {
        match self {
            Key::Left => Action::Left,
            Key::Up => Action::Up,
            Key::Right => Action::Right,
            Key::Down => Action::Down,
        }
    }
}

/// A policy that picks one action per tick
pub trait Solver {
    fn info(&self) -> SolverInfo;

    /// Chooses the action for the current tick
    fn next_action(&mut self, environment: &Environment) -> Action;

    /// Called after the environment applied the action. `terminal` is set
    /// when the episode ended on this tick.
    fn after_action(&mut self, _environment: &Environment, _terminal: bool) {}

    fn user_input(&mut self, _key: Key) {}

    /// Drops any state carried over from a previous episode
    fn reset(&mut self) {}

    /// Reseeds the generator behind any random choice the solver makes
    fn reseed(&mut self, _seed: u64) {}
}

/// Every solver that can play without user input, in listing order
pub fn automatic_solvers(safety: &SafetyConfig) -> Vec<Box<dyn Solver>> {
    vec![
        Box::new(BreadthFirstSearchShortest::new()),
        Box::new(BreadthFirstSearchLongest::new()),
        Box::new(HamiltonianCycle::new()),
        Box::new(HamiltonianCycleOptimised::new(safety.clone())),
    ]
}

/// Every solver, including the interactive one
pub fn all_solvers(safety: &SafetyConfig) -> Vec<Box<dyn Solver>> {
    let mut solvers = automatic_solvers(safety);
    solvers.push(Box::new(Human::new()));
    solvers
}

/// Looks a solver up by long name, short name or abbreviation
pub fn by_name(name: &str, safety: &SafetyConfig) -> Option<Box<dyn Solver>> {
    all_solvers(safety)
        .into_iter()
        .find(|solver| solver.info().matches(name))
}

/// Action that moves one tile from `from` to `to`.
///
/// # Panics
/// When the two positions are not orthogonal neighbours. Every caller passes
/// consecutive tiles of a path or cycle, so a gap is a bug in the caller.
pub(crate) fn action_between(from: Vector, to: Vector) -> Action {
    match Action::from_vector(to - from) {
        Some(action) => action,
        None => panic!("{} -> {} is not a single orthogonal step", from, to),
    }
}

/// Actions that walk `path` from its first tile to its last
pub(crate) fn path_actions(path: &[Vector]) -> Vec<Action> {
    path.windows(2)
        .map(|pair| action_between(pair[0], pair[1]))
        .collect()
}

/// True for tiles the snake can move onto without dying
pub(crate) fn is_free(tile: Option<Tile>) -> bool {
    matches!(tile, Some(Tile::Empty) | Some(Tile::Fruit))
}

/// Survival move used when a solver has no plan: straight on when possible,
/// otherwise a random free turn, otherwise the current heading.
pub(crate) fn fallback_action<R: Rng + ?Sized>(
    environment: &Environment,
    rng: &mut R,
) -> Action {
    let snake = environment.snake();
    let heading = snake.action;
    let Some(head) = snake.head() else {
        return heading;
    };

    if is_free(environment.tile_at(head + heading.vector())) {
        return heading;
    }

    let turns: Vec<Action> = [heading.relative_left(), heading.relative_right()]
        .into_iter()
        .filter(|a| *a != Action::None && is_free(environment.tile_at(head + a.vector())))
        .collect();
    turns.choose(rng).copied().unwrap_or(heading)
}
