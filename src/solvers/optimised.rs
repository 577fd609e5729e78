// Hamiltonian cycle with shortcuts
//
// Follows the same cycle as `HamiltonianCycle` but may cut ahead along it
// towards the fruit. All index arithmetic is forward distance on the cycle,
// so a jump never overtakes the tail or skips the fruit.

use log::debug;

use super::hamiltonian::{Cycle, HamiltonianCycle};
use super::{Solver, SolverInfo};
use crate::action::Action;
use crate::config::SafetyConfig;
use crate::environment::{Environment, Tile};

/// Tiles of slack a shortcut must leave between the new head and the tail.
///
/// Interpolates linearly on occupancy `snake_len / cycle_len`, clamped to
/// the configured breakpoints, between `min_margin` and `max_margin` times
/// the cycle length.
pub fn safety_margin(safety: &SafetyConfig, snake_len: usize, cycle_len: usize) -> usize {
    if cycle_len == 0 {
        return 0;
    }
    let n = cycle_len as f64;
    let low = n * safety.min_margin;
    let high = n * safety.max_margin;

    let span = safety.max_occupancy - safety.min_occupancy;
    if span <= 0.0 {
        return high.round().max(0.0) as usize;
    }

    let occupancy = (snake_len as f64 / n).clamp(safety.min_occupancy, safety.max_occupancy);
    let margin = low + (high - low) * (occupancy - safety.min_occupancy) / span;
    margin.round().max(0.0) as usize
}

/// A jump the optimiser decided to take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Shortcut {
    index: usize,
    action: Action,
}

/// Looks for a forward move that lands further along the cycle than the next
/// scheduled tile without passing the fruit or closing in on the tail.
///
/// Tiles skipped by a jump stay empty behind the head until the tail passes
/// them, and the tail only passes them on moves that do not eat. A jump is
/// therefore taken only when the fruit lies at least `length` tiles past the
/// landing tile: the tail then clears every skipped tile before the snake
/// grows again, so growth never eats into the tiles ahead of the head.
fn find_shortcut(
    environment: &Environment,
    cycle: &Cycle,
    safety: &SafetyConfig,
) -> Option<Shortcut> {
    let snake = environment.snake();
    let head = snake.head()?;
    let tail = snake.tail()?;
    let fruit = environment.fruit().get_vector()?;

    let n = cycle.len();
    let length = snake.len();
    let head_index = cycle.index_of(head)?;
    let tail_index = cycle.index_of(tail)?;
    let fruit_index = cycle.index_of(fruit)?;

    let to_fruit = cycle.distance(head_index, fruit_index);
    let gap = if length == 1 {
        n
    } else {
        cycle.distance(head_index, tail_index)
    };
    let margin = safety_margin(safety, length, n);

    let mut candidates: Vec<(usize, Shortcut)> = snake
        .action
        .forward_actions()
        .into_iter()
        .filter_map(|action| {
            let target = head + action.vector();
            if environment.tile_at(target) != Some(Tile::Empty) {
                return None;
            }
            let index = cycle.index_of(target)?;
            Some((cycle.distance(head_index, index), Shortcut { index, action }))
        })
        .collect();
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    candidates.into_iter().find_map(|(jump, shortcut)| {
        if jump <= 1 || jump >= to_fruit || jump + margin >= gap {
            return None;
        }
        if cycle.distance(shortcut.index, fruit_index) < length {
            return None;
        }
        // Open tiles ahead of the new head must outnumber the holes left
        // between the tail and the new head by more than the margin
        let ahead = cycle.distance(shortcut.index, tail_index).saturating_sub(1);
        let holes = cycle.distance(tail_index, shortcut.index).saturating_sub(length);
        if ahead <= holes + margin {
            return None;
        }
        Some(shortcut)
    })
}

/// Hamiltonian cycle follower that takes safe shortcuts towards the fruit
#[derive(Debug, Default)]
pub struct HamiltonianCycleOptimised {
    hamiltonian: HamiltonianCycle,
    safety: SafetyConfig,
}

impl HamiltonianCycleOptimised {
    pub fn new(safety: SafetyConfig) -> Self {
        HamiltonianCycleOptimised {
            hamiltonian: HamiltonianCycle::new(),
            safety,
        }
    }

    pub fn cycle(&self) -> Option<&Cycle> {
        self.hamiltonian.cycle()
    }
}

impl Solver for HamiltonianCycleOptimised {
    fn info(&self) -> SolverInfo {
        SolverInfo {
            long_name: "Hamiltonian Cycle Optimised",
            short_name: "hamiltonian_cycle_optimised",
            abbreviation: "hco",
        }
    }

    fn next_action(&mut self, environment: &Environment) -> Action {
        let Some(head) = environment.snake().head() else {
            return environment.snake().action;
        };
        let Some(cycle) = self.hamiltonian.ensure_cycle(environment) else {
            return self.hamiltonian.fallback(environment);
        };

        cycle.sync(head);
        match find_shortcut(environment, cycle, &self.safety) {
            Some(shortcut) => {
                debug!(
                    "Shortcut {} from cycle index {} to {}",
                    shortcut.action,
                    cycle.cursor(),
                    shortcut.index
                );
                cycle.jump_to(shortcut.index);
                shortcut.action
            }
            None => cycle.advance(head),
        }
    }

    fn reset(&mut self) {
        self.hamiltonian.reset();
    }

    fn reseed(&mut self, seed: u64) {
        self.hamiltonian.reseed(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vector;

    #[test]
    fn test_margin_interpolates_on_occupancy() {
        let safety = SafetyConfig::default();
        assert_eq!(safety_margin(&safety, 1, 100), 1);
        assert_eq!(safety_margin(&safety, 42, 100), 13);
        assert_eq!(safety_margin(&safety, 80, 100), 25);
    }

    #[test]
    fn test_margin_clamps_occupancy() {
        let safety = SafetyConfig::default();
        assert_eq!(safety_margin(&safety, 100, 100), 25);
        assert_eq!(safety_margin(&safety, 0, 100), 1);
        assert_eq!(safety_margin(&safety, 1, 16), 0);
        assert_eq!(safety_margin(&safety, 5, 0), 0);
    }

    #[test]
    fn test_margin_with_collapsed_breakpoints() {
        let safety = SafetyConfig {
            min_occupancy: 0.5,
            max_occupancy: 0.5,
            ..SafetyConfig::default()
        };
        assert_eq!(safety_margin(&safety, 1, 100), 25);
    }

    // Cycle built from (1, 1) heading down on a 6x6 board:
    // (1,1) (1,2) (1,3) (1,4) (2,4) (3,4) (4,4) (4,3)
    // (4,2) (4,1) (3,1) (3,2) (3,3) (2,3) (2,2) (2,1)
    fn solver_on_small_board() -> (Environment, HamiltonianCycleOptimised) {
        let mut environment = Environment::with_seed(6, 6, 11);
        environment.init_wall();
        environment
            .init_snake_at(vec![Vector::new(1, 1)], Action::Down)
            .unwrap();
        let mut solver = HamiltonianCycleOptimised::new(SafetyConfig::default());
        assert!(solver.hamiltonian.ensure_cycle(&environment).is_some());
        (environment, solver)
    }

    #[test]
    fn test_cycle_fixture() {
        let (_, solver) = solver_on_small_board();
        let cycle = solver.cycle().unwrap();
        assert_eq!(cycle.len(), 16);
        assert_eq!(cycle.index_of(Vector::new(3, 2)), Some(11));
        assert_eq!(cycle.index_of(Vector::new(2, 2)), Some(14));
        assert_eq!(cycle.index_of(Vector::new(2, 1)), Some(15));
    }

    #[test]
    fn test_takes_shortcut_towards_fruit() {
        let (mut environment, mut solver) = solver_on_small_board();
        environment
            .init_snake_at(vec![Vector::new(3, 2)], Action::Down)
            .unwrap();
        environment.init_fruit_at(Vector::new(2, 1)).unwrap();

        assert_eq!(solver.next_action(&environment), Action::Left);
        assert_eq!(solver.cycle().unwrap().cursor(), 14);
    }

    #[test]
    fn test_shortcut_with_body_behind() {
        let (mut environment, mut solver) = solver_on_small_board();
        environment
            .init_snake_at(vec![Vector::new(3, 2), Vector::new(3, 1)], Action::Down)
            .unwrap();
        environment.init_fruit_at(Vector::new(1, 1)).unwrap();

        assert_eq!(solver.next_action(&environment), Action::Left);
        assert_eq!(solver.cycle().unwrap().cursor(), 14);
    }

    #[test]
    fn test_no_shortcut_when_fruit_is_within_body_length() {
        let (mut environment, mut solver) = solver_on_small_board();
        environment
            .init_snake_at(vec![Vector::new(3, 2), Vector::new(3, 1)], Action::Down)
            .unwrap();
        // One tile past the landing tile, closer than the body is long
        environment.init_fruit_at(Vector::new(2, 1)).unwrap();

        assert_eq!(solver.next_action(&environment), Action::Down);
        assert_eq!(solver.cycle().unwrap().cursor(), 12);
    }

    #[test]
    fn test_never_skips_fruit() {
        let (mut environment, mut solver) = solver_on_small_board();
        environment
            .init_snake_at(vec![Vector::new(3, 2)], Action::Down)
            .unwrap();
        environment.init_fruit_at(Vector::new(2, 2)).unwrap();

        // (4, 2) lies thirteen tiles ahead, past the fruit
        assert_eq!(solver.next_action(&environment), Action::Down);
        assert_eq!(solver.cycle().unwrap().cursor(), 12);
    }

    #[test]
    fn test_follows_cycle_without_fruit() {
        let (environment, mut solver) = solver_on_small_board();
        assert_eq!(solver.next_action(&environment), Action::Down);
    }
}
