// Longest-path expansion
//
// A path is lengthened by replacing a step a -> b with the detour
// a -> a+r -> b+r -> b, where r is the step rotated a quarter turn. Both
// endpoints never move.

use log::debug;
use std::collections::{HashSet, VecDeque};

use super::shortest::shortest_path;
use super::{path_actions, Solver, SolverInfo};
use crate::action::Action;
use crate::environment::{Environment, Tile};
use crate::vector::Vector;

/// Runs one expansion pass over `path`.
///
/// At most one detour is inserted: the first pair `(a, b)` whose clockwise
/// side, or failing that counter-clockwise side, has two free tiles. A
/// detour leaving the start tile may not reverse `heading`. Returns the path
/// unchanged when no pair can be widened.
pub fn expand_path(
    environment: &Environment,
    path: &[Vector],
    goal: Vector,
    heading: Vector,
) -> Vec<Vector> {
    let mut expanded = path.to_vec();
    let visited: HashSet<Vector> = path.iter().copied().collect();
    let is_free = |vector: Vector| {
        vector != goal
            && !visited.contains(&vector)
            && matches!(
                environment.tile_at(vector),
                Some(Tile::Empty) | Some(Tile::Fruit)
            )
    };

    for index in 0..path.len().saturating_sub(1) {
        let (a, b) = (path[index], path[index + 1]);
        let clockwise = (b - a).rotate();

        for rotation in [clockwise, clockwise.reverse()] {
            if index == 0 && rotation.is_reverse(heading) {
                continue;
            }
            let (side_a, side_b) = (a + rotation, b + rotation);
            if is_free(side_a) && is_free(side_b) {
                expanded.splice(index + 1..index + 1, [side_a, side_b]);
                return expanded;
            }
        }
    }

    expanded
}

/// Shortest path from `from` to `to`, expanded until a pass stops growing it
pub fn longest_path(
    environment: &Environment,
    from: Vector,
    to: Vector,
    heading: Vector,
) -> Option<Vec<Vector>> {
    let mut path = shortest_path(environment, from, to, heading)?;
    loop {
        let expanded = expand_path(environment, &path, to, heading);
        if expanded.len() == path.len() {
            return Some(path);
        }
        path = expanded;
    }
}

/// Plays out the longest path to the fruit before planning again
#[derive(Debug, Default)]
pub struct BreadthFirstSearchLongest {
    planned: VecDeque<Action>,
}

impl BreadthFirstSearchLongest {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Solver for BreadthFirstSearchLongest {
    fn info(&self) -> SolverInfo {
        SolverInfo {
            long_name: "Breadth First Search Longest",
            short_name: "breadth_first_search_longest",
            abbreviation: "bfsl",
        }
    }

    fn next_action(&mut self, environment: &Environment) -> Action {
        let snake = environment.snake();
        let heading = snake.action;

        if self.planned.is_empty() {
            let (Some(head), Some(fruit)) = (snake.head(), environment.fruit().get_vector())
            else {
                return heading;
            };
            match longest_path(environment, head, fruit, heading.vector()) {
                Some(path) => {
                    debug!("Planned {} steps to fruit at {}", path.len() - 1, fruit);
                    self.planned.extend(path_actions(&path));
                }
                None => debug!("No path from {} to fruit at {}", head, fruit),
            }
        }

        self.planned.pop_front().unwrap_or(heading)
    }

    fn reset(&mut self) {
        self.planned.clear();
    }
}
