// Breadth-first shortest path
//
// Visited nodes live in an arena; each node stores the arena index of the
// node it was discovered from, so the path is rebuilt by walking indices
// back to the start.

use log::debug;
use std::collections::{HashSet, VecDeque};

use super::{action_between, Solver, SolverInfo};
use crate::action::Action;
use crate::environment::{Environment, Tile};
use crate::vector::Vector;

/// A visited position and the arena index of its parent
#[derive(Debug, Clone, Copy)]
struct OwnedVector {
    vector: Vector,
    owner: Option<usize>,
}

/// Shortest path from `from` to `to`, both ends included.
///
/// `heading` is the snake's current direction; the first step may not
/// reverse it. The goal is accepted even when it is a snake tile so the
/// head can search towards its own tail. Returns `None` when the goal is
/// unreachable.
pub fn shortest_path(
    environment: &Environment,
    from: Vector,
    to: Vector,
    heading: Vector,
) -> Option<Vec<Vector>> {
    let backwards = from + heading.reverse();

    let mut arena = vec![OwnedVector {
        vector: from,
        owner: None,
    }];
    let mut seen = HashSet::from([from]);
    let mut frontier = VecDeque::from([0usize]);

    while let Some(index) = frontier.pop_front() {
        let current = arena[index].vector;
        if current == to {
            return Some(trace(&arena, index));
        }

        for neighbour in current.neighbours() {
            if index == 0 && neighbour == backwards {
                continue;
            }
            if seen.contains(&neighbour) || !is_traversable(environment, neighbour, to) {
                continue;
            }
            seen.insert(neighbour);
            arena.push(OwnedVector {
                vector: neighbour,
                owner: Some(index),
            });
            frontier.push_back(arena.len() - 1);
        }
    }

    None
}

fn is_traversable(environment: &Environment, vector: Vector, goal: Vector) -> bool {
    match environment.tile_at(vector) {
        Some(Tile::Empty) | Some(Tile::Fruit) => true,
        Some(Tile::Snake) => vector == goal,
        Some(Tile::Wall) | None => false,
    }
}

fn trace(arena: &[OwnedVector], mut index: usize) -> Vec<Vector> {
    let mut path = vec![arena[index].vector];
    while let Some(owner) = arena[index].owner {
        path.push(arena[owner].vector);
        index = owner;
    }
    path.reverse();
    path
}

/// Heads for the fruit along the shortest path, recomputed every tick
#[derive(Debug, Default)]
pub struct BreadthFirstSearchShortest;

impl BreadthFirstSearchShortest {
    pub fn new() -> Self {
        BreadthFirstSearchShortest
    }
}

impl Solver for BreadthFirstSearchShortest {
    fn info(&self) -> SolverInfo {
        SolverInfo {
            long_name: "Breadth First Search Shortest",
            short_name: "breadth_first_search_shortest",
            abbreviation: "bfss",
        }
    }

    fn next_action(&mut self, environment: &Environment) -> Action {
        let snake = environment.snake();
        let heading = snake.action;
        let (Some(head), Some(fruit)) = (snake.head(), environment.fruit().get_vector()) else {
            return heading;
        };

        match shortest_path(environment, head, fruit, heading.vector()) {
            Some(path) if path.len() > 1 => action_between(path[0], path[1]),
            _ => {
                debug!("No path from {} to fruit at {}", head, fruit);
                heading
            }
        }
    }
}
