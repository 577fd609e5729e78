// Integration tests for shortest paths, path expansion and cycle building
//
// Fixed boards with known answers, plus sweeps over every start tile and
// heading to check the structural guarantees of each algorithm.

use std::collections::HashSet;

use snake_solvers::action::Action;
use snake_solvers::environment::Environment;
use snake_solvers::solvers::{build_cycle, expand_path, longest_path, shortest_path, CycleError};
use snake_solvers::vector::Vector;

fn board(size: i32, body: &[(i32, i32)], heading: Action) -> Environment {
    let mut environment = Environment::with_seed(size, size, 17);
    environment.init_wall();
    let body = body.iter().map(|&(x, y)| Vector::new(x, y)).collect();
    environment.init_snake_at(body, heading).unwrap();
    environment
}

fn vectors(points: &[(i32, i32)]) -> Vec<Vector> {
    points.iter().map(|&(x, y)| Vector::new(x, y)).collect()
}

fn assert_closed_cycle(environment: &Environment, cycle: &[Vector]) {
    let head = environment.snake().head().unwrap();
    assert_eq!(cycle.first(), Some(&head));
    assert_eq!(cycle.last(), Some(&head));
    assert_eq!(cycle.len(), environment.available_tiles_count() + 1);

    let open: HashSet<_> = cycle[..cycle.len() - 1].iter().collect();
    assert_eq!(open.len(), environment.available_tiles_count());
    for pair in cycle.windows(2) {
        assert_eq!(pair[0].manhattan_distance(pair[1]), 1);
    }
}

/// Test: on an open board the shortest path is as long as the Manhattan
/// distance whenever the first step does not have to turn back
#[test]
fn test_shortest_path_matches_manhattan_distance() {
    let environment = board(10, &[(1, 1)], Action::Right);
    let start = Vector::new(4, 4);
    for x in 1..9 {
        for y in 1..9 {
            let goal = Vector::new(x, y);
            if goal == Vector::new(1, 1) {
                continue;
            }
            let path = shortest_path(&environment, start, goal, Vector::ZERO).unwrap();
            assert_eq!(path.len() as i32 - 1, start.manhattan_distance(goal));
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&goal));
        }
    }
}

/// Test: the heading forbids turning straight back on the first step only
#[test]
fn test_shortest_path_respects_heading() {
    let environment = board(10, &[(5, 5)], Action::Right);
    let head = Vector::new(5, 5);

    let behind = shortest_path(&environment, head, Vector::new(3, 5), Vector::new(1, 0)).unwrap();
    assert_eq!(behind, vectors(&[(5, 5), (5, 4), (4, 4), (3, 4), (3, 5)]));

    let above = shortest_path(&environment, head, Vector::new(5, 2), Vector::new(1, 0)).unwrap();
    assert_eq!(above, vectors(&[(5, 5), (5, 4), (5, 3), (5, 2)]));
}

/// Test: a wall of snake body cuts the board in two
#[test]
fn test_shortest_path_blocked_by_body() {
    let body: Vec<(i32, i32)> = (1..7).map(|y| (3, y)).collect();
    let environment = board(8, &body, Action::Up);
    assert_eq!(
        shortest_path(&environment, Vector::new(1, 3), Vector::new(5, 3), Vector::ZERO),
        None
    );
}

/// Test: expansion keeps both endpoints and never revisits a tile
#[test]
fn test_longest_path_is_simple_and_anchored() {
    let environment = board(10, &[(5, 5)], Action::Right);
    let from = Vector::new(2, 5);
    let to = Vector::new(4, 5);

    let one_pass = expand_path(&environment, &[from, Vector::new(3, 5), to], to, Vector::new(1, 0));
    assert_eq!(one_pass, vectors(&[(2, 5), (2, 6), (3, 6), (3, 5), (4, 5)]));

    let path = longest_path(&environment, from, to, Vector::new(1, 0)).unwrap();
    assert_eq!(path.len(), 61);
    assert_eq!(path.first(), Some(&from));
    assert_eq!(path.last(), Some(&to));
    let unique: HashSet<_> = path.iter().collect();
    assert_eq!(unique.len(), path.len());
}

/// Test: the smallest board has exactly one cycle, reachable from three of
/// the four headings
#[test]
fn test_cycle_on_smallest_board() {
    for heading in [Action::Left, Action::Right, Action::Down] {
        let environment = board(4, &[(1, 1)], heading);
        let cycle = build_cycle(&environment).unwrap();
        assert_eq!(cycle, vectors(&[(1, 1), (1, 2), (2, 2), (2, 1), (1, 1)]));
    }

    let environment = board(4, &[(1, 1)], Action::Up);
    assert_eq!(
        build_cycle(&environment),
        Err(CycleError::IncompleteCoverage {
            covered: 2,
            required: 4
        })
    );
}

/// Test: exact cycle on a 6x6 board
#[test]
fn test_cycle_on_six_by_six() {
    let environment = board(6, &[(1, 1)], Action::Down);
    let cycle = build_cycle(&environment).unwrap();
    assert_eq!(
        cycle,
        vectors(&[
            (1, 1),
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 4),
            (3, 4),
            (4, 4),
            (4, 3),
            (4, 2),
            (4, 1),
            (3, 1),
            (3, 2),
            (3, 3),
            (2, 3),
            (2, 2),
            (2, 1),
            (1, 1),
        ])
    );
    assert_closed_cycle(&environment, &cycle);
}

/// Test: an odd number of open tiles can never be covered by a cycle
#[test]
fn test_cycle_fails_on_odd_board() {
    let environment = board(5, &[(2, 2)], Action::Right);
    assert_eq!(environment.available_tiles_count(), 9);
    assert_eq!(
        build_cycle(&environment),
        Err(CycleError::IncompleteCoverage {
            covered: 8,
            required: 9
        })
    );
}

/// Test: a two-tile snake closes its cycle through its own tail
#[test]
fn test_cycle_for_two_tile_snake() {
    let environment = board(6, &[(2, 2), (2, 3)], Action::Up);
    let cycle = build_cycle(&environment).unwrap();
    assert_closed_cycle(&environment, &cycle);
    assert_eq!(cycle[cycle.len() - 2], Vector::new(2, 3));
}

/// Test: every cycle reported as built is a real Hamiltonian cycle
#[test]
fn test_successful_cycles_cover_every_tile() {
    for size in [4, 6, 8] {
        let mut built = 0;
        for x in 1..size - 1 {
            for y in 1..size - 1 {
                for heading in Action::ALL {
                    let environment = board(size, &[(x, y)], heading);
                    match build_cycle(&environment) {
                        Ok(cycle) => {
                            assert_closed_cycle(&environment, &cycle);
                            built += 1;
                        }
                        Err(CycleError::IncompleteCoverage { covered, required }) => {
                            assert!(covered < required);
                        }
                        Err(e) => panic!("unexpected failure on {}x{}: {}", size, size, e),
                    }
                }
            }
        }
        assert!(built > 0, "no cycle built on {}x{}", size, size);
    }
}

/// Test: cycles on a 10x10 board from two different starts
#[test]
fn test_cycle_on_ten_by_ten() {
    for (start, heading) in [((5, 5), Action::Right), ((4, 4), Action::Up)] {
        let environment = board(10, &[start], heading);
        let cycle = build_cycle(&environment).unwrap();
        assert_closed_cycle(&environment, &cycle);
    }
}
