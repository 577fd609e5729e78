// Grid model for a single-snake game
//
// The environment owns the tile grid, the snake and the fruit. It is only
// mutated through `step` and the `init_*` family; solvers get a shared
// reference and read it through `tile_at`, `snake()` and `fruit()`.

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::action::Action;
use crate::vector::Vector;

/// Classification of a single grid cell
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    Empty,
    Wall,
    Snake,
    Fruit,
}

impl Tile {
    /// Character used when rendering the board as text
    pub fn symbol(&self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Wall => '#',
            Tile::Snake => 'x',
            Tile::Fruit => 'o',
        }
    }
}

/// Why a move killed the snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    Backwards,
    TooFar,
    Diagonal,
    HitSnake,
    HitWall,
    OutOfBounds,
    NoSnake,
}

impl fmt::Display for DeathReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            DeathReason::Backwards => "Tried to move backwards",
            DeathReason::TooFar => "Tried to move > 1 tile away",
            DeathReason::Diagonal => "Tried to move diagonally",
            DeathReason::HitSnake => "Hit snake",
            DeathReason::HitWall => "Hit wall",
            DeathReason::OutOfBounds => "Left the board",
            DeathReason::NoSnake => "No snake on the board",
        };
        write!(f, "{}", reason)
    }
}

/// Result of a single `Environment::step`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved one tile without eating
    Moved,
    /// The snake moved onto the fruit and grew
    Ate,
    /// The move was illegal or lethal; nothing was mutated
    Died(DeathReason),
}

impl StepOutcome {
    pub fn is_alive(&self) -> bool {
        !matches!(self, StepOutcome::Died(_))
    }

    pub fn death_reason(&self) -> Option<DeathReason> {
        match self {
            StepOutcome::Died(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Snake body, head first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snake {
    vectors: VecDeque<Vector>,
    /// Current heading: the last action that moved the snake
    pub action: Action,
}

impl Snake {
    pub fn new(vectors: Vec<Vector>, action: Action) -> Self {
        Snake {
            vectors: vectors.into(),
            action,
        }
    }

    pub fn head(&self) -> Option<Vector> {
        self.vectors.front().copied()
    }

    pub fn tail(&self) -> Option<Vector> {
        self.vectors.back().copied()
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn contains(&self, vector: Vector) -> bool {
        self.vectors.contains(&vector)
    }

    pub fn vectors(&self) -> impl Iterator<Item = Vector> + '_ {
        self.vectors.iter().copied()
    }

    /// Grows the snake by prepending a new head
    fn move_to(&mut self, vector: Vector) {
        self.vectors.push_front(vector);
    }

    fn remove_tail(&mut self) -> Option<Vector> {
        self.vectors.pop_back()
    }
}

/// The single fruit on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Fruit {
    vector: Option<Vector>,
}

impl Fruit {
    pub fn get_vector(&self) -> Option<Vector> {
        self.vector
    }

    pub fn at_vector(&self, vector: Vector) -> bool {
        self.vector == Some(vector)
    }
}

/// Tile grid plus the snake and fruit living on it
pub struct Environment {
    width: i32,
    height: i32,
    tiles: Vec<Vec<Tile>>,
    snake: Snake,
    fruit: Fruit,
    rng: StdRng,
}

impl Environment {
    /// Creates an empty grid with an OS-seeded random generator
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_rng(width, height, StdRng::from_os_rng())
    }

    /// Creates an empty grid whose random placements are reproducible
    pub fn with_seed(width: i32, height: i32, seed: u64) -> Self {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: i32, height: i32, rng: StdRng) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Environment {
            width,
            height,
            tiles: vec![vec![Tile::Empty; width as usize]; height as usize],
            snake: Snake::default(),
            fruit: Fruit::default(),
            rng,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruit(&self) -> &Fruit {
        &self.fruit
    }

    /// Rows of tiles, `tiles()[y][x]`
    pub fn tiles(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    /// Moves the snake one tile.
    ///
    /// Illegal moves (reversal, more than one tile, diagonal) and lethal
    /// moves (into the snake, a wall or off the board) leave the environment
    /// untouched and report `StepOutcome::Died`.
    pub fn step(&mut self, action: Action) -> StepOutcome {
        let Some(head) = self.snake.head() else {
            return StepOutcome::Died(DeathReason::NoSnake);
        };

        let direction = action.vector();
        if self.snake.action.vector().is_reverse(direction) {
            return StepOutcome::Died(DeathReason::Backwards);
        }
        if !direction.within_distance(1) {
            return StepOutcome::Died(DeathReason::TooFar);
        }
        if direction.is_diagonal() {
            return StepOutcome::Died(DeathReason::Diagonal);
        }

        let new = head + direction;
        match self.tile_at(new) {
            None => return StepOutcome::Died(DeathReason::OutOfBounds),
            Some(Tile::Snake) => return StepOutcome::Died(DeathReason::HitSnake),
            Some(Tile::Wall) => return StepOutcome::Died(DeathReason::HitWall),
            Some(Tile::Empty) | Some(Tile::Fruit) => {}
        }

        self.snake.action = action;
        self.snake.move_to(new);
        self.set_tile(new, Tile::Snake);

        if self.fruit.at_vector(new) {
            if self.won() {
                self.fruit.vector = None;
            } else {
                self.init_fruit();
            }
            return StepOutcome::Ate;
        }

        if let Some(tail) = self.snake.remove_tail() {
            self.set_tile(tail, Tile::Empty);
        }
        StepOutcome::Moved
    }

    /// Current score: the snake's length
    pub fn reward(&self) -> usize {
        self.snake.len()
    }

    /// Number of tiles inside the one-tile wall border
    pub fn available_tiles_count(&self) -> usize {
        ((self.width - 2).max(0) * (self.height - 2).max(0)) as usize
    }

    pub fn won(&self) -> bool {
        self.reward() == self.available_tiles_count()
    }

    /// Tile at `vector`, or `None` when off the board
    pub fn tile_at(&self, vector: Vector) -> Option<Tile> {
        if self.contains(vector) {
            Some(self.tiles[vector.y as usize][vector.x as usize])
        } else {
            None
        }
    }

    pub fn contains(&self, vector: Vector) -> bool {
        vector.x >= 0 && vector.y >= 0 && vector.x < self.width && vector.y < self.height
    }

    /// Paints a one-tile wall around the perimeter
    pub fn init_wall(&mut self) {
        self.clear_tiles(Tile::Wall);
        for y in 0..self.height {
            for x in 0..self.width {
                if x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1 {
                    self.set_tile(Vector::new(x, y), Tile::Wall);
                }
            }
        }
    }

    /// Draws a seed for a generator outside the environment, such as a
    /// solver's, so one seeded environment makes the whole run reproducible
    pub fn derive_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Moves the fruit to a random empty tile
    pub fn init_fruit(&mut self) {
        self.clear_tiles(Tile::Fruit);
        self.fruit.vector = self.random_available_position();
        match self.fruit.vector {
            Some(vector) => self.set_tile(vector, Tile::Fruit),
            None => warn!("No empty tile left to place fruit"),
        }
    }

    /// Places the fruit at `vector`, which must be an empty tile
    pub fn init_fruit_at(&mut self, vector: Vector) -> Result<(), String> {
        self.clear_tiles(Tile::Fruit);
        self.fruit.vector = None;
        match self.tile_at(vector) {
            Some(Tile::Empty) => {
                self.set_tile(vector, Tile::Fruit);
                self.fruit.vector = Some(vector);
                Ok(())
            }
            Some(tile) => Err(format!("Cannot place fruit at {} on {:?} tile", vector, tile)),
            None => Err(format!("Cannot place fruit at {}: off the board", vector)),
        }
    }

    /// Replaces the snake with a length-1 snake on a random empty tile with
    /// a random heading
    pub fn init_snake(&mut self) {
        self.clear_tiles(Tile::Snake);
        let heading = Action::ALL[self.rng.random_range(0..Action::ALL.len())];
        match self.random_available_position() {
            Some(vector) => {
                self.set_tile(vector, Tile::Snake);
                self.snake = Snake::new(vec![vector], heading);
            }
            None => {
                warn!("No empty tile left to place snake");
                self.snake = Snake::new(Vec::new(), heading);
            }
        }
    }

    /// Replaces the snake with `body` (head first) facing `heading`.
    ///
    /// Every body tile must be on the board and not a wall or the fruit.
    pub fn init_snake_at(&mut self, body: Vec<Vector>, heading: Action) -> Result<(), String> {
        self.clear_tiles(Tile::Snake);
        self.snake = Snake::new(Vec::new(), heading);
        for vector in &body {
            match self.tile_at(*vector) {
                Some(Tile::Empty) => {}
                Some(tile) => {
                    self.clear_tiles(Tile::Snake);
                    return Err(format!("Cannot place snake at {} on {:?} tile", vector, tile));
                }
                None => {
                    self.clear_tiles(Tile::Snake);
                    return Err(format!("Cannot place snake at {}: off the board", vector));
                }
            }
            self.set_tile(*vector, Tile::Snake);
        }
        self.snake = Snake::new(body, heading);
        Ok(())
    }

    fn set_tile(&mut self, vector: Vector, tile: Tile) {
        if self.contains(vector) {
            self.tiles[vector.y as usize][vector.x as usize] = tile;
        }
    }

    fn clear_tiles(&mut self, tile: Tile) {
        for row in self.tiles.iter_mut() {
            for t in row.iter_mut().filter(|t| **t == tile) {
                *t = Tile::Empty;
            }
        }
    }

    /// Rejection-samples a uniformly random empty tile
    fn random_available_position(&mut self) -> Option<Vector> {
        let any_empty = self.tiles.iter().flatten().any(|t| *t == Tile::Empty);
        if !any_empty {
            return None;
        }
        loop {
            let vector = Vector::new(
                self.rng.random_range(0..self.width),
                self.rng.random_range(0..self.height),
            );
            if self.tile_at(vector) == Some(Tile::Empty) {
                return Some(vector);
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.tiles {
            for tile in row {
                write!(f, "{}", tile.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
