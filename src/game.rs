use macroquad::rand::gen_range;
use serde::Deserialize;
use std::collections::VecDeque;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Top-left corner of a cell, in pixels. `y` grows downwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Bounds {
    width: i32,
    height: i32,
    cell: i32,
}

impl Bounds {
    pub const fn new(width: i32, height: i32, cell: i32) -> Self {
        Self { width, height, cell }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell
    }

    pub fn cell_count(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    /// True for grid-aligned positions on the board.
    pub fn contains(&self, p: Position) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.x < self.width
            && p.y < self.height
            && p.x % self.cell == 0
            && p.y % self.cell == 0
    }

    /// One cell over in `dir`, re-entering on the far side when leaving the board.
    pub fn step(&self, p: Position, dir: Direction) -> Position {
        match dir {
            Direction::Up => Position::new(p.x, (p.y - self.cell).rem_euclid(self.height)),
            Direction::Down => Position::new(p.x, (p.y + self.cell).rem_euclid(self.height)),
            Direction::Left => Position::new((p.x - self.cell).rem_euclid(self.width), p.y),
            Direction::Right => Position::new((p.x + self.cell).rem_euclid(self.width), p.y),
        }
    }

    fn cell_at(&self, column: i32, row: i32) -> Position {
        Position::new(column * self.cell, row * self.cell)
    }

    fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows())
            .flat_map(move |row| (0..self.columns()).map(move |col| self.cell_at(col, row)))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Body {
    pub position: Position,
}

pub struct Head {
    position: Position,
    direction: Direction,
    next_direction: Direction,
    bodies: VecDeque<Body>,
    size: usize,
}

impl Head {
    /// Builds a head at `start` with `size` segments trailing straight behind it.
    pub fn new(start: Position, direction: Direction, size: usize, bounds: &Bounds) -> Self {
        let mut trail = Vec::with_capacity(size);
        let mut p = start;
        for _ in 0..size {
            p = bounds.step(p, direction.opposite());
            trail.push(Body { position: p });
        }
        // oldest (farthest from the head) first
        let bodies = trail.into_iter().rev().collect();
        Self {
            position: start,
            direction,
            next_direction: direction,
            bodies,
            size,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Queues a turn for the next tick. Reversals of the last move are refused.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir == self.direction.opposite() {
            return false;
        }
        self.next_direction = dir;
        true
    }

    /// Moves one cell. Returns true when the head lands on `food`, in which case the
    /// tail is kept and the snake is one segment longer.
    pub fn advance(&mut self, bounds: &Bounds, food: Option<Position>) -> bool {
        self.direction = self.next_direction;
        self.bodies.push_back(Body { position: self.position });
        self.position = bounds.step(self.position, self.direction);
        log::trace!("head at ({}, {})", self.position.x, self.position.y);

        let ate = food == Some(self.position);
        if ate {
            self.size += 1;
        } else {
            self.bodies.pop_front();
        }
        ate
    }

    pub fn collides(&self, p: Position) -> bool {
        self.bodies.iter().any(|b| b.position == p)
    }

    pub fn occupies(&self, p: Position) -> bool {
        self.position == p || self.collides(p)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    /// Picks a random free cell. `None` when the snake covers the whole board.
    pub fn spawn(head: &Head, bounds: &Bounds) -> Option<Self> {
        // Rejection sampling while the board is sparse, bounded to one try per cell.
        for _ in 0..bounds.cell_count() {
            let p = bounds.cell_at(gen_range(0, bounds.columns()), gen_range(0, bounds.rows()));
            if !head.occupies(p) {
                return Some(Food { position: p });
            }
        }

        let free: Vec<Position> = bounds.cells().filter(|p| !head.occupies(*p)).collect();
        if free.is_empty() {
            return None;
        }
        Some(Food { position: free[gen_range(0, free.len())] })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Alive,
    Dead,
}

pub struct Game {
    bounds: Bounds,
    head: Head,
    food: Option<Food>,
    state: State,
}

impl Game {
    pub fn new(bounds: Bounds, start: Position, direction: Direction, size: usize) -> Self {
        let head = Head::new(start, direction, size, &bounds);
        let food = Food::spawn(&head, &bounds);
        Self { bounds, head, food, state: State::Alive }
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn food(&self) -> Option<&Food> {
        self.food.as_ref()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn steer(&mut self, dir: Direction) {
        if self.state == State::Alive && !self.head.steer(dir) {
            log::debug!("ignored reversal to {dir:?} while moving {:?}", self.head.direction());
        }
    }

    /// Advances one tick. A dead game stays exactly as it was.
    pub fn tick(&mut self) -> State {
        if self.state == State::Dead {
            return self.state;
        }

        let food = self.food.map(|f| f.position);
        if self.head.advance(&self.bounds, food) {
            log::info!("food eaten, size now {}", self.head.size());
            self.food = Food::spawn(&self.head, &self.bounds);
            match self.food {
                Some(f) => log::debug!("food placed at ({}, {})", f.position.x, f.position.y),
                None => log::warn!("board is full, no room left for food"),
            }
        }

        if self.head.collides(self.head.position()) {
            log::info!("snake ran into itself at size {}", self.head.size());
            self.state = State::Dead;
        }
        self.state
    }

    #[cfg(test)]
    fn with_parts(bounds: Bounds, head: Head, food: Option<Food>) -> Self {
        Self { bounds, head, food, state: State::Alive }
    }
}
