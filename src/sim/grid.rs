//! Grid geometry primitives
//!
//! Positions are integer cells, `(0, 0)` at the top-left corner, rows growing
//! downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// A grid cell (column, row)
pub type Position = IVec2;

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step for this direction
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// True if `self` points exactly against `other` on the same axis
    pub fn is_reversal_of(self, other: Direction) -> bool {
        let (a, b) = (self.delta(), other.delta());
        (a.x != 0 && a.x == -b.x) || (a.y != 0 && a.y == -b.y)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Playfield bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Whether a cell lies within `[0, width) x [0, height)`
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Spawn cell (integer division, so 20x20 spawns at (10, 10))
    pub fn center(&self) -> Position {
        IVec2::new(self.width / 2, self.height / 2)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major iteration over every cell
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
    }
}
