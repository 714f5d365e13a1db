use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Pixel coordinates of the top-left corner of a grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Position of the cell at `(col, row)` for a grid of `cell`-sized squares.
    pub fn at_cell(col: i32, row: i32, cell: i32) -> Self {
        Position::new(col * cell, row * cell)
    }

    /// True if `self` lies inside the `cell`-wide box anchored at `other`.
    /// Both intervals are half-open, so a box always collides with itself.
    pub fn collides(&self, other: &Position, cell: i32) -> bool {
        other.x <= self.x && self.x < other.x + cell &&
        other.y <= self.y && self.y < other.y + cell
    }
}

/// The play field: a `width` x `height` pixel rectangle split into square cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Field {
    #[default = 1200]
    pub width: i32,
    #[default = 800]
    pub height: i32,
    #[default = 40]
    pub cell_size: i32,
}

impl Field {
    pub fn columns(&self) -> i32 {
        self.width / self.cell_size
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell_size
    }

    pub fn contains(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }
}
