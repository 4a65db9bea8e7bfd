//! Board cells and the rectangular grid they live in.
//!
//! The grid never changes shape after a level is loaded. The only mutation
//! is [`Grid::toggle`], triggered by piece movement.

use serde::{Deserialize, Serialize};

use crate::error::FlipError;

/// Wire value of an impassable cell.
pub const WALL: i8 = -1;

/// State of a single board square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Cell {
    Wall,
    Light,
    Dark,
}

impl Cell {
    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    /// Flipped state; walls stay walls.
    pub fn flipped(self) -> Cell {
        match self {
            Cell::Light => Cell::Dark,
            Cell::Dark => Cell::Light,
            Cell::Wall => Cell::Wall,
        }
    }
}

impl TryFrom<i8> for Cell {
    type Error = FlipError;

    fn try_from(v: i8) -> Result<Self, Self::Error> {
        match v {
            WALL => Ok(Cell::Wall),
            0 => Ok(Cell::Light),
            1 => Ok(Cell::Dark),
            other => Err(FlipError::invalid(format!(
                "cell value {other} is not one of -1, 0, 1"
            ))),
        }
    }
}

impl From<Cell> for i8 {
    fn from(c: Cell) -> Self {
        match c {
            Cell::Wall => WALL,
            Cell::Light => 0,
            Cell::Dark => 1,
        }
    }
}

/// Rectangular board, stored flat in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from rows, rejecting empty or ragged input.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, FlipError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(FlipError::invalid("grid must have at least one cell"));
        }
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(FlipError::invalid(format!(
                    "grid row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            cells.extend(row);
        }
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// A `width × height` grid with every cell set to `cell`.
    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Grid {
            width,
            height,
            cells: vec![cell; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Overwrite a cell. Used when building boards by hand; play only toggles.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Out-of-bounds squares are not walls; callers check bounds first.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(Cell::is_wall)
    }

    /// Flip `Light ↔ Dark`. Walls and out-of-bounds squares are left alone
    /// and report `false`.
    pub fn toggle(&mut self, x: i32, y: i32) -> bool {
        match self.index(x, y) {
            Some(i) if !self.cells[i].is_wall() => {
                self.cells[i] = self.cells[i].flipped();
                true
            }
            _ => false,
        }
    }

    /// Win predicate: every non-wall cell holds the same value.
    ///
    /// Walls are skipped wherever they sit, including the top-left corner.
    /// A board made only of walls counts as uniform.
    pub fn is_uniform(&self) -> bool {
        let mut open = self.cells.iter().filter(|c| !c.is_wall());
        match open.next() {
            Some(first) => open.all(|c| c == first),
            None => true,
        }
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    pub fn rows(&self) -> Vec<Vec<Cell>> {
        self.cells
            .chunks(self.width)
            .map(<[Cell]>::to_vec)
            .collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = FlipError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Grid::new(rows)
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(g: Grid) -> Self {
        g.rows()
    }
}
