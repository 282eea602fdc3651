//! One player's 10×10 grid: ship placement and shot resolution.

use core::fmt;

use crate::config::{BOARD_SIZE, MAX_SHIPS};
use crate::coordinate::Coordinate;

/// State of a single grid position. Firing only moves a cell forward:
/// `Empty -> WaterHit`, `ShipPresent -> ShipHit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    ShipPresent,
    WaterHit,
    ShipHit,
}

impl Cell {
    /// Whether this cell has already been fired upon.
    pub fn is_fired(self) -> bool {
        matches!(self, Cell::WaterHit | Cell::ShipHit)
    }

    fn fired(self) -> Cell {
        match self {
            Cell::Empty | Cell::WaterHit => Cell::WaterHit,
            Cell::ShipPresent | Cell::ShipHit => Cell::ShipHit,
        }
    }
}

/// Main board state: cells plus the live ship counter.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    placed: usize,
    live_ships: usize,
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new() -> Self {
        Self {
            grid: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
            placed: 0,
            live_ships: 0,
        }
    }

    /// Place a one-cell ship. Returns `false` when the position is off the
    /// board, the quota of [`MAX_SHIPS`] is used up, or the cell is not empty.
    pub fn place_ship(&mut self, row: usize, col: usize) -> bool {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return false;
        }
        if self.placed >= MAX_SHIPS {
            return false;
        }
        if self.grid[row][col] != Cell::Empty {
            return false;
        }
        self.grid[row][col] = Cell::ShipPresent;
        self.placed += 1;
        self.live_ships += 1;
        true
    }

    /// Resolve a shot at an in-range position and return the resulting cell
    /// (`WaterHit` or `ShipHit`). Firing on a resolved cell changes nothing.
    pub fn fire(&mut self, at: Coordinate) -> Cell {
        let cell = &mut self.grid[at.row()][at.col()];
        let before = *cell;
        *cell = before.fired();
        if before == Cell::ShipPresent {
            self.live_ships -= 1;
        }
        *cell
    }

    pub fn all_ships_destroyed(&self) -> bool {
        self.live_ships == 0
    }

    /// Ships not yet hit.
    pub fn live_ships(&self) -> usize {
        self.live_ships
    }

    /// Ships placed so far, hit or not.
    pub fn ships_placed(&self) -> usize {
        self.placed
    }

    /// Whether the full quota has been placed.
    pub fn fleet_complete(&self) -> bool {
        self.placed == MAX_SHIPS
    }

    pub fn cell(&self, at: Coordinate) -> Cell {
        self.grid[at.row()][at.col()]
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{ placed: {}, live_ships: {} }}",
            self.placed, self.live_ships
        )?;
        for row in &self.grid {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::ShipPresent => 'S',
                    Cell::WaterHit => 'o',
                    Cell::ShipHit => 'X',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
