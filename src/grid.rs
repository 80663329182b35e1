//! The cell matrix every snapshot is built from.
//!
//! Row 0 is the topmost hidden row. Each row is its own allocation, so editing one row of a
//! copied grid never shows up in another row or another snapshot.

use crate::config::{GRID_HEIGHT, GRID_WIDTH, HIDDEN_ROWS, PREVIEW_HEIGHT, PREVIEW_WIDTH};
use crate::error::GameError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Colour identity of a block. `Dead` is the neutral shade locked cells take after game over.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BlockColor {
    Cyan,
    Yellow,
    Purple,
    Orange,
    Blue,
    Green,
    Red,
    Dead,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Block {
    pub color: BlockColor,
    /// True while the block belongs to the falling, player-controlled piece.
    pub active: bool,
}

impl Block {
    pub fn active(color: BlockColor) -> Self {
        Self {
            color,
            active: true,
        }
    }

    pub fn locked(color: BlockColor) -> Self {
        Self {
            color,
            active: false,
        }
    }

    /// Same colour, no longer controllable.
    pub fn settled(self) -> Self {
        Self::locked(self.color)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum CellState {
    #[default]
    Empty,
    Filled(Block),
}

impl CellState {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellState::Empty)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CellState::Filled(Block { active: true, .. }))
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, CellState::Filled(Block { active: false, .. }))
    }

    pub fn block(&self) -> Option<Block> {
        match self {
            CellState::Filled(block) => Some(*block),
            CellState::Empty => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    rows: Vec<Vec<CellState>>,
    width: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rows: (0..height).map(|_| Self::empty_row(width)).collect(),
            width,
        }
    }

    /// The main playfield: visible rows plus the hidden spawn buffer.
    pub fn playfield() -> Self {
        Self::new(GRID_WIDTH, GRID_HEIGHT + HIDDEN_ROWS)
    }

    pub fn preview() -> Self {
        Self::new(PREVIEW_WIDTH, PREVIEW_HEIGHT)
    }

    pub(crate) fn empty_row(width: usize) -> Vec<CellState> {
        vec![CellState::Empty; width]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<CellState>] {
        &self.rows
    }

    /// Rows the renderer draws; the hidden spawn rows are skipped.
    pub fn visible_rows(&self) -> &[Vec<CellState>] {
        let hidden = HIDDEN_ROWS.min(self.rows.len());
        &self.rows[hidden..]
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.rows.len()
    }

    /// Signed lookup used by collision checks; `None` outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<CellState> {
        if self.contains(x, y) {
            Some(self.rows[y as usize][x as usize])
        } else {
            None
        }
    }

    /// Reading outside the grid is a caller bug: it trips in debug builds and reads as empty
    /// in release builds.
    pub fn get(&self, x: usize, y: usize) -> CellState {
        debug_assert!(
            x < self.width && y < self.rows.len(),
            "get({x}, {y}) outside {}x{} grid",
            self.width,
            self.rows.len()
        );
        self.rows
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or_default()
    }

    /// Returns a new grid with the cell replaced. Out-of-range writes are a no-op in release
    /// builds.
    #[must_use]
    pub fn set(&self, x: usize, y: usize, cell: CellState) -> Grid {
        let mut next = self.clone();
        next.put(x, y, cell);
        next
    }

    #[must_use]
    pub fn clear(&self, x: usize, y: usize) -> Grid {
        self.set(x, y, CellState::Empty)
    }

    pub fn try_get(&self, x: i32, y: i32) -> Result<CellState, GameError> {
        self.cell(x, y).ok_or_else(|| self.out_of_bounds(x, y))
    }

    pub fn try_set(&self, x: i32, y: i32, cell: CellState) -> Result<Grid, GameError> {
        if !self.contains(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        Ok(self.set(x as usize, y as usize, cell))
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> GameError {
        GameError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.rows.len(),
        }
    }

    /// In-place write on a grid the caller already owns exclusively (a fresh copy being built
    /// into the next snapshot).
    pub(crate) fn put(&mut self, x: usize, y: usize, cell: CellState) {
        debug_assert!(
            x < self.width && y < self.rows.len(),
            "set({x}, {y}) outside {}x{} grid",
            self.width,
            self.rows.len()
        );
        if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    pub(crate) fn put_at(&mut self, pos: Position, cell: CellState) {
        debug_assert!(self.contains(pos.x, pos.y), "write at {pos:?} outside grid");
        if self.contains(pos.x, pos.y) {
            self.put(pos.x as usize, pos.y as usize, cell);
        }
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Vec<CellState>> {
        &mut self.rows
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut CellState> {
        self.rows.iter_mut().flatten()
    }

    /// Coordinates of every active cell, top row first and left to right within a row.
    pub fn active_positions(&self) -> Vec<Position> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, cell)| cell.is_active())
                    .map(move |(x, _)| Position::new(x as i32, y as i32))
            })
            .collect()
    }

    /// Copy of the grid with every active cell emptied.
    #[must_use]
    pub fn without_active(&self) -> Grid {
        let mut next = self.clone();
        for cell in next.cells_mut() {
            if cell.is_active() {
                *cell = CellState::Empty;
            }
        }
        next
    }

    pub fn row_has_locked(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().any(CellState::is_locked))
    }

    /// Count filled cells in a row
    pub fn filled_count_in_row(&self, y: usize) -> usize {
        self.rows
            .get(y)
            .map_or(0, |row| row.iter().filter(|cell| !cell.is_empty()).count())
    }

    /// Count total filled cells in grid
    pub fn total_filled_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }
}
