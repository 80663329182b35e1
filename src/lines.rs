use crate::config::{POINTS_PER_LEVEL, POINTS_PER_LINE};
use crate::grid::{CellState, Grid};

/// Result of one line-clear pass.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LineClear {
    pub grid: Grid,
    pub rows_cleared: u32,
    pub score: u32,
    pub level: u32,
}

/// A row is complete when every cell holds a locked block.
pub fn is_row_complete(row: &[CellState]) -> bool {
    row.iter().all(CellState::is_locked)
}

pub fn points_per_row(level: u32) -> u32 {
    POINTS_PER_LINE * level / 2
}

pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Removes every complete row and refills the grid with empty rows from the top.
///
/// All rows cleared in one pass are scored at the level the pass started with.
pub fn clear_lines(grid: &Grid, score: u32, level: u32) -> LineClear {
    let mut next = grid.clone();
    let width = next.width();
    let rows = next.rows_mut();

    let before = rows.len();
    rows.retain(|row| !is_row_complete(row));
    let cleared = before - rows.len();
    for _ in 0..cleared {
        rows.insert(0, Grid::empty_row(width));
    }

    let mut new_score = score;
    let mut new_level = level;
    for _ in 0..cleared {
        new_score = new_score.saturating_add(points_per_row(level));
        new_level = level_for_score(new_score);
    }

    LineClear {
        grid: next,
        rows_cleared: cleared as u32,
        score: new_score,
        level: new_level,
    }
}
