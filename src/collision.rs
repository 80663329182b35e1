use crate::grid::{Block, CellState, Grid, Position};

/// Whether shifting every cell in `cells` by `(dx, dy)` would hit the floor, the ceiling, a side
/// wall or a locked block. One blocked cell blocks the whole set.
///
/// Landing on an active cell is allowed: that cell belongs to the same piece and moves out of
/// the way during the same step.
pub fn collides(grid: &Grid, cells: &[Position], dx: i32, dy: i32) -> bool {
    cells
        .iter()
        .any(|pos| destination_blocked(grid, pos.offset(dx, dy)))
}

fn destination_blocked(grid: &Grid, dest: Position) -> bool {
    if dest.y < 0 || dest.y >= grid.height() as i32 {
        return true;
    }
    match grid.cell(dest.x, dest.y) {
        Some(CellState::Filled(Block { active: true, .. })) => false,
        None => true,
        Some(CellState::Filled(Block { active: false, .. })) => true,
        Some(CellState::Empty) => false,
    }
}
