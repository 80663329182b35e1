//! Translation and rotation of the active piece.
//!
//! Both work directly on the grid's active cells. A blocked move or rotation returns `None` and
//! the caller keeps its previous snapshot; there is never a partial move.

use crate::collision::collides;
use crate::error::GameError;
use crate::grid::{CellState, Grid, Position};
use crate::tetromino::Tetromino;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

impl TryFrom<(i32, i32)> for Direction {
    type Error = GameError;

    fn try_from((dx, dy): (i32, i32)) -> Result<Self, Self::Error> {
        match (dx, dy) {
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            (0, 1) => Ok(Direction::Down),
            _ => Err(GameError::InvalidDirection { dx, dy }),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Rotation {
    Clockwise,
    Anticlockwise,
}

impl Rotation {
    pub fn sign(&self) -> i32 {
        match self {
            Rotation::Clockwise => 1,
            Rotation::Anticlockwise => -1,
        }
    }

    /// Quarter turn about the origin.
    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        match self {
            Rotation::Clockwise => (y, -x),
            Rotation::Anticlockwise => (-y, x),
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = GameError;

    fn try_from(sign: i32) -> Result<Self, Self::Error> {
        match sign {
            1 => Ok(Rotation::Clockwise),
            -1 => Ok(Rotation::Anticlockwise),
            other => Err(GameError::InvalidRotation(other)),
        }
    }
}

/// Shifts every active cell one step in `direction`.
///
/// Cells are relocated one at a time, leading cell first (leftmost for left, rightmost or
/// lowest for right and down), so no cell is written over a piece cell that has not moved yet.
pub fn move_active(grid: &Grid, direction: Direction) -> Option<Grid> {
    let mut active = grid.active_positions();
    if active.is_empty() {
        return None;
    }

    let (dx, dy) = direction.delta();
    if collides(grid, &active, dx, dy) {
        return None;
    }

    // active_positions is row-major, so reversing puts the bottom-right cell first
    if direction != Direction::Left {
        active.reverse();
    }

    let mut next = grid.clone();
    for pos in active {
        let cell = next.get(pos.x as usize, pos.y as usize);
        next.put_at(pos, CellState::Empty);
        next.put_at(pos.offset(dx, dy), cell);
    }
    Some(next)
}

/// Rotates the active piece a quarter turn about the mean of its cell coordinates.
///
/// No wall kicks: if the turned cells overlap a wall or a locked block the rotation is refused.
pub fn rotate_active(grid: &Grid, rotation: Rotation) -> Option<Grid> {
    let active = grid.active_positions();
    let color = active
        .first()
        .and_then(|pos| grid.get(pos.x as usize, pos.y as usize).block())?
        .color;

    let cleared = grid.without_active();

    let count = active.len() as f64;
    let cx = active.iter().map(|pos| f64::from(pos.x)).sum::<f64>() / count;
    let cy = active.iter().map(|pos| f64::from(pos.y)).sum::<f64>() / count;

    let rotated: Vec<Position> = active
        .iter()
        .map(|pos| {
            let (rx, ry) = rotation.apply(f64::from(pos.x) - cx, f64::from(pos.y) - cy);
            Position::new(round_half_up(rx + cx), round_half_up(ry + cy))
        })
        .collect();

    if collides(&cleared, &rotated, 0, 0) {
        return None;
    }

    Some(Tetromino::new(color, rotated).spawn(&cleared, Position::new(0, 0)))
}

/// Half-way values go towards positive infinity.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
