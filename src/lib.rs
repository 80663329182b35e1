//! Falling-block puzzle engine.
//!
//! The library holds the whole game-state engine: the grid, the piece catalogue, the piece
//! generator, collision, movement and rotation, line clears and the event reducer that folds
//! ticks and player commands into successive snapshots. Rendering, input capture and the clock
//! live in the binary.

pub mod collision;
pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod lines;
pub mod movement;
pub mod rng;
pub mod tetromino;

pub use error::GameError;
pub use game::{reduce, Event, Game, GameEvent, GameState, Step};
pub use grid::{Block, BlockColor, CellState, Grid, Position};
pub use movement::{Direction, Rotation};
pub use tetromino::{Tetromino, TetrominoType};
