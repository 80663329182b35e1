use thiserror::Error;

/// Contract violations at the edges of the engine.
///
/// Collisions are not errors: a blocked move or rotation simply leaves the snapshot unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("rotation direction must be 1 or -1, got {0}")]
    InvalidRotation(i32),

    #[error("movement vector ({dx}, {dy}) is not one of left, right or down")]
    InvalidDirection { dx: i32, dy: i32 },
}
