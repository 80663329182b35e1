use clap::Parser;

// ============================================================================
// Configuration
// ============================================================================

pub const GRID_WIDTH: usize = 10;
pub const GRID_HEIGHT: usize = 20;
/// Spawn buffer above the visible playfield.
pub const HIDDEN_ROWS: usize = 2;

/// Column the piece template origin is placed at when spawning.
pub const SPAWN_X: i32 = 4;

pub const PREVIEW_WIDTH: usize = 4;
pub const PREVIEW_HEIGHT: usize = 2;

// Timing (in milliseconds)
pub const TICK_MS: u64 = 400;

// Scoring
pub const POINTS_PER_LINE: u32 = 100;
pub const POINTS_PER_LEVEL: u32 = 500;

// Piece generator (glibc-style LCG)
pub const LCG_MODULUS: u64 = 1 << 31;
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;
pub const LCG_INCREMENT: u64 = 12_345;

// ============================================================================
// Runtime options
// ============================================================================

/// Falling-block puzzle in the terminal.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "blockfall", version)]
pub struct Options {
    /// Milliseconds between gravity ticks.
    #[arg(
        long,
        env = "BLOCKFALL_TICK_MS",
        default_value_t = TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    /// Seed one generator for the whole session. Without it every draw is seeded from the clock.
    #[arg(long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u32>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            seed: None,
        }
    }
}
