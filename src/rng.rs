//! Piece selection.
//!
//! Draws go through a linear-congruential generator modulo 2^31. The default provider seeds a
//! fresh generator from the wall clock on every draw, so sequences are not replayable; pass a
//! seed to thread one generator through the whole session instead.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER};
use crate::tetromino::TetrominoType;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed) % LCG_MODULUS,
        }
    }

    pub fn state(&self) -> u32 {
        self.state as u32
    }

    /// `state' = (a * state + c) mod 2^31`
    pub fn next_state(&mut self) -> u32 {
        self.state = (LCG_MULTIPLIER * self.state + LCG_INCREMENT) % LCG_MODULUS;
        self.state as u32
    }

    /// `floor(state' / m * count)`, computed without floating point.
    pub fn next_index(&mut self, count: usize) -> usize {
        let state = u64::from(self.next_state());
        ((state * count as u64) / LCG_MODULUS) as usize
    }

    pub fn next_tetromino(&mut self) -> TetrominoType {
        TetrominoType::from_index(self.next_index(TetrominoType::ALL.len()))
    }
}

/// Milliseconds since the Unix epoch, truncated to 32 bits.
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u32)
        .unwrap_or(0)
}

// ============================================================================
// Piece Provider Trait
// ============================================================================

pub trait PieceProvider {
    fn next_piece(&mut self) -> TetrominoType;
}

/// Re-seeds a new generator from the clock for every draw.
#[derive(Debug, Default)]
pub struct ClockSeededProvider;

impl PieceProvider for ClockSeededProvider {
    fn next_piece(&mut self) -> TetrominoType {
        Lcg::new(clock_seed()).next_tetromino()
    }
}

/// One generator carried across every draw of the session.
#[derive(Debug)]
pub struct SeededProvider {
    rng: Lcg,
}

impl SeededProvider {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Lcg::new(seed),
        }
    }
}

impl PieceProvider for SeededProvider {
    fn next_piece(&mut self) -> TetrominoType {
        self.rng.next_tetromino()
    }
}

pub struct SequencePieceProvider {
    pieces: Vec<TetrominoType>,
    index: usize,
}

impl SequencePieceProvider {
    pub fn new(pieces: Vec<TetrominoType>) -> Self {
        assert!(!pieces.is_empty(), "piece sequence must not be empty");
        Self { pieces, index: 0 }
    }
}

impl PieceProvider for SequencePieceProvider {
    fn next_piece(&mut self) -> TetrominoType {
        let piece = self.pieces[self.index % self.pieces.len()];
        self.index += 1;
        piece
    }
}

/// Seeded sessions are replayable; unseeded ones follow the clock.
pub fn provider_for(seed: Option<u32>) -> Box<dyn PieceProvider> {
    match seed {
        Some(seed) => Box::new(SeededProvider::new(seed)),
        None => Box::new(ClockSeededProvider),
    }
}
