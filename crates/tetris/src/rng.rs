//! Piece generator - uniform random choice over the seven kinds
//!
//! Every draw is independent (no bag). Seeded, so a game replays exactly.

use arcade_types::{PieceKind, SimpleRng};

use crate::pieces::Tetromino;

#[derive(Debug, Clone)]
pub struct PieceGenerator {
    seed: u32,
    rng: SimpleRng,
}

impl PieceGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            rng: SimpleRng::new(seed),
        }
    }

    /// Restart the stream from the original seed.
    pub fn reseed(&mut self) {
        self.rng = SimpleRng::new(self.seed);
    }

    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// A fresh copy of a random template.
    pub fn next_piece(&mut self) -> Tetromino {
        Tetromino::new(self.next_kind())
    }
}
