//! Piece catalog and random draw.
//!
//! Seven immutable shape templates keyed by name. Every lookup hands out a
//! deep, independent copy so rotating one piece can never corrupt the
//! catalog or any other instance of the same shape.
//!
//! Draws are uniform over the seven names, driven by a small seeded LCG so
//! whole sessions replay deterministically from a seed.

use crate::core::piece::{PieceMatrix, PieceRow, Tetramino};
use crate::types::PieceName;

/// Template matrix for a piece, `1` marking occupied cells.
/// Matrices are square (side 2-4) and deliberately padded; collision and
/// rotation always work on the padded form.
pub(crate) fn template_rows(name: PieceName) -> &'static [&'static [u8]] {
    match name {
        PieceName::I => &[
            &[1, 0, 0, 0],
            &[1, 0, 0, 0],
            &[1, 0, 0, 0],
            &[1, 0, 0, 0],
        ],
        PieceName::J => &[&[0, 0, 1], &[0, 0, 1], &[0, 1, 1]],
        PieceName::L => &[&[1, 0, 0], &[1, 0, 0], &[1, 1, 0]],
        PieceName::O => &[&[1, 1], &[1, 1]],
        PieceName::S => &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
        PieceName::T => &[&[1, 1, 1], &[0, 1, 0], &[0, 0, 0]],
        PieceName::Z => &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
    }
}

/// Build an owned boolean matrix from a template.
pub(crate) fn template_matrix(name: PieceName) -> PieceMatrix {
    template_rows(name)
        .iter()
        .map(|row| row.iter().map(|&c| c != 0).collect::<PieceRow>())
        .collect()
}

/// Simple LCG (Numerical Recipes constants). Deterministic per seed.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would produce a degenerate sequence.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Draw a fresh piece, uniformly across the seven shapes.
pub fn random_piece(rng: &mut SimpleRng) -> Tetramino {
    let name = PieceName::ALL[rng.next_range(PieceName::ALL.len() as u32) as usize];
    Tetramino::new(name)
}
