//! Piece instances: the owned matrix, rotation, and preview trimming.

use arrayvec::ArrayVec;

use crate::core::catalog;
use crate::types::{PieceName, MAX_PIECE_SIDE};

/// One row of a piece matrix. Inline storage; piece sides never exceed 4.
pub type PieceRow = ArrayVec<bool, MAX_PIECE_SIDE>;
/// A piece matrix. Square while attached to a player; `trimmed` copies may
/// be rectangular.
pub type PieceMatrix = ArrayVec<PieceRow, MAX_PIECE_SIDE>;

/// A piece instance: a deep copy of a catalog template, owned by whichever
/// context holds it (active player, queue slot, or hold slot) and rotated
/// in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetramino {
    name: PieceName,
    matrix: PieceMatrix,
}

impl Tetramino {
    /// Fresh, unrotated copy of the named template.
    pub fn new(name: PieceName) -> Self {
        Self {
            name,
            matrix: catalog::template_matrix(name),
        }
    }

    pub fn name(&self) -> PieceName {
        self.name
    }

    pub fn matrix(&self) -> &PieceMatrix {
        &self.matrix
    }

    /// Side length of the (padded, square) matrix.
    pub fn side(&self) -> usize {
        self.matrix.len()
    }

    /// Rotate 90 degrees in place: transpose the square matrix, then
    /// reverse each row (clockwise, `direction > 0`) or reverse the row
    /// order (counter-clockwise).
    pub fn rotate(&mut self, direction: i32) {
        let n = self.matrix.len();
        for y in 0..n {
            for x in 0..y {
                let tmp = self.matrix[y][x];
                self.matrix[y][x] = self.matrix[x][y];
                self.matrix[x][y] = tmp;
            }
        }

        if direction > 0 {
            for row in self.matrix.iter_mut() {
                row.reverse();
            }
        } else {
            self.matrix.reverse();
        }
    }

    /// Tight bounding box `(width, height)` of the occupied cells.
    pub fn size(&self) -> (usize, usize) {
        let mut height = 0;
        let mut min_x = usize::MAX;
        let mut max_x = 0;

        for row in &self.matrix {
            let Some(first) = row.iter().position(|&c| c) else {
                continue;
            };
            let last = row.iter().rposition(|&c| c).unwrap_or(first);
            height += 1;
            min_x = min_x.min(first);
            max_x = max_x.max(last);
        }

        if height == 0 {
            return (0, 0);
        }
        (max_x - min_x + 1, height)
    }

    /// Copy with wholly-empty rows and columns stripped: the minimal shape
    /// used for queue/hold previews. Collision never uses this; the padded
    /// matrix keeps rotation math simple.
    pub fn trimmed(&self) -> Tetramino {
        let side = self.matrix.first().map_or(0, |row| row.len());
        let column_used: ArrayVec<bool, MAX_PIECE_SIDE> = (0..side)
            .map(|x| self.matrix.iter().any(|row| row[x]))
            .collect();

        let matrix: PieceMatrix = self
            .matrix
            .iter()
            .filter(|row| row.iter().any(|&c| c))
            .map(|row| {
                row.iter()
                    .zip(&column_used)
                    .filter(|&(_, &used)| used)
                    .map(|(&c, _)| c)
                    .collect::<PieceRow>()
            })
            .collect();

        Tetramino {
            name: self.name,
            matrix,
        }
    }

    /// Occupied cells as `(x, y)` offsets into the matrix.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.matrix.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &used)| used)
                .map(move |(x, _)| (x, y))
        })
    }
}
