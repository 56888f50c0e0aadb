//! Playfield grid: cell states, the collision predicate, piece projection,
//! and full-row compaction.
//!
//! Coordinates: `(x, y)` with x in `0..columns` (left to right) and y in
//! `0..rows` (top to bottom). A cell records which piece occupies it, which
//! is all a renderer needs; `taken` is simply `is_some()`.

use crate::core::piece::Tetramino;
use crate::types::PieceName;

/// Cell state: `None` = free, `Some(name)` = taken by that piece shape.
pub type Cell = Option<PieceName>;

/// The playfield. Rebuilt wholesale by `init`; never resized in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Allocate an all-free `rows x columns` grid.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![vec![None; columns]; rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell at `(x, y)`, or `None` when out of bounds.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// In bounds and not taken.
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        matches!(self.cell(x, y), Some(None))
    }

    /// The single bounds-and-overlap predicate: true iff any occupied cell
    /// of `piece` placed at `(x, y)` falls outside the grid or onto a taken
    /// cell. Drop, horizontal movement, rotation and spawn checks all go
    /// through here.
    pub fn collides(&self, piece: &Tetramino, x: i32, y: i32) -> bool {
        piece
            .cells()
            .any(|(dx, dy)| !self.is_free(x + dx as i32, y + dy as i32))
    }

    /// Project `piece` onto the grid: mark every occupied cell taken.
    pub fn draw(&mut self, piece: &Tetramino, x: i32, y: i32) {
        let name = piece.name();
        for (dx, dy) in piece.cells() {
            self.set(x + dx as i32, y + dy as i32, Some(name));
        }
    }

    /// Inverse of `draw`. Idempotent in matching draw/undraw pairs.
    pub fn undraw(&mut self, piece: &Tetramino, x: i32, y: i32) {
        for (dx, dy) in piece.cells() {
            self.set(x + dx as i32, y + dy as i32, None);
        }
    }

    /// Write one cell; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(row) = self.cells.get_mut(y as usize) {
            if let Some(slot) = row.get_mut(x as usize) {
                *slot = cell;
            }
        }
    }

    pub fn row_is_full(&self, y: usize) -> bool {
        self.cells
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Remove every full row, bottom to top, shifting the rows above down
    /// and inserting a fresh free row at the top for each. After a removal
    /// the same index is re-checked, since the row above just moved into
    /// it. Returns the number of rows removed.
    pub fn remove_full_rows(&mut self) -> u32 {
        let mut removed = 0;
        let mut y = self.rows;

        while y > 0 {
            let index = y - 1;
            if self.row_is_full(index) {
                self.cells.remove(index);
                self.cells.insert(0, vec![None; self.columns]);
                removed += 1;
            } else {
                y -= 1;
            }
        }

        removed
    }

    /// Fill one row for scenario setup.
    #[cfg(test)]
    pub(crate) fn fill_row(&mut self, y: usize, name: PieceName) {
        for cell in &mut self.cells[y] {
            *cell = Some(name);
        }
    }
}
