//! Grid and collision contract tests against the public surface.

use gridfall::core::{Grid, Tetramino};
use gridfall::types::PieceName;

fn fill_row(grid: &mut Grid, y: i32, name: PieceName) {
    for x in 0..grid.columns() as i32 {
        grid.set(x, y, Some(name));
    }
}

#[test]
fn collides_is_bounds_or_overlap_exactly() {
    let mut grid = Grid::new(12, 20);
    let piece = Tetramino::new(PieceName::O);

    // Free interior positions do not collide.
    for x in 0..=10 {
        assert!(!grid.collides(&piece, x, 0), "x={}", x);
    }

    // Any occupied cell outside [0, columns) x [0, rows) collides.
    assert!(grid.collides(&piece, -1, 0));
    assert!(grid.collides(&piece, 11, 0));
    assert!(grid.collides(&piece, 0, -1));
    assert!(grid.collides(&piece, 0, 19));

    // Any occupied cell over a taken cell collides.
    grid.set(6, 10, Some(PieceName::T));
    assert!(grid.collides(&piece, 5, 9));
    assert!(grid.collides(&piece, 6, 10));
    assert!(!grid.collides(&piece, 7, 10));
}

#[test]
fn draw_projects_piece_names_for_rendering() {
    let mut grid = Grid::new(12, 20);
    let piece = Tetramino::new(PieceName::S);

    grid.draw(&piece, 4, 10);
    // S occupies [[0,1,1],[1,1,0]].
    assert_eq!(grid.cell(5, 10), Some(Some(PieceName::S)));
    assert_eq!(grid.cell(6, 10), Some(Some(PieceName::S)));
    assert_eq!(grid.cell(4, 11), Some(Some(PieceName::S)));
    assert_eq!(grid.cell(5, 11), Some(Some(PieceName::S)));
    assert_eq!(grid.cell(4, 10), Some(None));
}

#[test]
fn undraw_restores_only_piece_cells() {
    let mut grid = Grid::new(12, 20);
    let piece = Tetramino::new(PieceName::O);

    grid.set(0, 19, Some(PieceName::I));
    grid.draw(&piece, 4, 18);
    grid.undraw(&piece, 4, 18);

    assert_eq!(grid.cell(4, 18), Some(None));
    assert_eq!(grid.cell(0, 19), Some(Some(PieceName::I)));
}

#[test]
fn clearing_four_full_rows_prepends_four_fresh_rows() {
    let mut grid = Grid::new(10, 20);

    grid.set(3, 0, Some(PieceName::T));
    grid.set(7, 1, Some(PieceName::L));
    for y in 2..=5 {
        fill_row(&mut grid, y, PieceName::I);
    }
    grid.set(1, 6, Some(PieceName::J));

    assert_eq!(grid.remove_full_rows(), 4);

    for y in 0..4 {
        for x in 0..10 {
            assert!(grid.is_free(x, y), "({}, {}) should be fresh", x, y);
        }
    }
    // Non-full rows keep their relative order below the fresh block.
    assert_eq!(grid.cell(3, 4), Some(Some(PieceName::T)));
    assert_eq!(grid.cell(7, 5), Some(Some(PieceName::L)));
    assert_eq!(grid.cell(1, 6), Some(Some(PieceName::J)));
}

#[test]
fn same_row_index_is_rechecked_after_removal() {
    let mut grid = Grid::new(10, 20);
    // Two adjacent full rows: removing the lower one shifts the upper one
    // into the same index, which must then be caught too.
    fill_row(&mut grid, 18, PieceName::S);
    fill_row(&mut grid, 19, PieceName::Z);

    assert_eq!(grid.remove_full_rows(), 2);
    for y in 0..20 {
        assert!(!grid.row_is_full(y as usize));
    }
}

#[test]
fn grids_are_rebuilt_not_resized() {
    let grid = Grid::new(7, 9);
    assert_eq!(grid.columns(), 7);
    assert_eq!(grid.rows(), 9);
    assert_eq!(grid.cell(6, 8), Some(None));
    assert_eq!(grid.cell(7, 8), None);
}
