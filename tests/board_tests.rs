//! Board integration tests: locking, line clears, invariants.

use tetrix::core::Board;
use tetrix::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, y, Some(PieceKind::I));
    }
}

#[test]
fn test_new_board_is_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(!board.is_occupied(x, y));
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_out_of_bounds_reads() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(!board.is_occupied(-1, -1));
}

#[test]
fn test_clear_single_full_row() {
    let mut board = Board::new();
    fill_row(&mut board, 19);
    board.set(3, 18, Some(PieceKind::T));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19]);

    // The partial row above dropped into the cleared slot.
    assert_eq!(board.get(3, 19), Some(Some(PieceKind::T)));
    assert_eq!(board.get(3, 18), Some(None));
}

#[test]
fn test_clear_four_rows_at_once() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row(&mut board, y);
    }
    board.set(0, 15, Some(PieceKind::J));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.len(), 4);
    assert_eq!(cleared.as_slice(), &[16, 17, 18, 19]);

    assert_eq!(board.get(0, 19), Some(Some(PieceKind::J)));
    assert_eq!(
        board.cells().iter().filter(|c| c.is_some()).count(),
        1,
        "only the surviving cell remains"
    );
}

#[test]
fn test_clear_preserves_order_of_remaining_rows() {
    let mut board = Board::new();
    // Bottom-up: marker A, full, marker B, full, marker C.
    board.set(0, 19, Some(PieceKind::I));
    fill_row(&mut board, 18);
    board.set(1, 17, Some(PieceKind::O));
    fill_row(&mut board, 16);
    board.set(2, 15, Some(PieceKind::T));

    board.clear_full_rows();

    // Markers keep their bottom-to-top order: I at 19, O at 18, T at 17.
    assert_eq!(board.get(0, 19), Some(Some(PieceKind::I)));
    assert_eq!(board.get(1, 18), Some(Some(PieceKind::O)));
    assert_eq!(board.get(2, 17), Some(Some(PieceKind::T)));
}

#[test]
fn test_board_height_invariant_after_clears() {
    let mut board = Board::new();
    for y in [19, 17, 15] {
        fill_row(&mut board, y);
    }

    board.clear_full_rows();
    assert_eq!(board.cells().len(), (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize));
    // Every cleared row was replaced by an empty top row.
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_clear_is_idempotent_when_nothing_full() {
    let mut board = Board::new();
    board.set(5, 10, Some(PieceKind::S));

    assert!(board.clear_full_rows().is_empty());
    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board.get(5, 10), Some(Some(PieceKind::S)));
}
