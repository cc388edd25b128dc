//! Board tests - locking, full-row detection and gravity compaction

use mini_tetris::core::pieces::{I_PIECE, J_PIECE, O_PIECE};
use mini_tetris::core::{ActivePiece, Board};
use mini_tetris::types::{PieceColor, Position, BOARD_HEIGHT, BOARD_WIDTH};

fn rows_of(board: &Board) -> Vec<Vec<Option<PieceColor>>> {
    (0..BOARD_HEIGHT as usize)
        .map(|y| board.row(y).unwrap().to_vec())
        .collect()
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
    assert!(board.full_rows().is_empty());
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(PieceColor::Purple)));
    assert_eq!(board.get(5, 10), Some(Some(PieceColor::Purple)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert!(!board.is_occupied(5, 10));

    assert!(!board.set(-1, 0, Some(PieceColor::Red)));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Some(PieceColor::Red)));
}

#[test]
fn test_lock_adds_exactly_four_cells_and_keeps_the_rest() {
    let mut board = Board::new();
    board.set(0, 19, Some(PieceColor::Red));
    board.set(9, 0, Some(PieceColor::Green));

    let active = ActivePiece::new(J_PIECE, Position::new(4, 10));
    let locked = board.lock(&active);

    assert_eq!(locked.occupied_count(), board.occupied_count() + 4);
    for (x, y) in [(4, 10), (4, 11), (5, 11), (6, 11)] {
        assert_eq!(locked.get(x, y), Some(Some(PieceColor::Blue)));
    }
    assert_eq!(locked.get(0, 19), Some(Some(PieceColor::Red)));
    assert_eq!(locked.get(9, 0), Some(Some(PieceColor::Green)));
    // Input board unchanged.
    assert!(!board.is_occupied(4, 10));
}

#[test]
fn test_full_rows_ascending_and_exclude_gaps() {
    let mut board = Board::new();
    board.fill_row(17, Some(PieceColor::Red));
    board.fill_row(5, Some(PieceColor::Red));
    board.fill_row(12, Some(PieceColor::Red));
    board.set(3, 12, None);

    assert_eq!(board.full_rows().as_slice(), &[5, 17]);
}

#[test]
fn test_bottom_row_scenario() {
    // Row 19 filled in columns 0..=6; a J at (7, 18) covers (7,18) (7,19) (8,19) (9,19).
    let mut board = Board::new();
    for x in 0..7 {
        board.set(x, 19, Some(PieceColor::Red));
    }
    let board = board.lock(&ActivePiece::new(J_PIECE, Position::new(7, 18)));

    assert_eq!(board.full_rows().as_slice(), &[19]);

    let before = rows_of(&board);
    let cleared = board.clear_rows();
    let after = rows_of(&cleared);

    assert_eq!(after[19], before[18]);
    assert_eq!(cleared.get(7, 19), Some(Some(PieceColor::Blue)));
    assert!(after[0].iter().all(|c| c.is_none()));
    assert_eq!(cleared.occupied_count(), 1);
}

#[test]
fn test_clear_rows_preserves_order_of_remaining_rows() {
    let mut board = Board::new();
    board.set(0, 10, Some(PieceColor::Cyan));
    board.fill_row(11, Some(PieceColor::Red));
    board.set(1, 12, Some(PieceColor::Yellow));
    board.fill_row(13, Some(PieceColor::Red));
    board.set(2, 14, Some(PieceColor::Green));

    let cleared = board.clear_rows();

    assert_eq!(cleared.height(), BOARD_HEIGHT);
    assert_eq!(cleared.get(0, 12), Some(Some(PieceColor::Cyan)));
    assert_eq!(cleared.get(1, 13), Some(Some(PieceColor::Yellow)));
    assert_eq!(cleared.get(2, 14), Some(Some(PieceColor::Green)));
    assert_eq!(cleared.occupied_count(), 3);
    assert!(cleared.full_rows().is_empty());
}

#[test]
fn test_clear_rows_is_idempotent() {
    let mut board = Board::new();
    board.fill_row(19, Some(PieceColor::Orange));
    board.set(4, 18, Some(PieceColor::Blue));

    let once = board.clear_rows();
    let twice = once.clear_rows();
    assert_eq!(once, twice);
}

#[test]
fn test_clear_rows_multiple_full_rows() {
    let mut board = Board::new();
    for y in 16..20 {
        board.fill_row(y, Some(PieceColor::Cyan));
    }
    board.set(0, 15, Some(PieceColor::Red));

    let cleared = board.clear_rows();
    assert_eq!(cleared.occupied_count(), 1);
    assert_eq!(cleared.get(0, 19), Some(Some(PieceColor::Red)));
}

#[test]
fn test_lock_then_clear_with_i_and_o() {
    let mut board = Board::new();
    board = board.lock(&ActivePiece::new(I_PIECE, Position::new(0, 19)));
    board = board.lock(&ActivePiece::new(I_PIECE, Position::new(4, 19)));
    assert!(board.full_rows().is_empty());

    board = board.lock(&ActivePiece::new(O_PIECE, Position::new(8, 18)));
    assert_eq!(board.full_rows().as_slice(), &[19]);

    let cleared = board.clear_rows();
    assert_eq!(cleared.occupied_count(), 2);
    assert!(cleared.is_occupied(8, 19));
    assert!(cleared.is_occupied(9, 19));
}
