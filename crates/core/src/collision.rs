//! Collision checking for candidate piece placements.

use crate::board::Board;
use crate::pieces::Piece;
use crate::types::Position;

/// Can `piece` sit with its anchor at `position`?
///
/// Every block must land inside the 10x20 grid on an empty cell.
pub fn can_place(board: &Board, piece: &Piece, position: Position) -> bool {
    piece
        .blocks_at(position)
        .all(|p| matches!(board.get(p.x, p.y), Some(None)))
}
