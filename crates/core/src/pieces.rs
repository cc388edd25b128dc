//! Pieces module - the fixed catalog of seven tetrominoes
//!
//! Shapes are stored in their single spawn orientation; there is no rotation.
//! Offsets are `(dx, dy)` from the piece anchor, with `dy` growing downward.

use crate::rng::SimpleRng;
use crate::types::{PieceColor, PieceKind, Position};

/// Offset of a single block relative to the piece anchor
pub type BlockOffset = (i8, i8);

/// Shape of a piece - 4 block offsets from the anchor
pub type PieceShape = [BlockOffset; 4];

/// Immutable piece definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub color: PieceColor,
}

impl Piece {
    /// Number of columns spanned by the shape
    pub fn width(&self) -> i8 {
        self.shape.iter().map(|&(dx, _)| dx).max().unwrap_or(0) + 1
    }

    /// Number of rows spanned by the shape
    pub fn height(&self) -> i8 {
        self.shape.iter().map(|&(_, dy)| dy).max().unwrap_or(0) + 1
    }

    /// Absolute block coordinates when anchored at `at`
    pub fn blocks_at(&self, at: Position) -> impl Iterator<Item = Position> + '_ {
        self.shape.iter().map(move |&(dx, dy)| at.offset(dx, dy))
    }
}

pub const I_PIECE: Piece = Piece {
    kind: PieceKind::I,
    shape: [(0, 0), (1, 0), (2, 0), (3, 0)],
    color: PieceColor::Cyan,
};

pub const O_PIECE: Piece = Piece {
    kind: PieceKind::O,
    shape: [(0, 0), (1, 0), (0, 1), (1, 1)],
    color: PieceColor::Yellow,
};

pub const T_PIECE: Piece = Piece {
    kind: PieceKind::T,
    shape: [(0, 0), (1, 0), (2, 0), (1, 1)],
    color: PieceColor::Purple,
};

pub const S_PIECE: Piece = Piece {
    kind: PieceKind::S,
    shape: [(1, 0), (2, 0), (0, 1), (1, 1)],
    color: PieceColor::Green,
};

pub const Z_PIECE: Piece = Piece {
    kind: PieceKind::Z,
    shape: [(0, 0), (1, 0), (1, 1), (2, 1)],
    color: PieceColor::Red,
};

pub const J_PIECE: Piece = Piece {
    kind: PieceKind::J,
    shape: [(0, 0), (0, 1), (1, 1), (2, 1)],
    color: PieceColor::Blue,
};

pub const L_PIECE: Piece = Piece {
    kind: PieceKind::L,
    shape: [(2, 0), (0, 1), (1, 1), (2, 1)],
    color: PieceColor::Orange,
};

/// The full catalog, in `PieceKind::ALL` order
pub const ALL_PIECES: [Piece; 7] = [
    I_PIECE, O_PIECE, T_PIECE, S_PIECE, Z_PIECE, J_PIECE, L_PIECE,
];

/// Look up the definition for a kind
pub fn piece(kind: PieceKind) -> Piece {
    match kind {
        PieceKind::I => I_PIECE,
        PieceKind::O => O_PIECE,
        PieceKind::T => T_PIECE,
        PieceKind::S => S_PIECE,
        PieceKind::Z => Z_PIECE,
        PieceKind::J => J_PIECE,
        PieceKind::L => L_PIECE,
    }
}

/// Pick one of the seven pieces uniformly at random
pub fn pick_random(rng: &mut SimpleRng) -> Piece {
    ALL_PIECES[rng.next_range(ALL_PIECES.len() as u32) as usize]
}
