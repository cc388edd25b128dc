use crate::board::{Board, RowList};
use crate::game_state::ActivePiece;
use crate::types::{GameStatus, PieceColor, BOARD_HEIGHT, BOARD_WIDTH};

/// What a single board cell should display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellView {
    Empty,
    Locked(PieceColor),
    Active(PieceColor),
}

impl CellView {
    pub fn color(&self) -> Option<PieceColor> {
        match *self {
            CellView::Empty => None,
            CellView::Locked(c) | CellView::Active(c) => Some(c),
        }
    }
}

/// Read-only copy of everything the renderer needs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub board: Board,
    pub active: Option<ActivePiece>,
    pub clearing: RowList,
    pub epoch: u32,
}

impl GameSnapshot {
    /// Resolve a cell: the active piece wins over the locked board.
    pub fn cell_view(&self, x: i8, y: i8) -> CellView {
        if let Some(active) = &self.active {
            if active.covers(x, y) {
                return CellView::Active(active.piece.color);
            }
        }
        match self.board.get(x, y) {
            Some(Some(color)) => CellView::Locked(color),
            _ => CellView::Empty,
        }
    }

    pub fn is_clearing_row(&self, y: usize) -> bool {
        self.clearing.contains(&y)
    }

    /// Stable 64-bit fingerprint of the visible state (FNV-1a).
    ///
    /// Lets the runner skip redraws when nothing changed.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new();
        h.write(&[self.status as u8]);
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                let code = match self.cell_view(x, y) {
                    CellView::Empty => 0u8,
                    CellView::Locked(c) => 1 + c as u8,
                    CellView::Active(c) => 16 + c as u8,
                };
                h.write(&[code]);
            }
        }
        for &row in &self.clearing {
            h.write(&[row as u8]);
        }
        h.finish()
    }
}

struct Fnv1a64 {
    state: u64,
}

impl Fnv1a64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.state
    }
}
