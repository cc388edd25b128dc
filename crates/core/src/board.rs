//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is either empty or tagged with a
//! piece color. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! `lock` and `clear_rows` are copy-on-write: they return a new board and
//! leave `self` untouched. The board is `Copy`, so this costs one 200-cell copy.

use arrayvec::ArrayVec;

use crate::game_state::ActivePiece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices, ascending. Large enough to hold every row of the board.
pub type RowList = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within the grid
    pub fn in_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_some()
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Return a copy of this board with the active piece's blocks written in
    /// its color.
    ///
    /// No legality check is made; blocks outside the grid are skipped.
    pub fn lock(&self, active: &ActivePiece) -> Board {
        let mut next = *self;
        for p in active.blocks() {
            next.set(p.x, p.y, Some(active.piece.color));
        }
        next
    }

    /// Indices of every full row, in ascending order
    pub fn full_rows(&self) -> RowList {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Return a copy with every full row removed and empty rows padded on top.
    ///
    /// Remaining rows keep their top-to-bottom order.
    pub fn clear_rows(&self) -> Board {
        let mut next = Board::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top, packing non-full rows against the floor.
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                continue;
            }
            write_y -= 1;
            let src = read_y * width;
            let dst = write_y * width;
            next.cells[dst..dst + width].copy_from_slice(&self.cells[src..src + width]);
        }

        next
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill a whole row with one color (handy for setting up scenarios)
    pub fn fill_row(&mut self, y: i8, cell: Cell) {
        for x in 0..BOARD_WIDTH as i8 {
            self.set(x, y, cell);
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..BOARD_HEIGHT as usize)
            .map(|y| self.row(y).map(|r| r.to_vec()).unwrap_or_default())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{I_PIECE, O_PIECE};
    use crate::types::{PieceColor, Position};

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_lock_is_copy_on_write() {
        let board = Board::new();
        let active = ActivePiece::new(O_PIECE, Position::new(4, 18));

        let locked = board.lock(&active);

        assert_eq!(board.occupied_count(), 0);
        assert_eq!(locked.occupied_count(), 4);
        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert_eq!(locked.get(x, y), Some(Some(PieceColor::Yellow)));
        }
    }

    #[test]
    fn test_lock_skips_out_of_bounds_blocks() {
        let board = Board::new();
        let active = ActivePiece::new(I_PIECE, Position::new(8, 0));

        let locked = board.lock(&active);

        assert_eq!(locked.occupied_count(), 2);
        assert!(locked.is_occupied(8, 0));
        assert!(locked.is_occupied(9, 0));
    }

    #[test]
    fn test_clear_rows_compacts_with_order_preserved() {
        let mut cells = vec![vec![None; 10]; 20];
        cells[17][0] = Some(PieceColor::Red);
        cells[18] = vec![Some(PieceColor::Blue); 10];
        cells[19][3] = Some(PieceColor::Green);
        let board = Board::from_cells(cells);

        let cleared = board.clear_rows().to_cells();

        assert_eq!(cleared.len(), 20);
        assert_eq!(cleared[18][0], Some(PieceColor::Red));
        assert_eq!(cleared[19][3], Some(PieceColor::Green));
        assert!(cleared[..18].iter().all(|r| r.iter().all(|c| c.is_none())));
    }

    #[test]
    fn test_full_rows_can_list_every_row() {
        let mut board = Board::new();
        for y in 0..20 {
            board.fill_row(y, Some(PieceColor::Cyan));
        }
        let rows = board.full_rows();
        assert_eq!(rows.len(), 20);
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(board.clear_rows().occupied_count(), 0);
    }
}
