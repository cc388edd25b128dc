//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules and state management. It has **zero
//! dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is exercised without a terminal
//! - **Portable**: Any front end can drive it through `apply_action` and `advance`
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, copy-on-write locking and line clearing
//! - [`collision`]: placement legality (bounds + overlap)
//! - [`game_state`]: idle/playing/gameover state machine and timers
//! - [`pieces`]: the seven fixed tetromino shapes
//! - [`rng`]: seeded LCG for piece and spawn-column selection
//! - [`snapshot`]: the read-only view consumed by renderers
//!
//! # Game Rules
//!
//! - Pieces spawn on row 0 at a random column where they fit
//! - Gravity moves the piece down one row per second
//! - Left, right and down moves are applied only when legal
//! - A piece that cannot fall locks; full rows flash for 500ms, then vanish
//! - A blocked spawn ends the game
//!
//! There is no rotation, scoring, hold or preview.
//!
//! # Example
//!
//! ```
//! use mini_tetris_core::GameState;
//! use mini_tetris_types::{GameAction, GameStatus};
//!
//! let mut game = GameState::new(12345);
//! game.apply_action(GameAction::Start);
//! assert_eq!(game.status(), GameStatus::Playing);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.advance(1000); // one gravity step
//! assert_eq!(game.active().unwrap().position.y, 1);
//! ```

pub mod board;
pub mod collision;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

pub use mini_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, RowList};
pub use collision::can_place;
pub use game_state::{
    ActivePiece, ClearToken, GameEvent, GameState, PendingClear, TickOutcome, Timing,
};
pub use pieces::{pick_random, piece, Piece, PieceShape, ALL_PIECES};
pub use rng::SimpleRng;
pub use snapshot::{CellView, GameSnapshot};
