//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The game only
//! knows discrete moves, so there is no DAS/ARR state here: every press or
//! terminal auto-repeat yields one action.

pub mod map;

pub use mini_tetris_types as types;

pub use map::{handle_key_event, is_actionable, should_quit};
