//! Mini Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `mini_tetris::{core,input,term,types}`
//! and hosts the runner's environment configuration and logging setup.

pub mod config;
pub mod logging;

pub use mini_tetris_core as core;
pub use mini_tetris_input as input;
pub use mini_tetris_term as term;
pub use mini_tetris_types as types;

pub use config::AppConfig;
