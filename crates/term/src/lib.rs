//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: [`GameView`] turns a core
//! snapshot into a framebuffer, and [`TerminalRenderer`] flushes that
//! framebuffer to the terminal through crossterm.
//!
//! - Keeps `core` free of any terminal concerns
//! - Board cells are 2 chars wide to compensate for glyph aspect ratio

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use mini_tetris_core as core;
pub use mini_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{color_rgb, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
