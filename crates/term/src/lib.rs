//! Terminal rendering for the game.
//!
//! A small, game-oriented rendering layer: the engine state is drawn into a
//! character framebuffer ([`fb`]) by a pure view ([`view`]), which a terminal
//! backend ([`renderer`]) flushes with diff-based updates.

pub mod fb;
pub mod renderer;
pub mod view;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use view::{ghost_y, GameView, Palette, Viewport, DEFAULT_PALETTE};
