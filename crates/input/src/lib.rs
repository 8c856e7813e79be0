//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`gridfall_types::GameAction`] and
//! provides a DAS/ARR input handler suitable for terminal environments,
//! including terminals without key-release events.

pub mod handler;
pub mod map;

pub use handler::InputHandler;
pub use map::{map_key_event, should_quit};
