//! Core game logic - pure, deterministic, and testable.
//!
//! This crate contains all the game rules and state management for the
//! falling-block engine. It has **zero dependencies** on UI, networking, or
//! I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical piece sequences
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: the cell grid with collision testing, merging, and row sweep
//! - [`matrix`]: tetromino shape matrices and in-place rotation
//! - [`bag`]: seeded random-bag piece generation
//! - [`scoring`]: clear points, level progression, gravity intervals
//! - [`engine`]: the turn controller tying everything together
//! - [`snapshot`]: read-only render state
//!
//! # Game Rules
//!
//! - **Random bag**: every piece kind appears exactly once per 7-piece cycle
//! - **Kick search**: failed rotations retry at alternating expanding
//!   horizontal offsets before giving up
//! - **T-spin bonus**: a T lock with three or more blocked footprint corners
//!   doubles its clear points
//! - **Soft restart**: a blocked spawn clears the board and score in place
//!   instead of halting
//!
//! # Example
//!
//! ```
//! use gridfall_core::GameEngine;
//! use gridfall_types::{GameAction, GameConfig};
//!
//! let mut game = GameEngine::new(GameConfig::default(), 12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.active().y, 0); // a fresh piece spawned after the lock
//! ```
//!
//! Call [`GameEngine::tick`] every frame with the elapsed milliseconds;
//! gravity applies once the accumulated time passes the current drop
//! interval.

pub mod bag;
pub mod board;
pub mod engine;
pub mod matrix;
pub mod scoring;
pub mod snapshot;

pub use bag::{SevenBag, SimpleRng};
pub use board::Board;
pub use engine::{ActivePiece, GameEngine};
pub use matrix::Shape;
pub use snapshot::{ActiveSnapshot, ClearFlash, GameSnapshot};
