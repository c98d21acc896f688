//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into engine [`Intent`](tetrix_types::Intent)s.
//! The mapping is phase-aware because the same keys mean different things on
//! different screens (Space starts a game from the menu but hard-drops during
//! play). Also provides a DAS/ARR handler for held movement keys, suitable
//! for terminals without key-release events.

pub mod handler;
pub mod map;

pub use tetrix_types as types;

pub use handler::InputHandler;
pub use map::{map_key, should_quit};
