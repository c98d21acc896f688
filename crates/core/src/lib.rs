//! Core game logic - pure, deterministic, and testable.
//!
//! Everything the game's rules require lives here, with **zero dependencies**
//! on UI, timing sources, or I/O:
//!
//! - **Deterministic**: the same seed and intent sequence produces the same game
//! - **Observable**: outcomes surface as [`GameEvent`]s, drained once per frame
//! - **Portable**: runs under a terminal front end or entirely headless in tests
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with locking and line-clear compaction
//! - [`piece`]: shape matrices, the clockwise rotation transform, collision tests
//! - [`rng`]: 7-bag randomizer over a seeded LCG
//! - [`scoring`]: line/combo scores, leveling, gravity curve
//! - [`stats`]: per-kind lock counters and play-time derived rates
//! - [`events`]: the engine-to-observer event vocabulary
//! - [`engine`]: the phase state machine tying it all together
//!
//! # Example
//!
//! ```
//! use tetrix_core::Engine;
//! use tetrix_types::{GamePhase, Intent};
//!
//! let mut game = Engine::new(12345);
//! game.apply(Intent::StartGame);
//! assert_eq!(game.phase(), GamePhase::Playing);
//!
//! game.apply(Intent::MoveRight);
//! game.apply(Intent::Rotate);
//! game.apply(Intent::HardDrop);
//! assert!(game.score() > 0); // hard drop awards points
//!
//! // Observers consume what happened.
//! let events = game.take_events();
//! assert!(!events.is_empty());
//! ```

pub mod board;
pub mod engine;
pub mod events;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod stats;

pub use tetrix_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use engine::Engine;
pub use events::GameEvent;
pub use piece::{Piece, Shape};
pub use rng::{PieceBag, SimpleRng};
pub use stats::SessionStats;
