//! Terminal presentation layer.
//!
//! Strictly downstream of the engine: reads state, consumes drained events,
//! never mutates gameplay. The split mirrors the runtime flow:
//!
//! - [`fb`]: styled character framebuffer
//! - [`view`]: engine state -> framebuffer (pure, testable)
//! - [`effects`]: event-driven shake/flash/particles
//! - [`renderer`]: framebuffer -> real terminal (the only I/O)

pub mod effects;
pub mod fb;
pub mod renderer;
pub mod view;

pub use tetrix_core as core;
pub use tetrix_types as types;

pub use effects::Effects;
pub use fb::FrameBuffer;
pub use renderer::TerminalRenderer;
pub use view::{GameView, Viewport};
