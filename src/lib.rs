//! Tetrix (workspace facade crate).
//!
//! Presents the member crates under one roof (`tetrix::{core,input,term,types}`)
//! for the binary, the tests and the benches, plus the high-score store that
//! only the shell needs.

pub mod scores;

pub use tetrix_core as core;
pub use tetrix_input as input;
pub use tetrix_term as term;
pub use tetrix_types as types;
