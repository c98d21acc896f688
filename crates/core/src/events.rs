//! Engine-emitted events.
//!
//! The engine never draws, beeps or shakes anything itself; it records what
//! happened during each operation and observers (renderer, effects, audio)
//! drain the buffer once per frame via [`crate::Engine::take_events`].

use arrayvec::ArrayVec;

use tetrix_types::PieceKind;

/// One observable engine outcome, fired synchronously during the operation
/// that caused it.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The falling piece translated (player input or gravity).
    PieceMoved,
    /// The falling piece rotated.
    PieceRotated,
    /// A piece was committed into the board.
    PieceLocked {
        kind: PieceKind,
        /// Board cells actually written (overhang cells above the top are
        /// not included).
        cells: ArrayVec<(i8, i8), 4>,
    },
    /// Rows were cleared by the lock that just happened.
    LinesCleared {
        /// Cleared row indices, top to bottom.
        rows: ArrayVec<u8, 4>,
        count: u8,
    },
    /// The level rose after a clear.
    LevelUp { level: u32 },
    /// A spawn was blocked; the session is over.
    GameOver { score: u32, level: u32 },
}
