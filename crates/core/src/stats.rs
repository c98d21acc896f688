//! Session statistics: per-kind lock counters and timing-derived metrics.

use tetrix_types::{PieceKind, ALL_KINDS};

/// Counters the side panel reports. Reset with the rest of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    locks_by_kind: [u32; 7],
    total_pieces: u32,
    lines_cleared: u32,
    elapsed_ms: u64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a spawned piece.
    pub fn record_spawn(&mut self) {
        self.total_pieces += 1;
    }

    /// Record a locked piece by kind.
    pub fn record_lock(&mut self, kind: PieceKind) {
        self.locks_by_kind[kind.index()] += 1;
    }

    /// Record cleared lines.
    pub fn record_lines(&mut self, count: u32) {
        self.lines_cleared += count;
    }

    /// Advance play time. Only called while the game is actually playing, so
    /// pauses and menus do not count.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.elapsed_ms += elapsed_ms as u64;
    }

    pub fn locks_for(&self, kind: PieceKind) -> u32 {
        self.locks_by_kind[kind.index()]
    }

    /// (kind, lock count) pairs in canonical order, for display.
    pub fn per_kind(&self) -> impl Iterator<Item = (PieceKind, u32)> + '_ {
        ALL_KINDS
            .iter()
            .map(move |&kind| (kind, self.locks_by_kind[kind.index()]))
    }

    pub fn total_pieces(&self) -> u32 {
        self.total_pieces
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_ms as f64 / 1000.0
    }

    /// Pieces per second over the session.
    pub fn pieces_per_second(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs > 0.0 {
            self.total_pieces as f64 / secs
        } else {
            0.0
        }
    }

    /// Lines per second over the session.
    pub fn lines_per_second(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs > 0.0 {
            self.lines_cleared as f64 / secs
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_counters() {
        let mut stats = SessionStats::new();
        stats.record_lock(PieceKind::T);
        stats.record_lock(PieceKind::T);
        stats.record_lock(PieceKind::I);

        assert_eq!(stats.locks_for(PieceKind::T), 2);
        assert_eq!(stats.locks_for(PieceKind::I), 1);
        assert_eq!(stats.locks_for(PieceKind::O), 0);
    }

    #[test]
    fn test_rates_need_elapsed_time() {
        let mut stats = SessionStats::new();
        stats.record_spawn();
        stats.record_lines(2);

        // No time elapsed: rates stay zero instead of dividing by zero.
        assert_eq!(stats.pieces_per_second(), 0.0);
        assert_eq!(stats.lines_per_second(), 0.0);

        stats.advance(2000);
        assert_eq!(stats.pieces_per_second(), 0.5);
        assert_eq!(stats.lines_per_second(), 1.0);
    }
}
