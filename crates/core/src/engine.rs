//! Engine module - the game state machine.
//!
//! Owns the board, the falling piece, the hold slot, the next queue, the bag
//! and the session counters. Player intents and the gravity tick come in;
//! events for downstream observers come out. Rendering and audio never feed
//! back into this module.
//!
//! Phases: Menu -> Playing <-> Paused, Playing -> GameOver -> Playing
//! (restart). Gameplay operations are no-ops outside Playing; the phase
//! transitions themselves are the only intents honored elsewhere.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::events::GameEvent;
use crate::piece::{Piece, Shape};
use crate::rng::PieceBag;
use crate::scoring;
use crate::stats::SessionStats;
use tetrix_types::{GamePhase, Intent, PieceKind, NEXT_QUEUE_LEN};

/// Complete game state, mutated only through intents and ticks.
#[derive(Debug, Clone)]
pub struct Engine {
    phase: GamePhase,
    board: Board,
    current: Option<Piece>,
    next: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
    hold: Option<PieceKind>,
    can_hold: bool,
    bag: PieceBag,
    score: u32,
    lines: u32,
    level: u32,
    combo: u32,
    drop_timer_ms: u32,
    drop_interval_ms: u32,
    stats: SessionStats,
    events: Vec<GameEvent>,
}

impl Engine {
    /// Create an engine at the menu, with piece order derived from `seed`.
    pub fn new(seed: u32) -> Self {
        let mut engine = Self {
            phase: GamePhase::Menu,
            board: Board::new(),
            current: None,
            next: ArrayVec::new(),
            hold: None,
            can_hold: true,
            bag: PieceBag::new(seed),
            score: 0,
            lines: 0,
            level: 1,
            combo: 0,
            drop_timer_ms: 0,
            drop_interval_ms: scoring::drop_interval_ms(1),
            stats: SessionStats::new(),
            events: Vec::new(),
        };
        engine.refill_next();
        engine
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn hold_kind(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        &self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Where the falling piece would land if hard-dropped now.
    pub fn ghost_y(&self) -> Option<i8> {
        self.current.as_ref().map(|p| p.ghost_y(&self.board))
    }

    /// Drain the events emitted since the last drain.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply a player intent. Returns whether it changed anything.
    ///
    /// `Quit` is deliberately not handled here: ending the process is the
    /// shell's decision, not a board mutation.
    pub fn apply(&mut self, intent: Intent) -> bool {
        match (self.phase, intent) {
            (GamePhase::Menu, Intent::StartGame) => {
                self.begin();
                true
            }
            (GamePhase::GameOver, Intent::RestartGame) => {
                self.begin();
                true
            }
            (GamePhase::Playing, Intent::Pause) => {
                self.phase = GamePhase::Paused;
                true
            }
            (GamePhase::Paused, Intent::Resume) => {
                self.phase = GamePhase::Playing;
                true
            }
            (GamePhase::Playing, Intent::MoveLeft) => self.try_move(-1, 0, false),
            (GamePhase::Playing, Intent::MoveRight) => self.try_move(1, 0, false),
            (GamePhase::Playing, Intent::SoftDrop) => self.soft_drop(),
            (GamePhase::Playing, Intent::Rotate) => self.try_move(0, 0, true),
            (GamePhase::Playing, Intent::HardDrop) => self.hard_drop(),
            (GamePhase::Playing, Intent::Hold) => self.hold(),
            _ => false,
        }
    }

    /// Start a fresh session and spawn the first piece.
    fn begin(&mut self) {
        self.board.clear();
        self.bag.reset();
        self.next.clear();
        self.refill_next();
        self.hold = None;
        self.can_hold = true;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.combo = 0;
        self.drop_timer_ms = 0;
        self.drop_interval_ms = scoring::drop_interval_ms(1);
        self.stats = SessionStats::new();
        self.phase = GamePhase::Playing;
        self.spawn_from_queue();
    }

    fn refill_next(&mut self) {
        while !self.next.is_full() {
            self.next.push(self.bag.draw());
        }
    }

    /// Tentatively translate and/or rotate the falling piece.
    ///
    /// Rotation and translation are validated together: on failure the piece
    /// is left exactly as it was and `false` is returned. There is no kick
    /// search - a rotation that collides at the current origin is rejected.
    pub fn try_move(&mut self, dx: i8, dy: i8, rotate: bool) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        let Some(piece) = self.current.as_mut() else {
            return false;
        };

        let candidate: Shape = if rotate {
            piece.shape().rotated_cw()
        } else {
            *piece.shape()
        };
        let (nx, ny) = (piece.x + dx, piece.y + dy);

        if !Piece::is_valid_at(nx, ny, &candidate, &self.board) {
            return false;
        }

        piece.x = nx;
        piece.y = ny;
        piece.set_shape(candidate);

        if rotate {
            self.events.push(GameEvent::PieceRotated);
        } else if dx != 0 || dy != 0 {
            self.events.push(GameEvent::PieceMoved);
        }
        true
    }

    /// One soft-drop step; each successful cell scores a point.
    pub fn soft_drop(&mut self) -> bool {
        if self.try_move(0, 1, false) {
            self.score += scoring::drop_score(1, false);
            true
        } else {
            false
        }
    }

    /// Drop to the floor, score the distance, and lock immediately.
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != GamePhase::Playing || self.current.is_none() {
            return false;
        }

        let mut distance: u32 = 0;
        while self.try_move(0, 1, false) {
            distance += 1;
        }
        self.score += scoring::drop_score(distance, true);
        self.lock_current();
        true
    }

    /// Stash or swap the falling piece. Allowed once per spawn.
    pub fn hold(&mut self) -> bool {
        if self.phase != GamePhase::Playing || !self.can_hold {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        match self.hold.take() {
            None => {
                self.hold = Some(piece.kind);
                self.spawn_from_queue();
            }
            Some(held) => {
                self.hold = Some(piece.kind);
                self.current = Some(Piece::spawn(held));
            }
        }

        self.can_hold = false;
        true
    }

    /// Advance the gravity clock; drops the piece one row per interval and
    /// locks it when it can no longer fall.
    pub fn tick(&mut self, elapsed_ms: u32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.stats.advance(elapsed_ms);

        self.drop_timer_ms += elapsed_ms;
        if self.drop_timer_ms >= self.drop_interval_ms {
            self.drop_timer_ms = 0;
            if !self.try_move(0, 1, false) {
                self.lock_current();
            }
        }
    }

    /// Commit the falling piece, clear lines, score, and spawn the next one.
    pub fn lock_current(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(piece) = self.current.take() else {
            return;
        };

        let cells = self.board.lock_piece(&piece);
        self.events.push(GameEvent::PieceLocked {
            kind: piece.kind,
            cells,
        });
        self.stats.record_lock(piece.kind);

        let rows = self.board.clear_full_rows();
        self.apply_clear(rows);

        self.spawn_from_queue();
    }

    /// Scoring and leveling for one lock's cleared rows.
    fn apply_clear(&mut self, rows: ArrayVec<u8, 4>) {
        let count = rows.len();
        if count == 0 {
            self.combo = 0;
            return;
        }

        self.events.push(GameEvent::LinesCleared {
            rows,
            count: count as u8,
        });

        let base = scoring::line_clear_score(count, self.level);
        let bonus = scoring::combo_bonus(self.combo, self.level);
        self.score += base + bonus;
        self.lines += count as u32;
        self.combo += 1;
        self.stats.record_lines(count as u32);

        let new_level = scoring::level_for_lines(self.lines);
        if new_level > self.level {
            self.level = new_level;
            self.drop_interval_ms = scoring::drop_interval_ms(new_level);
            self.events.push(GameEvent::LevelUp { level: new_level });
        }
    }

    /// Take the head of the next queue and put it in play. A blocked spawn
    /// ends the session.
    fn spawn_from_queue(&mut self) {
        let kind = self.next.remove(0);
        self.refill_next();

        let piece = Piece::spawn(kind);
        self.stats.record_spawn();
        self.can_hold = true;
        self.drop_timer_ms = 0;

        if piece.is_valid(&self.board) {
            self.current = Some(piece);
        } else {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver {
                score: self.score,
                level: self.level,
            });
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}
