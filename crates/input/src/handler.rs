//! DAS/ARR auto-repeat for held movement keys.
//!
//! Terminals often deliver no key-release events, so a held key is modeled as
//! "pressed recently": a short timeout auto-releases it. Horizontal movement
//! uses a DAS delay before repeating; soft drop repeats immediately.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::types::{
    Intent, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS,
};

// Without release events a single tap must not become a sustained hold.
const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// One auto-repeating key axis: accumulates elapsed time past its DAS delay
/// and converts the excess into repeats at the ARR rate.
#[derive(Debug, Clone, Copy, Default)]
struct RepeatAxis {
    held: bool,
    das_timer: u32,
    arr_accumulator: u32,
}

impl RepeatAxis {
    fn press(&mut self) -> bool {
        if self.held {
            return false;
        }
        *self = Self {
            held: true,
            ..Self::default()
        };
        true
    }

    fn release(&mut self) {
        *self = Self::default();
    }

    /// Number of repeats generated by `elapsed_ms` of holding.
    fn advance(&mut self, elapsed_ms: u32, das_delay: u32, arr_rate: u32) -> u32 {
        if !self.held {
            return 0;
        }
        let prev_das = self.das_timer;
        self.das_timer += elapsed_ms;
        if self.das_timer < das_delay {
            return 0;
        }

        // Only time past the DAS threshold feeds the repeat rate.
        let excess = if prev_das < das_delay {
            self.das_timer - das_delay
        } else {
            elapsed_ms
        };
        self.arr_accumulator += excess;

        let repeats = self.arr_accumulator / arr_rate;
        self.arr_accumulator %= arr_rate;
        repeats
    }
}

/// Tracks held movement keys and emits repeat intents each tick.
#[derive(Debug, Clone)]
pub struct InputHandler {
    left: RepeatAxis,
    right: RepeatAxis,
    down: RepeatAxis,
    das_delay: u32,
    arr_rate: u32,
    last_key_time: Instant,
    release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            left: RepeatAxis::default(),
            right: RepeatAxis::default(),
            down: RepeatAxis::default(),
            das_delay,
            arr_rate,
            last_key_time: Instant::now(),
            release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    /// Record a key press. Returns the immediate intent for newly pressed
    /// movement keys; repeats come later from [`Self::update`].
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<Intent> {
        match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a')
            | KeyCode::Char('A') => {
                self.last_key_time = Instant::now();
                self.right.release();
                self.left.press().then_some(Intent::MoveLeft)
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d')
            | KeyCode::Char('D') => {
                self.last_key_time = Instant::now();
                self.left.release();
                self.right.press().then_some(Intent::MoveRight)
            }
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s')
            | KeyCode::Char('S') => {
                self.last_key_time = Instant::now();
                self.down.press().then_some(Intent::SoftDrop)
            }
            _ => None,
        }
    }

    /// Record a key release (for terminals that do emit them).
    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a')
            | KeyCode::Char('A') => self.left.release(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d')
            | KeyCode::Char('D') => self.right.release(),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s')
            | KeyCode::Char('S') => self.down.release(),
            _ => {}
        }
    }

    /// Advance the repeat timers by one tick's worth of time and collect the
    /// generated intents.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<Intent, 32> {
        let mut intents = ArrayVec::<Intent, 32>::new();

        // Auto-release stale holds when the terminal never reported a release.
        if self.last_key_time.elapsed().as_millis() as u32 > self.release_timeout_ms {
            self.left.release();
            self.right.release();
            self.down.release();
        }

        for _ in 0..self.left.advance(elapsed_ms, self.das_delay, self.arr_rate) {
            let _ = intents.try_push(Intent::MoveLeft);
        }
        for _ in 0..self.right.advance(elapsed_ms, self.das_delay, self.arr_rate) {
            let _ = intents.try_push(Intent::MoveRight);
        }
        for _ in 0..self.down.advance(elapsed_ms, SOFT_DROP_DAS_MS, SOFT_DROP_ARR_MS) {
            let _ = intents.try_push(Intent::SoftDrop);
        }

        intents
    }

    /// Drop all held state (e.g. when leaving the Playing phase).
    pub fn reset(&mut self) {
        self.left.release();
        self.right.release();
        self.down.release();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_repeats_start_after_das_delay() {
        let mut ih = InputHandler::with_config(100, 25).with_release_timeout_ms(10_000);

        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Intent::MoveLeft));

        // Before DAS expires: no repeats.
        assert!(ih.update(99).is_empty());
        // Exactly at DAS: still none (repeats need excess past the delay).
        assert!(ih.update(1).is_empty());
        // One ARR interval past DAS: one repeat.
        assert_eq!(ih.update(25).as_slice(), &[Intent::MoveLeft]);
        assert_eq!(ih.update(25).as_slice(), &[Intent::MoveLeft]);
    }

    #[test]
    fn test_repeated_press_of_held_key_is_ignored() {
        let mut ih = InputHandler::new().with_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Intent::MoveLeft));
        assert_eq!(ih.handle_key_press(KeyCode::Left), None);
    }

    #[test]
    fn test_opposite_direction_supersedes() {
        let mut ih = InputHandler::with_config(100, 25).with_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Intent::MoveLeft));
        assert_eq!(ih.handle_key_press(KeyCode::Right), Some(Intent::MoveRight));

        // Only the newer direction repeats.
        let intents = ih.update(200);
        assert!(!intents.is_empty());
        assert!(intents.iter().all(|&i| i == Intent::MoveRight));
    }

    #[test]
    fn test_soft_drop_repeats_without_das_delay() {
        let mut ih = InputHandler::new().with_release_timeout_ms(10_000);
        assert_eq!(ih.handle_key_press(KeyCode::Down), Some(Intent::SoftDrop));

        assert!(ih.update(49).is_empty());
        assert_eq!(ih.update(1).as_slice(), &[Intent::SoftDrop]);
        assert_eq!(
            ih.update(100).as_slice(),
            &[Intent::SoftDrop, Intent::SoftDrop]
        );
    }

    #[test]
    fn test_auto_release_after_timeout() {
        let mut ih = InputHandler::with_config(100, 25).with_release_timeout_ms(50);
        assert_eq!(ih.handle_key_press(KeyCode::Left), Some(Intent::MoveLeft));

        // Simulate a terminal with no release events.
        ih.last_key_time = Instant::now() - Duration::from_millis(51);

        assert!(ih.update(0).is_empty());
        assert!(ih.update(500).is_empty(), "released key must not repeat");
    }

    #[test]
    fn test_explicit_release_stops_repeats() {
        let mut ih = InputHandler::with_config(100, 25).with_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Right);
        assert!(!ih.update(200).is_empty());

        ih.handle_key_release(KeyCode::Right);
        assert!(ih.update(200).is_empty());
    }

    #[test]
    fn test_reset_clears_held_state() {
        let mut ih = InputHandler::with_config(100, 25).with_release_timeout_ms(10_000);
        ih.handle_key_press(KeyCode::Left);
        assert!(!ih.update(200).is_empty());

        ih.reset();
        assert!(ih.update(200).is_empty());
    }
}
