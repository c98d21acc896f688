//! Event-driven cosmetic effects: screen shake, flash, line-clear flicker
//! and particles.
//!
//! Consumes the events drained from the engine each frame and keeps its own
//! decaying timers. Everything here is presentation-only; nothing feeds back
//! into the engine.

use arrayvec::ArrayVec;

use tetrix_core::{GameEvent, SimpleRng};
use tetrix_types::BOARD_WIDTH;

/// Shake duration in frames for a 4-line clear / any other clear.
const SHAKE_TETRIS_FRAMES: u8 = 8;
const SHAKE_CLEAR_FRAMES: u8 = 4;

/// Flash overlay duration in frames.
const FLASH_FRAMES: u8 = 10;

/// Cleared-row flicker duration in frames.
const LINE_FLICKER_FRAMES: u8 = 30;

/// Particle lifetime in frames.
const PARTICLE_LIFE: u8 = 60;

/// Particles spawned per locked cell / per cleared-row cell.
const PARTICLES_PER_LOCK_CELL: usize = 3;
const PARTICLES_PER_CLEAR_CELL: usize = 5;

const PARTICLE_COLORS: [(u8, u8, u8); 6] = [
    (255, 255, 255),
    (255, 200, 0),
    (255, 100, 100),
    (100, 255, 100),
    (100, 100, 255),
    (255, 0, 255),
];

/// A short-lived spark in board-cell coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub life: u8,
    pub color: (u8, u8, u8),
}

impl Particle {
    fn new(x: f32, y: f32, rng: &mut SimpleRng) -> Self {
        // Velocities in cells/frame, biased upward like a burst.
        let vx = (rng.next_range(600) as f32 - 300.0) / 1000.0;
        let vy = -(rng.next_range(500) as f32 + 100.0) / 1000.0;
        let color = PARTICLE_COLORS[rng.next_range(PARTICLE_COLORS.len() as u32) as usize];
        Self {
            x,
            y,
            vx,
            vy,
            life: PARTICLE_LIFE,
            color,
        }
    }

    /// Advance one frame; false when expired.
    fn step(&mut self) -> bool {
        self.x += self.vx;
        self.y += self.vy;
        self.vy += 0.01; // gravity
        self.life -= 1;
        self.life > 0
    }

    /// Glyph by remaining life, fading out.
    pub fn glyph(&self) -> char {
        if self.life >= 40 {
            '*'
        } else if self.life >= 20 {
            '+'
        } else {
            '.'
        }
    }
}

/// All decaying visual state, updated once per frame.
#[derive(Debug)]
pub struct Effects {
    shake_frames: u8,
    flash_frames: u8,
    flicker_frames: u8,
    flicker_rows: ArrayVec<u8, 4>,
    particles: Vec<Particle>,
    rng: SimpleRng,
}

impl Effects {
    pub fn new(seed: u32) -> Self {
        Self {
            shake_frames: 0,
            flash_frames: 0,
            flicker_frames: 0,
            flicker_rows: ArrayVec::new(),
            particles: Vec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    /// Fold one frame's drained engine events into the effect timers.
    pub fn observe(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::PieceLocked { cells, .. } => {
                    for &(x, y) in cells {
                        self.burst(x as f32 + 0.5, y as f32 + 0.5, PARTICLES_PER_LOCK_CELL);
                    }
                }
                GameEvent::LinesCleared { rows, count } => {
                    self.shake_frames = if *count == 4 {
                        SHAKE_TETRIS_FRAMES
                    } else {
                        SHAKE_CLEAR_FRAMES
                    };
                    self.flash_frames = FLASH_FRAMES;
                    self.flicker_frames = LINE_FLICKER_FRAMES;
                    self.flicker_rows = rows.clone();
                    for &row in rows {
                        for x in 0..BOARD_WIDTH {
                            self.burst(x as f32 + 0.5, row as f32 + 0.5, PARTICLES_PER_CLEAR_CELL);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn burst(&mut self, x: f32, y: f32, count: usize) {
        for _ in 0..count {
            self.particles.push(Particle::new(x, y, &mut self.rng));
        }
    }

    /// Decay all timers by one frame.
    pub fn update(&mut self) {
        self.shake_frames = self.shake_frames.saturating_sub(1);
        self.flash_frames = self.flash_frames.saturating_sub(1);
        if self.flicker_frames > 0 {
            self.flicker_frames -= 1;
            if self.flicker_frames == 0 {
                self.flicker_rows.clear();
            }
        }
        self.particles.retain_mut(Particle::step);
    }

    /// Current shake offset in terminal cells, jittering while active.
    pub fn shake_offset(&mut self) -> (i16, i16) {
        if self.shake_frames == 0 {
            return (0, 0);
        }
        let dx = self.rng.next_range(3) as i16 - 1;
        let dy = self.rng.next_range(3) as i16 - 1;
        (dx, dy)
    }

    /// Whether the whole-field flash overlay is visible this frame.
    pub fn flash_active(&self) -> bool {
        self.flash_frames > 0
    }

    /// Whether a cleared row should render dimmed this frame (flicker).
    pub fn row_flickering(&self, row: u8) -> bool {
        self.flicker_frames > 0 && self.flicker_frames % 6 < 3 && self.flicker_rows.contains(&row)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Drop everything (on restart).
    pub fn clear(&mut self) {
        self.shake_frames = 0;
        self.flash_frames = 0;
        self.flicker_frames = 0;
        self.flicker_rows.clear();
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrayvec::ArrayVec;

    fn cleared(count: u8) -> GameEvent {
        let mut rows = ArrayVec::new();
        for i in 0..count {
            rows.push(19 - i);
        }
        GameEvent::LinesCleared { rows, count }
    }

    #[test]
    fn test_tetris_shakes_harder() {
        let mut fx = Effects::new(1);
        fx.observe(&[cleared(1)]);
        assert_eq!(fx.shake_frames, SHAKE_CLEAR_FRAMES);

        let mut fx = Effects::new(1);
        fx.observe(&[cleared(4)]);
        assert_eq!(fx.shake_frames, SHAKE_TETRIS_FRAMES);
        assert!(fx.flash_active());
    }

    #[test]
    fn test_lock_spawns_particles_at_cells() {
        let mut fx = Effects::new(1);
        let mut cells = ArrayVec::new();
        cells.push((4, 19));
        cells.push((5, 19));
        fx.observe(&[GameEvent::PieceLocked {
            kind: tetrix_types::PieceKind::O,
            cells,
        }]);
        assert_eq!(fx.particles().len(), 2 * PARTICLES_PER_LOCK_CELL);
    }

    #[test]
    fn test_timers_decay_to_zero() {
        let mut fx = Effects::new(1);
        fx.observe(&[cleared(4)]);
        for _ in 0..120 {
            fx.update();
        }
        assert_eq!(fx.shake_offset(), (0, 0));
        assert!(!fx.flash_active());
        assert!(!fx.row_flickering(19));
        assert!(fx.particles().is_empty());
    }

    #[test]
    fn test_move_events_are_cosmetically_silent() {
        let mut fx = Effects::new(1);
        fx.observe(&[GameEvent::PieceMoved, GameEvent::PieceRotated]);
        assert!(fx.particles().is_empty());
        assert_eq!(fx.shake_offset(), (0, 0));
    }
}
