//! RNG module - 7-bag random piece generation.
//!
//! Implements the "7-bag" randomization scheme: each bag holds one of each
//! piece kind in shuffled order, and a new bag is shuffled only when the
//! current one is exhausted. Any uniform shuffle satisfies the contract; a
//! small LCG keeps the engine deterministic from a seed with no external
//! dependency.

use tetrix_types::{PieceKind, ALL_KINDS};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state (doubles as a derived seed).
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// 7-bag piece generator.
#[derive(Debug, Clone)]
pub struct PieceBag {
    /// Undrawn remainder of the current bag
    bag: [PieceKind; 7],
    drawn: usize,
    rng: SimpleRng,
}

impl PieceBag {
    /// Create a bag generator with the given seed
    pub fn new(seed: u32) -> Self {
        let mut this = Self {
            bag: ALL_KINDS,
            drawn: 0,
            rng: SimpleRng::new(seed),
        };
        this.refill();
        this
    }

    fn refill(&mut self) {
        self.bag = ALL_KINDS;
        self.rng.shuffle(&mut self.bag);
        self.drawn = 0;
    }

    /// Draw the next piece, reshuffling a fresh bag when this one is empty.
    pub fn draw(&mut self) -> PieceKind {
        if self.drawn >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.drawn];
        self.drawn += 1;
        kind
    }

    /// Discard the current bag so the next draw starts a freshly shuffled one.
    ///
    /// The RNG state carries over, so consecutive games differ.
    pub fn reset(&mut self) {
        self.refill();
    }

    /// How many draws remain before the bag refills.
    pub fn remaining(&self) -> usize {
        self.bag.len() - self.drawn
    }

    /// The RNG state, for diagnostics and reseeding.
    pub fn rng_state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new(1)
    }
}
