//! Piece sequencing: seeded RNG and the random-bag generator.
//!
//! The generator uses the "7-bag" policy: a working set holding one of each
//! piece kind is shuffled, drawn from without replacement until empty, and
//! then refilled. Every kind therefore appears exactly once per 7-draw cycle,
//! which keeps droughts bounded. Draws are deterministic per seed.

use arrayvec::ArrayVec;

use gridfall_types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG.
/// Uses constants from Numerical Recipes.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed.
    pub fn new(seed: u32) -> Self {
        // A 0 seed would produce a degenerate sequence.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate the next random u32.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate a random value in `[0, max)`.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Random-bag piece generator.
#[derive(Debug, Clone)]
pub struct SevenBag {
    /// Remaining pieces of the current cycle; drawn from the back.
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl SevenBag {
    /// Create a generator with the given seed. The first bag is filled lazily
    /// on the first draw.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    /// Draw the next piece, refilling the bag when it runs out.
    pub fn next(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        // The refill above guarantees at least one entry.
        self.bag.pop().unwrap_or(PieceKind::T)
    }

    /// Discard the current cycle and start over (full game restart).
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// Number of draws left before the next refill.
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }

    /// Current RNG state, usable as a seed to reproduce the tail of the
    /// sequence.
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}
