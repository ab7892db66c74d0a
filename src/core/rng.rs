//! RNG module - seeded 7-bag piece generation
//!
//! Implements the "7-bag" randomization used by the queue: each bag holds
//! one of every piece, shuffled. The generator is an LCG (Numerical Recipes
//! constants) threaded through the game state as an explicit value: drawing
//! a bag returns the successor generator, there is no hidden mutation, so a
//! replay from the same seed reproduces the piece sequence exactly.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::types::PieceKind;

/// One shuffled bag of all seven pieces.
pub type Bag = ArrayVec<PieceKind, 7>;

/// Seeded piece generator with value semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BagRng {
    state: u32,
}

impl BagRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// LCG formula: (a * state + c) mod 2^32, Numerical Recipes constants.
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Draw one shuffled bag, returning the successor generator.
    pub fn next_bag(mut self) -> (BagRng, Bag) {
        let mut bag: Bag = PieceKind::ALL.into_iter().collect();
        // Fisher-Yates
        for i in (1..bag.len()).rev() {
            let j = (self.next_u32() % (i as u32 + 1)) as usize;
            bag.swap(i, j);
        }
        (self, bag)
    }

    /// Current generator state (for diagnostics and snapshots).
    pub fn state(&self) -> u32 {
        self.state
    }
}
