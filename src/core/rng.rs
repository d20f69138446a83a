//! Seeded randomness for event rolls.
//!
//! A game seeded with the same number replays the same events, which is what
//! makes `journey-sim` runs and bug reports reproducible. Each consumer takes
//! its own stream via [`GameRng::for_context`] so adding a new random draw
//! somewhere else never shifts the event sequence.
//!
//! ```
//! use journey_engine::core::GameRng;
//!
//! let mut a = GameRng::new(42).for_context("events");
//! let mut b = GameRng::new(42).for_context("events");
//!
//! let rolls_a: Vec<bool> = (0..8).map(|_| a.roll(0.25)).collect();
//! let rolls_b: Vec<bool> = (0..8).map(|_| b.roll(0.25)).collect();
//! assert_eq!(rolls_a, rolls_b);
//! ```

use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// ChaCha8 generator that remembers its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// A fresh generator for one named consumer.
    ///
    /// Derived from the seed and the name only, never from how far this
    /// generator has advanced.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// True with the given probability.
    ///
    /// Values above 1 always succeed. Zero, negatives and NaN never do.
    pub fn roll(&mut self, probability: f64) -> bool {
        if probability.is_nan() || probability <= 0.0 {
            return false;
        }
        self.inner.gen_bool(probability.min(1.0))
    }

    /// Where the generator is, so a paused game can resume the same rolls.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Seed plus ChaCha word position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
