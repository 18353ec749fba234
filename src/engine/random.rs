// Random number source used by gameplay
//
// Everything random in the game goes through `RandomSource` so tests can script
// the rolls. The live game uses a seeded ChaCha8 generator.

use rand_chacha::{
    rand_core::{Rng, SeedableRng},
    ChaCha8Rng,
};
use std::collections::VecDeque;

/// Integer rolls in an inclusive range
pub trait RandomSource {
    /// Roll an integer in `[min, max]`
    fn random_in_range(&mut self, min: i32, max: i32) -> i32;
}

impl RandomSource for ChaCha8Rng {
    fn random_in_range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        min + (self.next_u64() % span) as i32
    }
}

/// Create the gameplay generator from a seed
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// One deterministic roll for a fixed key (e.g. a tile index)
pub fn roll_for_key(key: u64, min: i32, max: i32) -> i32 {
    seeded(key).random_in_range(min, max)
}

/// Replays a fixed list of rolls, clamped into the requested range.
/// Once exhausted it keeps answering `fallback`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    rolls: VecDeque<i32>,
    fallback: i32,
}

impl ScriptedRolls {
    pub fn new(rolls: impl IntoIterator<Item = i32>, fallback: i32) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback,
        }
    }

    /// Always answer the same value
    pub fn constant(value: i32) -> Self {
        Self::new(std::iter::empty(), value)
    }
}

impl RandomSource for ScriptedRolls {
    fn random_in_range(&mut self, min: i32, max: i32) -> i32 {
        let value = self.rolls.pop_front().unwrap_or(self.fallback);
        value.clamp(min, max.max(min))
    }
}
