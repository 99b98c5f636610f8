//! Deterministic random number generation.
//!
//! Every source of randomness in the engine (deck shuffles, opponent
//! tie-breaking, difficulty noise, thinking time) draws from a `GameRng`
//! that the caller passes in explicitly. The same seed always replays the
//! same game.
//!
//! ```
//! use chkobba_engine::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//!
//! // `Chkobba::execute_npc_turn` hands the opponent a fork like this,
//! // so its choices never perturb later shuffles.
//! let mut npc_rng = rng.fork();
//! assert_ne!(rng.gen_range(0..100), npc_rng.gen_range(0..100));
//! ```

use std::ops::{Range, RangeInclusive};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seedable, forkable RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derive an independent, deterministic stream.
    ///
    /// Successive forks of the same parent yield different streams; the
    /// parent's own sequence is left untouched.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        Self::new(fork_seed)
    }

    /// Random integer in a half-open range.
    pub fn gen_range(&mut self, range: Range<i32>) -> i32 {
        self.inner.gen_range(range)
    }

    /// Random `u64` in an inclusive range.
    pub fn gen_range_inclusive(&mut self, range: RangeInclusive<u64>) -> u64 {
        self.inner.gen_range(range)
    }

    /// Random index below `len`, or `None` for an empty collection.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.inner.gen_range(0..len))
        }
    }

    /// `true` with the given probability. Values outside [0, 1] are clamped.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.inner.gen_bool(probability.clamp(0.0, 1.0))
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Capture the stream position so a game can be replayed from here.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Resume a stream captured with [`GameRng::state`].
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Checkpoint of a [`GameRng`] stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
    pub fork_counter: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_shuffle() {
        let mut rng1 = GameRng::new(7);
        let mut rng2 = GameRng::new(7);

        let mut a: Vec<u8> = (0..40).collect();
        let mut b = a.clone();
        rng1.shuffle(&mut a);
        rng2.shuffle(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(42);
        let mut deck: Vec<u8> = (0..40).collect();
        rng.shuffle(&mut deck);

        assert_ne!(deck, (0..40).collect::<Vec<_>>());
        deck.sort_unstable();
        assert_eq!(deck, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn test_forks_are_distinct_and_reproducible() {
        let mut parent1 = GameRng::new(42);
        let mut parent2 = GameRng::new(42);

        let first = parent1.fork();
        let second = parent1.fork();
        assert_ne!(first.seed(), second.seed());

        let again = parent2.fork();
        assert_eq!(first.seed(), again.seed());
    }

    #[test]
    fn test_pick_index_bounds() {
        let mut rng = GameRng::new(1);
        assert_eq!(rng.pick_index(0), None);
        for _ in 0..100 {
            let idx = rng.pick_index(3).unwrap();
            assert!(idx < 3);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = GameRng::new(3);
        for _ in 0..50 {
            assert!(rng.chance(1.0));
            assert!(!rng.chance(0.0));
            assert!(rng.chance(2.5));
        }
    }

    #[test]
    fn test_gen_range_inclusive_bounds() {
        let mut rng = GameRng::new(9);
        for _ in 0..200 {
            let v = rng.gen_range_inclusive(500..=1000);
            assert!((500..=1000).contains(&v));
        }
    }

    #[test]
    fn test_state_round_trip() {
        let mut rng = GameRng::new(42);
        for _ in 0..25 {
            rng.gen_range(0..1000);
        }

        let checkpoint = rng.state();
        let expected: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();

        let mut restored = GameRng::from_state(&checkpoint);
        let actual: Vec<_> = (0..10).map(|_| restored.gen_range(0..1000)).collect();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRng::new(5).state();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
