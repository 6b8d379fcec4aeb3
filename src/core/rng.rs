//! The round's single source of randomness.
//!
//! Shuffling the deck, reshuffling the discard pile, choosing the cards a
//! Minus4 destroys, the casual bot's colour and its forgetting roll all draw
//! from the `GameRng` stored in the snapshot. Same seed plus same commands
//! means the same round.
//!
//! ## Side streams
//!
//! Bots must not advance the round's stream just by thinking about a move,
//! or asking for a hint would change the game. `side_stream` derives an
//! independent generator from the current position and a label instead.
//!
//! ```
//! use rust_uno::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.below(52), b.below(52));
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Seeded ChaCha8 generator whose position can be saved and restored.
///
/// Shuffle fairness is a rule of the game, so this stays a cryptographic
/// quality stream rather than a fast hash-based one.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(from = "GameRngState", into = "GameRngState")]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// The seed the round was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent generator for `label` at the current position.
    ///
    /// Repeatable: the same snapshot and label always give the same stream.
    /// `self` is not advanced.
    #[must_use]
    pub fn side_stream(&self, label: &str) -> Self {
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        self.stream.get_word_pos().hash(&mut hasher);
        label.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn below(&mut self, len: usize) -> usize {
        self.stream.gen_range(0..len)
    }

    /// `true` with the given probability, clamped into `[0, 1]`.
    pub fn chance(&mut self, probability: f64) -> bool {
        let p = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
        self.stream.gen_bool(p)
    }

    /// Uniform Fisher-Yates shuffle in place.
    pub fn shuffle<T>(&mut self, cards: &mut [T]) {
        cards.shuffle(&mut self.stream);
    }

    /// Seed and stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Rebuild a generator at a saved position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(state.seed);
        stream.set_word_pos(state.word_pos);
        Self {
            stream,
            seed: state.seed,
        }
    }
}

impl PartialEq for GameRng {
    fn eq(&self, other: &Self) -> bool {
        self.state() == other.state()
    }
}

impl Eq for GameRng {}

impl From<GameRngState> for GameRng {
    fn from(state: GameRngState) -> Self {
        Self::from_state(&state)
    }
}

impl From<GameRng> for GameRngState {
    fn from(rng: GameRng) -> Self {
        rng.state()
    }
}

/// Saved generator position: constant size however many draws were made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha8 word position.
    pub word_pos: u128,
}
