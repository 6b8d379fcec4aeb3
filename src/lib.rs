//! # rust-uno
//!
//! A rules engine for UNO-style shedding games with three table presets:
//! two players, three players, and the "Impossible" variant with amplified
//! attack cards and ruthless bots.
//!
//! ## Design Principles
//!
//! 1. **Pure reducers**: every command takes a `GameState` snapshot and
//!    returns a new one. Rejected commands leave nothing behind.
//!
//! 2. **Deterministic**: all randomness (shuffles, reshuffles, hand purges,
//!    bot choices) flows from the `GameRng` inside the snapshot, so a seed
//!    plus the action history replays a round exactly.
//!
//! 3. **No scheduling**: the core never waits or sleeps. A presentation
//!    layer decides when a bot moves and calls `TurnEngine::run_bot_turn`
//!    (or `choose_bot_move` and the plain commands) on its own clock.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) snapshot cloning via `im`.
//! - **Closed card kinds**: effects are an exhaustive table over `CardKind`.
//! - **Checked invariants**: card conservation, colour domain and turn
//!   bounds are verified after every committed command in debug builds.
//!
//! ## Modules
//!
//! - `core`: players, state, actions, events, RNG, configuration, errors
//! - `cards`: card data and the deck factory
//! - `piles`: drawing and reshuffling
//! - `rules`: card matching and the turn engine
//! - `effects`: the card effect table and its resolver
//! - `bot`: computer opponents
//!
//! ```
//! use rust_uno::{GameMode, TurnEngine};
//!
//! let mut state = TurnEngine::new_game(GameMode::Normal3P, 42);
//! for _ in 0..20 {
//!     if state.is_terminal() {
//!         break;
//!     }
//!     state = TurnEngine::run_bot_turn(&state).unwrap();
//! }
//! assert!(state.check_invariants().is_ok());
//! ```

pub mod bot;
pub mod cards;
pub mod core;
pub mod effects;
pub mod piles;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ConfigError, Direction, GameConfig, GameEvent, GameMode, GameRng,
    GameRngState, GameState, InvariantViolation, MoveError, Player, PlayerId, Position,
    SeatConfig, TurnPhase,
};

pub use crate::cards::{Card, CardId, CardKind, Color, DeckFactory};

pub use crate::piles::DrawPileManager;

pub use crate::rules::{CardMatchRule, GameResult, TurnDraw, TurnEngine};

pub use crate::effects::{Effect, EffectResolver, EffectTarget, Resolution};

pub use crate::bot::{policy_for, BotDecision, BotPolicy, CasualBot, RuthlessBot};
