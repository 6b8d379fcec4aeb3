//! Core engine types: players, state, actions, events, RNG, configuration.
//!
//! Everything here is plain data plus the snapshot invariants. The rules
//! that move a round forward live in `rules`.

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{GameConfig, GameMode, SeatConfig};
pub use error::{ConfigError, InvariantViolation, MoveError};
pub use event::GameEvent;
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
pub use state::{Direction, GameState, Position, TurnPhase};
