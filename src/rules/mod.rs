//! Rules of play.
//!
//! - `CardMatchRule`: whether a card may be played on the discard pile
//! - `TurnEngine`: every command that advances a round, the bot driver and
//!   replay
//!
//! The engine is the only writer of `GameState`. Everything it hands out is
//! a fresh snapshot; rejected commands return a `MoveError` and nothing else.

pub mod engine;
pub mod matching;

pub use engine::{GameResult, TurnDraw, TurnEngine};
pub use matching::CardMatchRule;
