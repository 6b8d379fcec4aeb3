//! Computer opponents.
//!
//! A bot is a pure function from its hand and the snapshot to a
//! `BotDecision`. It never mutates the round; `TurnEngine::run_bot_turn`
//! feeds the decision back through the same commands a human uses.
//!
//! ## Policies
//!
//! - `CasualBot`: normal modes. First legal card, random wild colour, and
//!   now and then forgets to declare its last card.
//! - `RuthlessBot`: Impossible mode. Attacks first, names the colour it
//!   holds most of, never forgets.

pub mod policy;

pub use policy::{policy_for, BotDecision, BotPolicy, CasualBot, RuthlessBot};
