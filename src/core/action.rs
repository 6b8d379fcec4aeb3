//! Commands accepted by the engine.
//!
//! Every way a presentation layer (or the bot driver) can change a round is
//! an `Action`. `TurnEngine::apply` is the single reducer over them, and each
//! accepted action is appended to the round's history as an `ActionRecord`,
//! which is enough to replay the round from its seed.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{CardId, Color};

/// A command issued by a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play a card from hand. Wild cards need `color`; without it the round
    /// waits for `ChooseColor`.
    Play { card: CardId, color: Option<Color> },

    /// Finish a pending wild play.
    ChooseColor(Color),

    /// Raw draw of `count` cards; never changes the turn.
    Draw { count: usize },

    /// Draw one card as the turn's move.
    DrawForTurn,

    /// Give up the turn after drawing.
    Pass,

    /// Announce "last card" before dropping to one card.
    DeclareLastCard,

    /// Apply the missed-declaration penalty.
    Penalize,
}

/// An accepted command, as stored in the round's history.
///
/// `TurnEngine::replay` feeds these back through `TurnEngine::apply`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub action: Action,
    /// Turn counter of the round when the command was accepted.
    pub turn: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32) -> Self {
        Self {
            player,
            action,
            turn,
        }
    }
}
