//! Game events - what happened, in order.
//!
//! The engine appends an event for every observable consequence of a
//! command. The presentation layer turns them into status messages and
//! animations; the rules never read them back.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::{Card, Color};

/// Something that happened during a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The round was dealt and the opener turned.
    RoundStarted { opener: Card, color: Color },

    /// A card hit the discard pile.
    CardPlayed { player: PlayerId, card: Card },

    /// A player drew cards (fewer than requested when both piles ran dry).
    CardsDrawn { player: PlayerId, requested: usize, drawn: usize },

    /// The discard pile (minus the active card) became the draw pile.
    Reshuffled { cards: usize },

    /// The current colour was set by a wild card.
    ColorChosen { player: PlayerId, color: Color },

    /// A player was forced to draw by an attack card.
    Attacked { attacker: PlayerId, victim: PlayerId, cards: usize },

    /// A player lost their turn.
    TurnSkipped { player: PlayerId },

    /// Play direction flipped.
    DirectionReversed { direction: i8 },

    /// A Minus4 destroyed cards from the player's own hand.
    HandPurged { player: PlayerId, cards: SmallVec<[Card; 4]> },

    /// A player announced their last card.
    LastCardDeclared { player: PlayerId },

    /// A player dropped to one card without announcing it.
    DeclarationPenalty { player: PlayerId, cards: usize },

    /// A player gave up the rest of their turn.
    TurnPassed { player: PlayerId },

    /// A player emptied their hand.
    Won { player: PlayerId },
}

impl GameEvent {
    /// The seat the event is mainly about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::RoundStarted { .. }
            | GameEvent::Reshuffled { .. }
            | GameEvent::DirectionReversed { .. } => None,
            GameEvent::CardPlayed { player, .. }
            | GameEvent::CardsDrawn { player, .. }
            | GameEvent::ColorChosen { player, .. }
            | GameEvent::TurnSkipped { player }
            | GameEvent::HandPurged { player, .. }
            | GameEvent::LastCardDeclared { player }
            | GameEvent::DeclarationPenalty { player, .. }
            | GameEvent::TurnPassed { player }
            | GameEvent::Won { player } => Some(*player),
            GameEvent::Attacked { victim, .. } => Some(*victim),
        }
    }

    /// Human-readable message, with seats named by `name_of`.
    pub fn describe(&self, name_of: impl Fn(PlayerId) -> String) -> String {
        match self {
            GameEvent::RoundStarted { opener, color } => {
                format!("Round started on {opener}, colour is {color}")
            }
            GameEvent::CardPlayed { player, card } => {
                format!("{} played {card}", name_of(*player))
            }
            GameEvent::CardsDrawn { player, requested, drawn } if drawn < requested => {
                format!("{} drew {drawn} of {requested} cards (piles exhausted)", name_of(*player))
            }
            GameEvent::CardsDrawn { player, drawn, .. } => {
                format!("{} drew {drawn} card(s)", name_of(*player))
            }
            GameEvent::Reshuffled { cards } => {
                format!("Discard pile reshuffled into {cards} new draw cards")
            }
            GameEvent::ColorChosen { player, color } => {
                format!("{} chose {color}", name_of(*player))
            }
            GameEvent::Attacked { victim, cards, .. } => {
                format!("{} takes +{cards} and loses the turn", name_of(*victim))
            }
            GameEvent::TurnSkipped { player } => format!("{} is skipped", name_of(*player)),
            GameEvent::DirectionReversed { .. } => "Direction reversed!".to_string(),
            GameEvent::HandPurged { player, cards } => {
                format!("{} purged {} card(s) from their hand", name_of(*player), cards.len())
            }
            GameEvent::LastCardDeclared { player } => format!("{} shouts: UNO!", name_of(*player)),
            GameEvent::DeclarationPenalty { player, cards } => {
                format!("{} forgot to say UNO. +{cards} cards", name_of(*player))
            }
            GameEvent::TurnPassed { player } => format!("{} passes", name_of(*player)),
            GameEvent::Won { player } => format!("{} won the round!", name_of(*player)),
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe(|p| p.to_string()))
    }
}
