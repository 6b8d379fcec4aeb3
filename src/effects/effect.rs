//! Effect definitions.
//!
//! An `Effect` describes what a card does once it lands on the discard
//! pile. `Effect::of` is the rules table: an exhaustive match over
//! `CardKind`, so a new card kind does not compile until its row exists.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind};

/// Who a card's draw or purge lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTarget {
    #[default]
    Nobody,
    /// The next seat in the direction of play before any flip by this card.
    NextPlayer,
    /// The seat that played the card.
    OwnHand,
}

/// The consequences of playing one card.
///
/// ## Attacks
///
/// Draw2, Draw6, Wild4 and Wild10 target the next player with `draw` cards
/// and skip them.
///
/// ## Turn order
///
/// - `skip`: the turn advances two seats instead of one
/// - `reverse`: direction of play flips before the turn advances
///
/// In a two-seat round Reverse skips instead of flipping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effect {
    pub target: EffectTarget,
    /// Cards the target draws.
    pub draw: usize,
    /// Cards destroyed from the target's hand.
    pub purge: usize,
    pub skip: bool,
    pub reverse: bool,
    /// The player must name the next colour.
    pub needs_color: bool,
}

impl Effect {
    /// No effect beyond setting the colour.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            target: EffectTarget::Nobody,
            draw: 0,
            purge: 0,
            skip: false,
            reverse: false,
            needs_color: false,
        }
    }

    /// Skip the next seat.
    #[must_use]
    pub const fn skip() -> Self {
        Self {
            skip: true,
            ..Self::none()
        }
    }

    /// Flip direction.
    #[must_use]
    pub const fn reverse() -> Self {
        Self {
            reverse: true,
            ..Self::none()
        }
    }

    /// The next seat draws `count` cards and loses its turn.
    #[must_use]
    pub const fn attack(count: usize) -> Self {
        Self {
            target: EffectTarget::NextPlayer,
            draw: count,
            skip: true,
            ..Self::none()
        }
    }

    /// Destroy `count` cards from the player's own hand.
    #[must_use]
    pub const fn purge(count: usize) -> Self {
        Self {
            target: EffectTarget::OwnHand,
            purge: count,
            ..Self::none()
        }
    }

    /// Require a chosen colour.
    #[must_use]
    pub const fn with_color(mut self) -> Self {
        self.needs_color = true;
        self
    }

    /// Table row for a card kind at a table of `player_count` seats.
    #[must_use]
    pub const fn for_kind(kind: CardKind, player_count: usize) -> Self {
        match kind {
            CardKind::Number(_) => Self::none(),
            CardKind::Skip => Self::skip(),
            CardKind::Reverse if player_count <= 2 => Self::skip(),
            CardKind::Reverse => Self::reverse(),
            CardKind::Draw2 => Self::attack(2),
            CardKind::Draw6 => Self::attack(6),
            CardKind::Wild => Self::none().with_color(),
            CardKind::Wild4 => Self::attack(4).with_color(),
            CardKind::Wild10 => Self::attack(10).with_color(),
            CardKind::Minus4 => Self::purge(4).with_color(),
        }
    }

    /// Table row for a card.
    #[must_use]
    pub const fn of(card: &Card, player_count: usize) -> Self {
        Self::for_kind(card.kind, player_count)
    }

    /// Does the card force another seat to draw?
    #[must_use]
    pub const fn is_attack(&self) -> bool {
        matches!(self.target, EffectTarget::NextPlayer)
    }
}
