//! Effect resolution - executing a played card's effect on a round.
//!
//! Resolution happens in two steps so the engine can check for a winner in
//! between:
//! 1. `purge_hand` runs self-targeted effects (Minus4) right after the card
//!    leaves the hand.
//! 2. `apply` runs attacks and turn-order changes, and hands the turn on.

use log::debug;
use smallvec::SmallVec;

use crate::cards::{Card, CardKind};
use crate::core::{Direction, GameEvent, GameState, PlayerId};
use crate::piles::DrawPileManager;

use super::{Effect, EffectTarget};

/// An effect bound to concrete seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub effect: Effect,
    /// Seat that must draw, computed with the direction before any flip.
    pub victim: Option<PlayerId>,
    /// Seat passed over by a skip.
    pub skipped: Option<PlayerId>,
    /// Direction of play once the card has resolved.
    pub direction: Direction,
    /// Seat that acts next.
    pub next_turn: PlayerId,
}

/// Resolves card effects on game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Bind the effect of `card`, played by `player`, to the table.
    ///
    /// Pure: reads the current direction and seat count only.
    #[must_use]
    pub fn resolve(state: &GameState, player: PlayerId, card: &Card) -> Resolution {
        let seats = state.player_count();
        let effect = Effect::of(card, seats);
        let before = state.direction();

        let victim = match effect.target {
            EffectTarget::NextPlayer => Some(player.offset(before.sign(), 1, seats)),
            EffectTarget::OwnHand | EffectTarget::Nobody => None,
        };

        let direction = if effect.reverse { before.flipped() } else { before };
        let skipped = effect
            .skip
            .then(|| player.offset(direction.sign(), 1, seats));
        let steps = if effect.skip { 2 } else { 1 };

        Resolution {
            effect,
            victim,
            skipped,
            direction,
            next_turn: player.offset(direction.sign(), steps, seats),
        }
    }

    /// Destroy up to `effect.purge` random cards from `player`'s hand.
    ///
    /// Remaining Minus4 and Wild10 cards are never chosen. Destroyed cards
    /// leave play for good.
    pub(crate) fn purge_hand(
        state: &mut GameState,
        player: PlayerId,
        resolution: &Resolution,
    ) -> SmallVec<[Card; 4]> {
        let mut purged = SmallVec::new();
        if resolution.effect.purge == 0 {
            return purged;
        }

        let mut eligible: Vec<Card> = state
            .hand(player)
            .map(|hand| {
                hand.iter()
                    .filter(|c| !matches!(c.kind, CardKind::Minus4 | CardKind::Wild10))
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        for _ in 0..resolution.effect.purge {
            if eligible.is_empty() {
                break;
            }
            let pick = state.rng.below(eligible.len());
            let card = eligible.swap_remove(pick);
            if let Some(removed) = state.player_mut(player).and_then(|p| p.remove_card(card.id)) {
                state.purge(removed);
                purged.push(removed);
            }
        }

        debug!("{player} purged {} card(s)", purged.len());
        state.push_event(GameEvent::HandPurged {
            player,
            cards: purged.clone(),
        });
        purged
    }

    /// Run the attack and turn-order parts of a resolution and hand the
    /// turn to `resolution.next_turn`.
    pub(crate) fn apply(state: &mut GameState, player: PlayerId, resolution: &Resolution) {
        let effect = resolution.effect;

        if let Some(victim) = resolution.victim {
            let drawn = DrawPileManager::draw_into(state, victim, effect.draw);
            state.push_event(GameEvent::Attacked {
                attacker: player,
                victim,
                cards: drawn.len(),
            });
        } else if let Some(skipped) = resolution.skipped {
            state.push_event(GameEvent::TurnSkipped { player: skipped });
        }

        if resolution.direction != state.direction() {
            state.set_direction(resolution.direction);
            state.push_event(GameEvent::DirectionReversed {
                direction: resolution.direction.sign(),
            });
        }

        state.begin_turn(resolution.next_turn);
    }
}
