//! Drawing and reshuffling.
//!
//! A draw either completes fully or stops early when both piles are
//! exhausted. Running out is not an error: the caller gets fewer cards than
//! it asked for and a `CardsDrawn` event records the shortfall.

use im::Vector;
use log::debug;

use crate::cards::Card;
use crate::core::{GameEvent, GameState, PlayerId};

/// Moves cards from the draw pile into hands.
pub struct DrawPileManager;

impl DrawPileManager {
    /// Draw up to `count` cards for `player`.
    ///
    /// Returns the new snapshot and the cards drawn, in draw order. `state`
    /// is left untouched, so piles and hand in the returned snapshot are
    /// always consistent with each other.
    ///
    /// ```
    /// use rust_uno::core::{GameConfig, GameMode, GameRng, PlayerId};
    /// use rust_uno::cards::DeckFactory;
    /// use rust_uno::piles::DrawPileManager;
    ///
    /// let state = DeckFactory::deal(GameConfig::for_mode(GameMode::Normal2P), GameRng::new(3)).unwrap();
    /// let (next, drawn) = DrawPileManager::draw(&state, PlayerId::new(1), 2);
    ///
    /// assert_eq!(drawn.len(), 2);
    /// assert_eq!(next.hand(PlayerId::new(1)).unwrap().len(), 9);
    /// assert_eq!(state.hand(PlayerId::new(1)).unwrap().len(), 7);
    /// ```
    #[must_use]
    pub fn draw(state: &GameState, player: PlayerId, count: usize) -> (GameState, Vec<Card>) {
        let mut next = state.clone();
        let drawn = Self::draw_into(&mut next, player, count);
        (next, drawn)
    }

    /// Draw into a working copy owned by the engine.
    pub(crate) fn draw_into(state: &mut GameState, player: PlayerId, count: usize) -> Vec<Card> {
        if count == 0 || state.player(player).is_none() {
            return Vec::new();
        }

        let mut drawn = Vec::with_capacity(count);
        while drawn.len() < count {
            match state.draw_pile_mut().pop_back() {
                Some(card) => drawn.push(card),
                None => {
                    if Self::reshuffle(state) == 0 {
                        break;
                    }
                }
            }
        }

        if let Some(seat) = state.player_mut(player) {
            seat.hand.extend(drawn.iter().copied());
        }
        if player == state.current_player() {
            state.set_last_card_declared(false);
        }

        debug!("{player} drew {} of {count} card(s)", drawn.len());
        state.push_event(GameEvent::CardsDrawn {
            player,
            requested: count,
            drawn: drawn.len(),
        });
        drawn
    }

    /// Turn every discard except the active card into a shuffled draw pile.
    ///
    /// Returns the number of cards moved; 0 when the discard pile holds only
    /// the active card. Existing draw cards stay underneath the new ones.
    pub(crate) fn reshuffle(state: &mut GameState) -> usize {
        let discard = state.discard_pile_mut();
        let Some(active) = discard.pop_back() else {
            return 0;
        };
        let mut rest: Vec<Card> = discard.iter().copied().collect();
        *discard = Vector::unit(active);

        if rest.is_empty() {
            return 0;
        }
        state.rng.shuffle(&mut rest);

        let moved = rest.len();
        let pile = state.draw_pile_mut();
        for card in rest {
            pile.push_front(card);
        }

        debug!("reshuffled {moved} discard(s) into the draw pile");
        state.push_event(GameEvent::Reshuffled { cards: moved });
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, CardKind, Color};
    use crate::core::{Direction, GameConfig, GameMode, GameRng, Position};

    fn card(id: u32, color: Color, kind: CardKind) -> Card {
        Card::new(CardId(id), color, kind)
    }

    /// Seat 0 holds one card, seat 1 two; `draw` and `discard` are given
    /// bottom first.
    fn table(draw: Vec<Card>, discard: Vec<Card>) -> GameState {
        let position = Position {
            hands: vec![
                vec![card(100, Color::Red, CardKind::Number(1))],
                vec![
                    card(101, Color::Blue, CardKind::Number(2)),
                    card(102, Color::Green, CardKind::Skip),
                ],
            ],
            draw_pile: draw,
            discard_pile: discard,
            current_color: Color::Red,
            turn: PlayerId::new(0),
            direction: Direction::Forward,
        };
        GameState::from_position(GameConfig::for_mode(GameMode::Normal2P), position, GameRng::new(8))
            .unwrap()
    }

    fn numbers(range: std::ops::Range<u32>) -> Vec<Card> {
        range.map(|i| card(i, Color::Yellow, CardKind::Number((i % 9) as u8))).collect()
    }

    #[test]
    fn test_draw_takes_from_top() {
        let state = table(numbers(0..3), numbers(10..11));
        let (next, drawn) = DrawPileManager::draw(&state, PlayerId::new(1), 2);

        assert_eq!(drawn.iter().map(|c| c.id).collect::<Vec<_>>(), vec![CardId(2), CardId(1)]);
        assert_eq!(next.hand(PlayerId::new(1)).unwrap().len(), 4);
        assert_eq!(next.draw_pile().len(), 1);
        assert!(next.check_invariants().is_ok());
    }

    #[test]
    fn test_original_state_untouched() {
        let state = table(numbers(0..3), numbers(10..11));
        let before = state.clone();
        let _ = DrawPileManager::draw(&state, PlayerId::new(0), 3);

        assert_eq!(state, before);
    }

    #[test]
    fn test_reshuffle_mid_draw() {
        // One draw card, active card plus three beneath it
        let state = table(numbers(0..1), numbers(10..14));
        let (next, drawn) = DrawPileManager::draw(&state, PlayerId::new(1), 2);

        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0].id, CardId(0));
        assert_eq!(next.discard_pile().len(), 1);
        assert_eq!(next.top_card().map(|c| c.id), Some(CardId(13)));
        assert_eq!(next.draw_pile().len(), 2);
        assert!(next.check_invariants().is_ok());
        assert!(next.events().iter().any(|e| matches!(e, GameEvent::Reshuffled { cards: 3 })));
    }

    #[test]
    fn test_exhausted_piles_stop_early() {
        let state = table(numbers(0..1), numbers(10..12));
        let (next, drawn) = DrawPileManager::draw(&state, PlayerId::new(0), 5);

        assert_eq!(drawn.len(), 2);
        assert_eq!(next.hand(PlayerId::new(0)).unwrap().len(), 3);
        assert!(next.draw_pile().is_empty());
        assert_eq!(next.top_card().map(|c| c.id), Some(CardId(11)));
        assert_eq!(
            next.events().back(),
            Some(&GameEvent::CardsDrawn {
                player: PlayerId::new(0),
                requested: 5,
                drawn: 2,
            })
        );
        assert!(next.check_invariants().is_ok());
    }

    #[test]
    fn test_only_active_card_left() {
        let state = table(Vec::new(), numbers(10..11));
        let (next, drawn) = DrawPileManager::draw(&state, PlayerId::new(0), 1);

        assert!(drawn.is_empty());
        assert_eq!(next.discard_pile().len(), 1);
        assert_eq!(next.hand(PlayerId::new(0)).unwrap().len(), 1);
    }

    #[test]
    fn test_draw_clears_declaration_of_current_seat() {
        let mut state = table(numbers(0..3), numbers(10..11));
        state.set_last_card_declared(true);

        let (next, _) = DrawPileManager::draw(&state, PlayerId::new(1), 1);
        assert!(next.last_card_declared());

        let (next, _) = DrawPileManager::draw(&state, PlayerId::new(0), 1);
        assert!(!next.last_card_declared());
    }

    #[test]
    fn test_zero_and_unknown_draws_are_noops() {
        let state = table(numbers(0..3), numbers(10..11));

        let (next, drawn) = DrawPileManager::draw(&state, PlayerId::new(0), 0);
        assert!(drawn.is_empty());
        assert_eq!(next, state);

        let (next, drawn) = DrawPileManager::draw(&state, PlayerId::new(5), 2);
        assert!(drawn.is_empty());
        assert_eq!(next, state);
    }
}
