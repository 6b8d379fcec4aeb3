//! Deck construction and the opening deal.

use im::Vector;
use log::debug;

use super::card::{Card, CardId, CardKind, Color};
use crate::core::{ConfigError, GameConfig, GameMode, GameRng, GameState, Player, PlayerId};

/// Builds full card sets and deals rounds.
pub struct DeckFactory;

impl DeckFactory {
    /// Number of cards in the full deck for a mode.
    ///
    /// Per colour: one 0, two each of 1-9, two Skip, two Reverse and two
    /// Draw2 (Draw6 in Impossible). Then four Wild, plus four Wild4 in normal
    /// play or four Wild10 and four Minus4 in Impossible.
    #[must_use]
    pub const fn deck_size(mode: GameMode) -> usize {
        let colored = 4 * (1 + 18 + 2 + 2 + 2);
        match mode {
            GameMode::Normal2P | GameMode::Normal3P => colored + 4 + 4,
            GameMode::Impossible => colored + 4 + 4 + 4,
        }
    }

    /// Build the deck for `mode`, in a fixed order, ids `0..n`.
    #[must_use]
    pub fn unshuffled(mode: GameMode) -> Vec<Card> {
        let impossible = mode.is_impossible();
        let mut deck = Vec::with_capacity(Self::deck_size(mode));
        let mut push = |color: Color, kind: CardKind| {
            let id = CardId::new(deck.len() as u32);
            deck.push(Card::new(id, color, kind));
        };

        for color in Color::BASE {
            push(color, CardKind::Number(0));
            for n in 1..=9 {
                push(color, CardKind::Number(n));
                push(color, CardKind::Number(n));
            }
            for _ in 0..2 {
                push(color, CardKind::Skip);
                push(color, CardKind::Reverse);
                push(color, if impossible { CardKind::Draw6 } else { CardKind::Draw2 });
            }
        }

        for _ in 0..4 {
            push(Color::Black, CardKind::Wild);
            if impossible {
                push(Color::Black, CardKind::Wild10);
                push(Color::Black, CardKind::Minus4);
            } else {
                push(Color::Black, CardKind::Wild4);
            }
        }

        deck
    }

    /// Build and uniformly shuffle the deck for `mode`.
    #[must_use]
    pub fn generate(mode: GameMode, rng: &mut GameRng) -> Vec<Card> {
        let mut deck = Self::unshuffled(mode);
        rng.shuffle(&mut deck);
        deck
    }

    /// Shuffle a fresh deck and deal a round.
    ///
    /// Each seat receives `hand_size` cards in seat order from the top of
    /// the pile. The opener is then turned; Wild4, Wild10 and Minus4 go back
    /// to the bottom of the pile until an allowed card comes up. A plain Wild
    /// opener leaves the configured fallback colour current.
    pub fn deal(config: GameConfig, mut rng: GameRng) -> Result<GameState, ConfigError> {
        config.validate()?;
        let deck = Self::generate(config.mode, &mut rng);
        Self::deal_from(config, deck, rng)
    }

    /// Deal a round from an already ordered deck (last element is the top).
    pub fn deal_from(
        config: GameConfig,
        deck: Vec<Card>,
        rng: GameRng,
    ) -> Result<GameState, ConfigError> {
        let needed = config.player_count() * config.hand_size + 1;
        if deck.len() < needed {
            return Err(ConfigError::DeckTooSmall {
                deck: deck.len(),
                needed,
            });
        }
        let mut pile: Vector<Card> = deck.into_iter().collect();

        let mut players = Vector::new();
        for (i, seat) in config.seats.iter().enumerate() {
            let mut player = Player::new(PlayerId::new(i as u8), seat.name.clone(), seat.is_bot);
            for card in pile.split_off(pile.len() - config.hand_size).into_iter().rev() {
                player.hand.push_back(card);
            }
            players.push_back(player);
        }

        let mut opener = pile.pop_back().ok_or(ConfigError::DeckTooSmall {
            deck: needed - 1,
            needed,
        })?;
        // Bounded so a pile made only of forbidden openers still terminates
        for _ in 0..pile.len() {
            if !opener.kind.is_forbidden_opener() {
                break;
            }
            pile.push_front(opener);
            if let Some(next) = pile.pop_back() {
                opener = next;
            }
        }

        let color = if opener.is_wild() {
            config.fallback_color
        } else {
            opener.color
        };

        debug!(
            "dealt {} round: {} seats, opener {}, {} cards left",
            config.mode,
            players.len(),
            opener,
            pile.len()
        );

        Ok(GameState::dealt(config, players, pile, opener, color, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    fn count(deck: &[Card], pred: impl Fn(&Card) -> bool) -> usize {
        deck.iter().filter(|c| pred(c)).count()
    }

    #[test]
    fn test_normal_deck_composition() {
        let deck = DeckFactory::unshuffled(GameMode::Normal2P);

        assert_eq!(deck.len(), 108);
        assert_eq!(deck.len(), DeckFactory::deck_size(GameMode::Normal3P));
        for color in Color::BASE {
            assert_eq!(count(&deck, |c| c.color == color), 25);
            assert_eq!(count(&deck, |c| c.color == color && c.kind == CardKind::Number(0)), 1);
            assert_eq!(count(&deck, |c| c.color == color && c.kind == CardKind::Number(7)), 2);
            assert_eq!(count(&deck, |c| c.color == color && c.kind == CardKind::Draw2), 2);
        }
        assert_eq!(count(&deck, |c| c.kind == CardKind::Wild), 4);
        assert_eq!(count(&deck, |c| c.kind == CardKind::Wild4), 4);
        assert_eq!(count(&deck, |c| c.kind == CardKind::Draw6), 0);
        assert_eq!(count(&deck, |c| c.kind == CardKind::Minus4), 0);
    }

    #[test]
    fn test_impossible_deck_composition() {
        let deck = DeckFactory::unshuffled(GameMode::Impossible);

        assert_eq!(deck.len(), 112);
        assert_eq!(deck.len(), DeckFactory::deck_size(GameMode::Impossible));
        assert_eq!(count(&deck, |c| c.kind == CardKind::Draw6), 8);
        assert_eq!(count(&deck, |c| c.kind == CardKind::Draw2), 0);
        assert_eq!(count(&deck, |c| c.kind == CardKind::Wild), 4);
        assert_eq!(count(&deck, |c| c.kind == CardKind::Wild10), 4);
        assert_eq!(count(&deck, |c| c.kind == CardKind::Minus4), 4);
        assert_eq!(count(&deck, |c| c.kind == CardKind::Wild4), 0);
    }

    #[test]
    fn test_ids_are_unique_and_dense() {
        let deck = DeckFactory::unshuffled(GameMode::Impossible);
        let ids: FxHashSet<_> = deck.iter().map(|c| c.id.raw()).collect();

        assert_eq!(ids.len(), deck.len());
        assert!(ids.iter().all(|&id| (id as usize) < deck.len()));
    }

    #[test]
    fn test_generate_is_shuffled_and_deterministic() {
        let a = DeckFactory::generate(GameMode::Normal2P, &mut GameRng::new(5));
        let b = DeckFactory::generate(GameMode::Normal2P, &mut GameRng::new(5));
        let c = DeckFactory::generate(GameMode::Normal2P, &mut GameRng::new(6));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, DeckFactory::unshuffled(GameMode::Normal2P));
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // Position of card 0 over many shuffles should spread across the deck
        let mut rng = GameRng::new(99);
        let mut first_half = 0;
        for _ in 0..400 {
            let deck = DeckFactory::generate(GameMode::Normal2P, &mut rng);
            let pos = deck.iter().position(|c| c.id == CardId(0)).unwrap();
            if pos < deck.len() / 2 {
                first_half += 1;
            }
        }
        assert!((140..=260).contains(&first_half), "first half hits: {first_half}");
    }

    fn card(id: u32, color: Color, kind: CardKind) -> Card {
        Card::new(CardId(id), color, kind)
    }

    #[test]
    fn test_deal_hands_and_opener() {
        let config = GameConfig::for_mode(GameMode::Normal3P);
        let state = DeckFactory::deal(config, GameRng::new(42)).unwrap();

        assert_eq!(state.player_count(), 3);
        for player in state.players() {
            assert_eq!(player.hand.len(), 7);
        }
        assert_eq!(state.discard_pile().len(), 1);
        assert_eq!(state.draw_pile().len(), 108 - 21 - 1);
        assert_eq!(state.current_player(), PlayerId::new(0));
        assert!(state.current_color().is_base());
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_deal_order_is_deterministic() {
        let config = GameConfig::for_mode(GameMode::Normal2P);
        let deck = DeckFactory::unshuffled(GameMode::Normal2P);
        let top = *deck.last().unwrap();

        let state = DeckFactory::deal_from(config, deck, GameRng::new(1)).unwrap();

        // Seat 0 receives the top card first
        assert_eq!(state.hand(PlayerId::new(0)).unwrap()[0], top);
    }

    #[test]
    fn test_forbidden_opener_goes_to_bottom() {
        let config = GameConfig::for_mode(GameMode::Normal2P).with_hand_size(1);
        let deck = vec![
            card(0, Color::Red, CardKind::Number(5)),
            card(1, Color::Black, CardKind::Wild4),
            card(2, Color::Blue, CardKind::Number(1)),
            card(3, Color::Green, CardKind::Number(2)),
        ];

        let state = DeckFactory::deal_from(config, deck, GameRng::new(1)).unwrap();

        assert_eq!(state.hand(PlayerId::new(0)).unwrap()[0].id, CardId(3));
        assert_eq!(state.hand(PlayerId::new(1)).unwrap()[0].id, CardId(2));
        assert_eq!(state.top_card().map(|c| c.id), Some(CardId(0)));
        assert_eq!(state.current_color(), Color::Red);
        assert_eq!(state.draw_pile().front().map(|c| c.id), Some(CardId(1)));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_wild_opener_uses_fallback_color() {
        let config = GameConfig::for_mode(GameMode::Normal2P)
            .with_hand_size(1)
            .with_fallback_color(Color::Green);
        let deck = vec![
            card(0, Color::Red, CardKind::Number(5)),
            card(1, Color::Black, CardKind::Wild),
            card(2, Color::Blue, CardKind::Number(1)),
            card(3, Color::Yellow, CardKind::Number(2)),
        ];

        let state = DeckFactory::deal_from(config, deck, GameRng::new(1)).unwrap();

        assert_eq!(state.top_card().map(|c| c.kind), Some(CardKind::Wild));
        assert_eq!(state.current_color(), Color::Green);
    }

    #[test]
    fn test_deal_from_short_deck() {
        let config = GameConfig::for_mode(GameMode::Normal2P).with_hand_size(2);
        let deck = vec![card(0, Color::Red, CardKind::Number(5))];

        let result = DeckFactory::deal_from(config, deck, GameRng::new(1));
        assert_eq!(result.unwrap_err(), ConfigError::DeckTooSmall { deck: 1, needed: 5 });
    }

    #[test]
    fn test_every_mode_deals_valid_rounds() {
        for mode in [GameMode::Normal2P, GameMode::Normal3P, GameMode::Impossible] {
            for seed in 0..20 {
                let state = DeckFactory::deal(GameConfig::for_mode(mode), GameRng::new(seed)).unwrap();
                assert!(state.check_invariants().is_ok(), "{mode} seed {seed}");
                assert_eq!(state.deck_size(), DeckFactory::deck_size(mode));
                assert!(!state.top_card().unwrap().kind.is_forbidden_opener());
            }
        }
    }
}
