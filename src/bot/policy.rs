//! Bot decision policies.
//!
//! Randomness comes from a side stream of the round's RNG keyed on the seat
//! and turn (`GameRng::side_stream`), so deciding never advances the round's
//! own stream and the same snapshot always yields the same decision.

use im::Vector;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, CardKind, Color};
use crate::core::{GameConfig, GameRng, GameState};
use crate::rules::CardMatchRule;

/// What a bot wants to do with its turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotDecision {
    /// Card to play; `None` means draw.
    pub card: Option<CardId>,
    /// Colour to name when `card` is wild.
    pub color: Option<Color>,
    /// Declare "last card" before playing.
    pub declare: bool,
}

impl BotDecision {
    /// No legal card: draw.
    #[must_use]
    pub const fn draw() -> Self {
        Self {
            card: None,
            color: None,
            declare: false,
        }
    }

    /// Is this a draw?
    #[must_use]
    pub const fn is_draw(&self) -> bool {
        self.card.is_none()
    }
}

/// A bot's decision function.
pub trait BotPolicy {
    /// Choose a play for the seat on turn, holding `hand`.
    fn choose_move(&self, hand: &Vector<Card>, state: &GameState) -> BotDecision;

    /// Name the colour for a wild card waiting on a choice.
    fn choose_color(&self, hand: &Vector<Card>, state: &GameState) -> Color;
}

/// The policy a round's bots play with.
#[must_use]
pub fn policy_for(config: &GameConfig) -> Box<dyn BotPolicy> {
    if config.mode.is_impossible() {
        Box::new(RuthlessBot)
    } else {
        Box::new(CasualBot::new(config.forget_probability))
    }
}

/// Side stream for one decision of the seat on turn.
fn decision_rng(state: &GameState) -> GameRng {
    let label = format!("bot/{}/{}", state.current_player().0, state.turn_number());
    state.rng().side_stream(&label)
}

/// Normal-mode bot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CasualBot {
    /// Chance of not declaring when about to hold one card.
    pub forget_probability: f64,
}

impl CasualBot {
    #[must_use]
    pub fn new(forget_probability: f64) -> Self {
        Self {
            forget_probability: forget_probability.clamp(0.0, 1.0),
        }
    }
}

impl BotPolicy for CasualBot {
    fn choose_move(&self, hand: &Vector<Card>, state: &GameState) -> BotDecision {
        let Some(card) = CardMatchRule::legal_cards(state, hand).next().copied() else {
            trace!("{}: nothing playable, drawing", state.current_player());
            return BotDecision::draw();
        };

        let mut rng = decision_rng(state);
        let color = card
            .is_wild()
            .then(|| Color::BASE[rng.below(Color::BASE.len())]);
        let declare = hand.len() == 2 && !rng.chance(self.forget_probability);

        trace!(
            "{}: casual play {card}, colour {color:?}, declare {declare}",
            state.current_player()
        );
        BotDecision {
            card: Some(card.id),
            color,
            declare,
        }
    }

    fn choose_color(&self, _hand: &Vector<Card>, state: &GameState) -> Color {
        let mut rng = decision_rng(state);
        Color::BASE[rng.below(Color::BASE.len())]
    }
}

/// Impossible-mode bot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuthlessBot;

impl RuthlessBot {
    /// Preferred kinds, strongest first.
    pub const PRIORITY: [CardKind; 4] = [
        CardKind::Wild10,
        CardKind::Draw6,
        CardKind::Skip,
        CardKind::Minus4,
    ];

    /// The base colour held most often, ignoring `except`. Ties go to the
    /// first colour of `Color::BASE`.
    #[must_use]
    pub fn dominant_color(hand: &Vector<Card>, except: Option<CardId>) -> Color {
        let mut best = (Color::BASE[0], 0);
        for color in Color::BASE {
            let count = hand
                .iter()
                .filter(|c| Some(c.id) != except && c.color == color)
                .count();
            if count > best.1 {
                best = (color, count);
            }
        }
        best.0
    }
}

impl BotPolicy for RuthlessBot {
    fn choose_move(&self, hand: &Vector<Card>, state: &GameState) -> BotDecision {
        let legal: Vec<Card> = CardMatchRule::legal_cards(state, hand).copied().collect();
        let chosen = Self::PRIORITY
            .iter()
            .find_map(|kind| legal.iter().find(|c| c.kind == *kind))
            .or_else(|| legal.first())
            .copied();

        let Some(card) = chosen else {
            trace!("{}: nothing playable, drawing", state.current_player());
            return BotDecision::draw();
        };

        let color = card
            .is_wild()
            .then(|| Self::dominant_color(hand, Some(card.id)));
        let declare = hand.len() == 2;

        trace!(
            "{}: ruthless play {card}, colour {color:?}, declare {declare}",
            state.current_player()
        );
        BotDecision {
            card: Some(card.id),
            color,
            declare,
        }
    }

    fn choose_color(&self, hand: &Vector<Card>, _state: &GameState) -> Color {
        Self::dominant_color(hand, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, GameMode, PlayerId, Position};

    fn card(id: u32, color: Color, kind: CardKind) -> Card {
        Card::new(CardId(id), color, kind)
    }

    fn table(mode: GameMode, hand: Vec<Card>, top: Card, color: Color) -> GameState {
        let config = GameConfig::for_mode(mode);
        let mut hands = vec![hand];
        for i in 1..config.player_count() {
            hands.push(vec![card(200 + i as u32, Color::Blue, CardKind::Number(3))]);
        }
        let position = Position {
            hands,
            draw_pile: (0..10).map(|i| card(i, Color::Yellow, CardKind::Number(1))).collect(),
            discard_pile: vec![top],
            current_color: color,
            turn: PlayerId::new(0),
            direction: Direction::Forward,
        };
        GameState::from_position(config, position, GameRng::new(11)).unwrap()
    }

    fn hand(state: &GameState) -> Vector<Card> {
        state.hand(PlayerId::new(0)).cloned().unwrap_or_default()
    }

    #[test]
    fn test_casual_plays_first_legal() {
        let state = table(
            GameMode::Normal3P,
            vec![
                card(50, Color::Green, CardKind::Number(4)),
                card(51, Color::Red, CardKind::Number(2)),
                card(52, Color::Red, CardKind::Skip),
            ],
            card(300, Color::Red, CardKind::Number(9)),
            Color::Red,
        );
        let decision = CasualBot::new(0.0).choose_move(&hand(&state), &state);

        assert_eq!(decision.card, Some(CardId(51)));
        assert_eq!(decision.color, None);
        assert!(!decision.declare);
    }

    #[test]
    fn test_casual_draws_without_legal_card() {
        let state = table(
            GameMode::Normal2P,
            vec![card(50, Color::Green, CardKind::Number(4))],
            card(300, Color::Red, CardKind::Number(9)),
            Color::Red,
        );
        let decision = CasualBot::new(0.1).choose_move(&hand(&state), &state);

        assert!(decision.is_draw());
        assert_eq!(decision, BotDecision::draw());
    }

    #[test]
    fn test_casual_names_a_base_color_for_wild() {
        let state = table(
            GameMode::Normal2P,
            vec![card(50, Color::Black, CardKind::Wild), card(51, Color::Green, CardKind::Number(4))],
            card(300, Color::Red, CardKind::Number(9)),
            Color::Red,
        );
        let decision = CasualBot::new(0.0).choose_move(&hand(&state), &state);

        assert_eq!(decision.card, Some(CardId(50)));
        assert!(decision.color.map_or(false, Color::is_base));
        assert!(decision.declare);
    }

    #[test]
    fn test_casual_forgetting_extremes() {
        let state = table(
            GameMode::Normal2P,
            vec![card(50, Color::Red, CardKind::Number(4)), card(51, Color::Green, CardKind::Number(4))],
            card(300, Color::Red, CardKind::Number(9)),
            Color::Red,
        );
        let hand = hand(&state);

        assert!(!CasualBot::new(1.0).choose_move(&hand, &state).declare);
        assert!(CasualBot::new(0.0).choose_move(&hand, &state).declare);
    }

    #[test]
    fn test_casual_decision_is_repeatable() {
        let state = table(
            GameMode::Normal2P,
            vec![card(50, Color::Black, CardKind::Wild), card(51, Color::Green, CardKind::Number(4))],
            card(300, Color::Red, CardKind::Number(9)),
            Color::Red,
        );
        let bot = CasualBot::new(0.5);
        let before = state.rng().state();

        let first = bot.choose_move(&hand(&state), &state);
        let second = bot.choose_move(&hand(&state), &state);

        assert_eq!(first, second);
        assert_eq!(state.rng().state(), before);
    }

    #[test]
    fn test_ruthless_attack_priority() {
        let state = table(
            GameMode::Impossible,
            vec![
                card(50, Color::Red, CardKind::Number(2)),
                card(51, Color::Black, CardKind::Minus4),
                card(52, Color::Red, CardKind::Skip),
                card(53, Color::Red, CardKind::Draw6),
            ],
            card(300, Color::Red, CardKind::Number(9)),
            Color::Red,
        );
        let decision = RuthlessBot.choose_move(&hand(&state), &state);
        assert_eq!(decision.card, Some(CardId(53)));

        let state = table(
            GameMode::Impossible,
            vec![card(53, Color::Red, CardKind::Draw6), card(54, Color::Black, CardKind::Wild10)],
            card(300, Color::Red, CardKind::Number(9)),
            Color::Red,
        );
        let decision = RuthlessBot.choose_move(&hand(&state), &state);
        assert_eq!(decision.card, Some(CardId(54)));
        assert_eq!(decision.color, Some(Color::Red));
        assert!(decision.declare);
    }

    #[test]
    fn test_ruthless_falls_back_to_first_legal() {
        let state = table(
            GameMode::Impossible,
            vec![
                card(50, Color::Blue, CardKind::Skip),
                card(51, Color::Red, CardKind::Number(2)),
                card(52, Color::Red, CardKind::Reverse),
            ],
            card(300, Color::Red, CardKind::Number(9)),
            Color::Red,
        );
        let decision = RuthlessBot.choose_move(&hand(&state), &state);
        assert_eq!(decision.card, Some(CardId(51)));
    }

    #[test]
    fn test_dominant_color_ties_and_exclusion() {
        let hand: Vector<Card> = vec![
            card(1, Color::Green, CardKind::Number(1)),
            card(2, Color::Blue, CardKind::Number(1)),
            card(3, Color::Black, CardKind::Wild),
        ]
        .into_iter()
        .collect();

        // Blue precedes green in the base order
        assert_eq!(RuthlessBot::dominant_color(&hand, None), Color::Blue);
        assert_eq!(RuthlessBot::dominant_color(&hand, Some(CardId(2))), Color::Green);

        let wild_only: Vector<Card> = vec![card(3, Color::Black, CardKind::Wild)].into_iter().collect();
        assert_eq!(RuthlessBot::dominant_color(&wild_only, None), Color::Red);
    }

    #[test]
    fn test_policy_for_mode() {
        let state = table(
            GameMode::Impossible,
            vec![card(50, Color::Red, CardKind::Number(2)), card(53, Color::Red, CardKind::Skip)],
            card(300, Color::Red, CardKind::Number(9)),
            Color::Red,
        );
        let decision = policy_for(state.config()).choose_move(&hand(&state), &state);
        assert_eq!(decision.card, Some(CardId(53)));
    }
}
