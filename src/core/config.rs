//! Game configuration types.
//!
//! A round is configured before the deal by a `GameConfig`:
//! - `GameMode`: which deck and which bot policy
//! - `SeatConfig`: who sits at the table
//! - house-rule knobs (hand size, declaration penalty, ...)
//!
//! `GameConfig::for_mode` gives the three presets of the game.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cards::{Color, DeckFactory};

/// Rule variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// One human against one bot.
    Normal2P,
    /// One human against two bots.
    Normal3P,
    /// Amplified attack cards, three seats, ruthless bots.
    Impossible,
}

impl GameMode {
    #[must_use]
    pub const fn is_impossible(self) -> bool {
        matches!(self, GameMode::Impossible)
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GameMode::Normal2P => "2P",
            GameMode::Normal3P => "3P",
            GameMode::Impossible => "IMPOSSIBLE",
        })
    }
}

/// One seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatConfig {
    pub name: String,
    pub is_bot: bool,
}

impl SeatConfig {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_bot: false,
        }
    }

    pub fn bot(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_bot: true,
        }
    }
}

/// Complete round configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,

    /// Seats in turn order; seat 0 opens.
    pub seats: Vec<SeatConfig>,

    /// Cards dealt to each seat.
    pub hand_size: usize,

    /// Cards drawn for playing down to one card without declaring.
    pub declaration_penalty: usize,

    /// Chance that a casual bot forgets to declare its last card.
    pub forget_probability: f64,

    /// Current colour when the opener is a plain Wild.
    pub fallback_color: Color,
}

impl GameConfig {
    /// Preset table for a mode.
    #[must_use]
    pub fn for_mode(mode: GameMode) -> Self {
        let seats = match mode {
            GameMode::Normal2P => vec![SeatConfig::human("You"), SeatConfig::bot("Bot 1")],
            GameMode::Normal3P => vec![
                SeatConfig::human("You"),
                SeatConfig::bot("Bot 1"),
                SeatConfig::bot("Bot 2"),
            ],
            GameMode::Impossible => vec![
                SeatConfig::human("You"),
                SeatConfig::bot("Terminator"),
                SeatConfig::bot("Destroyer"),
            ],
        };

        Self {
            mode,
            seats,
            hand_size: 7,
            declaration_penalty: 3,
            forget_probability: 0.1,
            fallback_color: Color::Red,
        }
    }

    /// Replace the seats.
    #[must_use]
    pub fn with_seats(mut self, seats: Vec<SeatConfig>) -> Self {
        self.seats = seats;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Set the missed-declaration penalty.
    #[must_use]
    pub fn with_declaration_penalty(mut self, cards: usize) -> Self {
        self.declaration_penalty = cards;
        self
    }

    /// Set the casual bot's forgetting probability.
    #[must_use]
    pub fn with_forget_probability(mut self, probability: f64) -> Self {
        self.forget_probability = probability;
        self
    }

    /// Set the colour used when a plain Wild opens the discard pile.
    #[must_use]
    pub fn with_fallback_color(mut self, color: Color) -> Self {
        self.fallback_color = color;
        self
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Check that a round can be dealt from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let seats = self.seats.len();
        if !(2..=10).contains(&seats) {
            return Err(ConfigError::SeatCount(seats));
        }
        if self.hand_size == 0 {
            return Err(ConfigError::EmptyHands);
        }

        let deck = DeckFactory::deck_size(self.mode);
        let needed = seats * self.hand_size + 1;
        if needed > deck {
            return Err(ConfigError::DeckTooSmall { deck, needed });
        }

        if !(0.0..=1.0).contains(&self.forget_probability) {
            return Err(ConfigError::ForgetProbability(self.forget_probability));
        }
        if !self.fallback_color.is_base() {
            return Err(ConfigError::FallbackColor(self.fallback_color));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let two = GameConfig::for_mode(GameMode::Normal2P);
        assert_eq!(two.player_count(), 2);
        assert!(!two.seats[0].is_bot);
        assert!(two.seats[1].is_bot);

        let three = GameConfig::for_mode(GameMode::Normal3P);
        assert_eq!(three.player_count(), 3);

        let hard = GameConfig::for_mode(GameMode::Impossible);
        assert_eq!(hard.player_count(), 3);
        assert_eq!(hard.seats[1].name, "Terminator");
        assert_eq!(hard.seats[2].name, "Destroyer");
    }

    #[test]
    fn test_defaults() {
        let config = GameConfig::for_mode(GameMode::Normal3P);
        assert_eq!(config.hand_size, 7);
        assert_eq!(config.declaration_penalty, 3);
        assert_eq!(config.fallback_color, Color::Red);
        assert!((config.forget_probability - 0.1).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::for_mode(GameMode::Normal2P)
            .with_hand_size(5)
            .with_declaration_penalty(2)
            .with_forget_probability(0.0)
            .with_fallback_color(Color::Blue);

        assert_eq!(config.hand_size, 5);
        assert_eq!(config.declaration_penalty, 2);
        assert_eq!(config.fallback_color, Color::Blue);
    }

    #[test]
    fn test_validate_seat_count() {
        let config = GameConfig::for_mode(GameMode::Normal2P)
            .with_seats(vec![SeatConfig::human("Solo")]);
        assert_eq!(config.validate(), Err(ConfigError::SeatCount(1)));
    }

    #[test]
    fn test_validate_deck_too_small() {
        let config = GameConfig::for_mode(GameMode::Normal3P).with_hand_size(40);
        assert!(matches!(config.validate(), Err(ConfigError::DeckTooSmall { .. })));
    }

    #[test]
    fn test_validate_probability() {
        let config = GameConfig::for_mode(GameMode::Normal2P).with_forget_probability(1.5);
        assert_eq!(config.validate(), Err(ConfigError::ForgetProbability(1.5)));
    }

    #[test]
    fn test_validate_black_fallback() {
        let config = GameConfig::for_mode(GameMode::Normal2P).with_fallback_color(Color::Black);
        assert_eq!(config.validate(), Err(ConfigError::FallbackColor(Color::Black)));
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(GameMode::Impossible.to_string(), "IMPOSSIBLE");
        assert_eq!(GameMode::Normal2P.to_string(), "2P");
    }
}
