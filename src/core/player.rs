//! Player identification and per-seat state.
//!
//! ## PlayerId
//!
//! Type-safe seat index. `PlayerId(i)` always refers to `players[i]` of the
//! round, so it doubles as the turn index.
//!
//! ## Player
//!
//! Name, bot flag and hand. Hands use `im::Vector` so a snapshot clone
//! shares structure with its predecessor.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

/// Seat identifier; player indices are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Seat index, also the position in `GameState::players`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Seat reached by moving `steps` seats in `direction` (+1 or -1),
    /// wrapped into `0..player_count`.
    #[must_use]
    pub fn offset(self, direction: i8, steps: usize, player_count: usize) -> PlayerId {
        let n = player_count as i64;
        let raw = self.0 as i64 + direction as i64 * steps as i64;
        PlayerId(raw.rem_euclid(n) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Insertion order; stable for the UI, not meaningful to the rules.
    pub hand: Vector<Card>,
    pub is_bot: bool,
}

impl Player {
    /// Create a player with an empty hand.
    pub fn new(id: PlayerId, name: impl Into<String>, is_bot: bool) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vector::new(),
            is_bot,
        }
    }

    /// Number of cards held.
    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    /// Find a card in hand by id.
    #[must_use]
    pub fn find_card(&self, card: CardId) -> Option<Card> {
        self.hand.iter().find(|c| c.id == card).copied()
    }

    /// Remove a card from hand.
    ///
    /// Returns the removed card, or `None` if it was not held.
    pub fn remove_card(&mut self, card: CardId) -> Option<Card> {
        let pos = self.hand.iter().position(|c| c.id == card)?;
        Some(self.hand.remove(pos))
    }

    /// Sum of the point values in hand.
    #[must_use]
    pub fn hand_points(&self) -> u32 {
        self.hand.iter().map(Card::points).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardKind, Color};

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_offset_wraps_both_ways() {
        let p0 = PlayerId::new(0);
        let p2 = PlayerId::new(2);

        assert_eq!(p0.offset(1, 1, 3), PlayerId::new(1));
        assert_eq!(p0.offset(-1, 1, 3), PlayerId::new(2));
        assert_eq!(p2.offset(1, 1, 3), PlayerId::new(0));
        assert_eq!(p2.offset(1, 2, 3), PlayerId::new(1));
        assert_eq!(p0.offset(-1, 2, 3), PlayerId::new(1));
        // Two steps in a two-seat game come back around
        assert_eq!(p0.offset(1, 2, 2), p0);
        assert_eq!(p0.offset(-1, 2, 2), p0);
    }

    #[test]
    fn test_hand_operations() {
        let mut player = Player::new(PlayerId::new(0), "You", false);
        player.hand.push_back(Card::new(CardId(1), Color::Red, CardKind::Number(5)));
        player.hand.push_back(Card::new(CardId(2), Color::Blue, CardKind::Skip));

        assert_eq!(player.hand_size(), 2);
        assert_eq!(player.hand_points(), 25);
        assert!(player.find_card(CardId(2)).is_some());

        let removed = player.remove_card(CardId(1));
        assert_eq!(removed.map(|c| c.id), Some(CardId(1)));
        assert_eq!(player.hand_size(), 1);
        assert!(player.remove_card(CardId(99)).is_none());
    }

    #[test]
    fn test_player_serialization() {
        let mut player = Player::new(PlayerId::new(1), "Bot 1", true);
        player.hand.push_back(Card::new(CardId(4), Color::Green, CardKind::Reverse));

        let json = serde_json::to_string(&player).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(player, deserialized);
    }
}
