//! Card data - the immutable pieces moved around during a round.
//!
//! A `Card` is created once by the `DeckFactory` and never changes. It only
//! moves between the draw pile, the discard pile and the hands (or leaves play
//! for good when purged by a Minus4).

use serde::{Deserialize, Serialize};

/// Unique identifier of a physical card within one round.
///
/// Ids are allocated densely from 0 by the deck factory, so a deck of `n`
/// cards uses exactly `0..n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card colour. `Black` marks wild cards and is never a current colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Black,
}

impl Color {
    /// The four playable colours, in their fixed enumeration order.
    pub const BASE: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

    /// Is this one of the four base colours?
    #[must_use]
    pub const fn is_base(self) -> bool {
        !matches!(self, Color::Black)
    }

    /// Lowercase colour name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Black => "black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What a card does. A closed set: the rules table in `effects` matches
/// on it exhaustively.
///
/// Two cards have the same *value* when their kinds are equal, which is
/// what lets a red 7 be played on a blue 7 or a Skip on a Skip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Number(u8),
    Skip,
    Reverse,
    Draw2,
    Wild,
    Wild4,
    /// Impossible mode only.
    Draw6,
    /// Impossible mode only.
    Wild10,
    /// Impossible mode only: purges cards from the player's own hand.
    Minus4,
}

impl CardKind {
    /// Point value printed on the card.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            CardKind::Number(n) => n as u32,
            CardKind::Skip | CardKind::Reverse | CardKind::Draw2 => 20,
            CardKind::Wild | CardKind::Wild4 | CardKind::Draw6 | CardKind::Minus4 => 50,
            CardKind::Wild10 => 100,
        }
    }

    /// The glyph shown on the card face.
    #[must_use]
    pub fn glyph(self) -> String {
        match self {
            CardKind::Number(n) => n.to_string(),
            CardKind::Skip => "🚫".to_string(),
            CardKind::Reverse => "⇄".to_string(),
            CardKind::Draw2 => "+2".to_string(),
            CardKind::Wild => "🌈".to_string(),
            CardKind::Wild4 => "+4".to_string(),
            CardKind::Draw6 => "+6".to_string(),
            CardKind::Wild10 => "+10".to_string(),
            CardKind::Minus4 => "-4".to_string(),
        }
    }

    /// Cards that may not start the discard pile.
    #[must_use]
    pub const fn is_forbidden_opener(self) -> bool {
        matches!(self, CardKind::Wild4 | CardKind::Wild10 | CardKind::Minus4)
    }
}

/// A physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub color: Color,
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, color: Color, kind: CardKind) -> Self {
        Self { id, color, kind }
    }

    /// Wild cards are black and always playable.
    #[must_use]
    pub const fn is_wild(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    #[must_use]
    pub const fn points(&self) -> u32 {
        self.kind.points()
    }

    /// Do both cards carry the same rank or symbol?
    #[must_use]
    pub fn same_value(&self, other: &Card) -> bool {
        self.kind == other.kind
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind.glyph())
    }
}
