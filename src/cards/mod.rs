//! Cards and decks.
//!
//! ## Key Types
//!
//! - `CardId`: identity of one physical card within a round
//! - `Color` / `CardKind`: what is printed on the face
//! - `Card`: id, colour and kind together; immutable once dealt
//! - `DeckFactory`: builds the per-mode deck and deals a round
//!
//! ## Wild Cards
//!
//! Wilds carry the colour `Black`, which is never a current colour. The
//! player names a base colour when playing one.

pub mod card;
pub mod deck;

pub use card::{Card, CardId, CardKind, Color};
pub use deck::DeckFactory;
