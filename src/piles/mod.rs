//! Draw and discard piles.
//!
//! ## Key Types
//!
//! - `DrawPileManager`: draws cards into a hand, reshuffling the discard
//!   pile (minus the active card) into a new draw pile when it runs dry
//!
//! Both piles live in `GameState` as `im::Vector`s with the top card at the
//! back. The manager never creates or destroys cards; it only moves them.

pub mod manager;

pub use manager::DrawPileManager;
