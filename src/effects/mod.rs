//! Card effects.
//!
//! - `Effect`: the rules table, one row per `CardKind`
//! - `EffectResolver`: binds a row to concrete seats and executes it
//!
//! ## Ordering
//!
//! Attack victims are chosen with the direction in force when the card is
//! played. Turn advancement uses the direction after any flip caused by the
//! same card.

mod effect;
mod resolver;

pub use effect::{Effect, EffectTarget};
pub use resolver::{EffectResolver, Resolution};
