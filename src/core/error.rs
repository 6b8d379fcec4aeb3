//! Error types.
//!
//! - `MoveError`: a command was rejected. Recoverable; the caller's snapshot
//!   is untouched because every command produces a new snapshot.
//! - `ConfigError`: a `GameConfig` cannot start a round.
//! - `InvariantViolation`: the snapshot itself is corrupt. Never produced by
//!   a correct engine; the round must be discarded.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::{CardId, Color};

/// Why a command was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the round is over")]
    GameOver,

    #[error("{player} cannot act: it is {current}'s turn")]
    NotYourTurn { player: PlayerId, current: PlayerId },

    #[error("no such player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("{player} does not hold {card}")]
    CardNotInHand { player: PlayerId, card: CardId },

    #[error("{card} does not match the current colour or the active card")]
    IllegalMove { card: CardId },

    #[error("{player} must choose a colour first")]
    AwaitingColorChoice { player: PlayerId },

    #[error("there is no wild card waiting for a colour")]
    NoPendingColorChoice,

    #[error("only the card just drawn ({card}) may be played")]
    MustPlayDrawnCard { card: CardId },

    #[error("{0} already drew this turn")]
    AlreadyDrew(PlayerId),

    #[error("{0} must draw before passing")]
    HasNotDrawn(PlayerId),

    #[error("{0} is not a playable colour")]
    ChosenColorNotBase(Color),
}

/// Why a configuration was rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("a round needs 2 to 10 seats, got {0}")]
    SeatCount(usize),

    #[error("hand size must be at least 1")]
    EmptyHands,

    #[error("a deck of {deck} cards cannot deal {needed} cards plus an opener")]
    DeckTooSmall { deck: usize, needed: usize },

    #[error("forget probability {0} is outside [0, 1]")]
    ForgetProbability(f64),

    #[error("fallback colour {0} is not a base colour")]
    FallbackColor(Color),
}

/// A broken snapshot invariant. Fatal: requires a full reset.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("position has {hands} hands for {seats} seats")]
    HandCount { seats: usize, hands: usize },

    #[error("{0} appears more than once")]
    DuplicateCard(CardId),

    #[error("{0} is not part of this round's deck")]
    ForeignCard(CardId),

    #[error("expected {expected} cards in play or purged, found {found}")]
    CardCount { expected: usize, found: usize },

    #[error("the discard pile is empty")]
    EmptyDiscard,

    #[error("current colour {0} is not a base colour")]
    CurrentColor(Color),

    #[error("turn index {turn} is outside 0..{players}")]
    TurnIndex { turn: usize, players: usize },

    #[error("{0} won while still holding cards")]
    WinnerHoldsCards(PlayerId),
}
