//! Game state: the single authoritative snapshot of a round.
//!
//! ## GameState
//!
//! Everything a round needs lives here:
//! - Draw pile and discard pile (top = back of the vector)
//! - Seats with their hands
//! - Turn index, direction, current colour, turn phase
//! - The "last card" declaration flag
//! - Purged cards, event log, action history
//! - The round's RNG
//!
//! Uses `im` persistent data structures so that cloning a snapshot is O(1).
//! Engine operations take `&GameState` and return a fresh snapshot; the
//! caller's copy is never touched, which is what makes rejected commands
//! side-effect free.
//!
//! ## Position
//!
//! A plain description of a mid-round table (hands, piles, turn), used to
//! restore a round at an arbitrary point via `GameState::from_position`.

use im::{OrdSet, Vector};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::{GameConfig, GameMode};
use super::error::InvariantViolation;
use super::event::GameEvent;
use super::player::{Player, PlayerId};
use super::rng::GameRng;
use crate::cards::{Card, CardId, Color};

/// Play direction around the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing seat index (+1).
    #[default]
    Forward,
    /// Decreasing seat index (-1).
    Backward,
}

impl Direction {
    /// +1 or -1.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Sub-state of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the seat at `turn_index` to act.
    Playing,
    /// A wild card was played without a colour; only `choose_color` from
    /// `player` is accepted until the play completes.
    AwaitingColor { player: PlayerId, card: CardId },
    /// Terminal. No further commands are accepted.
    GameOver { winner: PlayerId },
}

/// Mid-round table layout for `GameState::from_position`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// One hand per seat of the config, in seat order.
    pub hands: Vec<Vec<Card>>,
    /// Top of the pile is the last element.
    pub draw_pile: Vec<Card>,
    /// Active card is the last element.
    pub discard_pile: Vec<Card>,
    pub current_color: Color,
    pub turn: PlayerId,
    pub direction: Direction,
}

/// Full round state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    config: GameConfig,

    /// Every card id dealt into this round.
    deck: OrdSet<CardId>,

    draw_pile: Vector<Card>,
    discard_pile: Vector<Card>,
    players: Vector<Player>,

    turn_index: PlayerId,
    direction: Direction,
    current_color: Color,
    phase: TurnPhase,

    /// Armed by the seat on turn; cleared on every new turn and every draw.
    last_card_declared: bool,

    /// Card drawn as this turn's move, when it was playable and the seat
    /// kept the turn.
    turn_draw: Option<CardId>,

    /// Cards destroyed by Minus4.
    purged: Vector<Card>,

    turn_number: u32,
    events: Vector<GameEvent>,
    history: Vector<ActionRecord>,

    /// Deterministic RNG.
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Assemble a freshly dealt round. The deck factory is the only caller.
    pub(crate) fn dealt(
        config: GameConfig,
        players: Vector<Player>,
        draw_pile: Vector<Card>,
        opener: Card,
        current_color: Color,
        rng: GameRng,
    ) -> Self {
        let mut state = Self {
            config,
            deck: OrdSet::new(),
            draw_pile,
            discard_pile: Vector::unit(opener),
            players,
            turn_index: PlayerId::new(0),
            direction: Direction::Forward,
            current_color,
            phase: TurnPhase::Playing,
            last_card_declared: false,
            turn_draw: None,
            purged: Vector::new(),
            turn_number: 1,
            events: Vector::new(),
            history: Vector::new(),
            rng,
        };
        let deck = state.cards_in_play().map(|c| c.id).collect();
        state.deck = deck;
        state.push_event(GameEvent::RoundStarted {
            opener,
            color: current_color,
        });
        state
    }

    /// Restore a round at an arbitrary position.
    ///
    /// The cards of the position define the round's deck. The config must
    /// validate, there must be one hand per seat, and the position must
    /// satisfy every snapshot invariant.
    pub fn from_position(
        config: GameConfig,
        position: Position,
        rng: GameRng,
    ) -> Result<Self, InvariantViolation> {
        config.validate()?;
        if position.hands.len() != config.seats.len() {
            return Err(InvariantViolation::HandCount {
                seats: config.seats.len(),
                hands: position.hands.len(),
            });
        }

        let players: Vector<Player> = config
            .seats
            .iter()
            .zip(&position.hands)
            .enumerate()
            .map(|(i, (seat, hand))| {
                let mut player = Player::new(PlayerId::new(i as u8), seat.name.clone(), seat.is_bot);
                player.hand = hand.iter().copied().collect();
                player
            })
            .collect();

        let mut state = Self {
            config,
            deck: OrdSet::new(),
            draw_pile: position.draw_pile.into_iter().collect(),
            discard_pile: position.discard_pile.into_iter().collect(),
            players,
            turn_index: position.turn,
            direction: position.direction,
            current_color: position.current_color,
            phase: TurnPhase::Playing,
            last_card_declared: false,
            turn_draw: None,
            purged: Vector::new(),
            turn_number: 1,
            events: Vector::new(),
            history: Vector::new(),
            rng,
        };

        let mut seen = FxHashSet::default();
        for card in state.cards_in_play() {
            if !seen.insert(card.id) {
                return Err(InvariantViolation::DuplicateCard(card.id));
            }
        }
        state.deck = seen.into_iter().collect();
        state.check_invariants()?;
        Ok(state)
    }

    /// Describe the current table as a `Position`.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            hands: self
                .players
                .iter()
                .map(|p| p.hand.iter().copied().collect())
                .collect(),
            draw_pile: self.draw_pile.iter().copied().collect(),
            discard_pile: self.discard_pile.iter().copied().collect(),
            current_color: self.current_color,
            turn: self.turn_index,
            direction: self.direction,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn players(&self) -> &Vector<Player> {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// A seat's hand.
    #[must_use]
    pub fn hand(&self, id: PlayerId) -> Option<&Vector<Card>> {
        self.player(id).map(|p| &p.hand)
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn_index
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn current_color(&self) -> Color {
        self.current_color
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some()
    }

    /// Has the seat on turn declared its last card?
    #[must_use]
    pub fn last_card_declared(&self) -> bool {
        self.last_card_declared
    }

    /// Card drawn as this turn's move, if the seat kept the turn.
    #[must_use]
    pub fn turn_draw(&self) -> Option<CardId> {
        self.turn_draw
    }

    /// The active card.
    #[must_use]
    pub fn top_card(&self) -> Option<Card> {
        self.discard_pile.back().copied()
    }

    #[must_use]
    pub fn draw_pile(&self) -> &Vector<Card> {
        &self.draw_pile
    }

    #[must_use]
    pub fn discard_pile(&self) -> &Vector<Card> {
        &self.discard_pile
    }

    #[must_use]
    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    #[must_use]
    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards destroyed by Minus4 this round.
    #[must_use]
    pub fn purged(&self) -> &Vector<Card> {
        &self.purged
    }

    /// Number of cards the round was dealt with.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.len()
    }

    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn events(&self) -> &Vector<GameEvent> {
        &self.events
    }

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    /// Message for an event, with seats called by name.
    #[must_use]
    pub fn message(&self, event: &GameEvent) -> String {
        event.describe(|id| {
            self.player(id)
                .map_or_else(|| id.to_string(), |p| p.name.clone())
        })
    }

    /// The newest status message.
    #[must_use]
    pub fn last_message(&self) -> Option<String> {
        self.events.back().map(|e| self.message(e))
    }

    /// Every card still in play: draw pile, discard pile, then hands.
    pub fn cards_in_play(&self) -> impl Iterator<Item = &Card> + '_ {
        self.draw_pile
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.players.iter().flat_map(|p| p.hand.iter()))
    }

    // === Invariants ===

    /// Verify every snapshot invariant.
    ///
    /// A failure means the engine has a bug; the round cannot continue.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut seen = FxHashSet::default();
        for card in self.cards_in_play().chain(self.purged.iter()) {
            if !self.deck.contains(&card.id) {
                return Err(InvariantViolation::ForeignCard(card.id));
            }
            if !seen.insert(card.id) {
                return Err(InvariantViolation::DuplicateCard(card.id));
            }
        }
        if seen.len() != self.deck.len() {
            return Err(InvariantViolation::CardCount {
                expected: self.deck.len(),
                found: seen.len(),
            });
        }

        if self.discard_pile.is_empty() {
            return Err(InvariantViolation::EmptyDiscard);
        }
        if !self.current_color.is_base() {
            return Err(InvariantViolation::CurrentColor(self.current_color));
        }
        if self.turn_index.index() >= self.players.len() {
            return Err(InvariantViolation::TurnIndex {
                turn: self.turn_index.index(),
                players: self.players.len(),
            });
        }
        if let Some(winner) = self.winner() {
            if self.player(winner).map_or(true, |p| !p.hand.is_empty()) {
                return Err(InvariantViolation::WinnerHoldsCards(winner));
            }
        }

        Ok(())
    }

    // === Engine-side mutation (on a working copy) ===

    pub(crate) fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }

    pub(crate) fn draw_pile_mut(&mut self) -> &mut Vector<Card> {
        &mut self.draw_pile
    }

    pub(crate) fn discard_pile_mut(&mut self) -> &mut Vector<Card> {
        &mut self.discard_pile
    }

    pub(crate) fn set_current_color(&mut self, color: Color) {
        self.current_color = color;
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub(crate) fn set_phase(&mut self, phase: TurnPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_last_card_declared(&mut self, declared: bool) {
        self.last_card_declared = declared;
    }

    pub(crate) fn set_turn_draw(&mut self, card: Option<CardId>) {
        self.turn_draw = card;
    }

    pub(crate) fn purge(&mut self, card: Card) {
        self.purged.push_back(card);
    }

    /// Hand the turn to `next`, resetting per-turn state.
    pub(crate) fn begin_turn(&mut self, next: PlayerId) {
        self.turn_index = next;
        self.turn_number += 1;
        self.last_card_declared = false;
        self.turn_draw = None;
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }

    pub(crate) fn record_action(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }
}
