//! The turn engine: every command that changes a round.
//!
//! ## Reducers
//!
//! Each command takes `&GameState` and returns a new snapshot (or a
//! `MoveError`, with the input untouched). Working copies are cheap because
//! the snapshot is built on `im`. Accepted commands are appended to the
//! round's history, so `replay` on a fresh deal reproduces a round exactly.
//!
//! ## Turn structure
//!
//! On turn a seat either plays a legal card or draws one with
//! `draw_for_turn`. A playable drawn card may be played straight away (only
//! that card) or the turn passed with `pass_turn`; an unplayable one ends the
//! turn. A wild card played without a colour puts the round in
//! `TurnPhase::AwaitingColor` until `choose_color` completes the play.
//!
//! ## Last card
//!
//! A seat holding exactly two cards that plays without having called
//! `declare_last_card` first draws the configured penalty. The penalty lands
//! before the played card resolves.

use log::{debug, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::bot::{policy_for, BotDecision};
use crate::cards::{Card, CardId, Color, DeckFactory};
use crate::core::{
    Action, ActionRecord, ConfigError, GameConfig, GameEvent, GameMode, GameRng, GameState,
    MoveError, PlayerId, TurnPhase,
};
use crate::effects::{Effect, EffectResolver};
use crate::piles::DrawPileManager;

use super::matching::CardMatchRule;

/// Outcome of a finished round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerId,
    /// Points left in each seat's hand, in seat order.
    pub hand_points: Vec<u32>,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Result of a turn draw.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnDraw {
    pub state: GameState,
    /// The card drawn, if either pile had one.
    pub card: Option<Card>,
    /// The seat kept the turn because the drawn card is playable.
    pub playable: bool,
}

/// Applies commands to rounds.
pub struct TurnEngine;

impl TurnEngine {
    // === Setup ===

    /// Deal a round of `mode` with the preset table.
    #[must_use]
    pub fn new_game(mode: GameMode, seed: u64) -> GameState {
        match Self::new_game_with_config(GameConfig::for_mode(mode), GameRng::new(seed)) {
            Ok(state) => state,
            Err(err) => unreachable!("preset configuration for {mode} is invalid: {err}"),
        }
    }

    /// Deal a round from a custom configuration.
    pub fn new_game_with_config(config: GameConfig, rng: GameRng) -> Result<GameState, ConfigError> {
        let state = DeckFactory::deal(config, rng)?;
        debug!(
            "new {} round, {} seats, opener {:?}",
            state.mode(),
            state.player_count(),
            state.top_card()
        );
        Ok(Self::commit(state))
    }

    /// Re-apply a recorded history to a fresh deal.
    pub fn replay(initial: &GameState, history: &[ActionRecord]) -> Result<GameState, MoveError> {
        history
            .iter()
            .try_fold(initial.clone(), |state, record| {
                Self::apply(&state, record.player, &record.action)
            })
    }

    // === Commands ===

    /// Single entry point for every command.
    pub fn apply(state: &GameState, player: PlayerId, action: &Action) -> Result<GameState, MoveError> {
        match *action {
            Action::Play { card, color } => Self::apply_move(state, player, card, color),
            Action::ChooseColor(color) => Self::choose_color(state, player, color),
            Action::Draw { count } => Self::draw_card(state, player, count).map(|(next, _)| next),
            Action::DrawForTurn => Self::draw_for_turn(state, player).map(|draw| draw.state),
            Action::Pass => Self::pass_turn(state, player),
            Action::DeclareLastCard => Self::declare_last_card(state, player),
            Action::Penalize => Self::penalize_missed_declaration(state, player),
        }
    }

    /// Play `card` from `player`'s hand.
    ///
    /// Wild cards take `color`; without one the round waits for
    /// `choose_color`. A colour offered with a coloured card is ignored.
    pub fn apply_move(
        state: &GameState,
        player: PlayerId,
        card: CardId,
        color: Option<Color>,
    ) -> Result<GameState, MoveError> {
        Self::check_turn(state, player)?;

        let Some(played) = state.player(player).and_then(|p| p.find_card(card)) else {
            return Err(Self::reject(MoveError::CardNotInHand { player, card }));
        };
        if let Some(drawn) = state.turn_draw() {
            if drawn != card {
                return Err(Self::reject(MoveError::MustPlayDrawnCard { card: drawn }));
            }
        }
        if !CardMatchRule::playable_on(state, &played) {
            return Err(Self::reject(MoveError::IllegalMove { card }));
        }
        let needs_color = Effect::of(&played, state.player_count()).needs_color;
        let color = if needs_color { color } else { None };
        if let Some(color) = color.filter(|c| !c.is_base()) {
            return Err(Self::reject(MoveError::ChosenColorNotBase(color)));
        }

        let mut next = state.clone();
        next.record_action(ActionRecord::new(
            player,
            Action::Play { card, color },
            state.turn_number(),
        ));

        let holding = next.hand(player).map_or(0, |h| h.len());
        if holding == 2 && !next.last_card_declared() {
            let penalty = next.config().declaration_penalty;
            let drawn = DrawPileManager::draw_into(&mut next, player, penalty);
            debug!("{player} played down to one card undeclared, +{}", drawn.len());
            next.push_event(GameEvent::DeclarationPenalty {
                player,
                cards: drawn.len(),
            });
        }

        match (needs_color, color) {
            (true, None) => {
                debug!("{player} played {played}, waiting for a colour");
                next.set_phase(TurnPhase::AwaitingColor { player, card });
            }
            (true, Some(color)) => Self::finish_play(&mut next, player, played, color),
            (false, _) => Self::finish_play(&mut next, player, played, played.color),
        }

        Ok(Self::commit(next))
    }

    /// Name the colour for a pending wild play and complete it.
    pub fn choose_color(state: &GameState, player: PlayerId, color: Color) -> Result<GameState, MoveError> {
        let pending = match state.phase() {
            TurnPhase::GameOver { .. } => return Err(Self::reject(MoveError::GameOver)),
            TurnPhase::Playing => return Err(Self::reject(MoveError::NoPendingColorChoice)),
            TurnPhase::AwaitingColor { player: owner, card } if owner == player => card,
            TurnPhase::AwaitingColor { player: owner, .. } => {
                return Err(Self::reject(MoveError::NotYourTurn { player, current: owner }));
            }
        };
        if !color.is_base() {
            return Err(Self::reject(MoveError::ChosenColorNotBase(color)));
        }
        let Some(played) = state.player(player).and_then(|p| p.find_card(pending)) else {
            return Err(Self::reject(MoveError::CardNotInHand { player, card: pending }));
        };

        let mut next = state.clone();
        next.record_action(ActionRecord::new(player, Action::ChooseColor(color), state.turn_number()));
        next.set_phase(TurnPhase::Playing);
        Self::finish_play(&mut next, player, played, color);

        Ok(Self::commit(next))
    }

    /// Raw draw of `count` cards for any seat; never changes the turn.
    pub fn draw_card(
        state: &GameState,
        player: PlayerId,
        count: usize,
    ) -> Result<(GameState, Vec<Card>), MoveError> {
        Self::check_open(state)?;
        Self::check_seat(state, player)?;

        let mut next = state.clone();
        next.record_action(ActionRecord::new(player, Action::Draw { count }, state.turn_number()));
        let drawn = DrawPileManager::draw_into(&mut next, player, count);

        Ok((Self::commit(next), drawn))
    }

    /// Draw one card as the turn's move.
    ///
    /// A playable card keeps the turn with the seat, which may then play only
    /// that card or pass. Otherwise the turn moves on.
    pub fn draw_for_turn(state: &GameState, player: PlayerId) -> Result<TurnDraw, MoveError> {
        Self::check_turn(state, player)?;
        if state.turn_draw().is_some() {
            return Err(Self::reject(MoveError::AlreadyDrew(player)));
        }

        let mut next = state.clone();
        next.record_action(ActionRecord::new(player, Action::DrawForTurn, state.turn_number()));
        let card = DrawPileManager::draw_into(&mut next, player, 1).first().copied();

        let playable = card.map_or(false, |c| CardMatchRule::playable_on(&next, &c));
        match card {
            Some(card) if playable => {
                debug!("{player} drew playable {card}");
                next.set_turn_draw(Some(card.id));
            }
            _ => Self::end_turn(&mut next, player),
        }

        Ok(TurnDraw {
            state: Self::commit(next),
            card,
            playable,
        })
    }

    /// Give up the turn after drawing a playable card.
    pub fn pass_turn(state: &GameState, player: PlayerId) -> Result<GameState, MoveError> {
        Self::check_turn(state, player)?;
        if state.turn_draw().is_none() {
            return Err(Self::reject(MoveError::HasNotDrawn(player)));
        }

        let mut next = state.clone();
        next.record_action(ActionRecord::new(player, Action::Pass, state.turn_number()));
        Self::end_turn(&mut next, player);

        Ok(Self::commit(next))
    }

    /// Announce "last card" for the seat on turn.
    pub fn declare_last_card(state: &GameState, player: PlayerId) -> Result<GameState, MoveError> {
        Self::check_turn(state, player)?;

        let mut next = state.clone();
        next.record_action(ActionRecord::new(player, Action::DeclareLastCard, state.turn_number()));
        next.set_last_card_declared(true);
        next.push_event(GameEvent::LastCardDeclared { player });
        debug!("{player} declared last card");

        Ok(Self::commit(next))
    }

    /// Draw the missed-declaration penalty for `player`.
    ///
    /// `apply_move` already charges it when a seat plays down to one card
    /// undeclared; this is for schedulers that charge it themselves.
    pub fn penalize_missed_declaration(state: &GameState, player: PlayerId) -> Result<GameState, MoveError> {
        Self::check_open(state)?;
        Self::check_seat(state, player)?;

        let mut next = state.clone();
        next.record_action(ActionRecord::new(player, Action::Penalize, state.turn_number()));
        let penalty = next.config().declaration_penalty;
        let drawn = DrawPileManager::draw_into(&mut next, player, penalty);
        next.push_event(GameEvent::DeclarationPenalty {
            player,
            cards: drawn.len(),
        });
        debug!("{player} penalised {} card(s)", drawn.len());

        Ok(Self::commit(next))
    }

    // === Queries ===

    /// Cards `player` may play right now. Empty when it is not their turn.
    #[must_use]
    pub fn legal_moves(state: &GameState, player: PlayerId) -> FxHashSet<CardId> {
        if state.phase() != TurnPhase::Playing || state.current_player() != player {
            return FxHashSet::default();
        }
        state
            .hand(player)
            .map(|hand| CardMatchRule::legal_cards(state, hand).map(|c| c.id).collect())
            .unwrap_or_default()
    }

    /// Decision of the bot policy for the seat on turn.
    ///
    /// Only a round in `Playing` has a move to make; otherwise this is a draw
    /// decision, which the driver never acts on.
    #[must_use]
    pub fn choose_bot_move(state: &GameState) -> BotDecision {
        if state.phase() != TurnPhase::Playing {
            return BotDecision::draw();
        }
        let Some(player) = state.player(state.current_player()) else {
            return BotDecision::draw();
        };
        policy_for(state.config()).choose_move(&player.hand, state)
    }

    /// Outcome once the round is over.
    #[must_use]
    pub fn result(state: &GameState) -> Option<GameResult> {
        state.winner().map(|winner| GameResult {
            winner,
            hand_points: state.players().iter().map(|p| p.hand_points()).collect(),
        })
    }

    // === Bot driver ===

    /// Play one whole turn for the seat on turn with the round's bot policy.
    ///
    /// Goes through the public commands only: declare when intended, play,
    /// or draw and play the drawn card when it is legal, passing otherwise.
    /// Also completes a colour choice left pending by that seat.
    pub fn run_bot_turn(state: &GameState) -> Result<GameState, MoveError> {
        let policy = policy_for(state.config());

        if let TurnPhase::AwaitingColor { player, .. } = state.phase() {
            let hand = state.hand(player).cloned().unwrap_or_default();
            let color = policy.choose_color(&hand, state);
            return Self::choose_color(state, player, color);
        }
        Self::check_open(state)?;

        let player = state.current_player();
        let decision = Self::choose_bot_move(state);
        if !decision.is_draw() {
            return Self::play_decision(state, player, decision);
        }

        let draw = Self::draw_for_turn(state, player)?;
        if !draw.playable {
            return Ok(draw.state);
        }
        let decision = Self::choose_bot_move(&draw.state);
        if decision.is_draw() {
            return Self::pass_turn(&draw.state, player);
        }
        Self::play_decision(&draw.state, player, decision)
    }

    fn play_decision(state: &GameState, player: PlayerId, decision: BotDecision) -> Result<GameState, MoveError> {
        let Some(card) = decision.card else {
            return Ok(state.clone());
        };
        let state = if decision.declare {
            Self::declare_last_card(state, player)?
        } else {
            state.clone()
        };
        Self::apply_move(&state, player, card, decision.color)
    }

    // === Internals ===

    /// Move `card` to the discard pile, resolve it, and hand the turn on.
    fn finish_play(state: &mut GameState, player: PlayerId, card: Card, color: Color) {
        let resolution = EffectResolver::resolve(state, player, &card);

        if let Some(seat) = state.player_mut(player) {
            seat.remove_card(card.id);
        }
        EffectResolver::purge_hand(state, player, &resolution);

        state.discard_pile_mut().push_back(card);
        state.set_current_color(color);
        state.set_turn_draw(None);
        state.push_event(GameEvent::CardPlayed { player, card });
        if resolution.effect.needs_color {
            state.push_event(GameEvent::ColorChosen { player, color });
        }
        debug!("{player} played {card}, colour now {color}");

        if state.hand(player).map_or(false, |h| h.is_empty()) {
            state.set_phase(TurnPhase::GameOver { winner: player });
            state.push_event(GameEvent::Won { player });
            debug!("{player} won after {} turn(s)", state.turn_number());
            return;
        }

        EffectResolver::apply(state, player, &resolution);
    }

    fn end_turn(state: &mut GameState, player: PlayerId) {
        let next = player.offset(state.direction().sign(), 1, state.player_count());
        state.push_event(GameEvent::TurnPassed { player });
        state.begin_turn(next);
        debug!("{player} passes to {next}");
    }

    fn check_open(state: &GameState) -> Result<(), MoveError> {
        match state.phase() {
            TurnPhase::Playing => Ok(()),
            TurnPhase::GameOver { .. } => Err(Self::reject(MoveError::GameOver)),
            TurnPhase::AwaitingColor { player, .. } => {
                Err(Self::reject(MoveError::AwaitingColorChoice { player }))
            }
        }
    }

    fn check_seat(state: &GameState, player: PlayerId) -> Result<(), MoveError> {
        if state.player(player).is_none() {
            return Err(Self::reject(MoveError::UnknownPlayer(player)));
        }
        Ok(())
    }

    fn check_turn(state: &GameState, player: PlayerId) -> Result<(), MoveError> {
        Self::check_open(state)?;
        Self::check_seat(state, player)?;
        let current = state.current_player();
        if player != current {
            return Err(Self::reject(MoveError::NotYourTurn { player, current }));
        }
        Ok(())
    }

    fn reject(err: MoveError) -> MoveError {
        warn!("rejected: {err}");
        err
    }

    /// Hand out a finished snapshot. A broken invariant is an engine bug.
    fn commit(state: GameState) -> GameState {
        if cfg!(debug_assertions) {
            if let Err(violation) = state.check_invariants() {
                panic!("engine produced a corrupt snapshot: {violation}");
            }
        }
        state
    }
}
