//! Card matching: may this card go on the discard pile?

use im::Vector;

use crate::cards::{Card, Color};
use crate::core::GameState;

/// The single legality rule for playing a card.
pub struct CardMatchRule;

impl CardMatchRule {
    /// A card is playable when it has the current colour, is wild, or has
    /// the same value as the active card.
    ///
    /// Wild kinds are unique to wild cards, so matching on value never lets
    /// a coloured card follow a wild; only the colour does.
    ///
    /// ```
    /// use rust_uno::cards::{Card, CardId, CardKind, Color};
    /// use rust_uno::rules::CardMatchRule;
    ///
    /// let top = Card::new(CardId(0), Color::Blue, CardKind::Number(7));
    /// let red7 = Card::new(CardId(1), Color::Red, CardKind::Number(7));
    /// let red3 = Card::new(CardId(2), Color::Red, CardKind::Number(3));
    ///
    /// assert!(CardMatchRule::is_playable(&red7, Color::Blue, Some(&top)));
    /// assert!(!CardMatchRule::is_playable(&red3, Color::Blue, Some(&top)));
    /// ```
    #[must_use]
    pub fn is_playable(card: &Card, current_color: Color, top: Option<&Card>) -> bool {
        card.color == current_color
            || card.is_wild()
            || top.map_or(false, |top| card.same_value(top))
    }

    /// `is_playable` against the snapshot's current colour and active card.
    #[must_use]
    pub fn playable_on(state: &GameState, card: &Card) -> bool {
        Self::is_playable(card, state.current_color(), state.top_card().as_ref())
    }

    /// Cards of `hand` that may be played right now, in hand order.
    ///
    /// After a turn draw only the drawn card qualifies.
    pub fn legal_cards<'a>(
        state: &'a GameState,
        hand: &'a Vector<Card>,
    ) -> impl Iterator<Item = &'a Card> + 'a {
        let only = state.turn_draw();
        hand.iter()
            .filter(move |c| only.map_or(true, |id| id == c.id) && Self::playable_on(state, c))
    }
}
