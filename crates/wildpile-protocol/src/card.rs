//! The card value type.
//!
//! A [`Card`] is an immutable `(color, symbol)` pair compared field by
//! field. Wild-type cards are held with [`CardColor::Wild`]; when one is
//! played, the wire copy carries the color its player chose, so every
//! mirror of the board agrees on what the next card must follow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four suit colors, or the colorless wild marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Blue,
    /// The color of an unplayed wild-type card. Never a legal color to
    /// follow; playing a wild replaces this with a chosen suit color.
    Wild,
}

impl CardColor {
    /// The four suit colors, in deck order.
    pub const SUITS: [CardColor; 4] = [
        CardColor::Red,
        CardColor::Yellow,
        CardColor::Green,
        CardColor::Blue,
    ];
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            CardColor::Red => 'R',
            CardColor::Yellow => 'Y',
            CardColor::Green => 'G',
            CardColor::Blue => 'B',
            CardColor::Wild => 'W',
        };
        write!(f, "{c}")
    }
}

/// The face of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardSymbol {
    /// A number card, 0–9.
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    DrawFour,
}

impl fmt::Display for CardSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardSymbol::Number(n) => write!(f, "{n}"),
            CardSymbol::Skip => write!(f, "S"),
            CardSymbol::Reverse => write!(f, "R"),
            CardSymbol::DrawTwo => write!(f, "+2"),
            CardSymbol::Wild => write!(f, "W"),
            CardSymbol::DrawFour => write!(f, "+4"),
        }
    }
}

/// An immutable card value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: CardColor,
    pub symbol: CardSymbol,
}

impl Card {
    pub const fn new(color: CardColor, symbol: CardSymbol) -> Self {
        Self { color, symbol }
    }

    /// Returns `true` for the two colorless symbols (`Wild`, `DrawFour`),
    /// regardless of the color currently attached to the card.
    pub fn is_wild(&self) -> bool {
        matches!(self.symbol, CardSymbol::Wild | CardSymbol::DrawFour)
    }

    /// The forced-draw penalty this card adds, if any.
    pub fn draw_penalty(&self) -> Option<u8> {
        match self.symbol {
            CardSymbol::DrawTwo => Some(2),
            CardSymbol::DrawFour => Some(4),
            _ => None,
        }
    }

    /// The same card with its color replaced — the color-choice step of
    /// playing a wild.
    pub fn with_color(self, color: CardColor) -> Self {
        Self { color, ..self }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Colorless wilds print bare ("W", "+4"); everything else gets a
        // color prefix ("R5", "G+2", a chosen-color wild "YW").
        if self.color == CardColor::Wild {
            write!(f, "{}", self.symbol)
        } else {
            write!(f, "{}{}", self.color, self.symbol)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_equality_is_field_wise() {
        let a = Card::new(CardColor::Red, CardSymbol::Number(5));
        let b = Card::new(CardColor::Red, CardSymbol::Number(5));
        let c = Card::new(CardColor::Red, CardSymbol::Number(6));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_wild_detection_ignores_chosen_color() {
        let unplayed = Card::new(CardColor::Wild, CardSymbol::DrawFour);
        let played = unplayed.with_color(CardColor::Blue);
        assert!(unplayed.is_wild());
        assert!(played.is_wild());
    }

    #[test]
    fn test_draw_penalties() {
        assert_eq!(
            Card::new(CardColor::Red, CardSymbol::DrawTwo).draw_penalty(),
            Some(2)
        );
        assert_eq!(
            Card::new(CardColor::Wild, CardSymbol::DrawFour).draw_penalty(),
            Some(4)
        );
        assert_eq!(
            Card::new(CardColor::Red, CardSymbol::Skip).draw_penalty(),
            None
        );
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(
            Card::new(CardColor::Red, CardSymbol::Number(5)).to_string(),
            "R5"
        );
        assert_eq!(
            Card::new(CardColor::Green, CardSymbol::DrawTwo).to_string(),
            "G+2"
        );
        assert_eq!(
            Card::new(CardColor::Wild, CardSymbol::Wild).to_string(),
            "W"
        );
        assert_eq!(
            Card::new(CardColor::Wild, CardSymbol::DrawFour).to_string(),
            "+4"
        );
        // A wild that has been given a color shows the choice.
        assert_eq!(
            Card::new(CardColor::Yellow, CardSymbol::Wild).to_string(),
            "YW"
        );
    }

    #[test]
    fn test_card_round_trip() {
        let cards = [
            Card::new(CardColor::Red, CardSymbol::Number(0)),
            Card::new(CardColor::Blue, CardSymbol::Number(9)),
            Card::new(CardColor::Yellow, CardSymbol::Reverse),
            Card::new(CardColor::Wild, CardSymbol::DrawFour),
        ];
        for card in cards {
            let bytes = serde_json::to_vec(&card).unwrap();
            let decoded: Card = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(card, decoded);
        }
    }
}
