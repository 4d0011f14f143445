//! The play-legality predicate.

use wildpile_protocol::Card;

/// Whether `card` may be played on `last` given the pending forced-draw
/// total.
///
/// While a penalty is pending (`pending_draws > 1`) the only legal answer
/// is another draw-type card — either denomination, adding its own value
/// to the stack; everything else forces the player to Draw.
///
/// At rest, a card follows if it is wild-type, matches the last card's
/// color, or matches its symbol (numbers match only on equal value). A
/// played wild carries its chooser's color, so follow-ups compare against
/// that choice.
pub fn can_follow(card: Card, last: Card, pending_draws: u8) -> bool {
    if pending_draws > 1 {
        return card.draw_penalty().is_some();
    }
    card.is_wild() || card.color == last.color || card.symbol == last.symbol
}
