//! The shared board state and turn controller.

use wildpile_protocol::{Card, CardSymbol};

use crate::{EngineError, rules};

/// The board every participant mirrors: last played card, turn-holder,
/// rotation direction, and the escalating forced-draw total.
///
/// Invariants, upheld by construction and every mutator:
/// - `current_player < player_count`
/// - `pending_draws >= 1` (1 is the at-rest value: a plain draw of one)
/// - `player_count >= 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    last_card: Card,
    current_player: usize,
    clockwise: bool,
    pending_draws: u8,
    player_count: usize,
}

impl BoardState {
    /// Builds the board from the session-start data: seat count, the
    /// flipped starter card, and the first turn-holder.
    ///
    /// A `Reverse` starter takes effect before anyone has acted: the
    /// initial direction becomes counter-clockwise. No other starter
    /// symbol affects the initial state.
    pub fn new(
        player_count: usize,
        flipped: Card,
        first_player: usize,
    ) -> Result<Self, EngineError> {
        if player_count == 0 {
            return Err(EngineError::NoSeats);
        }
        if first_player >= player_count {
            return Err(EngineError::SeatOutOfRange {
                seat: first_player,
                count: player_count,
            });
        }
        Ok(Self {
            last_card: flipped,
            current_player: first_player,
            clockwise: flipped.symbol != CardSymbol::Reverse,
            pending_draws: 1,
            player_count,
        })
    }

    pub fn last_card(&self) -> Card {
        self.last_card
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn clockwise(&self) -> bool {
        self.clockwise
    }

    /// How many cards the next Draw must take. 1 at rest; higher while a
    /// forced-draw penalty is pending.
    pub fn pending_draws(&self) -> u8 {
        self.pending_draws
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Whether a forced-draw penalty is waiting to be resolved.
    pub fn penalty_pending(&self) -> bool {
        self.pending_draws > 1
    }

    /// Moves the turn to the next seat in the current direction.
    ///
    /// Total for every `player_count >= 1`: the result is always wrapped
    /// back into `[0, player_count)`.
    pub fn advance_turn(&mut self) {
        let n = self.player_count;
        self.current_player = if self.clockwise {
            (self.current_player + 1) % n
        } else {
            // +n before the subtraction keeps the wrap in [0, n).
            (self.current_player + n - 1) % n
        };
    }

    /// Applies a played card to the board: it becomes the last played
    /// card, `Reverse` flips the direction, and draw-type cards escalate
    /// the pending total (2 or 4 from rest, `+=` while already pending —
    /// the pass-the-penalty stacking rule).
    pub fn apply_card_effect(&mut self, card: Card) {
        self.last_card = card;
        if card.symbol == CardSymbol::Reverse {
            self.clockwise = !self.clockwise;
        }
        if let Some(penalty) = card.draw_penalty() {
            self.pending_draws = if self.pending_draws == 1 {
                penalty
            } else {
                self.pending_draws + penalty
            };
        }
    }

    /// Returns the pending total to its resting value. Called exactly when
    /// a Draw action is committed — the penalty is paid by drawing, never
    /// partially.
    pub fn settle_pending_draws(&mut self) {
        self.pending_draws = 1;
    }

    /// Whether `card` may legally be played on this board right now.
    pub fn can_follow(&self, card: Card) -> bool {
        rules::can_follow(card, self.last_card, self.pending_draws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildpile_protocol::CardColor;

    fn board(n: usize, flipped: Card, first: usize) -> BoardState {
        BoardState::new(n, flipped, first).unwrap()
    }

    fn red(symbol: CardSymbol) -> Card {
        Card::new(CardColor::Red, symbol)
    }

    #[test]
    fn test_new_rejects_empty_table() {
        let r = BoardState::new(0, red(CardSymbol::Number(5)), 0);
        assert!(matches!(r, Err(EngineError::NoSeats)));
    }

    #[test]
    fn test_new_rejects_first_player_out_of_range() {
        let r = BoardState::new(3, red(CardSymbol::Number(5)), 3);
        assert!(matches!(r, Err(EngineError::SeatOutOfRange { .. })));
    }

    #[test]
    fn test_reverse_starter_flips_initial_direction() {
        // 4 players, flipped card is a Reverse: play begins
        // counter-clockwise even though nobody has acted yet.
        let b = board(4, red(CardSymbol::Reverse), 0);
        assert!(!b.clockwise());

        let b = board(4, red(CardSymbol::Number(7)), 0);
        assert!(b.clockwise());
    }

    #[test]
    fn test_advance_turn_is_total() {
        // Every seat count, every starting seat, both directions: the
        // next seat is always in range.
        for n in 1..=8 {
            for start in 0..n {
                for flipped in
                    [red(CardSymbol::Number(3)), red(CardSymbol::Reverse)]
                {
                    let mut b = board(n, flipped, start);
                    b.advance_turn();
                    assert!(b.current_player() < n);
                }
            }
        }
    }

    #[test]
    fn test_counter_clockwise_wraps_through_zero() {
        // Seat 2 of 4, counter-clockwise: successive turns land on
        // 1, then 0, then 3.
        let mut b = board(4, red(CardSymbol::Reverse), 2);
        b.advance_turn();
        assert_eq!(b.current_player(), 1);
        b.advance_turn();
        assert_eq!(b.current_player(), 0);
        b.advance_turn();
        assert_eq!(b.current_player(), 3);
    }

    #[test]
    fn test_reverse_twice_restores_direction() {
        let mut b = board(3, red(CardSymbol::Number(1)), 0);
        assert!(b.clockwise());
        b.apply_card_effect(red(CardSymbol::Reverse));
        assert!(!b.clockwise());
        b.apply_card_effect(red(CardSymbol::Reverse));
        assert!(b.clockwise());
    }

    #[test]
    fn test_only_reverse_toggles_direction() {
        let mut b = board(3, red(CardSymbol::Number(1)), 0);
        b.apply_card_effect(red(CardSymbol::Skip));
        b.apply_card_effect(red(CardSymbol::DrawTwo));
        b.apply_card_effect(Card::new(CardColor::Wild, CardSymbol::Wild));
        assert!(b.clockwise());
    }

    #[test]
    fn test_forced_draw_stacking() {
        let mut b = board(2, red(CardSymbol::Number(1)), 0);
        assert_eq!(b.pending_draws(), 1);

        // From rest: a DrawTwo sets 2.
        b.apply_card_effect(red(CardSymbol::DrawTwo));
        assert_eq!(b.pending_draws(), 2);

        // Stacked DrawTwo adds 2.
        b.apply_card_effect(Card::new(CardColor::Blue, CardSymbol::DrawTwo));
        assert_eq!(b.pending_draws(), 4);

        // Stacked DrawFour adds 4.
        b.apply_card_effect(Card::new(CardColor::Wild, CardSymbol::DrawFour));
        assert_eq!(b.pending_draws(), 8);
    }

    #[test]
    fn test_draw_two_answered_by_draw_four_stacks_to_six() {
        let mut b = board(2, red(CardSymbol::Number(1)), 0);
        b.apply_card_effect(red(CardSymbol::DrawTwo));
        b.apply_card_effect(Card::new(CardColor::Wild, CardSymbol::DrawFour));
        assert_eq!(b.pending_draws(), 6);
    }

    #[test]
    fn test_draw_four_from_rest_sets_four() {
        let mut b = board(2, red(CardSymbol::Number(1)), 0);
        b.apply_card_effect(Card::new(CardColor::Wild, CardSymbol::DrawFour));
        assert_eq!(b.pending_draws(), 4);
    }

    #[test]
    fn test_settle_returns_pending_to_rest() {
        let mut b = board(2, red(CardSymbol::Number(1)), 0);
        b.apply_card_effect(red(CardSymbol::DrawTwo));
        b.apply_card_effect(Card::new(CardColor::Blue, CardSymbol::DrawTwo));
        assert!(b.penalty_pending());
        b.settle_pending_draws();
        assert_eq!(b.pending_draws(), 1);
        assert!(!b.penalty_pending());
    }

    #[test]
    fn test_last_card_tracks_every_play() {
        let mut b = board(2, red(CardSymbol::Number(1)), 0);
        let played = Card::new(CardColor::Green, CardSymbol::Number(1));
        b.apply_card_effect(played);
        assert_eq!(b.last_card(), played);
    }
}
