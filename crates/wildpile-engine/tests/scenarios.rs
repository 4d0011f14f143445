//! Turn-order and reconciliation scenarios spanning the whole engine.

use wildpile_engine::{
    BoardState, Roster, advance_past_resigned, apply_action, can_follow,
};
use wildpile_protocol::{Action, Card, CardColor, CardSymbol};

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("p{i}")).collect()
}

#[test]
fn reverse_flip_starts_counter_clockwise_table() {
    // 4 players, first player 0, flipped card is a Reverse: the very
    // first advance goes to seat 3, not seat 1.
    let flipped = Card::new(CardColor::Green, CardSymbol::Reverse);
    let mut board = BoardState::new(4, flipped, 0).unwrap();
    assert!(!board.clockwise());
    board.advance_turn();
    assert_eq!(board.current_player(), 3);
}

#[test]
fn draw_two_is_resolved_by_drawing_exactly_two() {
    let flipped = Card::new(CardColor::Red, CardSymbol::Number(7));
    let mut board = BoardState::new(2, flipped, 0).unwrap();
    let mut roster = Roster::new(&names(2), 7);

    // Seat 0 plays a DrawTwo while the table is at rest.
    let draw_two = Card::new(CardColor::Red, CardSymbol::DrawTwo);
    apply_action(
        &mut board,
        &mut roster,
        &Action::Play { player: 0, card: draw_two },
    )
    .unwrap();
    board.advance_turn();
    assert_eq!(board.pending_draws(), 2);

    // Seat 1 holds no draw-type card, so nothing it might hold short of
    // one is legal — it must draw the pending total.
    assert!(!can_follow(
        Card::new(CardColor::Red, CardSymbol::Number(9)),
        board.last_card(),
        board.pending_draws(),
    ));

    let count = board.pending_draws();
    assert_eq!(count, 2);
    apply_action(
        &mut board,
        &mut roster,
        &Action::Draw { player: 1, count },
    )
    .unwrap();
    board.advance_turn();

    // The penalty is paid: two cards credited, pending back at rest.
    assert_eq!(roster.stat(1).unwrap().hand_size(), 9);
    assert_eq!(board.pending_draws(), 1);
    assert_eq!(board.current_player(), 0);
}

#[test]
fn remote_ledger_matches_observed_history() {
    // For a remote seat: tracked size = initial + drawn − played, across
    // an arbitrary interleaving, and skips change nothing.
    let flipped = Card::new(CardColor::Red, CardSymbol::Number(7));
    let mut board = BoardState::new(3, flipped, 0).unwrap();
    let mut roster = Roster::new(&names(3), 7);

    let history = [
        Action::Draw { player: 1, count: 1 },
        Action::Skip { player: 1 },
        Action::Play {
            player: 1,
            card: Card::new(CardColor::Red, CardSymbol::Number(2)),
        },
        Action::Draw { player: 1, count: 4 },
        Action::Play {
            player: 1,
            card: Card::new(CardColor::Red, CardSymbol::Skip),
        },
        Action::Skip { player: 1 },
    ];
    let mut drawn = 0usize;
    let mut played = 0usize;
    for action in &history {
        apply_action(&mut board, &mut roster, action).unwrap();
        match *action {
            Action::Draw { count, .. } => drawn += count as usize,
            Action::Play { .. } => played += 1,
            Action::Skip { .. } => {}
        }
        assert_eq!(roster.stat(1).unwrap().hand_size(), 7 + drawn - played);
    }
}

#[test]
fn full_orbit_returns_to_first_player_both_directions() {
    for flipped in [
        Card::new(CardColor::Red, CardSymbol::Number(1)),
        Card::new(CardColor::Red, CardSymbol::Reverse),
    ] {
        let mut board = BoardState::new(5, flipped, 2).unwrap();
        for _ in 0..5 {
            board.advance_turn();
        }
        assert_eq!(board.current_player(), 2);
    }
}

#[test]
fn resigned_seats_fall_out_of_the_orbit() {
    let flipped = Card::new(CardColor::Red, CardSymbol::Number(1));
    let mut board = BoardState::new(4, flipped, 0).unwrap();
    let mut roster = Roster::new(&names(4), 7);
    roster.resign(1).unwrap();

    advance_past_resigned(&mut board, &roster).unwrap();
    assert_eq!(board.current_player(), 2);
    advance_past_resigned(&mut board, &roster).unwrap();
    assert_eq!(board.current_player(), 3);
    advance_past_resigned(&mut board, &roster).unwrap();
    assert_eq!(board.current_player(), 0);
}
