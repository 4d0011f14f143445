//! Per-seat tracking and reconciliation of observed actions.
//!
//! A [`Roster`] holds one [`PlayerStat`] per seat. For remote seats the
//! hand size is a derived counter — incremented by observed draws,
//! decremented by observed plays, untouched by skips. The owning
//! participant keeps its counter equal to its actual hand by recording its
//! own actions through the same functions.

use wildpile_protocol::Action;

use crate::{BoardState, EngineError};

/// What one participant knows about one seat: the name, how many cards it
/// holds, and whether it has left the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStat {
    username: String,
    hand_size: usize,
    resigned: bool,
}

impl PlayerStat {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn resigned(&self) -> bool {
        self.resigned
    }
}

/// All seats at the table, indexed by seat number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    players: Vec<PlayerStat>,
}

impl Roster {
    /// One stat per username, each starting at `initial_hand_size` cards.
    pub fn new(usernames: &[String], initial_hand_size: usize) -> Self {
        Self {
            players: usernames
                .iter()
                .map(|username| PlayerStat {
                    username: username.clone(),
                    hand_size: initial_hand_size,
                    resigned: false,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn stat(&self, seat: usize) -> Option<&PlayerStat> {
        self.players.get(seat)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerStat> {
        self.players.iter()
    }

    fn seat_mut(&mut self, seat: usize) -> Result<&mut PlayerStat, EngineError> {
        let count = self.players.len();
        self.players
            .get_mut(seat)
            .ok_or(EngineError::SeatOutOfRange { seat, count })
    }

    /// Credits `count` observed drawn cards to `seat`.
    pub fn record_draw(&mut self, seat: usize, count: u8) -> Result<(), EngineError> {
        let stat = self.seat_mut(seat)?;
        stat.hand_size += count as usize;
        Ok(())
    }

    /// A skip changes no hand size; this only validates the seat.
    pub fn record_skip(&mut self, seat: usize) -> Result<(), EngineError> {
        self.seat_mut(seat).map(|_| ())
    }

    /// Debits one observed played card from `seat`. The counter can never
    /// go negative: a play observed against an empty hand means the
    /// mirrors have diverged, which is an error, not a wrap.
    pub fn record_play(&mut self, seat: usize) -> Result<(), EngineError> {
        let stat = self.seat_mut(seat)?;
        if stat.hand_size == 0 {
            return Err(EngineError::HandUnderflow(seat));
        }
        stat.hand_size -= 1;
        Ok(())
    }

    /// Marks a seat as out of the game (disconnected or resigned).
    pub fn resign(&mut self, seat: usize) -> Result<(), EngineError> {
        self.seat_mut(seat)?.resigned = true;
        Ok(())
    }

    pub fn is_resigned(&self, seat: usize) -> bool {
        self.players.get(seat).is_some_and(|p| p.resigned)
    }

    /// Seats still in the game.
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.resigned).count()
    }

    /// The one remaining active seat, if the table is down to one.
    pub fn sole_active(&self) -> Option<usize> {
        let mut active = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.resigned)
            .map(|(seat, _)| seat);
        let seat = active.next()?;
        active.next().is_none().then_some(seat)
    }

    /// The first active seat whose hand reached zero, if any.
    pub fn winner(&self) -> Option<usize> {
        self.players
            .iter()
            .position(|p| !p.resigned && p.hand_size == 0)
    }
}

/// Applies one observed action to the shared state, exactly once.
///
/// The hand-size ledger and the board effect are updated together,
/// strictly before the caller advances the turn. The session runs it at
/// commit time and every participant runs it on receipt, so all mirrors
/// stay identical.
pub fn apply_action(
    board: &mut BoardState,
    roster: &mut Roster,
    action: &Action,
) -> Result<(), EngineError> {
    match *action {
        Action::Draw { player, count } => {
            roster.record_draw(player, count)?;
            // The penalty (or the plain draw-of-one) is now paid.
            board.settle_pending_draws();
        }
        Action::Skip { player } => {
            roster.record_skip(player)?;
        }
        Action::Play { player, card } => {
            roster.record_play(player)?;
            board.apply_card_effect(card);
        }
    }
    Ok(())
}

/// Advances the turn, then keeps advancing past resigned seats.
///
/// Errors if no active seat remains — the caller must end the game before
/// that point (forfeit fires at one active seat).
pub fn advance_past_resigned(
    board: &mut BoardState,
    roster: &Roster,
) -> Result<(), EngineError> {
    if roster.active_count() == 0 {
        return Err(EngineError::NoActiveSeats);
    }
    board.advance_turn();
    while roster.is_resigned(board.current_player()) {
        board.advance_turn();
    }
    Ok(())
}

/// Records a seat leaving the game. If the departing seat held the turn,
/// the turn moves to the next active seat so rotation never stalls.
pub fn record_departure(
    board: &mut BoardState,
    roster: &mut Roster,
    seat: usize,
) -> Result<(), EngineError> {
    roster.resign(seat)?;
    if roster.active_count() > 0 && board.current_player() == seat {
        advance_past_resigned(board, roster)?;
    }
    Ok(())
}
