//! Error types for the game engine.

/// Errors raised by state manipulation. Any of these reaching the game
/// loop means the mirrors have diverged or the inputs were invalid — none
/// are recoverable mid-game.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A game needs at least one seat.
    #[error("a game needs at least one seat")]
    NoSeats,

    /// A seat index outside the table.
    #[error("seat {seat} out of range for {count} players")]
    SeatOutOfRange { seat: usize, count: usize },

    /// An observed play against a hand already tracked at zero cards.
    #[error("seat {0} has no cards left to play")]
    HandUnderflow(usize),

    /// Every seat has resigned; there is no turn to advance to.
    #[error("no active seats remain")]
    NoActiveSeats,

    /// The pile cannot cover a deal or flip.
    #[error("deck exhausted: need {need} cards, have {have}")]
    NotEnoughCards { need: usize, have: usize },
}
