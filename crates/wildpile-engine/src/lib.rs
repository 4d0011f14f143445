//! Game rules for Wildpile, independent of any transport.
//!
//! Everything in this crate is deterministic, synchronous state
//! manipulation. The same functions run on the authoritative session when
//! it commits an action and on every participant when it mirrors one —
//! that symmetry is what keeps all mirrors of the board identical without
//! sequence numbers.
//!
//! - [`BoardState`] — the shared board: last played card, turn-holder,
//!   rotation direction, pending forced-draw total.
//! - [`Roster`] / [`PlayerStat`] — per-seat hand-size tracking. Exact for
//!   the seat that owns the hand (it mirrors its own `Vec<Card>`), count-only
//!   for everyone else.
//! - [`apply_action`] — exactly-once application of one observed action,
//!   always before the turn advances.
//! - [`can_follow`] — the play-legality predicate.
//! - [`Deck`] — the 108-card pile: composition, shuffling, dealing,
//!   discard recycling.

mod board;
mod deck;
mod error;
mod roster;
mod rules;

pub use board::BoardState;
pub use deck::{Deck, DeckPolicy, standard_deck};
pub use error::EngineError;
pub use roster::{
    PlayerStat, Roster, advance_past_resigned, apply_action, record_departure,
};
pub use rules::can_follow;
