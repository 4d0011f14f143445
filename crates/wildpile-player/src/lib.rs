//! The participant side of a Wildpile game.
//!
//! A [`Player`] owns its exact hand, mirrors the shared board, and tracks
//! every other seat by card count only. It drives one sequential control
//! loop with exactly two suspension points: the injected [`TurnPrompt`]
//! (local input) and the message channel (remote actions). All state
//! changes happen inside that loop — never from a background task.
//!
//! The channel and the prompt are both injected capabilities, so the whole
//! loop runs unmodified over an in-process connection pair in tests.

#![allow(async_fn_in_trait)]

mod error;
mod hand;
mod player;
mod prompt;

pub use error::PlayerError;
pub use hand::HandCards;
pub use player::{GameOutcome, Player};
pub use prompt::{AutoPrompt, ScriptedPrompt, TableView, TurnChoice, TurnPrompt};
