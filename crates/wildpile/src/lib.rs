//! # Wildpile
//!
//! A turn-based multiplayer shedding card game played over a network: one
//! authoritative session holds the shared state, and each participant
//! runs a thin client that sends intents and mirrors the session's
//! broadcasts — without ever seeing a remote hand.
//!
//! This crate ties the layers together and ships the `wildpile` binary
//! (`wildpile host` / `wildpile join`). The layers themselves live in
//! focused crates:
//!
//! ```text
//! wildpile-net (channels) → wildpile-protocol (messages)
//!     → wildpile-engine (rules) → wildpile-session / wildpile-player
//! ```

mod console;
mod error;

pub use console::ConsolePrompt;
pub use error::WildpileError;

pub mod prelude {
    pub use wildpile_engine::{BoardState, Deck, DeckPolicy, Roster, can_follow};
    pub use wildpile_net::{Connection, MessageChannel, memory};
    pub use wildpile_player::{
        AutoPrompt, GameOutcome, Player, TurnChoice, TurnPrompt,
    };
    pub use wildpile_protocol::{
        Action, Card, CardColor, CardSymbol, ClientMessage, JsonCodec,
        ServerMessage,
    };
    pub use wildpile_session::{Lobby, Session, SessionConfig};

    pub use crate::{ConsolePrompt, WildpileError};
}
