//! The authoritative session: one per running game.
//!
//! The session owns the only true copy of the shared state — the board,
//! the roster, every seat's actual hand, and the draw pile. It is a
//! single actor task: per-seat reader tasks forward inbound intents into
//! one inbox, and the actor processes exactly one intent to completion
//! before looking at the next. Every broadcast is sent strictly after its
//! commit, so all participants observe actions in the same order without
//! any sequence numbers on the wire.
//!
//! [`Lobby`] is the WebSocket front door: it seats the configured number
//! of connections and hands them to [`Session`]. Tests skip the lobby and
//! gather a `Session` over in-process channels directly.

mod config;
mod error;
mod lobby;
mod session;

pub use config::SessionConfig;
pub use error::SessionError;
pub use lobby::Lobby;
pub use session::Session;
