//! Wire protocol for Wildpile.
//!
//! This crate defines the "language" that participants and the session
//! speak:
//!
//! - **Cards** ([`Card`], [`CardColor`], [`CardSymbol`]) — the value type
//!   every game message is built from.
//! - **Messages** ([`ClientMessage`], [`ServerMessage`], [`Action`]) —
//!   the schemas that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding or
//!   decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between the transport (raw bytes) and the game
//! logic (engine state). It knows nothing about connections, seats, or
//! turn order — only how messages are shaped.
//!
//! ```text
//! Transport (bytes) → Protocol (messages) → Engine (game state)
//! ```

mod card;
mod codec;
mod error;
mod message;

pub use card::{Card, CardColor, CardSymbol};
pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use message::{Action, ClientMessage, ServerMessage};
