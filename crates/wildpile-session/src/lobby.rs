//! The WebSocket front door for a session.

use tokio::net::TcpStream;
use wildpile_net::{Connection, MessageChannel, WsConnection, WsListener};
use wildpile_protocol::JsonCodec;

use crate::{Session, SessionConfig, SessionError};

/// Accepts connections until every seat is filled, then runs the session.
pub struct Lobby {
    listener: WsListener,
    config: SessionConfig,
}

impl Lobby {
    /// Binds the lobby to `addr` (e.g. `"0.0.0.0:7077"`).
    pub async fn bind(addr: &str, config: SessionConfig) -> Result<Self, SessionError> {
        Ok(Self {
            listener: WsListener::bind(addr).await?,
            config,
        })
    }

    /// The bound address (useful with a `:0` bind).
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Fills the table in accept order, then plays the configured games
    /// to completion.
    pub async fn run(self) -> Result<(), SessionError> {
        let mut channels: Vec<MessageChannel<WsConnection<TcpStream>, JsonCodec>> =
            Vec::with_capacity(self.config.players);
        while channels.len() < self.config.players {
            let conn = self.listener.accept().await?;
            tracing::info!(
                id = %conn.id(),
                seated = channels.len() + 1,
                of = self.config.players,
                "connection accepted"
            );
            channels.push(MessageChannel::json(conn));
        }
        let session = Session::gather(channels, self.config).await?;
        session.run().await
    }
}
