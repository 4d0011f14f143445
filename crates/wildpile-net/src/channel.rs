//! Typed message channel over any [`Connection`].

use serde::{Serialize, de::DeserializeOwned};
use wildpile_protocol::Codec;
#[cfg(feature = "json")]
use wildpile_protocol::JsonCodec;

use crate::{Connection, ConnectionId, NetError};

/// The ordered, reliable, typed channel the game loop talks through: a
/// [`Connection`] for bytes plus a [`Codec`] for message framing.
///
/// `send`/`recv` take `&self`, so one channel can be shared (behind an
/// `Arc`) between a reader task and a writer task.
#[derive(Debug)]
pub struct MessageChannel<Conn, C> {
    conn: Conn,
    codec: C,
}

#[cfg(feature = "json")]
impl<Conn: Connection> MessageChannel<Conn, JsonCodec> {
    /// A channel speaking JSON, the protocol default.
    pub fn json(conn: Conn) -> Self {
        Self::new(conn, JsonCodec)
    }
}

impl<Conn: Connection, C: Codec> MessageChannel<Conn, C> {
    pub fn new(conn: Conn, codec: C) -> Self {
        Self { conn, codec }
    }

    pub fn id(&self) -> ConnectionId {
        self.conn.id()
    }

    /// Encodes and sends one message.
    pub async fn send<T: Serialize>(&self, msg: &T) -> Result<(), NetError> {
        let bytes = self.codec.encode(msg)?;
        self.conn.send(&bytes).await
    }

    /// Awaits the next message and decodes it as `T`.
    ///
    /// A clean close surfaces as [`NetError::ChannelClosed`]; bytes that
    /// do not decode as `T` surface as a fatal protocol error.
    pub async fn recv<T: DeserializeOwned>(&self) -> Result<T, NetError> {
        match self.conn.recv().await? {
            Some(bytes) => Ok(self.codec.decode(&bytes)?),
            None => Err(NetError::ChannelClosed),
        }
    }

    /// Closes the underlying connection.
    pub async fn close(&self) -> Result<(), NetError> {
        self.conn.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory;
    use wildpile_protocol::{Action, ClientMessage, ServerMessage};

    #[tokio::test]
    async fn test_typed_round_trip_over_memory_pair() {
        let (a, b) = memory::pair();
        let a = MessageChannel::json(a);
        let b = MessageChannel::json(b);

        let sent = ClientMessage::Draw { count: 2 };
        a.send(&sent).await.unwrap();
        let got: ClientMessage = b.recv().await.unwrap();
        assert_eq!(sent, got);
    }

    #[tokio::test]
    async fn test_messages_arrive_in_send_order() {
        let (a, b) = memory::pair();
        let a = MessageChannel::json(a);
        let b = MessageChannel::json(b);

        for player in 0..5 {
            a.send(&ServerMessage::Action(Action::Skip { player }))
                .await
                .unwrap();
        }
        for player in 0..5 {
            let got: ServerMessage = b.recv().await.unwrap();
            assert_eq!(got, ServerMessage::Action(Action::Skip { player }));
        }
    }

    #[tokio::test]
    async fn test_recv_after_peer_drop_is_channel_closed() {
        let (a, b) = memory::pair();
        drop(a);
        let b = MessageChannel::json(b);
        let r: Result<ClientMessage, _> = b.recv().await;
        assert!(matches!(r, Err(NetError::ChannelClosed)));
    }

    #[tokio::test]
    async fn test_wrong_type_on_wire_is_protocol_error() {
        let (a, b) = memory::pair();
        let a = MessageChannel::json(a);
        let b = MessageChannel::json(b);

        // A ClientMessage cannot decode as a ServerMessage.
        a.send(&ClientMessage::Skip).await.unwrap();
        let r: Result<ServerMessage, _> = b.recv().await;
        assert!(matches!(r, Err(NetError::Protocol(_))));
    }
}
