//! WebSocket connections using `tokio-tungstenite`.
//!
//! The stream is split into sink and source halves with separate locks:
//! a reader task blocked in `recv` must never hold up a concurrent
//! `send` on the same connection.

use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::{Connection, ConnectionId, NetError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// A WebSocket listener for the session side.
pub struct WsListener {
    listener: TcpListener,
}

impl WsListener {
    /// Binds to the given address.
    pub async fn bind(addr: &str) -> Result<Self, NetError> {
        let listener = TcpListener::bind(addr).await.map_err(NetError::Bind)?;
        tracing::info!(addr, "WebSocket listener bound");
        Ok(Self { listener })
    }

    /// The locally bound address (useful with a `:0` bind).
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Waits for and upgrades the next incoming connection.
    pub async fn accept(&self) -> Result<WsConnection<TcpStream>, NetError> {
        let (stream, addr) = self.listener.accept().await.map_err(NetError::Accept)?;
        let ws = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| NetError::Connect(e.to_string()))?;
        let conn = WsConnection::wrap(ws);
        tracing::debug!(id = %conn.id(), %addr, "accepted WebSocket connection");
        Ok(conn)
    }
}

/// Connects to a session at `ws://host:port`.
pub async fn connect(
    url: &str,
) -> Result<WsConnection<MaybeTlsStream<TcpStream>>, NetError> {
    let (ws, _) = tokio_tungstenite::connect_async(url)
        .await
        .map_err(|e| NetError::Connect(e.to_string()))?;
    let conn = WsConnection::wrap(ws);
    tracing::debug!(id = %conn.id(), url, "connected");
    Ok(conn)
}

/// One WebSocket connection, usable concurrently from a reader and a
/// writer task.
pub struct WsConnection<S> {
    id: ConnectionId,
    sink: Mutex<SplitSink<WebSocketStream<S>, Message>>,
    source: Mutex<SplitStream<WebSocketStream<S>>>,
}

impl<S> WsConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    fn wrap(ws: WebSocketStream<S>) -> Self {
        let (sink, source) = ws.split();
        Self {
            id: ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed)),
            sink: Mutex::new(sink),
            source: Mutex::new(source),
        }
    }
}

impl<S> Connection for WsConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + Sync + 'static,
{
    async fn send(&self, data: &[u8]) -> Result<(), NetError> {
        self.sink
            .lock()
            .await
            .send(Message::Binary(data.to_vec().into()))
            .await
            .map_err(|e| NetError::Send(e.to_string()))
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, NetError> {
        let mut source = self.source.lock().await;
        loop {
            match source.next().await {
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.into())),
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/raw frame
                Some(Err(e)) => return Err(NetError::Receive(e.to_string())),
            }
        }
    }

    async fn close(&self) -> Result<(), NetError> {
        self.sink
            .lock()
            .await
            .send(Message::Close(None))
            .await
            .map_err(|e| NetError::Send(e.to_string()))
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
