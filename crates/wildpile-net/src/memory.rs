//! In-process loopback connections.
//!
//! [`pair`] returns two ends of a bidirectional channel with the same
//! ordering and closure semantics as a real transport. Game logic under
//! test runs against these unchanged — the channel is an injected
//! capability, not a socket.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};

use crate::{Connection, ConnectionId, NetError};

static NEXT_MEMORY_ID: AtomicU64 = AtomicU64::new(1);

/// One end of an in-process connection pair.
pub struct MemoryConnection {
    id: ConnectionId,
    tx: Mutex<Option<mpsc::UnboundedSender<Vec<u8>>>>,
    rx: Mutex<mpsc::UnboundedReceiver<Vec<u8>>>,
}

/// Creates a connected pair of in-process ends.
pub fn pair() -> (MemoryConnection, MemoryConnection) {
    let (a_tx, b_rx) = mpsc::unbounded_channel();
    let (b_tx, a_rx) = mpsc::unbounded_channel();
    let end = |tx, rx| MemoryConnection {
        id: ConnectionId::new(NEXT_MEMORY_ID.fetch_add(1, Ordering::Relaxed)),
        tx: Mutex::new(Some(tx)),
        rx: Mutex::new(rx),
    };
    (end(a_tx, a_rx), end(b_tx, b_rx))
}

impl Connection for MemoryConnection {
    async fn send(&self, data: &[u8]) -> Result<(), NetError> {
        match &*self.tx.lock().await {
            Some(tx) => tx
                .send(data.to_vec())
                .map_err(|_| NetError::ChannelClosed),
            None => Err(NetError::ChannelClosed),
        }
    }

    async fn recv(&self) -> Result<Option<Vec<u8>>, NetError> {
        // `None` from the queue means the peer's sender is gone: a clean
        // close, same as a transport-level close frame.
        Ok(self.rx.lock().await.recv().await)
    }

    async fn close(&self) -> Result<(), NetError> {
        self.tx.lock().await.take();
        Ok(())
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
