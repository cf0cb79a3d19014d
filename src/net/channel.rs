use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::messages::HostMessage;

/// Errors surfaced by a replication channel.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("channel closed")]
    Closed,
    #[error("channel at capacity")]
    Full,
    #[error("codec failure: {0}")]
    Codec(String),
}

/// One direction of the replication contract: the host's view of a peer.
///
/// Implementations adapt a concrete transport (in-process channel, TCP
/// stream, polling relay) to these two methods. Delivery is best-effort
/// and the host never retries: a message dropped on a full buffer is
/// superseded by the next full snapshot.
///
/// The host's broadcast loop only ever calls [`try_send`], which must
/// return immediately; a stalled peer must never hold up game-state
/// progress. The awaitable [`send`] is for adapters and local peers that
/// want backpressure.
///
/// [`try_send`]: ReplicationChannel::try_send
/// [`send`]: ReplicationChannel::send
#[async_trait]
pub trait ReplicationChannel: Send + Sync {
    /// Deliver a message, waiting for buffer space.
    async fn send(&self, message: HostMessage) -> Result<(), ChannelError>;

    /// Deliver a message without waiting. Returns [`ChannelError::Full`]
    /// when the peer's buffer has no room; the caller decides whether the
    /// message matters enough to care.
    fn try_send(&self, message: HostMessage) -> Result<(), ChannelError>;
}

/// In-process adapter over a tokio channel. Used by the host's own local
/// peer and by tests; also the reference implementation for transport
/// adapters.
#[derive(Debug)]
pub struct LoopbackChannel {
    tx: mpsc::Sender<HostMessage>,
}

impl LoopbackChannel {
    /// Create a channel and the receiving end a local peer reads from.
    #[must_use]
    pub fn pair(capacity: usize) -> (Self, mpsc::Receiver<HostMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl ReplicationChannel for LoopbackChannel {
    async fn send(&self, message: HostMessage) -> Result<(), ChannelError> {
        self.tx.send(message).await.map_err(|_| ChannelError::Closed)
    }

    fn try_send(&self, message: HostMessage) -> Result<(), ChannelError> {
        self.tx.try_send(message).map_err(|error| match error {
            mpsc::error::TrySendError::Full(_) => ChannelError::Full,
            mpsc::error::TrySendError::Closed(_) => ChannelError::Closed,
        })
    }
}
