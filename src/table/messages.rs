//! Room actor message types.

use tokio::sync::oneshot;

use crate::game::entities::{Player, PlayerId, PlayerName};
use crate::game::state_machine::{ActionError, MatchState};
use crate::net::channel::ReplicationChannel;
use crate::net::messages::PlayerAction;

/// Messages that can be sent to a [`RoomActor`](super::actor::RoomActor).
///
/// Not `Debug`: `Join` carries a boxed replication channel.
pub enum RoomMessage {
    /// A peer requests a seat. The actor allocates an identity, registers
    /// the channel as a subscriber, and answers with
    /// [`RoomResponse::Joined`].
    Join {
        name: PlayerName,
        channel: Box<dyn ReplicationChannel>,
        response: oneshot::Sender<RoomResponse>,
    },

    /// A peer leaves or its transport dropped. Mid-match this only removes
    /// the subscriber; the seat stays so turn order holds.
    Leave { player_id: PlayerId },

    /// A gameplay action from a seated player.
    Submit {
        player_id: PlayerId,
        action: PlayerAction,
        response: oneshot::Sender<RoomResponse>,
    },

    /// A chat line to relay to all subscribers.
    Chat { player_id: PlayerId, text: String },

    /// Host-only: fill empty seats with bots and deal.
    StartMatch {
        player_id: PlayerId,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Host-only: return a finished match to the lobby.
    Reset {
        player_id: PlayerId,
        response: oneshot::Sender<RoomResponse>,
    },

    /// Snapshot of the authoritative state, for handles and tests.
    GetState {
        response: oneshot::Sender<Box<MatchState>>,
    },

    /// Internal: a scheduled bot move fired. `epoch` is the turn counter
    /// at scheduling time; a mismatch means the move is stale and must be
    /// discarded.
    BotMove { epoch: u64 },

    /// Shut the room down and notify all subscribers.
    Close,
}

/// Response from room operations.
#[derive(Clone, Debug)]
pub enum RoomResponse {
    /// Join succeeded: the allocated identity plus the current roster.
    Joined {
        player_id: PlayerId,
        players: Vec<Player>,
    },

    /// Operation succeeded.
    Accepted,

    /// Operation rejected.
    Rejected(ActionError),
}

impl RoomResponse {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Joined { .. } | Self::Accepted)
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn error(&self) -> Option<&ActionError> {
        match self {
            Self::Rejected(error) => Some(error),
            _ => None,
        }
    }
}
