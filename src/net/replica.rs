use crate::game::entities::{ChatMessage, Player, PlayerId};
use crate::game::state_machine::MatchState;

use super::messages::HostMessage;

/// Connection status as seen by the replica. `Lost` is terminal: a match
/// cannot be recovered after the host goes away.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConnectionState {
    Connected,
    Lost,
}

/// A client peer's read-only view of the room.
///
/// Authoritative fields are replaced wholesale by each host broadcast; the
/// only client-side write is the optimistic chat echo, which is
/// deduplicated by message id once the authoritative relay arrives.
#[derive(Debug)]
pub struct ClientReplica {
    pub player_id: Option<PlayerId>,
    pub players: Vec<Player>,
    pub state: Option<MatchState>,
    pub connection: ConnectionState,
    chat: Vec<ChatMessage>,
}

impl Default for ClientReplica {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientReplica {
    #[must_use]
    pub fn new() -> Self {
        Self {
            player_id: None,
            players: Vec::new(),
            state: None,
            connection: ConnectionState::Connected,
            chat: Vec::new(),
        }
    }

    /// Apply one host broadcast.
    pub fn apply(&mut self, message: HostMessage) {
        match message {
            HostMessage::JoinAccept { player_id, players } => {
                self.player_id = Some(player_id);
                self.players = players;
            }
            HostMessage::LobbyUpdate { players } => {
                self.players = players;
            }
            HostMessage::GameState(snapshot) => {
                self.players = snapshot.players.clone();
                self.state = Some(*snapshot);
            }
            HostMessage::Chat(chat_message) => {
                self.push_chat(chat_message);
            }
            HostMessage::RoomClosed => {
                self.connection = ConnectionState::Lost;
            }
        }
    }

    /// Append a locally-authored chat line before the host confirms it, so
    /// the sender sees their own message immediately. The authoritative
    /// relay is deduplicated against this echo by id.
    pub fn echo_chat(&mut self, message: ChatMessage) {
        self.push_chat(message);
    }

    fn push_chat(&mut self, message: ChatMessage) {
        if self.chat.iter().any(|m| m.id == message.id) {
            return;
        }
        self.chat.push(message);
    }

    /// The append-only chat log, in arrival order.
    #[must_use]
    pub fn chat(&self) -> &[ChatMessage] {
        &self.chat
    }

    /// Mark the host unreachable. Called by the transport adapter on a
    /// channel-level disconnect.
    pub fn mark_disconnected(&mut self) {
        self.connection = ConnectionState::Lost;
    }

    /// Whether it is this replica's player's turn, per the latest snapshot.
    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        let (Some(id), Some(state)) = (self.player_id, self.state.as_ref()) else {
            return false;
        };
        state.current_player().is_some_and(|p| p.id == id)
    }
}
