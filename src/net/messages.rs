use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::entities::{CardColor, CardId, ChatMessage, Player, PlayerId, PlayerName};
use crate::game::state_machine::MatchState;

/// A player-submitted intent. Transient; consumed once by the host's
/// action router.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PlayerAction {
    /// Play a card from the acting player's hand. `chosen_color` is
    /// mandatory for wild-family cards; the host substitutes a
    /// deterministic fallback when it is missing.
    PlayCard {
        card_id: CardId,
        chosen_color: Option<CardColor>,
    },
    /// Draw one card and pass the turn.
    DrawCard,
    /// Flag the acting player as having called UNO. Legal out of turn.
    CallUno,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::PlayCard { chosen_color: Some(color), .. } => {
                &format!("plays a card, choosing {color}")
            }
            Self::PlayCard { chosen_color: None, .. } => "plays a card",
            Self::DrawCard => "draws a card",
            Self::CallUno => "calls UNO",
        };
        write!(f, "{repr}")
    }
}

/// A client command carried over the replication channel to the host.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum ClientCommand {
    /// Request a seat; the host allocates an identity and responds with
    /// [`HostMessage::JoinAccept`].
    JoinRequest { name: PlayerName },
    /// A gameplay action from an already-seated player.
    Action(PlayerAction),
    /// A chat line, relayed by the host to all peers.
    Chat(String),
    /// Courtesy departure notice.
    Leave,
}

impl fmt::Display for ClientCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::JoinRequest { name } => &format!("{name} requests a seat"),
            Self::Action(action) => &action.to_string(),
            Self::Chat(_) => "chats",
            Self::Leave => "leaves",
        };
        write!(f, "{repr}")
    }
}

/// A message from a peer to the host. `player_id` is `None` only for the
/// initial join request, before the host has allocated an identity.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ClientMessage {
    pub player_id: Option<PlayerId>,
    pub command: ClientCommand,
}

/// A message from the host to one or all peers. Replication is
/// fire-and-forget: a dropped message is superseded by the next full
/// `GameState` snapshot.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum HostMessage {
    /// Confirms a join: the requester's allocated identity plus the
    /// current roster.
    JoinAccept {
        player_id: PlayerId,
        players: Vec<Player>,
    },
    /// The roster changed while in the lobby.
    LobbyUpdate { players: Vec<Player> },
    /// Full authoritative snapshot; replaces the local replica wholesale.
    GameState(Box<MatchState>),
    /// A relayed chat line (player or system).
    Chat(ChatMessage),
    /// The host is gone; terminal for the match.
    RoomClosed,
}

impl HostMessage {
    /// The starter-friendly name of the message, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::JoinAccept { .. } => "join accept",
            Self::LobbyUpdate { .. } => "lobby update",
            Self::GameState(_) => "game state",
            Self::Chat(_) => "chat",
            Self::RoomClosed => "room closed",
        }
    }
}

impl fmt::Display for HostMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Chat(message) => message.fmt(f),
            other => write!(f, "{}", other.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{GameMode, PlayerName};
    use crate::game::state_machine::MatchState;

    #[test]
    fn test_player_action_display() {
        let action = PlayerAction::DrawCard;
        assert_eq!(format!("{action}"), "draws a card");

        let action = PlayerAction::CallUno;
        assert_eq!(format!("{action}"), "calls UNO");

        let action = PlayerAction::PlayCard {
            card_id: CardId::new(),
            chosen_color: Some(CardColor::Green),
        };
        assert_eq!(format!("{action}"), "plays a card, choosing green");
    }

    #[test]
    fn test_client_command_display() {
        let cmd = ClientCommand::JoinRequest { name: PlayerName::new("alice") };
        assert_eq!(format!("{cmd}"), "alice requests a seat");

        let cmd = ClientCommand::Leave;
        assert_eq!(format!("{cmd}"), "leaves");
    }

    #[test]
    fn test_client_message_roundtrip() {
        let msg = ClientMessage {
            player_id: Some(PlayerId::new()),
            command: ClientCommand::Action(PlayerAction::DrawCard),
        };
        let bytes = bincode::serialize(&msg).unwrap();
        let decoded: ClientMessage = bincode::deserialize(&bytes).unwrap();
        assert_eq!(msg, decoded);
    }

    #[test]
    fn test_join_request_roundtrip() {
        let msg = ClientMessage {
            player_id: None,
            command: ClientCommand::JoinRequest { name: PlayerName::new("bob") },
        };
        let bytes = bincode::serialize(&msg).unwrap();
        let decoded: ClientMessage = bincode::deserialize(&bytes).unwrap();
        assert_eq!(msg, decoded);
    }

    #[test]
    fn test_play_card_action_roundtrip() {
        let action = PlayerAction::PlayCard {
            card_id: CardId::new(),
            chosen_color: Some(CardColor::Yellow),
        };
        let bytes = bincode::serialize(&action).unwrap();
        let decoded: PlayerAction = bincode::deserialize(&bytes).unwrap();
        assert_eq!(action, decoded);
    }

    #[test]
    fn test_game_state_message_roundtrip() {
        let mut state = MatchState::new();
        for i in 0..2 {
            state
                .add_player(PlayerName::new(&format!("p{i}")), i > 0, i == 0)
                .unwrap();
        }
        state.start_match(GameMode::HeadToHead).unwrap();

        let msg = HostMessage::GameState(Box::new(state));
        let bytes = bincode::serialize(&msg).unwrap();
        let decoded: HostMessage = bincode::deserialize(&bytes).unwrap();
        match decoded {
            HostMessage::GameState(snapshot) => {
                assert_eq!(snapshot.players.len(), 2);
                assert!(snapshot.active_card().is_some());
            }
            other => panic!("expected game state, got {}", other.kind()),
        }
    }

    #[test]
    fn test_host_message_kinds() {
        assert_eq!(HostMessage::RoomClosed.kind(), "room closed");
        let update = HostMessage::LobbyUpdate { players: Vec::new() };
        assert_eq!(update.kind(), "lobby update");
        assert_eq!(format!("{update}"), "lobby update");
    }

    #[test]
    fn test_chat_message_display_passthrough() {
        let chat = ChatMessage::system("hello".to_string());
        let msg = HostMessage::Chat(chat);
        assert_eq!(format!("{msg}"), "* hello");
    }
}
