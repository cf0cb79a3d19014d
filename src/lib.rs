//! # Wild Eights
//!
//! A host-authoritative engine for a real-time shedding card game in the
//! UNO family, built around a single source of truth and full-state
//! replication.
//!
//! One peer is the host: it owns the only writable [`MatchState`], routes
//! every player intent through validation, and broadcasts complete
//! snapshots after each committed action. Every other peer holds a
//! read-only replica that is replaced wholesale by each broadcast, so
//! clients never reconcile diffs and a dropped message is healed by the
//! next snapshot.
//!
//! ## Core Modules
//!
//! - [`game`]: Deck composition, legality rules, and the match state machine
//! - [`bot`]: The house bot's card selection strategy and display names
//! - [`net`]: Replication messages, the channel contract, and client replicas
//! - [`table`]: The host-side room actor and its configuration
//!
//! ## Example
//!
//! ```
//! use wild_eights::game::state_machine::MatchState;
//!
//! // A fresh room starts in the lobby, waiting for players.
//! let state = MatchState::new();
//! assert!(state.players.is_empty());
//! ```

/// Core game logic, entities, and state machine.
pub mod game;
pub use game::{
    constants,
    entities::{self, Card, CardColor, CardId, CardKind, GameMode, Player, PlayerId, PlayerName},
    rules,
    state_machine::{ActionError, MatchEvent, MatchState, MatchStatus},
};

/// Bot strategy and naming.
pub mod bot;

/// Replication messages, channel contract, and client-side replicas.
pub mod net;
pub use net::{
    channel::{LoopbackChannel, ReplicationChannel},
    messages::{ClientCommand, ClientMessage, HostMessage, PlayerAction},
    replica::ClientReplica,
};

/// Host-side room actor and configuration.
pub mod table;
pub use table::{RoomActor, RoomConfig, RoomHandle};
