//! Table module providing the host-side room with an async actor model.
//!
//! This module implements:
//! - RoomActor: Async actor owning one room's authoritative state
//! - RoomHandle: Cloneable handle for sending messages to the actor
//! - Message-based communication with tokio channels
//! - Room configuration and the rendezvous code
//!
//! ## Architecture
//!
//! Each room runs in a separate Tokio task with an mpsc message inbox.
//! Actions are processed one at a time against the authoritative
//! [`MatchState`](crate::game::state_machine::MatchState), then fanned out
//! to all subscriber channels as full snapshots. Bot turns arrive through
//! the same inbox after a scheduled think delay.
//!
//! ## Example
//!
//! ```
//! use wild_eights::table::{RoomActor, RoomConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = RoomActor::new(RoomConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     println!("room code: {}", handle.code());
//!     let _ = handle.close().await;
//! }
//! ```

pub mod actor;
pub mod config;
pub mod messages;

pub use actor::{RoomActor, RoomClosed, RoomHandle};
pub use config::{InvalidRoomCode, RoomCode, RoomConfig};
pub use messages::{RoomMessage, RoomResponse};
