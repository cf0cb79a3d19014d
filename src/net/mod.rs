//! Replication layer: the transport-agnostic message contract between the
//! host and its peers, the channel seam transports plug into, and the
//! client-side read replica.

/// The transport seam: anything that can deliver host messages to a peer.
pub mod channel;

/// Message types for the host replication protocol.
pub mod messages;

/// Client-side read-only replica of the authoritative state.
pub mod replica;

/// Length-prefixed binary framing for byte-stream transport adapters.
pub mod utils;
