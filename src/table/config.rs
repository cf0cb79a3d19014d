//! Room configuration and the short rendezvous code joiners type in.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::{fmt, time::Duration};
use thiserror::Error;

use crate::game::constants::ROOM_CODE_LENGTH;
use crate::game::entities::GameMode;

// No 0/O/1/I: codes get read out loud and typed on phones.
const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("room code must be exactly {ROOM_CODE_LENGTH} characters")]
pub struct InvalidRoomCode;

/// The 4-character code a room is addressed by. Generated at creation and
/// handed to whatever rendezvous mechanism the transport provides.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RoomCode(String);

impl RoomCode {
    /// Generate a fresh random code.
    #[must_use]
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let code: String = (0..ROOM_CODE_LENGTH)
            .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
            .collect();
        Self(code)
    }

    /// Parse a code typed by a joiner. Case-insensitive.
    pub fn parse(s: &str) -> Result<Self, InvalidRoomCode> {
        let code = s.trim().to_ascii_uppercase();
        if code.chars().count() != ROOM_CODE_LENGTH {
            return Err(InvalidRoomCode);
        }
        Ok(Self(code))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Configuration for one room, fixed at creation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RoomConfig {
    /// Display name shown in lobby screens.
    pub name: String,

    /// Rendezvous code joiners use to locate the host.
    pub code: RoomCode,

    /// Seat count preset; empty seats are filled with bots at match start.
    pub mode: GameMode,

    /// How long a bot pretends to think before its move lands.
    pub bot_think_delay_ms: u64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            name: "Open Table".to_string(),
            code: RoomCode::generate(),
            mode: GameMode::FourSeat,
            bot_think_delay_ms: 1_200,
        }
    }
}

impl RoomConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("room name must not be empty".to_string());
        }
        if self.bot_think_delay_ms > 10_000 {
            return Err("bot think delay must be at most 10 seconds".to_string());
        }
        Ok(())
    }

    #[must_use]
    pub fn bot_think_delay(&self) -> Duration {
        Duration::from_millis(self.bot_think_delay_ms)
    }
}
