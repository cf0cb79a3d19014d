use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use super::constants;

/// A card's color. `Wild` is the neutral color carried by the wild family;
/// it never appears as a match's active color while a hand is in progress.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Blue,
    Wild,
}

impl CardColor {
    /// The four playable colors, in the order used for wild-color tie-breaks.
    pub const CHROMATIC: [CardColor; 4] = [
        CardColor::Red,
        CardColor::Yellow,
        CardColor::Green,
        CardColor::Blue,
    ];

    #[must_use]
    pub const fn is_chromatic(self) -> bool {
        !matches!(self, Self::Wild)
    }
}

impl fmt::Display for CardColor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Wild => "wild",
        };
        write!(f, "{repr}")
    }
}

/// What a card does when played.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum CardKind {
    Number(u8),
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    WildDrawFour,
}

impl CardKind {
    /// Wild and wild-draw-four carry the neutral color and are always legal.
    #[must_use]
    pub const fn is_wild_family(self) -> bool {
        matches!(self, Self::Wild | Self::WildDrawFour)
    }

    /// Action cards that disturb the turn order or force draws. Bots play
    /// these first.
    #[must_use]
    pub const fn is_disruptive(self) -> bool {
        matches!(self, Self::Skip | Self::Reverse | Self::DrawTwo)
    }

    #[must_use]
    pub const fn numeral(self) -> Option<u8> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Score contribution of a card left in a losing hand.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Number(n) => n as u32,
            Self::Skip | Self::Reverse | Self::DrawTwo => constants::ACTION_CARD_POINTS,
            Self::Wild | Self::WildDrawFour => constants::WILD_CARD_POINTS,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Number(n) => &n.to_string(),
            Self::Skip => "skip",
            Self::Reverse => "reverse",
            Self::DrawTwo => "+2",
            Self::Wild => "wild",
            Self::WildDrawFour => "wild +4",
        };
        write!(f, "{repr}")
    }
}

/// Unique identity of a single physical card. Two red fives in the same
/// deck have distinct ids; actions reference cards by id, never by face.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CardId(Uuid);

impl CardId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single card. Immutable once created; moves between the draw pile,
/// hands, and the discard pile but is never duplicated or destroyed.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub color: CardColor,
    pub kind: CardKind,
}

impl Card {
    #[must_use]
    pub fn new(color: CardColor, kind: CardKind) -> Self {
        Self {
            id: CardId::new(),
            color,
            kind,
        }
    }

    #[must_use]
    pub const fn points(&self) -> u32 {
        self.kind.points()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            CardKind::Wild | CardKind::WildDrawFour => write!(f, "{}", self.kind),
            kind => write!(f, "{} {kind}", self.color),
        }
    }
}

/// Unique identity of a peer's player, allocated by the host at join time.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A sanitized display name. Whitespace collapses to underscores and the
/// name is truncated so it renders predictably on every peer.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(s: &str) -> Self {
        let mut name: String = s
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        name.truncate(constants::MAX_NAME_LENGTH);
        Self(name)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for PlayerName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

impl From<String> for PlayerName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

/// Type alias for positions in the seat order fixed at match start.
pub type SeatIndex = usize;

/// One seated participant, human or bot. Hands are mutated only by the
/// host's action router; replicas treat this as read-only.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: PlayerName,
    pub is_bot: bool,
    pub is_host: bool,
    pub hand: Vec<Card>,
    pub called_uno: bool,
}

impl Player {
    #[must_use]
    pub fn new(name: PlayerName, is_bot: bool, is_host: bool) -> Self {
        Self {
            id: PlayerId::new(),
            name,
            is_bot,
            is_host,
            hand: Vec::with_capacity(constants::HAND_SIZE),
            called_uno: false,
        }
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
        self.called_uno = false;
    }
}

/// Seat count presets selectable at room creation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    HeadToHead,
    FourSeat,
    FiveSeat,
}

impl GameMode {
    #[must_use]
    pub const fn seat_count(self) -> usize {
        match self {
            Self::HeadToHead => 2,
            Self::FourSeat => 4,
            Self::FiveSeat => 5,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::HeadToHead => "head-to-head",
            Self::FourSeat => "four seats",
            Self::FiveSeat => "five seats",
        };
        write!(f, "{repr}")
    }
}

/// One line of the append-only chat log. System lines are host-generated
/// play-by-play; ordering is by host-assigned timestamp.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub sender: Option<PlayerId>,
    pub sender_name: PlayerName,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub system: bool,
}

impl ChatMessage {
    #[must_use]
    pub fn new(sender: PlayerId, sender_name: PlayerName, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Some(sender),
            sender_name,
            text,
            timestamp: Utc::now(),
            system: false,
        }
    }

    #[must_use]
    pub fn system(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: None,
            sender_name: PlayerName::new("table"),
            text,
            timestamp: Utc::now(),
            system: true,
        }
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.system {
            write!(f, "* {}", self.text)
        } else {
            write!(f, "{}: {}", self.sender_name, self.text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === CardColor Tests ===

    #[test]
    fn test_chromatic_colors_exclude_wild() {
        for color in CardColor::CHROMATIC {
            assert!(color.is_chromatic());
        }
        assert!(!CardColor::Wild.is_chromatic());
    }

    #[test]
    fn test_color_display() {
        assert_eq!(format!("{}", CardColor::Red), "red");
        assert_eq!(format!("{}", CardColor::Yellow), "yellow");
        assert_eq!(format!("{}", CardColor::Green), "green");
        assert_eq!(format!("{}", CardColor::Blue), "blue");
        assert_eq!(format!("{}", CardColor::Wild), "wild");
    }

    // === CardKind Tests ===

    #[test]
    fn test_wild_family_membership() {
        assert!(CardKind::Wild.is_wild_family());
        assert!(CardKind::WildDrawFour.is_wild_family());
        assert!(!CardKind::Skip.is_wild_family());
        assert!(!CardKind::Number(0).is_wild_family());
    }

    #[test]
    fn test_disruptive_kinds() {
        assert!(CardKind::Skip.is_disruptive());
        assert!(CardKind::Reverse.is_disruptive());
        assert!(CardKind::DrawTwo.is_disruptive());
        assert!(!CardKind::Wild.is_disruptive());
        assert!(!CardKind::Number(9).is_disruptive());
    }

    #[test]
    fn test_numeral_extraction() {
        assert_eq!(CardKind::Number(7).numeral(), Some(7));
        assert_eq!(CardKind::Skip.numeral(), None);
        assert_eq!(CardKind::WildDrawFour.numeral(), None);
    }

    #[test]
    fn test_point_values() {
        assert_eq!(CardKind::Number(0).points(), 0);
        assert_eq!(CardKind::Number(5).points(), 5);
        assert_eq!(CardKind::Skip.points(), 20);
        assert_eq!(CardKind::Reverse.points(), 20);
        assert_eq!(CardKind::DrawTwo.points(), 20);
        assert_eq!(CardKind::Wild.points(), 50);
        assert_eq!(CardKind::WildDrawFour.points(), 50);
    }

    // === Card Tests ===

    #[test]
    fn test_card_ids_are_unique() {
        let a = Card::new(CardColor::Red, CardKind::Number(5));
        let b = Card::new(CardColor::Red, CardKind::Number(5));
        assert_ne!(a.id, b.id);
        assert_eq!(a.color, b.color);
        assert_eq!(a.kind, b.kind);
    }

    #[test]
    fn test_card_display() {
        let five = Card::new(CardColor::Green, CardKind::Number(5));
        assert_eq!(format!("{five}"), "green 5");

        let skip = Card::new(CardColor::Blue, CardKind::Skip);
        assert_eq!(format!("{skip}"), "blue skip");

        let wild = Card::new(CardColor::Wild, CardKind::Wild);
        assert_eq!(format!("{wild}"), "wild");

        let wild4 = Card::new(CardColor::Wild, CardKind::WildDrawFour);
        assert_eq!(format!("{wild4}"), "wild +4");
    }

    #[test]
    fn test_card_points_delegate_to_kind() {
        let card = Card::new(CardColor::Yellow, CardKind::DrawTwo);
        assert_eq!(card.points(), 20);
    }

    // === PlayerName Tests ===

    #[test]
    fn test_name_whitespace_replacement() {
        let name = PlayerName::new("alice bob");
        assert_eq!(name.to_string(), "alice_bob");
    }

    #[test]
    fn test_name_truncation() {
        let long = "a".repeat(100);
        let name = PlayerName::new(&long);
        assert_eq!(name.as_str().len(), constants::MAX_NAME_LENGTH);
    }

    #[test]
    fn test_name_mixed_whitespace() {
        let name = PlayerName::new("a b\tc\nd");
        assert_eq!(name.to_string(), "a_b_c_d");
    }

    #[test]
    fn test_name_from_string() {
        let name: PlayerName = "carol".to_string().into();
        assert_eq!(name.to_string(), "carol");
    }

    // === Player Tests ===

    #[test]
    fn test_player_new() {
        let player = Player::new(PlayerName::new("alice"), false, true);
        assert!(player.is_host);
        assert!(!player.is_bot);
        assert!(player.hand.is_empty());
        assert!(!player.called_uno);
    }

    #[test]
    fn test_player_clear_hand() {
        let mut player = Player::new(PlayerName::new("bot"), true, false);
        player.hand.push(Card::new(CardColor::Red, CardKind::Number(3)));
        player.called_uno = true;

        player.clear_hand();

        assert!(player.hand.is_empty());
        assert!(!player.called_uno);
    }

    #[test]
    fn test_player_ids_unique() {
        let a = Player::new(PlayerName::new("a"), false, false);
        let b = Player::new(PlayerName::new("a"), false, false);
        assert_ne!(a.id, b.id);
    }

    // === GameMode Tests ===

    #[test]
    fn test_mode_seat_counts() {
        assert_eq!(GameMode::HeadToHead.seat_count(), 2);
        assert_eq!(GameMode::FourSeat.seat_count(), 4);
        assert_eq!(GameMode::FiveSeat.seat_count(), 5);
    }

    #[test]
    fn test_mode_fits_max_seats() {
        for mode in [GameMode::HeadToHead, GameMode::FourSeat, GameMode::FiveSeat] {
            assert!(mode.seat_count() <= constants::MAX_SEATS);
        }
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(format!("{}", GameMode::HeadToHead), "head-to-head");
        assert_eq!(format!("{}", GameMode::FourSeat), "four seats");
    }

    // === ChatMessage Tests ===

    #[test]
    fn test_chat_message_new() {
        let sender = PlayerId::new();
        let msg = ChatMessage::new(sender, PlayerName::new("alice"), "hi".to_string());
        assert_eq!(msg.sender, Some(sender));
        assert!(!msg.system);
        assert_eq!(format!("{msg}"), "alice: hi");
    }

    #[test]
    fn test_chat_message_system() {
        let msg = ChatMessage::system("alice played red 5".to_string());
        assert!(msg.system);
        assert!(msg.sender.is_none());
        assert_eq!(format!("{msg}"), "* alice played red 5");
    }

    #[test]
    fn test_chat_message_ids_unique() {
        let a = ChatMessage::system("x".to_string());
        let b = ChatMessage::system("x".to_string());
        assert_ne!(a.id, b.id);
    }

    // === Serialization Tests ===

    #[test]
    fn test_card_serialization_roundtrip() {
        let card = Card::new(CardColor::Blue, CardKind::DrawTwo);
        let bytes = bincode::serialize(&card).unwrap();
        let decoded: Card = bincode::deserialize(&bytes).unwrap();
        assert_eq!(card, decoded);
    }

    #[test]
    fn test_player_name_deserialization_sanitizes() {
        let raw = serde_json::json!("dirty name");
        let name: PlayerName = serde_json::from_value(raw).unwrap();
        assert_eq!(name.to_string(), "dirty_name");
    }
}
