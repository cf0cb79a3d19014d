//! Fixed quantities of the game: deck composition, hand sizes, limits.

use super::entities::CardColor;

/// Total number of cards in a fresh deck:
/// 4 x (one 0 + two each of 1-9 + two each of skip/reverse/draw-two) + 8 wilds.
pub const DECK_SIZE: usize = 108;

/// Non-wild cards per chromatic color.
pub const CARDS_PER_COLOR: usize = 25;

/// Wild + wild-draw-four cards in the deck.
pub const WILD_FAMILY_SIZE: usize = 8;

/// Cards dealt to each seat at match start.
pub const HAND_SIZE: usize = 7;

/// Largest table the engine supports.
pub const MAX_SEATS: usize = 5;

/// Point value of skip, reverse, and draw-two cards.
pub const ACTION_CARD_POINTS: u32 = 20;

/// Point value of wild and wild-draw-four cards.
pub const WILD_CARD_POINTS: u32 = 50;

/// Color the match falls back to when a wild resolves without an explicit
/// choice (malformed action, or a wild flipped as the starting card).
pub const FALLBACK_WILD_COLOR: CardColor = CardColor::Red;

/// Length of the human-typed room rendezvous code.
pub const ROOM_CODE_LENGTH: usize = 4;

/// Display names are truncated to this many characters.
pub const MAX_NAME_LENGTH: usize = 16;
