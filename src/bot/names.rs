//! Display names for synthetic bot seats.

use rand::Rng;

use crate::game::entities::PlayerName;

const PREFIXES: [&str; 8] = [
    "Wild", "Swift", "Lucky", "Turbo", "Sly", "Neon", "Retro", "Zesty",
];
const SUFFIXES: [&str; 8] = [
    "Draw", "Skip", "Shark", "Joker", "Ace", "Dealer", "Stack", "Combo",
];

/// Generate a bot display name, suffixed with its seat sequence number so
/// names stay unique within a room.
#[must_use]
pub fn generate(sequence: usize) -> PlayerName {
    let mut rng = rand::rng();
    let prefix = PREFIXES[rng.random_range(0..PREFIXES.len())];
    let suffix = SUFFIXES[rng.random_range(0..SUFFIXES.len())];
    PlayerName::new(&format!("{prefix}{suffix}_{sequence}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_carry_sequence_number() {
        let name = generate(3);
        assert!(name.as_str().ends_with("_3"));
    }

    #[test]
    fn test_names_are_never_empty() {
        for i in 0..10 {
            assert!(!generate(i).as_str().is_empty());
        }
    }
}
