//! Play legality. Stateless; the host re-checks every submitted play with
//! these rules before mutating the match.

use super::entities::{Card, CardColor};

/// Whether `card` may be played on top of `top_card` given the match's
/// active color.
///
/// A wild-family card is always legal. Otherwise the card must share the
/// active color, match the top card's numeral, or match the top card's
/// non-numeral kind (action-on-action is legal across colors).
#[must_use]
pub fn is_legal(card: &Card, top_card: &Card, active_color: CardColor) -> bool {
    if card.kind.is_wild_family() {
        return true;
    }
    // Kind equality covers both numeral-on-equal-numeral and
    // action-on-same-action; a non-wild kind never equals a wild kind.
    card.color == active_color || card.kind == top_card.kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::CardKind;

    fn card(color: CardColor, kind: CardKind) -> Card {
        Card::new(color, kind)
    }

    #[test]
    fn test_wild_family_always_legal() {
        let wild = card(CardColor::Wild, CardKind::Wild);
        let wild_four = card(CardColor::Wild, CardKind::WildDrawFour);
        for color in CardColor::CHROMATIC {
            let top = card(color, CardKind::Number(3));
            assert!(is_legal(&wild, &top, color));
            assert!(is_legal(&wild_four, &top, color));
        }
    }

    #[test]
    fn test_color_match_is_legal() {
        let played = card(CardColor::Blue, CardKind::Number(2));
        let top = card(CardColor::Blue, CardKind::Number(9));
        assert!(is_legal(&played, &top, CardColor::Blue));
    }

    #[test]
    fn test_active_color_overrides_top_color() {
        // A wild was played on a red pile and green was chosen: green cards
        // are legal even though the wild's own color is neutral.
        let played = card(CardColor::Green, CardKind::Number(7));
        let top = card(CardColor::Wild, CardKind::Wild);
        assert!(is_legal(&played, &top, CardColor::Green));
        assert!(!is_legal(&played, &top, CardColor::Red));
    }

    #[test]
    fn test_equal_numerals_are_legal_across_colors() {
        let played = card(CardColor::Yellow, CardKind::Number(4));
        let top = card(CardColor::Red, CardKind::Number(4));
        assert!(is_legal(&played, &top, CardColor::Red));
    }

    #[test]
    fn test_unequal_numerals_are_illegal_across_colors() {
        let played = card(CardColor::Yellow, CardKind::Number(4));
        let top = card(CardColor::Red, CardKind::Number(5));
        assert!(!is_legal(&played, &top, CardColor::Red));
    }

    #[test]
    fn test_same_action_kind_is_legal_across_colors() {
        for kind in [CardKind::Skip, CardKind::Reverse, CardKind::DrawTwo] {
            let played = card(CardColor::Green, kind);
            let top = card(CardColor::Red, kind);
            assert!(is_legal(&played, &top, CardColor::Red), "{kind} on {kind}");
        }
    }

    #[test]
    fn test_different_action_kinds_are_illegal_across_colors() {
        let played = card(CardColor::Green, CardKind::Skip);
        let top = card(CardColor::Red, CardKind::Reverse);
        assert!(!is_legal(&played, &top, CardColor::Red));
    }

    #[test]
    fn test_reflexive_on_identical_face() {
        let played = card(CardColor::Blue, CardKind::Number(8));
        let top = card(CardColor::Blue, CardKind::Number(8));
        assert!(is_legal(&played, &top, CardColor::Blue));
    }

    #[test]
    fn test_numeral_does_not_match_wild_top_by_kind() {
        // Only the active color makes a play legal on a wild top card.
        let played = card(CardColor::Yellow, CardKind::Number(1));
        let top = card(CardColor::Wild, CardKind::WildDrawFour);
        assert!(!is_legal(&played, &top, CardColor::Blue));
    }
}
