//! Bot move selection. Pure functions over a hand and the table state;
//! deterministic given the same inputs.
//!
//! The heuristic is deliberately simple: lead with disruption, spend
//! matching color/numeral cards next, and hold wilds as a last resort to
//! preserve flexibility.

use crate::game::entities::{Card, CardColor};
use crate::game::rules;

/// Pick the card a bot should play, or `None` when it must draw.
///
/// Preference order over the legal subset, each resolved by hand order:
/// (1) a disruptive action card (skip/reverse/draw-two), (2) any non-wild
/// card, (3) the first legal card, typically a wild.
#[must_use]
pub fn choose_move<'a>(hand: &'a [Card], top_card: &Card, active_color: CardColor) -> Option<&'a Card> {
    let legal: Vec<&Card> = hand
        .iter()
        .filter(|card| rules::is_legal(card, top_card, active_color))
        .collect();
    if let Some(card) = legal.iter().find(|card| card.kind.is_disruptive()) {
        return Some(card);
    }
    if let Some(card) = legal.iter().find(|card| !card.kind.is_wild_family()) {
        return Some(card);
    }
    legal.first().copied()
}

/// Color a bot declares when playing a wild: the chromatic color it holds
/// the most of, ties broken by the fixed color table order.
#[must_use]
pub fn choose_wild_color(hand: &[Card]) -> CardColor {
    let mut best = CardColor::CHROMATIC[0];
    let mut best_count = 0;
    for color in CardColor::CHROMATIC {
        let count = hand.iter().filter(|card| card.color == color).count();
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::CardKind;

    fn card(color: CardColor, kind: CardKind) -> Card {
        Card::new(color, kind)
    }

    #[test]
    fn test_no_legal_card_means_draw() {
        let hand = vec![
            card(CardColor::Blue, CardKind::Number(1)),
            card(CardColor::Green, CardKind::Number(2)),
        ];
        let top = card(CardColor::Red, CardKind::Number(5));
        assert!(choose_move(&hand, &top, CardColor::Red).is_none());
    }

    #[test]
    fn test_prefers_disruptive_action_card() {
        let hand = vec![
            card(CardColor::Red, CardKind::Number(5)),
            card(CardColor::Red, CardKind::Skip),
        ];
        let top = card(CardColor::Red, CardKind::Number(9));
        let choice = choose_move(&hand, &top, CardColor::Red).unwrap();
        assert_eq!(choice.kind, CardKind::Skip);
    }

    #[test]
    fn test_first_disruptive_by_hand_order() {
        let hand = vec![
            card(CardColor::Red, CardKind::Reverse),
            card(CardColor::Red, CardKind::Skip),
        ];
        let top = card(CardColor::Red, CardKind::Number(9));
        let choice = choose_move(&hand, &top, CardColor::Red).unwrap();
        assert_eq!(choice.kind, CardKind::Reverse);
    }

    #[test]
    fn test_prefers_non_wild_over_wild() {
        let hand = vec![
            card(CardColor::Wild, CardKind::Wild),
            card(CardColor::Red, CardKind::Number(5)),
        ];
        let top = card(CardColor::Red, CardKind::Number(9));
        let choice = choose_move(&hand, &top, CardColor::Red).unwrap();
        assert_eq!(choice.kind, CardKind::Number(5));
    }

    #[test]
    fn test_falls_back_to_wild_when_nothing_else_fits() {
        let hand = vec![
            card(CardColor::Blue, CardKind::Number(1)),
            card(CardColor::Wild, CardKind::WildDrawFour),
        ];
        let top = card(CardColor::Red, CardKind::Number(5));
        let choice = choose_move(&hand, &top, CardColor::Red).unwrap();
        assert_eq!(choice.kind, CardKind::WildDrawFour);
    }

    #[test]
    fn test_disruption_only_counts_when_legal() {
        // The skip is the wrong color and kind; the numeral match wins.
        let hand = vec![
            card(CardColor::Blue, CardKind::Skip),
            card(CardColor::Green, CardKind::Number(5)),
        ];
        let top = card(CardColor::Red, CardKind::Number(5));
        let choice = choose_move(&hand, &top, CardColor::Red).unwrap();
        assert_eq!(choice.kind, CardKind::Number(5));
    }

    #[test]
    fn test_wild_color_picks_most_held() {
        let hand = vec![
            card(CardColor::Blue, CardKind::Number(1)),
            card(CardColor::Blue, CardKind::Number(2)),
            card(CardColor::Green, CardKind::Number(3)),
            card(CardColor::Wild, CardKind::Wild),
        ];
        assert_eq!(choose_wild_color(&hand), CardColor::Blue);
    }

    #[test]
    fn test_wild_color_ties_break_by_table_order() {
        let hand = vec![
            card(CardColor::Blue, CardKind::Number(1)),
            card(CardColor::Yellow, CardKind::Number(2)),
        ];
        // Yellow comes before blue in the color table.
        assert_eq!(choose_wild_color(&hand), CardColor::Yellow);
    }

    #[test]
    fn test_wild_color_of_all_wild_hand_defaults_to_first() {
        let hand = vec![card(CardColor::Wild, CardKind::Wild)];
        assert_eq!(choose_wild_color(&hand), CardColor::CHROMATIC[0]);
    }
}
