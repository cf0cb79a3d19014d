//! Deck construction and shuffling. Pure functions; the state machine owns
//! the resulting piles.

use rand::seq::SliceRandom;

use super::constants::DECK_SIZE;
use super::entities::{Card, CardColor, CardKind};

/// Build a freshly shuffled 108-card deck.
///
/// Per chromatic color: one 0, two each of 1-9, and two each of
/// skip/reverse/draw-two. Plus four wilds and four wild-draw-fours in the
/// neutral color. Every card gets a unique id.
#[must_use]
pub fn build_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for color in CardColor::CHROMATIC {
        cards.push(Card::new(color, CardKind::Number(0)));
        for value in 1..=9 {
            cards.push(Card::new(color, CardKind::Number(value)));
            cards.push(Card::new(color, CardKind::Number(value)));
        }
        for kind in [CardKind::Skip, CardKind::Reverse, CardKind::DrawTwo] {
            cards.push(Card::new(color, kind));
            cards.push(Card::new(color, kind));
        }
    }
    for _ in 0..4 {
        cards.push(Card::new(CardColor::Wild, CardKind::Wild));
        cards.push(Card::new(CardColor::Wild, CardKind::WildDrawFour));
    }
    shuffle(&mut cards);
    cards
}

/// Uniform in-place Fisher-Yates shuffle.
pub fn shuffle(cards: &mut [Card]) {
    cards.shuffle(&mut rand::rng());
}
