//! The authoritative match model: lifecycle, piles, turn engine, and
//! special-card effects.
//!
//! A [`MatchState`] is owned and mutated exclusively by the host's room
//! actor. Every other peer holds a read-only replica that is replaced
//! wholesale by each broadcast snapshot, so nothing in here needs to be
//! incrementally diffable.

use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt};
use thiserror::Error;

use super::constants::{FALLBACK_WILD_COLOR, HAND_SIZE, MAX_SEATS};
use super::deck;
use super::entities::{Card, CardColor, CardId, CardKind, GameMode, Player, PlayerId, PlayerName, SeatIndex};

/// Errors from player-originated operations. The room actor treats all of
/// these as silent rejections; they never crash a match.
#[derive(Clone, Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum ActionError {
    #[error("room is full")]
    RoomFull,
    #[error("match already in progress")]
    MatchInProgress,
    #[error("match is not in progress")]
    MatchNotInProgress,
    #[error("match is not over")]
    MatchNotOver,
    #[error("expected {expected} seated players, found {actual}")]
    WrongSeatCount { expected: usize, actual: usize },
    #[error("user does not exist")]
    UnknownPlayer,
    #[error("not your turn")]
    OutOfTurn,
    #[error("card is not in your hand")]
    CardNotInHand,
    #[error("card does not match the discard pile")]
    IllegalCard,
    #[error("only the host can do that")]
    NotHost,
    #[error("invalid game state: seat index {0} out of bounds")]
    InvalidSeat(usize),
    #[error("invalid game state: internal consistency error")]
    InternalState,
}

/// Lifecycle of a match.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum MatchStatus {
    Lobby,
    Playing,
    GameOver,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Lobby => "lobby",
            Self::Playing => "playing",
            Self::GameOver => "game over",
        };
        write!(f, "{repr}")
    }
}

/// Events generated while applying actions. The host drains these and
/// relays them as system chat lines so every replica gets play-by-play.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum MatchEvent {
    MatchStarted { starter: Card },
    CardPlayed { player: PlayerName, card: Card },
    ColorChosen { player: PlayerName, color: CardColor },
    CardsDrawn { player: PlayerName, count: usize },
    TurnPassed { player: PlayerName },
    Reversed,
    Skipped { player: PlayerName },
    UnoCalled { player: PlayerName },
    DeckReclaimed { count: usize },
    MatchWon { player: PlayerName },
}

impl fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::MatchStarted { starter } => format!("first card up is {starter}"),
            Self::CardPlayed { player, card } => format!("{player} played {card}"),
            Self::ColorChosen { player, color } => format!("{player} chose {color}"),
            Self::CardsDrawn { player, count: 1 } => format!("{player} drew a card"),
            Self::CardsDrawn { player, count } => format!("{player} drew {count} cards"),
            Self::TurnPassed { player } => format!("{player} passed"),
            Self::Reversed => "play order reversed".to_string(),
            Self::Skipped { player } => format!("{player} was skipped"),
            Self::UnoCalled { player } => format!("{player} called UNO"),
            Self::DeckReclaimed { count } => {
                format!("reshuffled {count} cards back into the draw pile")
            }
            Self::MatchWon { player } => format!("{player} wins the game"),
        };
        write!(f, "{repr}")
    }
}

/// Wrapping turn-pointer arithmetic: one step from `current` in
/// `direction` around a table of `player_count` seats.
#[must_use]
pub fn next_index(current: SeatIndex, direction: i8, player_count: usize) -> SeatIndex {
    let n = player_count as isize;
    (current as isize + direction as isize).rem_euclid(n) as usize
}

/// The root aggregate for one match.
///
/// Invariants while `status == Playing`: the turn pointer indexes a seated
/// player, the discard pile is non-empty, the active color is chromatic,
/// and every card lives in exactly one of draw pile / discard pile / a
/// hand. `winner` is set iff `status == GameOver`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MatchState {
    pub status: MatchStatus,
    /// Seat order is fixed at match start and defines turn order.
    pub players: Vec<Player>,
    pub current_player_index: SeatIndex,
    /// +1 or -1.
    pub direction: i8,
    /// Top of the draw pile is the last element.
    pub draw_pile: Vec<Card>,
    /// Top of the discard pile (the active card) is the last element.
    pub discard_pile: Vec<Card>,
    pub active_color: CardColor,
    pub winner: Option<PlayerId>,
    /// Monotonic; bumped on every play and every draw-then-pass. Doubles
    /// as the epoch for stale bot-move cancellation.
    pub turn_counter: u64,
    #[serde(skip)]
    events: VecDeque<MatchEvent>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            status: MatchStatus::Lobby,
            players: Vec::with_capacity(MAX_SEATS),
            current_player_index: 0,
            direction: 1,
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
            active_color: FALLBACK_WILD_COLOR,
            winner: None,
            turn_counter: 0,
            events: VecDeque::new(),
        }
    }
}

impl MatchState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a player. Lobby only.
    pub fn add_player(
        &mut self,
        name: PlayerName,
        is_bot: bool,
        is_host: bool,
    ) -> Result<PlayerId, ActionError> {
        if self.status != MatchStatus::Lobby {
            return Err(ActionError::MatchInProgress);
        }
        if self.players.len() >= MAX_SEATS {
            return Err(ActionError::RoomFull);
        }
        let player = Player::new(name, is_bot, is_host);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Unseat a player. Lobby only; mid-match departures keep their seat so
    /// turn order stays intact.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), ActionError> {
        if self.status != MatchStatus::Lobby {
            return Err(ActionError::MatchInProgress);
        }
        let seat = self.seat_of(id).ok_or(ActionError::UnknownPlayer)?;
        self.players.remove(seat);
        Ok(())
    }

    #[must_use]
    pub fn seat_of(&self, id: PlayerId) -> Option<SeatIndex> {
        self.players.iter().position(|p| p.id == id)
    }

    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    /// The discard top, i.e. the reference card for legality checks.
    #[must_use]
    pub fn active_card(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    /// Cards in existence across all piles and hands. Constant for the
    /// lifetime of a match.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.draw_pile.len()
            + self.discard_pile.len()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Deal a fresh match to the seated roster.
    ///
    /// The roster must already hold exactly the mode's seat count (the room
    /// actor fills empty seats with bots before calling this). Flips one
    /// starter card; a wild starter resolves to the fallback color instead
    /// of staying neutral.
    pub fn start_match(&mut self, mode: GameMode) -> Result<(), ActionError> {
        if self.status != MatchStatus::Lobby {
            return Err(ActionError::MatchInProgress);
        }
        if self.players.len() != mode.seat_count() {
            return Err(ActionError::WrongSeatCount {
                expected: mode.seat_count(),
                actual: self.players.len(),
            });
        }

        self.draw_pile = deck::build_deck();
        self.discard_pile.clear();
        for player in &mut self.players {
            player.clear_hand();
        }
        for seat in 0..self.players.len() {
            self.draw_into(seat, HAND_SIZE);
        }

        let starter = self.draw_pile.pop().ok_or(ActionError::InternalState)?;
        self.active_color = if starter.color.is_chromatic() {
            starter.color
        } else {
            FALLBACK_WILD_COLOR
        };
        self.discard_pile.push(starter);

        self.current_player_index = 0;
        self.direction = 1;
        self.winner = None;
        self.turn_counter = 1;
        self.status = MatchStatus::Playing;
        self.events.clear();
        self.events.push_back(MatchEvent::MatchStarted { starter });
        Ok(())
    }

    /// Move `count` cards from the draw pile into a player's hand,
    /// reclaiming the discard pile on underflow. Clears the player's
    /// called-UNO flag. Does not advance the turn.
    pub fn apply_draw(&mut self, seat: SeatIndex, count: usize) -> Result<(), ActionError> {
        if self.status != MatchStatus::Playing {
            return Err(ActionError::MatchNotInProgress);
        }
        if seat >= self.players.len() {
            return Err(ActionError::InvalidSeat(seat));
        }
        self.draw_into(seat, count);
        Ok(())
    }

    fn draw_into(&mut self, seat: SeatIndex, count: usize) -> usize {
        let Some(name) = self.players.get(seat).map(|p| p.name.clone()) else {
            return 0;
        };
        let mut drawn = 0;
        for _ in 0..count {
            if self.draw_pile.is_empty() {
                self.reclaim_discard();
            }
            // Both piles exhausted: degenerate no-op rather than a crash.
            let Some(card) = self.draw_pile.pop() else { break };
            if let Some(player) = self.players.get_mut(seat) {
                player.hand.push(card);
                player.called_uno = false;
                drawn += 1;
            }
        }
        if drawn > 0 && self.status == MatchStatus::Playing {
            self.events
                .push_back(MatchEvent::CardsDrawn { player: name, count: drawn });
        }
        drawn
    }

    /// Shuffle everything below the discard top back under the draw pile,
    /// keeping the top as the sole discard.
    fn reclaim_discard(&mut self) {
        if self.discard_pile.len() <= 1 {
            return;
        }
        let Some(top) = self.discard_pile.pop() else {
            return;
        };
        let mut reclaimed = std::mem::take(&mut self.discard_pile);
        deck::shuffle(&mut reclaimed);
        let count = reclaimed.len();
        reclaimed.append(&mut self.draw_pile);
        self.draw_pile = reclaimed;
        self.discard_pile.push(top);
        self.events.push_back(MatchEvent::DeckReclaimed { count });
    }

    /// Play a card from the current player's hand and apply its full effect
    /// chain: color resolution, win detection, reversals, bypasses, forced
    /// draws, and turn advancement.
    ///
    /// Legality against the discard top is the caller's responsibility;
    /// the room actor re-validates with [`rules`](super::rules) before
    /// committing.
    pub fn apply_play(
        &mut self,
        seat: SeatIndex,
        card_id: CardId,
        chosen_color: Option<CardColor>,
    ) -> Result<(), ActionError> {
        if self.status != MatchStatus::Playing {
            return Err(ActionError::MatchNotInProgress);
        }
        if seat >= self.players.len() {
            return Err(ActionError::InvalidSeat(seat));
        }
        if seat != self.current_player_index {
            return Err(ActionError::OutOfTurn);
        }

        let (card, name, hand_empty) = {
            let player = self.players.get_mut(seat).ok_or(ActionError::InvalidSeat(seat))?;
            let position = player
                .hand
                .iter()
                .position(|c| c.id == card_id)
                .ok_or(ActionError::CardNotInHand)?;
            let card = player.hand.remove(position);
            (card, player.name.clone(), player.hand.is_empty())
        };

        self.events
            .push_back(MatchEvent::CardPlayed { player: name.clone(), card });

        self.active_color = if card.kind.is_wild_family() {
            // Malformed wilds fall back to a fixed color deterministically
            // rather than leaving the active color neutral.
            let color = chosen_color
                .filter(|c| c.is_chromatic())
                .unwrap_or(FALLBACK_WILD_COLOR);
            self.events
                .push_back(MatchEvent::ColorChosen { player: name.clone(), color });
            color
        } else {
            card.color
        };
        self.discard_pile.push(card);
        self.turn_counter += 1;

        if hand_empty {
            // Win overrides every other effect the card would have caused.
            self.status = MatchStatus::GameOver;
            self.winner = self.players.get(seat).map(|p| p.id);
            self.events.push_back(MatchEvent::MatchWon { player: name });
            return Ok(());
        }

        let player_count = self.players.len();
        let mut bypass = false;
        let mut penalty = 0;
        match card.kind {
            CardKind::Reverse => {
                self.direction = -self.direction;
                self.events.push_back(MatchEvent::Reversed);
                // Head-to-head: the same opponent would replay immediately,
                // so reverse doubles as a skip and the acting player goes
                // again.
                if player_count == 2 {
                    bypass = true;
                }
            }
            CardKind::Skip => bypass = true,
            CardKind::DrawTwo => penalty = 2,
            CardKind::WildDrawFour => penalty = 4,
            CardKind::Number(_) | CardKind::Wild => {}
        }

        if penalty > 0 {
            let victim = next_index(self.current_player_index, self.direction, player_count);
            self.draw_into(victim, penalty);
            bypass = true;
        }
        if bypass {
            let skipped = next_index(self.current_player_index, self.direction, player_count);
            if let Some(player) = self.players.get(skipped) {
                self.events
                    .push_back(MatchEvent::Skipped { player: player.name.clone() });
            }
        }

        self.current_player_index =
            next_index(self.current_player_index, self.direction, player_count);
        if bypass {
            self.current_player_index =
                next_index(self.current_player_index, self.direction, player_count);
        }
        Ok(())
    }

    /// Advance the turn after an uneventful draw. Drawing never grants an
    /// immediate replay.
    pub fn pass_turn(&mut self, seat: SeatIndex) -> Result<(), ActionError> {
        if self.status != MatchStatus::Playing {
            return Err(ActionError::MatchNotInProgress);
        }
        if seat != self.current_player_index {
            return Err(ActionError::OutOfTurn);
        }
        let name = self
            .players
            .get(seat)
            .map(|p| p.name.clone())
            .ok_or(ActionError::InvalidSeat(seat))?;
        self.current_player_index =
            next_index(self.current_player_index, self.direction, self.players.len());
        self.turn_counter += 1;
        self.events.push_back(MatchEvent::TurnPassed { player: name });
        Ok(())
    }

    /// Flag a player as having called UNO. Legal out of turn.
    pub fn call_uno(&mut self, seat: SeatIndex) -> Result<(), ActionError> {
        if self.status != MatchStatus::Playing {
            return Err(ActionError::MatchNotInProgress);
        }
        let player = self
            .players
            .get_mut(seat)
            .ok_or(ActionError::InvalidSeat(seat))?;
        player.called_uno = true;
        let name = player.name.clone();
        self.events.push_back(MatchEvent::UnoCalled { player: name });
        Ok(())
    }

    /// Return a finished match to the lobby, retaining the roster with
    /// cleared hands.
    pub fn reset(&mut self) -> Result<(), ActionError> {
        if self.status != MatchStatus::GameOver {
            return Err(ActionError::MatchNotOver);
        }
        for player in &mut self.players {
            player.clear_hand();
        }
        self.draw_pile.clear();
        self.discard_pile.clear();
        self.current_player_index = 0;
        self.direction = 1;
        self.active_color = FALLBACK_WILD_COLOR;
        self.winner = None;
        self.turn_counter = 0;
        self.status = MatchStatus::Lobby;
        Ok(())
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain_events(&mut self) -> VecDeque<MatchEvent> {
        std::mem::take(&mut self.events)
    }
}
