//! Room actor implementation with async message handling.
//!
//! One actor owns one room: the authoritative [`MatchState`], the roster of
//! subscriber channels, and the bot scheduler. All mutation happens inside
//! the actor's message loop, so every action runs to completion against a
//! consistent state before the next one is looked at.

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::time::sleep;

use super::config::{RoomCode, RoomConfig};
use super::messages::{RoomMessage, RoomResponse};
use crate::bot::{names, strategy};
use crate::game::entities::{ChatMessage, PlayerId, PlayerName};
use crate::game::rules;
use crate::game::state_machine::{ActionError, MatchState, MatchStatus};
use crate::net::channel::{ChannelError, ReplicationChannel};
use crate::net::messages::{HostMessage, PlayerAction};

/// The room's inbox is gone, i.e. the actor task has exited.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("room is closed")]
pub struct RoomClosed;

/// Handle for sending messages to a running room actor.
#[derive(Clone)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomMessage>,
    code: RoomCode,
}

impl RoomHandle {
    /// The rendezvous code this room answers to.
    #[must_use]
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Send a raw message to the room.
    pub async fn send(&self, message: RoomMessage) -> Result<(), RoomClosed> {
        self.sender.send(message).await.map_err(|_| RoomClosed)
    }

    /// Request a seat, registering `channel` for broadcasts.
    pub async fn join(
        &self,
        name: PlayerName,
        channel: Box<dyn ReplicationChannel>,
    ) -> Result<RoomResponse, RoomClosed> {
        let (response, rx) = oneshot::channel();
        self.send(RoomMessage::Join { name, channel, response }).await?;
        rx.await.map_err(|_| RoomClosed)
    }

    /// Submit a gameplay action.
    pub async fn submit(
        &self,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<RoomResponse, RoomClosed> {
        let (response, rx) = oneshot::channel();
        self.send(RoomMessage::Submit { player_id, action, response }).await?;
        rx.await.map_err(|_| RoomClosed)
    }

    /// Relay a chat line.
    pub async fn chat(&self, player_id: PlayerId, text: String) -> Result<(), RoomClosed> {
        self.send(RoomMessage::Chat { player_id, text }).await
    }

    /// Host-only: start the match, filling empty seats with bots.
    pub async fn start_match(&self, player_id: PlayerId) -> Result<RoomResponse, RoomClosed> {
        let (response, rx) = oneshot::channel();
        self.send(RoomMessage::StartMatch { player_id, response }).await?;
        rx.await.map_err(|_| RoomClosed)
    }

    /// Host-only: return a finished match to the lobby.
    pub async fn reset(&self, player_id: PlayerId) -> Result<RoomResponse, RoomClosed> {
        let (response, rx) = oneshot::channel();
        self.send(RoomMessage::Reset { player_id, response }).await?;
        rx.await.map_err(|_| RoomClosed)
    }

    /// Fetch a snapshot of the authoritative state.
    pub async fn state(&self) -> Result<Box<MatchState>, RoomClosed> {
        let (response, rx) = oneshot::channel();
        self.send(RoomMessage::GetState { response }).await?;
        rx.await.map_err(|_| RoomClosed)
    }

    /// Shut the room down.
    pub async fn close(&self) -> Result<(), RoomClosed> {
        self.send(RoomMessage::Close).await
    }
}

/// Room actor managing a single match.
pub struct RoomActor {
    /// Room configuration, fixed at creation.
    config: RoomConfig,

    /// The authoritative match state.
    state: MatchState,

    /// Message inbox.
    inbox: mpsc::Receiver<RoomMessage>,

    /// Clone of the inbox sender, for scheduled bot moves.
    self_sender: mpsc::Sender<RoomMessage>,

    /// Replication channels keyed by player id. Bots have no channel.
    subscribers: HashMap<PlayerId, Box<dyn ReplicationChannel>>,

    /// Is room closed.
    is_closed: bool,
}

impl RoomActor {
    /// Create a new room actor and the handle used to reach it.
    #[must_use]
    pub fn new(config: RoomConfig) -> (Self, RoomHandle) {
        let (sender, inbox) = mpsc::channel(100);
        let handle = RoomHandle {
            sender: sender.clone(),
            code: config.code.clone(),
        };
        let actor = Self {
            config,
            state: MatchState::new(),
            inbox,
            self_sender: sender,
            subscribers: HashMap::new(),
            is_closed: false,
        };
        (actor, handle)
    }

    /// Run the room actor event loop.
    pub async fn run(mut self) {
        log::info!(
            "Room {} '{}' starting",
            self.config.code,
            self.config.name
        );

        while let Some(message) = self.inbox.recv().await {
            self.handle_message(message);
            if self.is_closed {
                break;
            }
        }

        self.broadcast(HostMessage::RoomClosed);
        log::info!("Room {} '{}' closed", self.config.code, self.config.name);
    }

    fn handle_message(&mut self, message: RoomMessage) {
        match message {
            RoomMessage::Join { name, channel, response } => {
                let result = self.handle_join(name, channel);
                let _ = response.send(result);
            }

            RoomMessage::Leave { player_id } => {
                self.handle_leave(player_id);
            }

            RoomMessage::Submit { player_id, action, response } => {
                let result = match self.submit(player_id, action) {
                    Ok(()) => RoomResponse::Accepted,
                    Err(error) => RoomResponse::Rejected(error),
                };
                if result.is_accepted() {
                    self.after_action();
                }
                let _ = response.send(result);
            }

            RoomMessage::Chat { player_id, text } => {
                self.handle_chat(player_id, text);
            }

            RoomMessage::StartMatch { player_id, response } => {
                let result = match self.handle_start(player_id) {
                    Ok(()) => RoomResponse::Accepted,
                    Err(error) => RoomResponse::Rejected(error),
                };
                if result.is_accepted() {
                    self.after_action();
                }
                let _ = response.send(result);
            }

            RoomMessage::Reset { player_id, response } => {
                let result = match self.handle_reset(player_id) {
                    Ok(()) => RoomResponse::Accepted,
                    Err(error) => RoomResponse::Rejected(error),
                };
                if result.is_accepted() {
                    let players = self.state.players.clone();
                    self.broadcast(HostMessage::LobbyUpdate { players });
                }
                let _ = response.send(result);
            }

            RoomMessage::GetState { response } => {
                let _ = response.send(Box::new(self.state.clone()));
            }

            RoomMessage::BotMove { epoch } => {
                self.handle_bot_move(epoch);
            }

            RoomMessage::Close => {
                self.is_closed = true;
            }
        }
    }

    fn handle_join(
        &mut self,
        name: PlayerName,
        channel: Box<dyn ReplicationChannel>,
    ) -> RoomResponse {
        // First seat taken becomes the host.
        let is_host = self.state.players.is_empty();
        let player_id = match self.state.add_player(name, false, is_host) {
            Ok(id) => id,
            Err(error) => return RoomResponse::Rejected(error),
        };
        self.subscribers.insert(player_id, channel);

        let players = self.state.players.clone();
        self.broadcast(HostMessage::LobbyUpdate { players: players.clone() });
        RoomResponse::Joined { player_id, players }
    }

    fn handle_leave(&mut self, player_id: PlayerId) {
        self.subscribers.remove(&player_id);
        // Mid-match the seat is kept so turn order holds; the bot scheduler
        // does not cover abandoned human seats, their turns stall until the
        // host resets.
        if self.state.status == MatchStatus::Lobby
            && self.state.remove_player(player_id).is_ok()
        {
            let players = self.state.players.clone();
            self.broadcast(HostMessage::LobbyUpdate { players });
        }
    }

    /// Validate and apply one gameplay action against the authoritative
    /// state. Turn and legality checks happen here, on the host, no matter
    /// what the submitting peer believed.
    fn submit(&mut self, player_id: PlayerId, action: PlayerAction) -> Result<(), ActionError> {
        let seat = self.state.seat_of(player_id).ok_or(ActionError::UnknownPlayer)?;

        match action {
            PlayerAction::CallUno => self.state.call_uno(seat),
            PlayerAction::DrawCard => {
                if seat != self.state.current_player_index {
                    return Err(ActionError::OutOfTurn);
                }
                self.state.apply_draw(seat, 1)?;
                self.state.pass_turn(seat)
            }
            PlayerAction::PlayCard { card_id, chosen_color } => {
                if seat != self.state.current_player_index {
                    return Err(ActionError::OutOfTurn);
                }
                let player = self
                    .state
                    .players
                    .get(seat)
                    .ok_or(ActionError::InvalidSeat(seat))?;
                let card = player
                    .hand
                    .iter()
                    .find(|c| c.id == card_id)
                    .ok_or(ActionError::CardNotInHand)?;
                let top = self.state.active_card().ok_or(ActionError::InternalState)?;
                if !rules::is_legal(card, top, self.state.active_color) {
                    return Err(ActionError::IllegalCard);
                }
                self.state.apply_play(seat, card_id, chosen_color)
            }
        }
    }

    fn handle_start(&mut self, player_id: PlayerId) -> Result<(), ActionError> {
        let player = self
            .state
            .players
            .iter()
            .find(|p| p.id == player_id)
            .ok_or(ActionError::UnknownPlayer)?;
        if !player.is_host {
            return Err(ActionError::NotHost);
        }

        // Fill empty seats with bots, then deal. If dealing fails anyway
        // (too many humans for the mode), undo the fill.
        let mut added = Vec::new();
        let mut sequence = 0;
        while self.state.players.len() < self.config.mode.seat_count() {
            let id = self.state.add_player(names::generate(sequence), true, false)?;
            added.push(id);
            sequence += 1;
        }
        if let Err(error) = self.state.start_match(self.config.mode) {
            for id in added {
                let _ = self.state.remove_player(id);
            }
            return Err(error);
        }
        Ok(())
    }

    fn handle_reset(&mut self, player_id: PlayerId) -> Result<(), ActionError> {
        let player = self
            .state
            .players
            .iter()
            .find(|p| p.id == player_id)
            .ok_or(ActionError::UnknownPlayer)?;
        if !player.is_host {
            return Err(ActionError::NotHost);
        }
        self.state.reset()
    }

    fn handle_chat(&mut self, player_id: PlayerId, text: String) {
        let Some(player) = self.state.players.iter().find(|p| p.id == player_id) else {
            return;
        };
        let message = ChatMessage::new(player.id, player.name.clone(), text);
        self.broadcast(HostMessage::Chat(message));
    }

    /// Post-commit fanout: relay play-by-play as system chat, broadcast the
    /// fresh snapshot, and schedule the next bot move if one is due.
    fn after_action(&mut self) {
        for event in self.state.drain_events() {
            let line = ChatMessage::system(event.to_string());
            self.broadcast(HostMessage::Chat(line));
        }
        let snapshot = Box::new(self.state.clone());
        self.broadcast(HostMessage::GameState(snapshot));
        self.schedule_bot_move();
    }

    /// Fan a message out to every subscriber, pruning the ones whose
    /// channel has gone away. Fire-and-forget: never waits on a peer's
    /// buffer, so a stalled subscriber cannot hold up the match. A message
    /// dropped on a full buffer is superseded by the next snapshot.
    fn broadcast(&mut self, message: HostMessage) {
        let mut dead = Vec::new();
        for (player_id, channel) in &self.subscribers {
            match channel.try_send(message.clone()) {
                Ok(()) | Err(ChannelError::Full) => {}
                Err(_) => dead.push(*player_id),
            }
        }
        for player_id in dead {
            log::debug!(
                "Room {}: pruning unreachable subscriber {player_id}",
                self.config.code
            );
            self.subscribers.remove(&player_id);
        }
    }

    /// If the turn pointer rests on a bot, schedule its move after the
    /// configured think delay. The scheduled message carries the current
    /// turn counter as an epoch; by the time it fires the match may have
    /// moved on, and a stale epoch is simply dropped.
    fn schedule_bot_move(&self) {
        if self.state.status != MatchStatus::Playing {
            return;
        }
        let Some(player) = self.state.current_player() else {
            return;
        };
        if !player.is_bot {
            return;
        }

        let epoch = self.state.turn_counter;
        let delay = self.config.bot_think_delay();
        let sender = self.self_sender.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            let _ = sender.send(RoomMessage::BotMove { epoch }).await;
        });
    }

    fn handle_bot_move(&mut self, epoch: u64) {
        if self.state.status != MatchStatus::Playing || epoch != self.state.turn_counter {
            return;
        }
        let Some(player) = self.state.current_player() else {
            return;
        };
        if !player.is_bot {
            return;
        }
        let bot_id = player.id;

        let action = {
            let Some(top) = self.state.active_card() else {
                return;
            };
            match strategy::choose_move(&player.hand, top, self.state.active_color) {
                Some(card) => {
                    let chosen_color = card
                        .kind
                        .is_wild_family()
                        .then(|| strategy::choose_wild_color(&player.hand));
                    PlayerAction::PlayCard { card_id: card.id, chosen_color }
                }
                None => PlayerAction::DrawCard,
            }
        };

        // Bot actions go through the same router as human ones.
        match self.submit(bot_id, action) {
            Ok(()) => self.after_action(),
            Err(error) => {
                log::error!(
                    "Room {}: bot move rejected: {error}",
                    self.config.code
                );
                // Recover by drawing so the match cannot wedge on a bot.
                if self.submit(bot_id, PlayerAction::DrawCard).is_ok() {
                    self.after_action();
                }
            }
        }
    }
}
