//! Core game engine: deck, rules, entities, and the authoritative match
//! state machine.

pub mod constants;
pub mod deck;
pub mod entities;
pub mod rules;
pub mod state_machine;
