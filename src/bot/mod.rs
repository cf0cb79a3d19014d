//! Bot players: move selection and synthetic display names.

pub mod names;
pub mod strategy;
