//! Presentation view models.
//!
//! # Responsibility
//! - Turn repository state into render-ready snapshots.
//! - Accept user intents and forward them to the service layer.
//!
//! Front ends (terminal, GUI) only read `BoardView` and send `Intent`s.

pub mod board;
pub mod card;
