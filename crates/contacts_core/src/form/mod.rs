//! Draft editing for the add/edit contact dialog.
//!
//! # Responsibility
//! - Own the modal form lifecycle (`closed -> creating|editing -> closed`).
//! - Embed selected avatar images into the draft under policy limits.

pub mod avatar;
pub mod session;
