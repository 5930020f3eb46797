//! Domain model for directory contacts.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one record shape shared by repository, search and forms.
//!
//! # Invariants
//! - Every contact is identified by a stable `ContactId`.
//! - Deletion is a hard remove; there are no tombstones.

pub mod contact;
