//! Repository layer abstractions and the in-memory implementation.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Own the authoritative contact collection.
//!
//! # Invariants
//! - Repository writes must enforce `Contact::validate()` before mutation.
//! - Repository APIs return semantic errors (`NotFound`) for unknown ids.

pub mod contact_repo;
pub mod seed;
