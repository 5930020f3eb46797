//! Contact search entry points.
//!
//! # Responsibility
//! - Expose pure filtering over the in-memory collection.
//! - Keep match rules (fields, case folding) inside core.

pub mod filter;
