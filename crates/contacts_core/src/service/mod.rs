//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and form calls into use-case level APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod contact_service;
