//! Core domain logic for the contact directory.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod form;
pub mod logging;
pub mod model;
pub mod presentation;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{AvatarPolicy, ConfigError, CoreConfig, SearchPolicy};
pub use form::avatar::{AvatarError, AvatarPayload};
pub use form::session::{AvatarOutcome, AvatarReadTicket, FormError, FormMode, FormSession};
pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LoggingConfig,
    LoggingError,
};
pub use model::contact::{
    Contact, ContactDraft, ContactField, ContactId, ContactPatch, ContactValidationError,
    FieldIssue, FieldIssueKind,
};
pub use presentation::board::{
    BoardError, BoardView, ContactBoard, Intent, IntentOutcome, LoadState,
};
pub use presentation::card::ContactCardView;
pub use repo::contact_repo::{
    ContactRepository, InMemoryContactRepository, RepoError, RepoResult,
};
pub use repo::seed::seed_contacts;
pub use search::filter::search_contacts;
pub use service::contact_service::ContactService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
