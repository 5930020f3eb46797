//! Contact use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for directory callers (board, CLI).
//! - Apply `CoreConfig` policies (search fields, avatar limits) so callers
//!   never pass them around.
//!
//! # Invariants
//! - Service APIs never bypass repository validation.
//! - Service layer remains storage-agnostic.

use crate::config::CoreConfig;
use crate::form::avatar::AvatarPayload;
use crate::form::session::{AvatarOutcome, FormError, FormSession};
use crate::model::contact::{Contact, ContactId};
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use std::path::Path;

/// Use-case service wrapper for contact operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
    config: CoreConfig,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service with default configuration.
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, CoreConfig::default())
    }

    pub fn with_config(repo: R, config: CoreConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn list(&self) -> Vec<Contact> {
        self.repo.list()
    }

    pub fn get(&self, id: ContactId) -> Option<Contact> {
        self.repo.get(id)
    }

    /// Filters contacts using the configured search policy.
    pub fn search(&self, term: &str) -> Vec<Contact> {
        self.repo.search(term, &self.config.search)
    }

    /// Installs the initial collection, replacing anything present.
    pub fn load(&mut self, contacts: Vec<Contact>) -> RepoResult<()> {
        self.repo.replace_all(contacts)
    }

    pub fn remove(&mut self, id: ContactId) -> RepoResult<Contact> {
        self.repo.remove(id)
    }

    /// Resolves a contact from a full id or a unique, case-insensitive id
    /// prefix (terminal input shows shortened ids).
    pub fn resolve_id(&self, input: &str) -> Option<ContactId> {
        let needle = input.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }

        let mut matches = self
            .repo
            .list()
            .into_iter()
            .map(|contact| contact.id)
            .filter(|id| id.to_string().starts_with(&needle));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first)
    }

    /// Opens `session` for editing the contact matching `id`.
    pub fn open_edit(&self, session: &mut FormSession, id: ContactId) -> Result<(), FormError> {
        let contact = self
            .repo
            .get(id)
            .ok_or(FormError::Repo(RepoError::NotFound(id)))?;
        session.open_for_edit(&contact)
    }

    /// Submits `session` against the owned repository.
    pub fn submit_form(&mut self, session: &mut FormSession) -> Result<Contact, FormError> {
        session.submit(&mut self.repo)
    }

    /// Reads an image file into the open draft under the configured policy.
    pub fn attach_avatar_file(
        &self,
        session: &mut FormSession,
        path: impl AsRef<Path>,
    ) -> Result<AvatarOutcome, FormError> {
        let ticket = session.begin_avatar_read()?;
        let result = AvatarPayload::read_file(path, &self.config.avatar);
        session.complete_avatar_read(ticket, result)
    }

    /// Embeds in-memory image bytes into the open draft.
    pub fn attach_avatar_bytes(
        &self,
        session: &mut FormSession,
        bytes: &[u8],
        mime: Option<&str>,
    ) -> Result<AvatarOutcome, FormError> {
        let ticket = session.begin_avatar_read()?;
        let result = AvatarPayload::from_bytes(bytes, mime, &self.config.avatar);
        session.complete_avatar_read(ticket, result)
    }
}
