//! Contact repository contracts and in-memory implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the authoritative contact collection.
//! - Report semantic errors (`NotFound`) instead of silently ignoring ids.
//!
//! # Invariants
//! - Write paths validate before mutating the collection.
//! - Ids are unique; new contacts are prepended; updates keep position.

use crate::config::SearchPolicy;
use crate::model::contact::{
    Contact, ContactDraft, ContactId, ContactPatch, ContactValidationError,
};
use crate::search::filter::search_contacts;
use log::{debug, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(ContactValidationError),
    NotFound(ContactId),
    DuplicateId(ContactId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::DuplicateId(id) => write!(f, "duplicate contact id: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// Returns the collection in display order.
    fn list(&self) -> Vec<Contact>;
    fn get(&self, id: ContactId) -> Option<Contact>;
    /// Creates a contact with a fresh id and prepends it.
    fn add(&mut self, draft: &ContactDraft) -> RepoResult<Contact>;
    /// Merges `patch` into the contact matching `id`, in place.
    fn update(&mut self, id: ContactId, patch: &ContactPatch) -> RepoResult<Contact>;
    /// Removes and returns the contact matching `id`.
    fn remove(&mut self, id: ContactId) -> RepoResult<Contact>;
    /// Replaces the whole collection, keeping the given order.
    fn replace_all(&mut self, contacts: Vec<Contact>) -> RepoResult<()>;
    /// Filters the collection without mutating it.
    fn search(&self, term: &str, policy: &SearchPolicy) -> Vec<Contact>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Vec-backed contact repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContactRepository {
    contacts: Vec<Contact>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository from existing records, keeping their order.
    ///
    /// # Errors
    /// - `DuplicateId` when two records share an id.
    /// - `Validation` when a record breaks required-field invariants.
    pub fn with_contacts(contacts: Vec<Contact>) -> RepoResult<Self> {
        let mut seen = HashSet::with_capacity(contacts.len());
        for contact in &contacts {
            contact.validate()?;
            if !seen.insert(contact.id) {
                return Err(RepoError::DuplicateId(contact.id));
            }
        }

        info!(
            "event=repo_load module=repo status=ok count={}",
            contacts.len()
        );
        Ok(Self { contacts })
    }

    fn position(&self, id: ContactId) -> Option<usize> {
        self.contacts.iter().position(|contact| contact.id == id)
    }

    fn contains(&self, id: ContactId) -> bool {
        self.position(id).is_some()
    }
}

impl ContactRepository for InMemoryContactRepository {
    fn list(&self) -> Vec<Contact> {
        self.contacts.clone()
    }

    fn get(&self, id: ContactId) -> Option<Contact> {
        self.position(id).map(|index| self.contacts[index].clone())
    }

    fn add(&mut self, draft: &ContactDraft) -> RepoResult<Contact> {
        let mut contact = Contact::from_draft(draft)?;
        // v4 collisions are not expected; regenerate rather than trust it.
        while self.contains(contact.id) {
            contact = Contact::from_draft(draft)?;
        }

        self.contacts.insert(0, contact.clone());
        info!(
            "event=contact_create module=repo status=ok id={} count={}",
            contact.id,
            self.contacts.len()
        );
        Ok(contact)
    }

    fn update(&mut self, id: ContactId, patch: &ContactPatch) -> RepoResult<Contact> {
        let Some(index) = self.position(id) else {
            warn!("event=contact_update module=repo status=error error_code=not_found id={id}");
            return Err(RepoError::NotFound(id));
        };

        let mut merged = self.contacts[index].clone();
        merged.apply_patch(patch);
        merged.validate()?;

        self.contacts[index] = merged.clone();
        info!("event=contact_update module=repo status=ok id={id} position={index}");
        Ok(merged)
    }

    fn remove(&mut self, id: ContactId) -> RepoResult<Contact> {
        let Some(index) = self.position(id) else {
            warn!("event=contact_delete module=repo status=error error_code=not_found id={id}");
            return Err(RepoError::NotFound(id));
        };

        let removed = self.contacts.remove(index);
        info!(
            "event=contact_delete module=repo status=ok id={id} count={}",
            self.contacts.len()
        );
        Ok(removed)
    }

    fn replace_all(&mut self, contacts: Vec<Contact>) -> RepoResult<()> {
        *self = Self::with_contacts(contacts)?;
        Ok(())
    }

    fn search(&self, term: &str, policy: &SearchPolicy) -> Vec<Contact> {
        let hits = search_contacts(&self.contacts, term, policy);
        debug!(
            "event=contact_search module=repo status=ok term_len={} hits={}",
            term.chars().count(),
            hits.len()
        );
        hits
    }

    fn len(&self) -> usize {
        self.contacts.len()
    }
}
