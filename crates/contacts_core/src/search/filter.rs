//! In-memory contact filtering.
//!
//! # Responsibility
//! - Derive the visible contact list from a collection and a search term.
//!
//! # Invariants
//! - Filtering is pure: the input collection is never mutated.
//! - Result order equals input order.
//! - A blank term returns the whole collection.

use crate::config::SearchPolicy;
use crate::model::contact::{Contact, ContactField};

/// Fields always matched by [`search_contacts`].
pub const DEFAULT_SEARCH_FIELDS: &[ContactField] =
    &[ContactField::Name, ContactField::Email, ContactField::JobTitle];

/// Returns the fields searched under `policy`.
pub fn searchable_fields(policy: &SearchPolicy) -> Vec<ContactField> {
    let mut fields = DEFAULT_SEARCH_FIELDS.to_vec();
    if policy.include_department {
        fields.push(ContactField::Department);
    }
    fields
}

/// Filters `contacts` by case-insensitive substring match of `term`.
pub fn search_contacts(contacts: &[Contact], term: &str, policy: &SearchPolicy) -> Vec<Contact> {
    // Surrounding whitespace is ignored, so "doe " still matches "Jane Doe".
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return contacts.to_vec();
    }

    let fields = searchable_fields(policy);
    contacts
        .iter()
        .filter(|contact| matches_term(contact, &needle, &fields))
        .cloned()
        .collect()
}

/// Returns whether any of `fields` on `contact` contains `needle`.
///
/// `needle` must already be lowercased.
pub fn matches_term(contact: &Contact, needle: &str, fields: &[ContactField]) -> bool {
    fields.iter().any(|field| {
        contact
            .field(*field)
            .is_some_and(|value| value.to_lowercase().contains(needle))
    })
}
