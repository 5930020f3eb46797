//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical directory record and its editable projections
//!   (`ContactDraft` for forms, `ContactPatch` for partial merges).
//! - Own field-level validation used at the form-submission boundary.
//!
//! # Invariants
//! - `id` is stable and never reused for another contact.
//! - `name`, `job_title`, `department` and `email` are non-empty after trim.
//! - Optional fields never hold an empty string; empty input means `None`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid email regex"));

const FIELD_COUNT: usize = 10;

/// Stable identifier for a contact record.
pub type ContactId = Uuid;

/// Editable field of a contact record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactField {
    Name,
    Email,
    JobTitle,
    Department,
    Mobile,
    OfficePhone,
    AvatarUrl,
    Linkedin,
    Twitter,
    Github,
}

impl ContactField {
    /// All fields in form display order.
    pub const ALL: [ContactField; FIELD_COUNT] = [
        Self::Name,
        Self::Email,
        Self::JobTitle,
        Self::Department,
        Self::Mobile,
        Self::OfficePhone,
        Self::AvatarUrl,
        Self::Linkedin,
        Self::Twitter,
        Self::Github,
    ];

    /// Wire name, matching the serialized record key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::JobTitle => "jobTitle",
            Self::Department => "department",
            Self::Mobile => "mobile",
            Self::OfficePhone => "officePhone",
            Self::AvatarUrl => "avatarUrl",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::Github => "github",
        }
    }

    /// User-facing form label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email",
            Self::JobTitle => "Job Title",
            Self::Department => "Department",
            Self::Mobile => "Mobile Phone",
            Self::OfficePhone => "Office Phone",
            Self::AvatarUrl => "Avatar",
            Self::Linkedin => "LinkedIn URL",
            Self::Twitter => "Twitter URL",
            Self::Github => "GitHub URL",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(
            self,
            Self::Name | Self::Email | Self::JobTitle | Self::Department
        )
    }

    /// Parses a field from its wire name, case-insensitively.
    ///
    /// Also accepts snake_case spellings (`job_title`) for terminal input.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().replace('_', "").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().to_ascii_lowercase() == normalized)
    }
}

impl Display for ContactField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a single field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssueKind {
    /// Required field is empty or whitespace only.
    Missing,
    /// Email does not look like `local@domain`.
    InvalidEmail,
}

/// One field-level validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: ContactField,
    pub kind: FieldIssueKind,
}

impl Display for FieldIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            FieldIssueKind::Missing => write!(f, "{} is required", self.field.label()),
            FieldIssueKind::InvalidEmail => {
                write!(f, "{} is not a valid email address", self.field.label())
            }
        }
    }
}

/// Validation failure carrying every offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ContactValidationError {
    /// Returns whether `field` has at least one issue.
    pub fn has_issue(&self, field: ContactField) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("contact validation failed: ")?;
        for (index, issue) in self.issues.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl Error for ContactValidationError {}

/// Canonical directory record.
///
/// Serialized with camelCase keys; unset optional fields are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub job_title: String,
    pub department: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    /// Remote URL or embedded `data:` URI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl Contact {
    /// Builds a new contact with a freshly generated id.
    ///
    /// # Errors
    /// - Returns every field issue found in `draft`.
    pub fn from_draft(draft: &ContactDraft) -> Result<Self, ContactValidationError> {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Builds a contact with a caller-provided id.
    ///
    /// Used by seed/import paths where identity already exists.
    pub fn with_id(id: ContactId, draft: &ContactDraft) -> Result<Self, ContactValidationError> {
        draft.validate()?;
        Ok(Self {
            id,
            name: draft.name.trim().to_string(),
            job_title: draft.job_title.trim().to_string(),
            department: draft.department.trim().to_string(),
            email: draft.email.trim().to_string(),
            office_phone: normalize_optional(&draft.office_phone),
            mobile: normalize_optional(&draft.mobile),
            avatar_url: normalize_optional(&draft.avatar_url),
            linkedin: normalize_optional(&draft.linkedin),
            twitter: normalize_optional(&draft.twitter),
            github: normalize_optional(&draft.github),
        })
    }

    /// Returns the current value of `field`, `None` when an optional field
    /// is unset.
    pub fn field(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => Some(self.name.as_str()),
            ContactField::Email => Some(self.email.as_str()),
            ContactField::JobTitle => Some(self.job_title.as_str()),
            ContactField::Department => Some(self.department.as_str()),
            ContactField::Mobile => self.mobile.as_deref(),
            ContactField::OfficePhone => self.office_phone.as_deref(),
            ContactField::AvatarUrl => self.avatar_url.as_deref(),
            ContactField::Linkedin => self.linkedin.as_deref(),
            ContactField::Twitter => self.twitter.as_deref(),
            ContactField::Github => self.github.as_deref(),
        }
    }

    /// Copies this record into an editable draft.
    pub fn to_draft(&self) -> ContactDraft {
        let mut draft = ContactDraft::default();
        for field in ContactField::ALL {
            if let Some(value) = self.field(field) {
                draft.set(field, value);
            }
        }
        draft
    }

    /// Merges `patch` over this record. Fields absent from the patch keep
    /// their current value.
    ///
    /// Does not validate; callers check [`Contact::validate`] afterwards.
    pub fn apply_patch(&mut self, patch: &ContactPatch) {
        for (field, value) in patch.iter() {
            let trimmed = value.trim();
            match field {
                ContactField::Name => self.name = trimmed.to_string(),
                ContactField::Email => self.email = trimmed.to_string(),
                ContactField::JobTitle => self.job_title = trimmed.to_string(),
                ContactField::Department => self.department = trimmed.to_string(),
                ContactField::Mobile => self.mobile = normalize_optional(trimmed),
                ContactField::OfficePhone => self.office_phone = normalize_optional(trimmed),
                ContactField::AvatarUrl => self.avatar_url = normalize_optional(trimmed),
                ContactField::Linkedin => self.linkedin = normalize_optional(trimmed),
                ContactField::Twitter => self.twitter = normalize_optional(trimmed),
                ContactField::Github => self.github = normalize_optional(trimmed),
            }
        }
    }

    /// Validates stored invariants.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        collect_issues(|field| self.field(field).unwrap_or_default())
    }
}

/// In-progress, unsaved field set for add/edit forms.
///
/// Every field is plain text; an empty optional field means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDraft {
    pub name: String,
    pub job_title: String,
    pub department: String,
    pub email: String,
    pub office_phone: String,
    pub mobile: String,
    pub avatar_url: String,
    pub linkedin: String,
    pub twitter: String,
    pub github: String,
}

impl ContactDraft {
    /// Returns the text currently held for `field`.
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::JobTitle => &self.job_title,
            ContactField::Department => &self.department,
            ContactField::Mobile => &self.mobile,
            ContactField::OfficePhone => &self.office_phone,
            ContactField::AvatarUrl => &self.avatar_url,
            ContactField::Linkedin => &self.linkedin,
            ContactField::Twitter => &self.twitter,
            ContactField::Github => &self.github,
        }
    }

    /// Replaces the text held for `field`.
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::JobTitle => &mut self.job_title,
            ContactField::Department => &mut self.department,
            ContactField::Mobile => &mut self.mobile,
            ContactField::OfficePhone => &mut self.office_phone,
            ContactField::AvatarUrl => &mut self.avatar_url,
            ContactField::Linkedin => &mut self.linkedin,
            ContactField::Twitter => &mut self.twitter,
            ContactField::Github => &mut self.github,
        };
        *slot = value.into();
    }

    /// Checks required fields and email shape.
    ///
    /// # Errors
    /// - Returns all issues at once so forms can flag every field.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        collect_issues(|field| self.get(field))
    }

    /// Converts this draft into a patch that sets every field.
    pub fn to_patch(&self) -> ContactPatch {
        let mut patch = ContactPatch::default();
        for field in ContactField::ALL {
            patch.set(field, self.get(field));
        }
        patch
    }
}

/// Partial field set merged into an existing contact.
///
/// `Some` overwrites; `None` leaves the stored value. For optional fields an
/// empty string clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
    values: [Option<String>; FIELD_COUNT],
}

impl ContactPatch {
    /// Builder-style setter.
    pub fn with(mut self, field: ContactField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        self.values[field_index(field)] = Some(value.into());
    }

    pub fn get(&self, field: ContactField) -> Option<&str> {
        self.values[field_index(field)].as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Iterates present fields in form display order.
    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &str)> + '_ {
        ContactField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field, value)))
    }
}

// Variant order matches `ContactField::ALL`.
fn field_index(field: ContactField) -> usize {
    field as usize
}

fn normalize_optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn collect_issues<'a>(
    value_of: impl Fn(ContactField) -> &'a str,
) -> Result<(), ContactValidationError> {
    let mut issues = Vec::new();
    for field in ContactField::ALL.into_iter().filter(|f| f.is_required()) {
        if value_of(field).trim().is_empty() {
            issues.push(FieldIssue {
                field,
                kind: FieldIssueKind::Missing,
            });
        }
    }

    let email = value_of(ContactField::Email).trim();
    if !email.is_empty() && !EMAIL_RE.is_match(email) {
        issues.push(FieldIssue {
            field: ContactField::Email,
            kind: FieldIssueKind::InvalidEmail,
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ContactValidationError { issues })
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactDraft, ContactField, FieldIssueKind};

    #[test]
    fn field_parse_accepts_wire_and_snake_case() {
        assert_eq!(ContactField::parse("jobTitle"), Some(ContactField::JobTitle));
        assert_eq!(ContactField::parse("job_title"), Some(ContactField::JobTitle));
        assert_eq!(ContactField::parse(" GITHUB "), Some(ContactField::Github));
        assert_eq!(ContactField::parse("nickname"), None);
    }

    #[test]
    fn email_shape_is_checked_only_when_present() {
        let mut draft = ContactDraft::default();
        let err = draft.validate().unwrap_err();
        assert!(err
            .issues
            .iter()
            .all(|issue| issue.kind == FieldIssueKind::Missing));

        draft.email = "not an email".to_string();
        let err = draft.validate().unwrap_err();
        assert!(err
            .issues
            .iter()
            .any(|issue| issue.kind == FieldIssueKind::InvalidEmail));
    }
}
