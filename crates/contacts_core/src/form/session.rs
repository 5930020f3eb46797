//! Modal add/edit form state machine.
//!
//! # Responsibility
//! - Stage an unsaved `ContactDraft` between open and submit/cancel.
//! - Route a valid submission to repository `add` or `update`.
//! - Track avatar reads so only the latest selection lands in the draft.
//!
//! # Invariants
//! - The draft exists only while the session is open.
//! - Failed validation or repository errors keep the session open.
//! - `cancel` never mutates the repository.
//! - A completed avatar read applies only if no newer read has started.

use crate::form::avatar::{AvatarError, AvatarPayload};
use crate::model::contact::{
    Contact, ContactDraft, ContactField, ContactId, ContactValidationError, FieldIssue,
};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current form state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Creating,
    Editing { id: ContactId },
}

/// Form session error.
#[derive(Debug)]
pub enum FormError {
    /// Operation requires an open form.
    NotOpen,
    /// Form is already open for another draft.
    AlreadyOpen,
    /// Draft failed field validation.
    Validation(ContactValidationError),
    /// Repository rejected the submission.
    Repo(RepoError),
    /// Selected avatar image could not be embedded.
    Avatar(AvatarError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen => write!(f, "contact form is not open"),
            Self::AlreadyOpen => write!(f, "contact form is already open"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Avatar(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Avatar(err) => Some(err),
            Self::NotOpen | Self::AlreadyOpen => None,
        }
    }
}

impl From<RepoError> for FormError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<AvatarError> for FormError {
    fn from(value: AvatarError) -> Self {
        Self::Avatar(value)
    }
}

/// Handle for one in-flight avatar read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvatarReadTicket {
    generation: u64,
}

/// Result of completing an avatar read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarOutcome {
    /// Payload replaced the draft's `avatar_url`.
    Applied,
    /// A newer read (or close) superseded this one; nothing changed.
    Superseded,
}

/// Modal editing session over one draft.
#[derive(Debug, Clone)]
pub struct FormSession {
    mode: FormMode,
    draft: ContactDraft,
    avatar_at_open: String,
    avatar_generation: u64,
    pending_avatar: Option<u64>,
    issues: Vec<FieldIssue>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    /// Creates a closed session.
    pub fn new() -> Self {
        Self {
            mode: FormMode::Closed,
            draft: ContactDraft::default(),
            avatar_at_open: String::new(),
            avatar_generation: 0,
            pending_avatar: None,
            issues: Vec::new(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    /// Returns the staged draft while open.
    pub fn draft(&self) -> Option<&ContactDraft> {
        self.is_open().then_some(&self.draft)
    }

    /// Field issues from the last rejected submission.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Dialog title for the current mode.
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Editing { .. } => "Edit Contact",
            _ => "Add New Contact",
        }
    }

    /// Submit button label for the current mode.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Editing { .. } => "Save Changes",
            _ => "Add Contact",
        }
    }

    /// Opens an empty draft for a new contact.
    pub fn open_for_create(&mut self) -> Result<(), FormError> {
        self.open(FormMode::Creating, ContactDraft::default())
    }

    /// Opens a draft copied from `contact`, carrying its id through.
    pub fn open_for_edit(&mut self, contact: &Contact) -> Result<(), FormError> {
        self.open(FormMode::Editing { id: contact.id }, contact.to_draft())
    }

    /// Replaces one draft field.
    pub fn set_field(
        &mut self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        self.ensure_open()?;
        self.draft.set(field, value);
        Ok(())
    }

    /// Discards the draft and closes without touching the repository.
    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;
        debug!("event=form_cancel module=form status=ok");
        self.close();
        Ok(())
    }

    /// Starts an avatar read, superseding any read still in flight.
    pub fn begin_avatar_read(&mut self) -> Result<AvatarReadTicket, FormError> {
        self.ensure_open()?;
        self.avatar_generation += 1;
        self.pending_avatar = Some(self.avatar_generation);
        Ok(AvatarReadTicket {
            generation: self.avatar_generation,
        })
    }

    /// Finishes an avatar read started by [`FormSession::begin_avatar_read`].
    ///
    /// Stale tickets are ignored, including failed ones.
    ///
    /// # Errors
    /// - `Avatar` when the latest read failed; the draft is left unchanged.
    pub fn complete_avatar_read(
        &mut self,
        ticket: AvatarReadTicket,
        result: Result<AvatarPayload, AvatarError>,
    ) -> Result<AvatarOutcome, FormError> {
        if !self.is_open() || self.pending_avatar != Some(ticket.generation) {
            debug!(
                "event=avatar_read module=form status=superseded generation={}",
                ticket.generation
            );
            return Ok(AvatarOutcome::Superseded);
        }
        self.pending_avatar = None;

        let payload = result?;
        debug!(
            "event=avatar_read module=form status=ok mime={} bytes={}",
            payload.mime(),
            payload.byte_len()
        );
        self.draft.avatar_url = payload.into_data_uri();
        Ok(AvatarOutcome::Applied)
    }

    /// Reverts `avatar_url` to the value it held when the form opened.
    pub fn clear_selected_avatar(&mut self) -> Result<(), FormError> {
        self.ensure_open()?;
        self.pending_avatar = None;
        self.draft.avatar_url = self.avatar_at_open.clone();
        Ok(())
    }

    /// Validates and persists the draft, then closes the form.
    ///
    /// # Errors
    /// - `NotOpen` when no draft is staged.
    /// - `Validation` with every field issue; the form stays open.
    /// - `Repo` (e.g. `NotFound` for a contact deleted meanwhile); the form
    ///   stays open.
    pub fn submit<R: ContactRepository>(&mut self, repo: &mut R) -> Result<Contact, FormError> {
        self.ensure_open()?;

        if let Err(err) = self.draft.validate() {
            info!(
                "event=form_submit module=form status=rejected issues={}",
                err.issues.len()
            );
            self.issues = err.issues.clone();
            return Err(FormError::Validation(err));
        }

        let saved = match self.mode {
            FormMode::Editing { id } => repo.update(id, &self.draft.to_patch()),
            _ => repo.add(&self.draft),
        };
        let contact = match saved {
            Ok(contact) => contact,
            Err(err) => {
                if let RepoError::Validation(validation) = &err {
                    self.issues = validation.issues.clone();
                }
                return Err(err.into());
            }
        };

        info!("event=form_submit module=form status=ok id={}", contact.id);
        self.close();
        Ok(contact)
    }

    fn open(&mut self, mode: FormMode, draft: ContactDraft) -> Result<(), FormError> {
        if self.is_open() {
            return Err(FormError::AlreadyOpen);
        }
        self.avatar_at_open = draft.avatar_url.clone();
        self.draft = draft;
        self.mode = mode;
        self.issues.clear();
        self.pending_avatar = None;
        debug!("event=form_open module=form status=ok mode={}", mode_name(mode));
        Ok(())
    }

    fn close(&mut self) {
        self.mode = FormMode::Closed;
        self.draft = ContactDraft::default();
        self.avatar_at_open.clear();
        self.pending_avatar = None;
        self.issues.clear();
    }

    fn ensure_open(&self) -> Result<(), FormError> {
        if self.is_open() {
            Ok(())
        } else {
            Err(FormError::NotOpen)
        }
    }
}

fn mode_name(mode: FormMode) -> &'static str {
    match mode {
        FormMode::Closed => "closed",
        FormMode::Creating => "creating",
        FormMode::Editing { .. } => "editing",
    }
}
