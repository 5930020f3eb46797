//! Directory board: intent dispatch and render snapshot.
//!
//! # Responsibility
//! - Translate user intents (search, add, edit, delete) into service calls.
//! - Produce a render snapshot (`BoardView`) from current state.
//!
//! # Invariants
//! - No intent is accepted until the initial load finished.
//! - Deletion requires `RequestDelete` followed by `ConfirmDelete`.
//! - Rendering never mutates state.

use crate::form::session::{AvatarOutcome, FormError, FormSession};
use crate::model::contact::{Contact, ContactField, ContactId};
use crate::presentation::card::ContactCardView;
use crate::repo::contact_repo::{ContactRepository, RepoError, RepoResult};
use crate::service::contact_service::ContactService;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const EMPTY_SEARCH_MESSAGE: &str = "No contacts match your search.";
pub const EMPTY_DIRECTORY_MESSAGE: &str = "No contacts yet. Add one to get started!";

/// Initial-load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
}

/// User action forwarded by a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Search(String),
    OpenCreate,
    OpenEdit(ContactId),
    SetField(ContactField, String),
    AttachAvatar(PathBuf),
    ClearAvatar,
    Submit,
    CancelForm,
    RequestDelete(ContactId),
    ConfirmDelete,
    CancelDelete,
}

/// Result of a successfully applied intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    /// View state changed; nothing was persisted.
    Updated,
    Saved(Contact),
    Deleted(Contact),
    AvatarApplied,
    AvatarSuperseded,
}

/// Board-level error.
#[derive(Debug)]
pub enum BoardError {
    /// Initial load has not finished.
    NotReady,
    /// `ConfirmDelete`/`CancelDelete` without a pending request.
    NoPendingDelete,
    Form(FormError),
    Repo(RepoError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "contacts are still loading"),
            Self::NoPendingDelete => write!(f, "no delete is awaiting confirmation"),
            Self::Form(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::NotReady | Self::NoPendingDelete => None,
        }
    }
}

impl From<FormError> for BoardError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<RepoError> for BoardError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One input row of the open form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub field: ContactField,
    pub label: &'static str,
    pub value: String,
    pub required: bool,
    /// Field-level message from the last rejected submission.
    pub issue: Option<String>,
}

/// Snapshot of the open add/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FormFieldView>,
}

/// Contact awaiting delete confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeleteView {
    pub id: ContactId,
    pub name: String,
}

/// Render snapshot of the whole board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardView {
    Loading,
    Ready {
        search_term: String,
        cards: Vec<ContactCardView>,
        /// Set when `cards` is empty.
        empty_message: Option<&'static str>,
        /// Whether to offer a "first contact" shortcut.
        offer_first_contact: bool,
        form: Option<FormView>,
        pending_delete: Option<PendingDeleteView>,
    },
}

/// Presentation state over a contact service.
pub struct ContactBoard<R: ContactRepository> {
    service: ContactService<R>,
    session: FormSession,
    search_term: String,
    load_state: LoadState,
    pending_delete: Option<ContactId>,
}

impl<R: ContactRepository> ContactBoard<R> {
    /// Creates a board that still waits for its initial load.
    pub fn loading(service: ContactService<R>) -> Self {
        Self {
            service,
            session: FormSession::new(),
            search_term: String::new(),
            load_state: LoadState::Loading,
            pending_delete: None,
        }
    }

    /// Creates a board over the service's current collection that accepts
    /// intents immediately.
    pub fn ready(service: ContactService<R>) -> Self {
        let mut board = Self::loading(service);
        board.load_state = LoadState::Ready;
        board
    }

    /// Installs the fetched `seed` and marks the initial load as complete.
    ///
    /// Only the first call loads; later calls keep the current collection.
    ///
    /// # Errors
    /// - `Validation` / `DuplicateId` when `seed` is rejected; the board then
    ///   stays in `Loading`.
    pub fn finish_loading(&mut self, seed: Vec<Contact>) -> RepoResult<()> {
        if self.load_state == LoadState::Ready {
            return Ok(());
        }

        self.service.load(seed)?;
        self.load_state = LoadState::Ready;
        info!(
            "event=board_ready module=presentation status=ok count={}",
            self.service.repo().len()
        );
        Ok(())
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn service(&self) -> &ContactService<R> {
        &self.service
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn pending_delete(&self) -> Option<ContactId> {
        self.pending_delete
    }

    /// Applies one user intent.
    ///
    /// # Errors
    /// - `NotReady` before [`ContactBoard::finish_loading`].
    /// - Form, repository and confirmation errors; state is left consistent
    ///   and the user can retry.
    pub fn dispatch(&mut self, intent: Intent) -> Result<IntentOutcome, BoardError> {
        if self.load_state != LoadState::Ready {
            return Err(BoardError::NotReady);
        }

        match intent {
            Intent::Search(term) => {
                self.search_term = term;
                Ok(IntentOutcome::Updated)
            }
            Intent::OpenCreate => {
                self.session.open_for_create()?;
                Ok(IntentOutcome::Updated)
            }
            Intent::OpenEdit(id) => {
                self.service.open_edit(&mut self.session, id)?;
                Ok(IntentOutcome::Updated)
            }
            Intent::SetField(field, value) => {
                self.session.set_field(field, value)?;
                Ok(IntentOutcome::Updated)
            }
            Intent::AttachAvatar(path) => {
                match self.service.attach_avatar_file(&mut self.session, path)? {
                    AvatarOutcome::Applied => Ok(IntentOutcome::AvatarApplied),
                    AvatarOutcome::Superseded => Ok(IntentOutcome::AvatarSuperseded),
                }
            }
            Intent::ClearAvatar => {
                self.session.clear_selected_avatar()?;
                Ok(IntentOutcome::Updated)
            }
            Intent::Submit => {
                let saved = self.service.submit_form(&mut self.session)?;
                Ok(IntentOutcome::Saved(saved))
            }
            Intent::CancelForm => {
                self.session.cancel()?;
                Ok(IntentOutcome::Updated)
            }
            Intent::RequestDelete(id) => {
                if self.service.get(id).is_none() {
                    return Err(BoardError::Repo(RepoError::NotFound(id)));
                }
                self.pending_delete = Some(id);
                Ok(IntentOutcome::Updated)
            }
            Intent::ConfirmDelete => {
                let id = self.pending_delete.take().ok_or(BoardError::NoPendingDelete)?;
                let removed = self.service.remove(id)?;
                Ok(IntentOutcome::Deleted(removed))
            }
            Intent::CancelDelete => {
                self.pending_delete
                    .take()
                    .ok_or(BoardError::NoPendingDelete)?;
                Ok(IntentOutcome::Updated)
            }
        }
    }

    /// Builds the current render snapshot.
    pub fn render(&self) -> BoardView {
        if self.load_state == LoadState::Loading {
            return BoardView::Loading;
        }

        let cards = self
            .service
            .search(&self.search_term)
            .iter()
            .map(ContactCardView::from_contact)
            .collect::<Vec<_>>();
        let has_term = !self.search_term.trim().is_empty();
        let empty_message = match (cards.is_empty(), has_term) {
            (false, _) => None,
            (true, true) => Some(EMPTY_SEARCH_MESSAGE),
            (true, false) => Some(EMPTY_DIRECTORY_MESSAGE),
        };

        BoardView::Ready {
            search_term: self.search_term.clone(),
            offer_first_contact: cards.is_empty() && !has_term,
            cards,
            empty_message,
            form: self.form_view(),
            pending_delete: self.pending_delete.and_then(|id| {
                self.service
                    .get(id)
                    .map(|contact| PendingDeleteView { id, name: contact.name })
            }),
        }
    }

    fn form_view(&self) -> Option<FormView> {
        let draft = self.session.draft()?;
        let fields = ContactField::ALL
            .into_iter()
            .map(|field| FormFieldView {
                field,
                label: field.label(),
                value: draft.get(field).to_string(),
                required: field.is_required(),
                issue: self
                    .session
                    .issues()
                    .iter()
                    .find(|issue| issue.field == field)
                    .map(ToString::to_string),
            })
            .collect();

        Some(FormView {
            title: self.session.title(),
            submit_label: self.session.submit_label(),
            fields,
        })
    }
}
