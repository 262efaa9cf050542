//! Form Controller.
//!
//! Owns the bookmark form's state machine. The controller holds the page's
//! UI through [`FormView`] and reports problems through [`Notifier`], so the
//! whole flow runs without a real display.
//!
//! ```text
//! NoUserSelected --select(id)--> UserSelected(id)
//! UserSelected   --select("")--> NoUserSelected
//! UserSelected   --submit-----> UserSelected   (validate, dedup, persist, re-render)
//! ```

use chrono::{DateTime, Utc};

use crate::services::storage::{safe_get_data, StorageTrait};
use crate::services::validation::{check_bookmark, is_duplicate};
use crate::services::view_renderer::{DisplaySurface, ViewRenderer};
use crate::types::bookmark::{Bookmark, FormFields, UserId};
use crate::types::errors::{StorageError, SubmitRejection};

/// Key that submits the form when pressed inside it.
pub const SUBMIT_KEY: &str = "Enter";

/// The page elements the controller drives.
pub trait FormView: DisplaySurface {
    /// Fills the user dropdown, keeping the given order.
    fn populate_users(&mut self, user_ids: &[UserId]);
    /// Enables or disables every form input and the submit control.
    fn set_inputs_enabled(&mut self, enabled: bool);
    /// Current raw field values.
    fn field_values(&self) -> FormFields;
    /// Empties the form fields.
    fn reset_fields(&mut self);
}

/// Capability to show a modal alert to the user.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Selection state of the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    NoUserSelected,
    UserSelected(UserId),
}

/// Discrete user actions delivered to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The dropdown value changed; an empty value means "no user".
    SelectionChanged(String),
    /// A key was pressed while focus was inside the form.
    KeyDown(String),
    /// The submit control was activated.
    Submit,
}

/// Result of a submission that did not fail in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved(Bookmark),
    Rejected(SubmitRejection),
}

/// What handling an event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The event had no effect; the host keeps its default behavior.
    Ignored,
    /// The selection was applied.
    SelectionApplied(FormState),
    /// The submission path ran.
    Submitted(SubmitOutcome),
}

impl EventOutcome {
    /// Whether the host must suppress the event's default action
    /// (native form submission, newline insertion).
    pub fn prevents_default(&self) -> bool {
        matches!(self, EventOutcome::Submitted(_))
    }
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Drives the bookmark form for the lifetime of the page.
pub struct FormController<S, V, N> {
    storage: S,
    view: V,
    notifier: N,
    renderer: ViewRenderer,
    state: FormState,
    clock: Clock,
}

impl<S: StorageTrait, V: FormView, N: Notifier> FormController<S, V, N> {
    pub fn new(storage: S, view: V, notifier: N, renderer: ViewRenderer) -> Self {
        Self {
            storage,
            view,
            notifier,
            renderer,
            state: FormState::NoUserSelected,
            clock: Box::new(Utc::now),
        }
    }

    /// Replaces the time source used to stamp new bookmarks.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Initial render: fills the dropdown and disables the form.
    ///
    /// # Errors
    /// Returns the storage error if the user list cannot be read.
    pub fn initialize(&mut self) -> Result<(), StorageError> {
        let user_ids = self.storage.get_user_ids()?;
        self.view.populate_users(&user_ids);
        self.view.set_inputs_enabled(false);
        self.state = FormState::NoUserSelected;
        tracing::debug!(users = user_ids.len(), "form initialized");
        Ok(())
    }

    /// Dispatches one user action.
    ///
    /// # Errors
    /// Only a failed write surfaces here; every other problem is reported
    /// to the user through the notifier.
    pub fn handle_event(&mut self, event: FormEvent) -> Result<EventOutcome, StorageError> {
        match event {
            FormEvent::SelectionChanged(value) => {
                self.select_user(&value);
                Ok(EventOutcome::SelectionApplied(self.state.clone()))
            }
            FormEvent::KeyDown(key) if key == SUBMIT_KEY => {
                self.submit().map(EventOutcome::Submitted)
            }
            FormEvent::KeyDown(_) => Ok(EventOutcome::Ignored),
            FormEvent::Submit => self.submit().map(EventOutcome::Submitted),
        }
    }

    /// Applies a dropdown change.
    pub fn select_user(&mut self, value: &str) {
        if value.is_empty() {
            self.view.set_inputs_enabled(false);
            self.view.clear();
            self.state = FormState::NoUserSelected;
            tracing::debug!("selection cleared");
            return;
        }

        let user_id = UserId::from(value);
        self.view.set_inputs_enabled(true);
        self.display_bookmarks(&user_id);
        tracing::debug!(user = %user_id, "user selected");
        self.state = FormState::UserSelected(user_id);
    }

    /// Re-reads and renders a user's bookmarks into the view.
    pub fn display_bookmarks(&mut self, user_id: &UserId) {
        let bookmarks = safe_get_data(&self.storage, user_id);
        self.renderer.render(&mut self.view, bookmarks);
    }

    /// Runs the submission path against the current field values.
    ///
    /// # Errors
    /// Propagates a failed `set_data`; nothing is retried.
    pub fn submit(&mut self) -> Result<SubmitOutcome, StorageError> {
        let FormState::UserSelected(user_id) = self.state.clone() else {
            return Ok(self.reject(SubmitRejection::NoUserSelected));
        };

        let candidate = self.view.field_values().to_candidate((self.clock)());
        if let Err(e) = check_bookmark(&candidate) {
            return Ok(self.reject(e.into()));
        }

        let mut bookmarks = safe_get_data(&self.storage, &user_id);
        if is_duplicate(&bookmarks, &candidate) {
            return Ok(self.reject(SubmitRejection::Duplicate(candidate.url)));
        }

        bookmarks.push(candidate.clone());
        self.storage.set_data(&user_id, &bookmarks)?;
        tracing::info!(user = %user_id, url = %candidate.url, "bookmark saved");

        self.view.reset_fields();
        self.display_bookmarks(&user_id);
        Ok(SubmitOutcome::Saved(candidate))
    }

    fn reject(&mut self, rejection: SubmitRejection) -> SubmitOutcome {
        tracing::debug!(reason = ?rejection, "submission rejected");
        self.notifier.alert(&rejection.to_string());
        SubmitOutcome::Rejected(rejection)
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn selected_user(&self) -> Option<&UserId> {
        match &self.state {
            FormState::UserSelected(id) => Some(id),
            FormState::NoUserSelected => None,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Swaps the renderer, e.g. after display settings change.
    pub fn set_renderer(&mut self, renderer: ViewRenderer) {
        self.renderer = renderer;
    }
}
