//! In-memory stand-in for the bookmark page.
//!
//! `PageState` records what the page would show (dropdown options, input
//! state, field values, results) and serializes to the snapshot the RPC and
//! WebView hosts send to their clients.

use serde::Serialize;

use crate::managers::form_controller::{FormView, Notifier};
use crate::services::view_renderer::DisplaySurface;
use crate::types::bookmark::{FormFields, UserId};
use crate::types::view::ListEntry;

/// One entry of the user dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserOption {
    pub value: String,
    pub label: String,
}

/// Recorded state of the page's elements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageState {
    pub users: Vec<UserOption>,
    pub inputs_enabled: bool,
    pub fields: FormFields,
    pub results: Vec<ListEntry>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors what the user typed into the form.
    pub fn set_fields(&mut self, fields: FormFields) {
        self.fields = fields;
    }
}

impl DisplaySurface for PageState {
    fn clear(&mut self) {
        self.results.clear();
    }

    fn append(&mut self, entry: ListEntry) {
        self.results.push(entry);
    }
}

impl FormView for PageState {
    fn populate_users(&mut self, user_ids: &[UserId]) {
        self.users = user_ids
            .iter()
            .map(|id| UserOption {
                value: id.to_string(),
                label: id.label(),
            })
            .collect();
    }

    fn set_inputs_enabled(&mut self, enabled: bool) {
        self.inputs_enabled = enabled;
    }

    fn field_values(&self) -> FormFields {
        self.fields.clone()
    }

    fn reset_fields(&mut self) {
        self.fields = FormFields::default();
    }
}

/// Notifier that queues alerts until the host delivers them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertQueue {
    pending: Vec<String>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Removes and returns every queued alert, oldest first.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}

impl Notifier for AlertQueue {
    fn alert(&mut self, message: &str) {
        self.pending.push(message.to_string());
    }
}
