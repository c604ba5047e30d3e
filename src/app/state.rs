//! App state - pure data structure with no network I/O

use std::collections::BTreeSet;

use chrono::{DateTime, Local};

use crate::messages::ui_events::DialogField;
use crate::messages::RenderState;
use crate::models::{Account, MutationKind};
use crate::storage::SettingsStore;

/// Progress of the one-time session handshake
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Ready,
    /// Terminal for this run; no data operations are issued
    Failed,
}

/// Create/edit form. Holding the edited record here means a selected record
/// can only exist while the dialog is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountDialog {
    /// `Some` in edit mode
    pub editing: Option<Account>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub field: DialogField,
    pub cursor_position: usize,
    pub saving: bool,
}

impl AccountDialog {
    pub fn for_create() -> Self {
        AccountDialog {
            editing: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            field: DialogField::Name,
            cursor_position: 0,
            saving: false,
        }
    }

    pub fn for_edit(account: &Account) -> Self {
        let name = account.name.clone().unwrap_or_default();
        AccountDialog {
            editing: Some(account.clone()),
            cursor_position: name.len(),
            name,
            email: account.email.clone().unwrap_or_default(),
            phone: account.phone.clone().unwrap_or_default(),
            field: DialogField::Name,
            saving: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn mutation_kind(&self) -> MutationKind {
        if self.is_edit() {
            MutationKind::Update
        } else {
            MutationKind::Create
        }
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Account"
        } else {
            "Create New Account"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match (self.is_edit(), self.saving) {
            (true, true) => "Updating...",
            (true, false) => "Update",
            (false, true) => "Creating...",
            (false, false) => "Create",
        }
    }

    pub fn value(&self, field: DialogField) -> &str {
        match field {
            DialogField::Name => &self.name,
            DialogField::Email => &self.email,
            DialogField::Phone => &self.phone,
        }
    }

    /// Get the focused field content
    pub fn current_input(&self) -> &str {
        self.value(self.field)
    }

    /// Get mutable reference to the focused field
    pub fn current_input_mut(&mut self) -> &mut String {
        match self.field {
            DialogField::Name => &mut self.name,
            DialogField::Email => &mut self.email,
            DialogField::Phone => &mut self.phone,
        }
    }
}

/// A delete waiting for the user's confirmation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDelete {
    pub account_id: String,
    pub name: String,
}

/// Main application state - pure data, no network I/O
pub struct AppState {
    // Session
    pub session: SessionStatus,
    pub session_request_id: Option<u64>,

    // Snapshot of the last successful fetch
    pub accounts: Vec<Account>,
    pub selected: usize,
    pub last_refreshed: Option<DateTime<Local>>,

    // Banner text
    pub error: Option<String>,

    // Request bookkeeping
    pub next_request_id: u64,
    pub pending_fetches: BTreeSet<u64>,
    pub last_applied_fetch: u64,
    pub pending_mutation: Option<(u64, MutationKind)>,
    pub deleting_account: Option<String>,

    // Popups
    pub dialog: Option<AccountDialog>,
    pub confirm_delete: Option<PendingDelete>,
    pub theme_picker: Option<usize>,
    pub show_help: bool,

    // Persisted settings
    pub settings: SettingsStore,
}

impl AppState {
    pub fn new(settings: SettingsStore) -> Self {
        AppState {
            session: SessionStatus::Initializing,
            session_request_id: None,
            accounts: Vec::new(),
            selected: 0,
            last_refreshed: None,
            error: None,
            next_request_id: 1,
            pending_fetches: BTreeSet::new(),
            last_applied_fetch: 0,
            pending_mutation: None,
            deleting_account: None,
            dialog: None,
            confirm_delete: None,
            theme_picker: None,
            show_help: false,
            settings,
        }
    }

    /// Generate a unique, increasing request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// True while the handshake or any fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.session == SessionStatus::Initializing || !self.pending_fetches.is_empty()
    }

    pub fn selected_account(&self) -> Option<&Account> {
        self.accounts.get(self.selected)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            session: self.session,
            accounts: self.accounts.clone(),
            selected: self.selected,
            is_loading: self.is_loading(),
            error: self.error.clone(),
            last_refreshed: self.last_refreshed,
            mutation_in_flight: self.pending_mutation.map(|(_, kind)| kind),
            deleting_account: self.deleting_account.clone(),
            dialog: self.dialog.clone(),
            confirm_delete: self.confirm_delete.clone(),
            theme: self.settings.theme(),
            theme_picker: self.theme_picker,
            show_help: self.show_help,
        }
    }
}
