//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Local};

use crate::app::state::{AccountDialog, PendingDelete, SessionStatus};
use crate::messages::ui_events::UiMode;
use crate::models::{Account, MutationKind};
use crate::theme::ThemeName;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub session: SessionStatus,

    // List
    pub accounts: Vec<Account>,
    pub selected: usize,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_refreshed: Option<DateTime<Local>>,

    // Outstanding writes
    pub mutation_in_flight: Option<MutationKind>,
    pub deleting_account: Option<String>,

    // Popups
    pub dialog: Option<AccountDialog>,
    pub confirm_delete: Option<PendingDelete>,
    pub theme: ThemeName,
    pub theme_picker: Option<usize>,
    pub show_help: bool,
}

impl RenderState {
    /// The surface that receives key presses, topmost popup first
    pub fn mode(&self) -> UiMode {
        if self.show_help {
            UiMode::Help
        } else if self.confirm_delete.is_some() {
            UiMode::ConfirmDelete
        } else if self.dialog.is_some() {
            UiMode::Dialog
        } else if self.theme_picker.is_some() {
            UiMode::ThemePicker
        } else {
            UiMode::Browse
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            session: SessionStatus::Initializing,
            accounts: Vec::new(),
            selected: 0,
            is_loading: true,
            error: None,
            last_refreshed: None,
            mutation_in_flight: None,
            deleting_account: None,
            dialog: None,
            confirm_delete: None,
            theme: ThemeName::default(),
            theme_picker: None,
            show_help: false,
        }
    }
}
