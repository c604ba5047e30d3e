//! Command handlers - business logic for processing UI events and responses

use crate::app::state::{AccountDialog, PendingDelete, SessionStatus};
use crate::app::AppState;
use crate::constants::SESSION_INIT_FAILED;
use crate::error::GatewayError;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{AccountFields, MutationKind};
use crate::theme::ThemeName;

impl AppState {
    // ========================
    // Session
    // ========================

    /// The handshake command; issued once when the app actor starts
    pub fn start_session(&mut self) -> Option<NetworkCommand> {
        if self.session_request_id.is_some() {
            return None;
        }
        let id = self.next_id();
        self.session_request_id = Some(id);
        Some(NetworkCommand::InitializeSession { id })
    }

    // ========================
    // Refresh
    // ========================

    /// Request a full fetch of the account list
    pub fn begin_refresh(&mut self) -> Option<NetworkCommand> {
        if self.session != SessionStatus::Ready {
            tracing::debug!(session = ?self.session, "Refresh skipped, session not ready");
            return None;
        }
        let id = self.next_id();
        self.pending_fetches.insert(id);
        Some(NetworkCommand::FetchAccounts { id })
    }

    // ========================
    // Selection
    // ========================

    pub fn select_next(&mut self) {
        if !self.accounts.is_empty() {
            self.selected = (self.selected + 1) % self.accounts.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.accounts.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.accounts.len() - 1);
        }
    }

    // ========================
    // Form dialog
    // ========================

    pub fn open_create_dialog(&mut self) {
        if self.dialog.is_none() && self.session == SessionStatus::Ready {
            self.dialog = Some(AccountDialog::for_create());
        }
    }

    pub fn open_edit_dialog(&mut self) {
        if self.dialog.is_some() || self.session != SessionStatus::Ready {
            return;
        }
        if let Some(dialog) = self.selected_account().map(AccountDialog::for_edit) {
            self.dialog = Some(dialog);
        }
    }

    /// Discard the form without touching the gateway
    pub fn cancel_dialog(&mut self) {
        if self.dialog.as_ref().is_some_and(|d| d.saving) {
            return;
        }
        self.dialog = None;
    }

    pub fn dialog_next_field(&mut self) {
        if let Some(dialog) = &mut self.dialog {
            dialog.field = dialog.field.next();
            dialog.cursor_position = dialog.current_input().len();
        }
    }

    pub fn dialog_prev_field(&mut self) {
        if let Some(dialog) = &mut self.dialog {
            dialog.field = dialog.field.prev();
            dialog.cursor_position = dialog.current_input().len();
        }
    }

    pub fn move_cursor_left(&mut self) {
        let Some(dialog) = &mut self.dialog else { return };
        let input = dialog.current_input();
        if dialog.cursor_position > 0 {
            dialog.cursor_position = input[..dialog.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let Some(dialog) = &mut self.dialog else { return };
        let input = dialog.current_input();
        if dialog.cursor_position < input.len() {
            dialog.cursor_position = input[dialog.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| dialog.cursor_position + i)
                .unwrap_or(input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let Some(dialog) = &mut self.dialog else { return };
        if dialog.saving {
            return;
        }
        let cursor_pos = dialog.cursor_position;
        let input = dialog.current_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            dialog.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        let Some(dialog) = &mut self.dialog else { return };
        if dialog.saving || dialog.cursor_position == 0 {
            return;
        }
        let cursor_pos = dialog.cursor_position;
        let input = dialog.current_input_mut();
        let prev_pos = input[..cursor_pos]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        input.remove(prev_pos);
        dialog.cursor_position = prev_pos;
    }

    /// Validate and send the form; the dialog stays open until the outcome arrives
    pub fn submit_dialog(&mut self) -> Option<NetworkCommand> {
        if self.pending_mutation.is_some() {
            return None;
        }
        let (kind, fields, account_id) = {
            let dialog = self.dialog.as_ref().filter(|d| !d.saving)?;
            let kind = dialog.mutation_kind();
            let input = AccountFields::from_input(&dialog.name, &dialog.email, &dialog.phone);
            let fields = match input {
                Ok(fields) => fields,
                Err(e) => {
                    self.error = Some(e.to_string());
                    return None;
                }
            };
            (kind, fields, dialog.editing.as_ref().map(|a| a.id.clone()))
        };

        if self.session != SessionStatus::Ready {
            self.error = Some(mutation_error(kind, &GatewayError::SessionNotReady.to_string()));
            return None;
        }

        self.error = None;
        let id = self.next_id();
        self.pending_mutation = Some((id, kind));
        if let Some(dialog) = &mut self.dialog {
            dialog.saving = true;
        }

        Some(match account_id {
            Some(account_id) => NetworkCommand::UpdateAccount { id, account_id, fields },
            None => NetworkCommand::CreateAccount { id, fields },
        })
    }

    // ========================
    // Delete
    // ========================

    /// Ask for confirmation before deleting the selected account
    pub fn request_delete(&mut self) {
        if self.pending_mutation.is_some()
            || self.dialog.is_some()
            || self.session != SessionStatus::Ready
        {
            return;
        }
        self.confirm_delete = self.selected_account().map(|account| PendingDelete {
            account_id: account.id.clone(),
            name: account.display_name().to_string(),
        });
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = None;
    }

    pub fn confirm_pending_delete(&mut self) -> Option<NetworkCommand> {
        let pending = self.confirm_delete.take()?;
        if self.pending_mutation.is_some() {
            return None;
        }
        if self.session != SessionStatus::Ready {
            self.error = Some(mutation_error(
                MutationKind::Delete,
                &GatewayError::SessionNotReady.to_string(),
            ));
            return None;
        }

        self.error = None;
        let id = self.next_id();
        self.pending_mutation = Some((id, MutationKind::Delete));
        self.deleting_account = Some(pending.account_id.clone());
        Some(NetworkCommand::DeleteAccount {
            id,
            account_id: pending.account_id,
        })
    }

    // ========================
    // Theme
    // ========================

    pub fn open_theme_picker(&mut self) {
        self.theme_picker = Some(self.settings.theme().index());
    }

    pub fn close_theme_picker(&mut self) {
        self.theme_picker = None;
    }

    pub fn theme_picker_next(&mut self) {
        if let Some(i) = self.theme_picker {
            self.theme_picker = Some((i + 1) % ThemeName::ALL.len());
        }
    }

    pub fn theme_picker_prev(&mut self) {
        if let Some(i) = self.theme_picker {
            self.theme_picker = Some(i.checked_sub(1).unwrap_or(ThemeName::ALL.len() - 1));
        }
    }

    pub fn apply_theme_picker(&mut self) {
        if let Some(theme) = self.theme_picker.and_then(ThemeName::from_index) {
            self.set_theme(theme);
        }
        self.theme_picker = None;
    }

    pub fn select_theme(&mut self, index: usize) {
        if let Some(theme) = ThemeName::from_index(index) {
            self.set_theme(theme);
            self.theme_picker = None;
        }
    }

    pub fn set_theme(&mut self, theme: ThemeName) {
        if let Err(e) = self.settings.set_theme(theme) {
            tracing::warn!(error = %e, theme = theme.label(), "Failed to persist theme");
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Response handling
    // ========================

    /// Apply a network response; returns a follow-up command (a refresh) if any
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        match response {
            NetworkResponse::SessionReady { id } => {
                if self.session_request_id != Some(id) {
                    return None;
                }
                self.session = SessionStatus::Ready;
                tracing::info!("Session ready");
                self.begin_refresh()
            }
            NetworkResponse::SessionFailed { id, message } => {
                if self.session_request_id != Some(id) {
                    return None;
                }
                tracing::error!(error = %message, "Session failed, data operations disabled");
                self.session = SessionStatus::Failed;
                self.error = Some(SESSION_INIT_FAILED.to_string());
                None
            }
            NetworkResponse::AccountsLoaded { id, accounts } => {
                self.pending_fetches.remove(&id);
                if id <= self.last_applied_fetch {
                    let last_applied = self.last_applied_fetch;
                    tracing::warn!(id, last_applied, "Discarding stale fetch");
                    return None;
                }
                self.last_applied_fetch = id;
                self.accounts = accounts;
                self.error = None;
                self.last_refreshed = Some(chrono::Local::now());
                if self.selected >= self.accounts.len() {
                    self.selected = self.accounts.len().saturating_sub(1);
                }
                None
            }
            NetworkResponse::FetchFailed { id, message } => {
                self.pending_fetches.remove(&id);
                if id <= self.last_applied_fetch {
                    tracing::warn!(id, "Discarding stale fetch failure");
                    return None;
                }
                self.error = Some(format!("Failed to load accounts: {}", message));
                None
            }
            NetworkResponse::MutationApplied { id, kind } => {
                if !self.take_pending_mutation(id) {
                    return None;
                }
                let refresh = self.begin_refresh();
                match kind {
                    MutationKind::Create | MutationKind::Update => self.dialog = None,
                    MutationKind::Delete => self.deleting_account = None,
                }
                refresh
            }
            NetworkResponse::MutationFailed { id, kind, message } => {
                if !self.take_pending_mutation(id) {
                    return None;
                }
                self.error = Some(mutation_error(kind, &message));
                match kind {
                    MutationKind::Create | MutationKind::Update => {
                        if let Some(dialog) = &mut self.dialog {
                            dialog.saving = false;
                        }
                    }
                    MutationKind::Delete => self.deleting_account = None,
                }
                None
            }
        }
    }

    fn take_pending_mutation(&mut self, id: u64) -> bool {
        match self.pending_mutation {
            Some((pending_id, _)) if pending_id == id => {
                self.pending_mutation = None;
                true
            }
            _ => {
                tracing::warn!(id, "Ignoring response for unknown mutation");
                false
            }
        }
    }
}

fn mutation_error(kind: MutationKind, detail: &str) -> String {
    format!("Failed to {} account: {}", kind.verb(), detail)
}
