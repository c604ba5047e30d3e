//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use crate::storage::SettingsStore;

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        settings: SettingsStore,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(settings),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Handshake first; the initial fetch follows its success
        let init = self.state.start_session();
        self.send(init);
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    tracing::debug!(id = response.id(), "Network response");
                    let follow_up = self.state.handle_response(response);
                    self.send(follow_up);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, command: Option<NetworkCommand>) {
        if let Some(cmd) = command {
            tracing::debug!(id = ?cmd.id(), "Dispatching {:?}", cmd);
            let _ = self.network_tx.send(cmd);
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // List
            UiEvent::Refresh => {
                let cmd = self.state.begin_refresh();
                self.send(cmd);
            }
            UiEvent::SelectNext => self.state.select_next(),
            UiEvent::SelectPrev => self.state.select_prev(),
            UiEvent::NewAccount => self.state.open_create_dialog(),
            UiEvent::EditSelected => self.state.open_edit_dialog(),

            // Delete
            UiEvent::DeleteSelected => self.state.request_delete(),
            UiEvent::ConfirmDelete => {
                let cmd = self.state.confirm_pending_delete();
                self.send(cmd);
            }
            UiEvent::CancelDelete => self.state.cancel_delete(),

            // Form dialog
            UiEvent::DialogNextField => self.state.dialog_next_field(),
            UiEvent::DialogPrevField => self.state.dialog_prev_field(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::SubmitDialog => {
                let cmd = self.state.submit_dialog();
                self.send(cmd);
            }
            UiEvent::CancelDialog => self.state.cancel_dialog(),

            // Theme
            UiEvent::OpenThemePicker => self.state.open_theme_picker(),
            UiEvent::ThemeNext => self.state.theme_picker_next(),
            UiEvent::ThemePrev => self.state.theme_picker_prev(),
            UiEvent::ApplyTheme => self.state.apply_theme_picker(),
            UiEvent::SelectTheme(index) => self.state.select_theme(index),
            UiEvent::CloseThemePicker => self.state.close_theme_picker(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
