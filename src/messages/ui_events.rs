//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // List
    Refresh,
    SelectNext,
    SelectPrev,
    NewAccount,
    EditSelected,

    // Delete confirmation
    DeleteSelected,
    ConfirmDelete,
    CancelDelete,

    // Form dialog
    DialogNextField,
    DialogPrevField,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    SubmitDialog,
    CancelDialog,

    // Theme selector
    OpenThemePicker,
    ThemeNext,
    ThemePrev,
    ApplyTheme,
    SelectTheme(usize),
    CloseThemePicker,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Which surface currently owns the keyboard
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum UiMode {
    #[default]
    Browse,
    Dialog,
    ConfirmDelete,
    ThemePicker,
    Help,
}

/// Field focused in the account form
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum DialogField {
    #[default]
    Name,
    Email,
    Phone,
}

impl DialogField {
    pub const ALL: [DialogField; 3] = [DialogField::Name, DialogField::Email, DialogField::Phone];

    pub fn next(&self) -> DialogField {
        match self {
            DialogField::Name => DialogField::Email,
            DialogField::Email => DialogField::Phone,
            DialogField::Phone => DialogField::Name,
        }
    }

    pub fn prev(&self) -> DialogField {
        match self {
            DialogField::Name => DialogField::Phone,
            DialogField::Email => DialogField::Name,
            DialogField::Phone => DialogField::Email,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DialogField::Name => "Account Name *",
            DialogField::Email => "Email",
            DialogField::Phone => "Phone",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            DialogField::Name => "Enter account name",
            DialogField::Email => "Enter email address",
            DialogField::Phone => "Enter phone number",
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, mode: UiMode) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    match mode {
        UiMode::Help => Some(UiEvent::CloseHelp),
        UiMode::ConfirmDelete => match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(UiEvent::ConfirmDelete),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(UiEvent::CancelDelete),
            _ => None,
        },
        UiMode::ThemePicker => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::ThemePrev),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::ThemeNext),
            KeyCode::Enter => Some(UiEvent::ApplyTheme),
            KeyCode::Esc | KeyCode::Char('t') => Some(UiEvent::CloseThemePicker),
            KeyCode::Char(c @ '1'..='5') => Some(UiEvent::SelectTheme(c as usize - '1' as usize)),
            _ => None,
        },
        UiMode::Dialog => match key.code {
            KeyCode::Esc => Some(UiEvent::CancelDialog),
            KeyCode::Enter => Some(UiEvent::SubmitDialog),
            KeyCode::Tab | KeyCode::Down => Some(UiEvent::DialogNextField),
            KeyCode::BackTab | KeyCode::Up => Some(UiEvent::DialogPrevField),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
        UiMode::Browse => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('r') => Some(UiEvent::Refresh),
            KeyCode::Char('n') => Some(UiEvent::NewAccount),
            KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::EditSelected),
            KeyCode::Char('d') | KeyCode::Delete => Some(UiEvent::DeleteSelected),
            KeyCode::Char('t') => Some(UiEvent::OpenThemePicker),
            KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
            _ => None,
        },
    }
}
