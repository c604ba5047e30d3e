//! Terminal rendering - draws a `RenderState` into a ratatui frame

use ratatui::{prelude::*, widgets::*};

use crate::app::state::{AccountDialog, PendingDelete, SessionStatus};
use crate::constants::APP_TITLE;
use crate::messages::ui_events::DialogField;
use crate::messages::RenderState;
use crate::models::{Account, MutationKind};
use crate::theme::{Palette, ThemeName};

/// Draw the whole screen
pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let palette = state.theme.palette();
    let area = f.area();

    let banner_height = if state.error.is_some() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Title
            Constraint::Length(banner_height), // Error banner
            Constraint::Min(3),                // Accounts
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, &palette, chunks[0]);
    if let Some(error) = &state.error {
        draw_error_banner(f, error, &palette, chunks[1]);
    }
    draw_account_list(f, state, &palette, chunks[2]);
    draw_status_bar(f, state, &palette, chunks[3]);

    // Popups
    if state.theme_picker.is_some() {
        draw_theme_popup(f, state, &palette, area);
    }
    if let Some(dialog) = &state.dialog {
        draw_dialog_popup(f, dialog, &palette, area);
    }
    if let Some(pending) = &state.confirm_delete {
        draw_confirm_popup(f, pending, &palette, area);
    }
    if state.show_help {
        draw_help_popup(f, &palette, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let title = Line::from(vec![
        Span::styled(format!(" {} ", APP_TITLE), Style::default().fg(palette.accent).bold()),
        Span::styled(
            format!(" Theme: {} {} ", state.theme.icon(), state.theme.label()),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_error_banner(f: &mut Frame, error: &str, palette: &Palette, area: Rect) {
    let banner = Paragraph::new(error)
        .style(Style::default().fg(palette.error_fg).bg(palette.error_bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.error_fg)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(banner, area);
}

fn draw_account_list(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    if state.is_loading {
        let loading =
            Paragraph::new("Loading accounts...").style(Style::default().fg(palette.muted));
        f.render_widget(loading, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let header = Line::from(vec![
        Span::styled(
            format!("Total Accounts: {}", state.accounts.len()),
            Style::default().fg(palette.text).bold(),
        ),
        Span::styled("   [r] Refresh", Style::default().fg(palette.accent)),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    if state.accounts.is_empty() {
        let empty = Paragraph::new("No accounts found.")
            .style(Style::default().fg(palette.muted))
            .block(block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = state
        .accounts
        .iter()
        .map(|account| account_item(account, state.deleting_account.as_deref(), palette))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(palette.highlight))
        .highlight_symbol("▌ ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected));
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

/// Lines shown under an account's name, one per present optional field
pub fn account_detail_lines(account: &Account) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(number) = account.account_number.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Account Number: {}", number));
    }
    if let Some(email) = account.email.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Email: {}", email));
    }
    if let Some(phone) = account.phone.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Phone: {}", phone));
    }
    lines
}

fn account_item<'a>(
    account: &'a Account,
    deleting: Option<&str>,
    palette: &Palette,
) -> ListItem<'a> {
    let mut name = vec![Span::styled(
        account.display_name().to_string(),
        Style::default().fg(palette.text).bold(),
    )];
    if deleting == Some(account.id.as_str()) {
        name.push(Span::styled("  (deleting...)", Style::default().fg(palette.muted)));
    }

    let mut lines = vec![Line::from(name)];
    let detail_style = Style::default().fg(palette.muted);
    lines.extend(
        account_detail_lines(account)
            .into_iter()
            .map(|detail| Line::styled(format!("  {}", detail), detail_style)),
    );
    ListItem::new(lines)
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let status = match (state.session, state.mutation_in_flight) {
        (SessionStatus::Initializing, _) => String::from(" Connecting... "),
        (_, Some(MutationKind::Create)) => String::from(" Creating account... "),
        (_, Some(MutationKind::Update)) => String::from(" Updating account... "),
        (_, Some(MutationKind::Delete)) => String::from(" Deleting account... "),
        _ => {
            let refreshed = state
                .last_refreshed
                .map(|t| format!(" Updated {} |", t.format("%H:%M:%S")))
                .unwrap_or_default();
            format!(
                "{} n:new | e:edit | d:delete | r:refresh | t:theme | ?:help | q:quit ",
                refreshed
            )
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(palette.muted));
    f.render_widget(bar, area);
}

fn draw_dialog_popup(f: &mut Frame, dialog: &AccountDialog, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(format!(" {} ", dialog.title()))
        .title_bottom(Line::from(" Enter:save  Tab:next field  Esc:cancel ").right_aligned())
        .style(Style::default().bg(palette.popup_bg));

    f.render_widget(Clear, popup_area);
    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    for (field, chunk) in DialogField::ALL.iter().zip(chunks.iter()) {
        let focused = dialog.field == *field;
        let value = dialog.value(*field);
        let border_style = if focused {
            Style::default().fg(palette.highlight)
        } else {
            Style::default().fg(palette.muted)
        };
        let content = if value.is_empty() {
            Span::styled(field.placeholder(), Style::default().fg(palette.muted).italic())
        } else {
            Span::styled(value, Style::default().fg(palette.text))
        };
        let input = Paragraph::new(Line::from(content)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {} ", field.label())),
        );
        f.render_widget(input, *chunk);

        if focused && !dialog.saving {
            let prefix_width = cursor_column(value, dialog.cursor_position);
            let max_x = chunk.x + chunk.width.saturating_sub(2);
            let cursor_x = (chunk.x + prefix_width + 1).min(max_x);
            f.set_cursor_position(Position::new(cursor_x, chunk.y + 1));
        }
    }

    let button_style = if dialog.saving {
        Style::default().fg(palette.muted)
    } else {
        Style::default().fg(palette.success).bold()
    };
    let buttons = Line::from(vec![
        Span::styled("[Esc] Cancel", Style::default().fg(palette.muted)),
        Span::raw("   "),
        Span::styled(format!("[Enter] {}", dialog.submit_label()), button_style),
    ])
    .right_aligned();
    f.render_widget(Paragraph::new(buttons), chunks[3]);
}

/// Display columns before the byte offset `cursor`; wide glyphs take two
fn cursor_column(value: &str, cursor: usize) -> u16 {
    let prefix = value.get(..cursor).unwrap_or(value);
    u16::try_from(Span::raw(prefix).width()).unwrap_or(u16::MAX)
}

fn draw_confirm_popup(f: &mut Frame, pending: &PendingDelete, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.error_fg))
        .title(" Confirm Delete ")
        .style(Style::default().bg(palette.popup_bg));

    let text = vec![
        Line::from(format!("Delete account '{}'?", pending.name)),
        Line::from(""),
        Line::styled("y: delete   n/Esc: keep", Style::default().fg(palette.muted)),
    ];
    let prompt = Paragraph::new(text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(prompt, popup_area);
}

fn draw_theme_popup(f: &mut Frame, state: &RenderState, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(40, 40, area);

    let items: Vec<ListItem> = ThemeName::ALL
        .iter()
        .enumerate()
        .map(|(i, theme)| {
            let active = if *theme == state.theme { " (active)" } else { "" };
            ListItem::new(format!("{} {} {}{}", i + 1, theme.icon(), theme.label(), active))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent))
                .title(" Theme ")
                .style(Style::default().bg(palette.popup_bg)),
        )
        .highlight_style(Style::default().fg(palette.highlight).bold())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(state.theme_picker);

    f.render_widget(Clear, popup_area);
    f.render_stateful_widget(list, popup_area, &mut list_state);
}

fn draw_help_popup(f: &mut Frame, palette: &Palette, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 ACCOUNTS - Keyboard Shortcuts

 LIST
   ↑ / ↓  (k / j)     Move selection
   r                  Refresh from server
   n                  New account
   e / Enter          Edit selected account
   d / Del            Delete selected account (asks first)

 FORM
   Tab / Shift+Tab    Next / previous field
   ← / →              Move cursor
   Enter              Save
   Esc                Cancel and discard changes

 GENERAL
   t                  Choose theme (1-5 to pick directly)
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(palette.popup_bg));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn render(state: &RenderState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| draw_ui(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn loaded(accounts: Vec<Account>) -> RenderState {
        RenderState {
            session: SessionStatus::Ready,
            accounts,
            is_loading: false,
            ..RenderState::default()
        }
    }

    #[test]
    fn test_three_accounts_rendered_with_present_fields_only() {
        let state = loaded(vec![
            Account::new("1", "Fabrikam").with_account_number("AC-1"),
            Account::new("2", "Contoso").with_email("info@contoso.test"),
            Account::new("3", "Northwind").with_phone("555-0100"),
        ]);
        let text = render(&state);

        assert!(text.contains("Total Accounts: 3"));
        for name in ["Fabrikam", "Contoso", "Northwind"] {
            assert!(text.contains(name), "missing {}", name);
        }
        assert!(text.contains("Account Number: AC-1"));
        assert!(text.contains("Email: info@contoso.test"));
        assert!(text.contains("Phone: 555-0100"));
        assert_eq!(text.matches("Email:").count(), 1);
        assert_eq!(text.matches("Phone:").count(), 1);
        assert_eq!(text.matches("Account Number:").count(), 1);
    }

    #[test]
    fn test_detail_lines_skip_absent_fields() {
        let account = Account::new("1", "Acme");
        assert!(account_detail_lines(&account).is_empty());

        let account = account.with_email("a@acme.test").with_phone("1");
        assert_eq!(account_detail_lines(&account), vec!["Email: a@acme.test", "Phone: 1"]);
    }

    #[test]
    fn test_cursor_column_counts_display_width() {
        assert_eq!(cursor_column("Café", "Café".len()), 4);
        assert_eq!(cursor_column("東京", "東".len()), 2);
        assert_eq!(cursor_column("東京", "東京".len()), 4);
        assert_eq!(cursor_column("abc", 0), 0);
    }

    #[test]
    fn test_unnamed_account_fallback() {
        let mut account = Account::new("1", "");
        account.name = None;
        let text = render(&loaded(vec![account]));
        assert!(text.contains("Unnamed Account"));
    }

    #[test]
    fn test_loading_hides_list() {
        let text = render(&RenderState::default());
        assert!(text.contains("Loading accounts..."));
        assert!(!text.contains("Total Accounts"));
    }

    #[test]
    fn test_empty_list_message() {
        let text = render(&loaded(vec![]));
        assert!(text.contains("Total Accounts: 0"));
        assert!(text.contains("No accounts found."));
    }

    #[test]
    fn test_error_banner_shown() {
        let state = RenderState {
            session: SessionStatus::Failed,
            is_loading: false,
            error: Some("Failed to initialize Power Apps SDK".into()),
            ..RenderState::default()
        };
        let text = render(&state);
        assert!(text.contains("Failed to initialize Power Apps SDK"));
        assert!(!text.contains("Loading accounts..."));
    }

    #[test]
    fn test_dialog_shows_mode_and_placeholders() {
        let state = RenderState {
            dialog: Some(AccountDialog::for_create()),
            ..loaded(vec![])
        };
        let text = render(&state);
        assert!(text.contains("Create New Account"));
        assert!(text.contains("Enter account name"));
        assert!(text.contains("[Enter] Create"));
    }

    #[test]
    fn test_confirm_prompt_names_account() {
        let state = RenderState {
            confirm_delete: Some(PendingDelete { account_id: "1".into(), name: "Fabrikam".into() }),
            ..loaded(vec![Account::new("1", "Fabrikam")])
        };
        let text = render(&state);
        assert!(text.contains("Delete account 'Fabrikam'?"));
    }
}
