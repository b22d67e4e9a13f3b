//! Keyboard event handling by screen and input mode.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, InputMode, Screen};

use super::Action;

/// Enter or Space without Control/Alt: opens and closes picker popups.
pub fn is_activation(key: &KeyEvent) -> bool {
    let plain = !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    plain && matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

/// The character of an unmodified (or Shift-only) `Char` key.
pub fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => Some(c),
        _ => None,
    }
}

/// Focus-traversal keys; they close an open popup and move on.
pub fn closes_popup(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right)
}

/// Handle keyboard events and return the appropriate action.
pub fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    match app.input_mode {
        InputMode::Help => handle_help_mode(key),
        InputMode::Confirm => handle_confirm_mode(key),
        InputMode::Normal => match app.screen {
            Screen::Home => handle_home_screen(key),
            Screen::Entry => handle_entry_screen(app, key),
            Screen::Ledger => handle_ledger_screen(key),
            Screen::Reports => handle_reports_screen(key),
        },
    }
}

fn handle_home_screen(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('?') => Action::OpenHelp,
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Action::MenuDown,
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Action::MenuUp,
        KeyCode::Char(c @ '1'..='5') => Action::MenuChoose((c as usize) - ('1' as usize)),
        KeyCode::Enter | KeyCode::Char(' ') => Action::MenuSelect,
        _ => Action::None,
    }
}

fn handle_entry_screen(app: &App, key: KeyEvent) -> Action {
    let (popup_open, editing_text) = app
        .form
        .as_ref()
        .map(|f| (f.overlay().is_some(), f.is_editing_text()))
        .unwrap_or((false, false));

    // An open popup gets first claim on Esc
    if popup_open {
        return Action::FormKey(key);
    }
    match key.code {
        KeyCode::Esc => Action::GoHome,
        KeyCode::Char('?') if !editing_text => Action::OpenHelp,
        _ => Action::FormKey(key),
    }
}

fn handle_ledger_screen(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Action::GoHome,
        KeyCode::Char('?') => Action::OpenHelp,
        KeyCode::Char('j') | KeyCode::Down => Action::LedgerDown,
        KeyCode::Char('k') | KeyCode::Up => Action::LedgerUp,
        KeyCode::Char('f') | KeyCode::Tab => Action::CycleFilter,
        _ => Action::None,
    }
}

fn handle_reports_screen(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') | KeyCode::Char('X') => Action::GoHome,
        KeyCode::Char('?') => Action::OpenHelp,
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Action::ReportDown,
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Action::ReportUp,
        KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char('S') => Action::ShowReport,
        _ => Action::None,
    }
}

fn handle_help_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::CloseHelp,
        _ => Action::None,
    }
}

fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => Action::ConfirmSubmit,
        KeyCode::Char('n') | KeyCode::Esc => Action::CancelSubmit,
        _ => Action::None,
    }
}
