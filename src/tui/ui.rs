use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputMode, Screen};
use super::components::*;
use super::theme::*;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Main vertical layout: logo, content, status, hotkeys
    let main_layout = Layout::vertical([
        Constraint::Length(2),  // Logo + spacing
        Constraint::Min(0),     // Content
        Constraint::Length(1),  // Status line
        Constraint::Length(1),  // Hotkeys
    ])
    .split(area);

    render_logo(frame, main_layout[0]);

    let content = pad(main_layout[1], 2);
    match app.screen {
        Screen::Home => render_home_menu(frame, content, app),
        Screen::Ledger => render_ledger_view(frame, content, app),
        Screen::Reports => render_report_menu(frame, content, app),
        Screen::Entry => {
            if let Some(form) = &app.form {
                let focused_area = render_entry_form(frame, content, form);
                // Popups go on top of everything drawn so far
                if let (Some(widget), Some(overlay)) = (focused_area, form.overlay()) {
                    render_picker_overlay(frame, widget, &overlay);
                }
            }
        }
    }

    render_status(frame, main_layout[2], app);
    render_hotkeys(frame, main_layout[3], app);

    match app.input_mode {
        InputMode::Help => render_help_popup(frame, area),
        InputMode::Confirm => render_confirm_popup(frame, area, app),
        InputMode::Normal => {}
    }
}

fn pad(area: Rect, left: u16) -> Rect {
    Rect::new(area.x + left.min(area.width), area.y, area.width.saturating_sub(left), area.height)
}

fn render_logo(frame: &mut Frame, area: Rect) {
    // Center the colorful "ledger" logo
    let padding = (area.width.saturating_sub(6)) / 2;
    let centered = Line::from(vec![
        Span::raw(" ".repeat(padding as usize)),
        Span::styled("le", Style::new().fg(LOGO_CORAL).bold()),
        Span::styled("d", Style::new().fg(LOGO_GOLD).bold()),
        Span::styled("g", Style::new().fg(LOGO_LIGHT_BLUE).bold()),
        Span::styled("er", Style::new().fg(LOGO_MINT).bold()),
    ]);

    let paragraph = Paragraph::new(centered);
    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let Some(status) = &app.status else {
        return;
    };
    let line = Line::from(vec![Span::raw("  "), Span::styled(status.as_str(), Style::new().fg(LOGO_CORAL))]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hotkeys(frame: &mut Frame, area: Rect, app: &App) {
    let key = |k: &'static str| Span::styled(k, Style::new().fg(TEXT_WHITE));
    let desc = |d: &'static str| Span::styled(d, Style::new().fg(TEXT_DIM));

    let hotkeys = match (app.input_mode, app.screen) {
        (InputMode::Help, _) => Line::from(vec![key("[?/Esc]"), desc(" close")]),
        (InputMode::Confirm, _) => Line::from(vec![key("[y]"), desc(" save • "), key("[n]"), desc(" back")]),
        (InputMode::Normal, Screen::Home) => Line::from(vec![
            key("[j/k]"),
            desc(" move • "),
            key("[Enter]"),
            desc(" select • "),
            key("[?]"),
            desc(" help • "),
            key("[q]"),
            desc("uit"),
        ]),
        (InputMode::Normal, Screen::Entry) => Line::from(vec![
            key("[Tab]"),
            desc(" next • "),
            key("[Space]"),
            desc(" spinner • "),
            key("[?]"),
            desc(" help • "),
            key("[Esc]"),
            desc(" home"),
        ]),
        (InputMode::Normal, Screen::Reports) => Line::from(vec![
            key("[j/k]"),
            desc(" move • "),
            key("[s]"),
            desc("how • "),
            key("[x]"),
            desc(" exit"),
        ]),
        (InputMode::Normal, Screen::Ledger) => Line::from(vec![
            key("[j/k]"),
            desc(" move • "),
            key("[f]"),
            desc("ilter • "),
            key("[Esc]"),
            desc(" home"),
        ]),
    };

    frame.render_widget(Paragraph::new(hotkeys), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerStore;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app(name: &str) -> (App, std::path::PathBuf) {
        let dir = std::env::temp_dir().join(format!("ledger_ui_test_{}_{}", name, std::process::id()));
        let store = LedgerStore::open(dir.join("ui.csv")).unwrap();
        (App::new(store, chrono::NaiveTime::from_hms_opt(9, 0, 0)), dir)
    }

    #[test]
    fn test_render_home_and_form_overlay() {
        let (mut app, dir) = app("overlay");
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Add deposit"));
        assert!(text.contains("Make payment"));

        app.open_form(crate::form::EntryKind::Deposit);
        if let Some(form) = app.form.as_mut() {
            form.focus(crate::form::FormField::Time);
        }
        app.dispatch(crate::events::Action::FormKey(crossterm::event::KeyEvent::from(
            crossterm::event::KeyCode::Enter,
        )));
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);
        // Hour spinner: 10 above, 09 on the row, 08 below
        assert!(text.contains("10"));
        assert!(text.contains("09:00 AM"));
        assert!(text.contains("08"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_render_entry_form_on_narrow_terminal() {
        let (mut app, dir) = app("narrow");
        app.open_form(crate::form::EntryKind::Payment);
        app.dispatch(crate::events::Action::FormKey(crossterm::event::KeyEvent::from(
            crossterm::event::KeyCode::Char('5'),
        )));
        for width in [4, 10, 12, 13, 14] {
            let mut terminal = Terminal::new(TestBackend::new(width, 24)).unwrap();
            terminal.draw(|f| render(f, &app)).unwrap();
            let text = buffer_text(&terminal);
            assert_eq!(text.lines().count(), 24);
        }
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_render_reports() {
        let (mut app, dir) = app("reports");
        app.dispatch(crate::events::Action::MenuChoose(3));
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Month To Date"));
        assert!(text.contains("Prior Year"));
        assert!(text.contains("0 transactions totalling $0.00"));
        let _ = std::fs::remove_dir_all(dir);
    }
}
