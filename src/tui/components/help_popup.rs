//! Help popup component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered;
use crate::tui::theme::*;

fn key_line(key: &'static str, desc: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", key), Style::new().fg(TEXT_WHITE)),
        Span::styled(desc, Style::new().fg(TEXT_DIM)),
    ])
}

/// Render the help popup with picker and form keys.
pub fn render_help_popup(frame: &mut Frame, area: Rect) {
    let popup_area = centered(area, 54, 30);
    frame.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", Style::new().fg(TEXT_WHITE).bold())]),
        Line::raw(""),
        Line::styled("Form", Style::new().fg(LOGO_LIGHT_BLUE).bold()),
        key_line("Tab/Down", "Next field"),
        key_line("S-Tab/Up", "Previous field"),
        key_line("Enter", "Submit (on the Submit button)"),
        key_line("Esc", "Back to the menu"),
        Line::raw(""),
        Line::styled("Pickers", Style::new().fg(LOGO_MINT).bold()),
        key_line("0-9", "Type a number in place"),
        key_line("a-z", "Type a month name"),
        key_line("Backspace", "Delete the last typed digit"),
        key_line("Enter/Space", "Open or close the spinner"),
        key_line("Up/Down", "Step while the spinner is open"),
        key_line("Esc/Del", "Close the spinner"),
        key_line("Left/Right", "Move between date/time parts"),
        key_line("a/p", "Set AM or PM"),
        Line::raw(""),
        Line::styled("Ledger", Style::new().fg(LOGO_GOLD).bold()),
        key_line("j/k", "Move through rows"),
        key_line("f/Tab", "Cycle All / Deposits / Payments"),
        Line::raw(""),
        Line::styled("Reports", Style::new().fg(LOGO_CORAL).bold()),
        key_line("s/Enter", "Show the report's rows"),
        key_line("x/Esc", "Back to the menu"),
        Line::raw(""),
    ];

    lines.push(Line::from(vec![
        Span::styled("Press ", Style::new().fg(TEXT_DIM)),
        Span::styled("?", Style::new().fg(TEXT_WHITE)),
        Span::styled(" or ", Style::new().fg(TEXT_DIM)),
        Span::styled("Esc", Style::new().fg(TEXT_WHITE)),
        Span::styled(" to close", Style::new().fg(TEXT_DIM)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_LIGHT_BLUE))
        .style(Style::new().bg(Color::Black));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, popup_area);
}
