//! Home menu component.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, MenuItem};
use crate::tui::theme::*;

/// Render the home menu and the ledger's balance.
pub fn render_home_menu(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = vec![];

    lines.push(Line::from(vec![Span::styled("Home", Style::new().fg(LOGO_LIGHT_BLUE).bold())]));
    lines.push(Line::raw(""));

    for (i, item) in MenuItem::ALL.iter().enumerate() {
        let is_selected = i == app.menu.selected;
        let cursor = if is_selected { "> " } else { "  " };
        let style = if is_selected { Style::new().fg(TEXT_WHITE).bold() } else { Style::new().fg(TEXT_WHITE) };
        lines.push(Line::from(vec![
            Span::raw(cursor),
            Span::styled(format!("{} ", i + 1), Style::new().fg(LOGO_GOLD)),
            Span::styled(item.label(), style),
        ]));
    }

    lines.push(Line::raw(""));
    let balance: f64 = app.store.transactions().map(|tx| tx.amount).sum();
    lines.push(Line::from(vec![
        Span::styled("Balance: ", Style::new().fg(TEXT_DIM)),
        Span::styled(
            format!("{:.2}", balance),
            Style::new().fg(if balance < 0.0 { DEBIT_RED } else { CREDIT_GREEN }),
        ),
        Span::styled(format!("  ({} rows)", app.store.len()), Style::new().fg(TEXT_DIM)),
    ]));

    frame.render_widget(Paragraph::new(lines), area);
}
