//! Ledger list component.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::tui::theme::*;

/// Render the ledger rows, newest first, around the selection.
pub fn render_ledger_view(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.ledger_view;
    let mut lines: Vec<Line> = vec![];

    let mut header = vec![
        Span::styled("Ledger", Style::new().fg(LOGO_LIGHT_BLUE).bold()),
        Span::styled("  filter: ", Style::new().fg(TEXT_DIM)),
        Span::styled(view.filter.label(), Style::new().fg(LOGO_GOLD)),
    ];
    if let Some((report, _)) = view.report {
        header.push(Span::styled("  report: ", Style::new().fg(TEXT_DIM)));
        header.push(Span::styled(report.name(), Style::new().fg(LOGO_MINT)));
    }
    lines.push(Line::from(header));
    lines.push(Line::raw(""));

    // Keep the selection in view: header and footer take 4 rows
    let visible = area.height.saturating_sub(4).max(1) as usize;
    let first = view.selected.saturating_sub(visible - 1);

    for (i, tx) in view.rows.iter().enumerate().skip(first).take(visible) {
        let is_selected = i == view.selected;
        let cursor = if is_selected { "> " } else { "  " };
        let color = if tx.is_deposit() { CREDIT_GREEN } else { DEBIT_RED };

        let max_len = area.width.saturating_sub(2) as usize;
        let text: String = tx.to_string().chars().take(max_len).collect();
        let style = if is_selected {
            Style::new().fg(color).bold()
        } else {
            Style::new().fg(color)
        };
        lines.push(Line::from(vec![Span::raw(cursor), Span::styled(text, style)]));
    }

    if view.rows.is_empty() {
        lines.push(Line::styled("  (no transactions)", Style::new().fg(TEXT_DIM)));
    }

    lines.push(Line::raw(""));
    let total = view.total();
    lines.push(Line::from(vec![
        Span::styled("Total: ", Style::new().fg(TEXT_DIM)),
        Span::styled(
            format!("{:.2}", total),
            Style::new().fg(if total < 0.0 { DEBIT_RED } else { CREDIT_GREEN }),
        ),
    ]));

    let paragraph = Paragraph::new(lines).style(Style::new().fg(TEXT_WHITE));
    frame.render_widget(paragraph, area);
}
