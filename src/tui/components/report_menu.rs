//! Reports screen component.

use chrono::Local;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::App;
use crate::report::Report;
use crate::tui::theme::*;

/// Render each report with its count and total as of today.
pub fn render_report_menu(frame: &mut Frame, area: Rect, app: &App) {
    let today = Local::now().date_naive();
    let mut lines: Vec<Line> = vec![];

    lines.push(Line::from(vec![Span::styled("Reports", Style::new().fg(LOGO_LIGHT_BLUE).bold())]));
    lines.push(Line::raw(""));

    for (i, report) in Report::ALL.iter().enumerate() {
        let is_selected = i == app.reports.selected;
        let cursor = if is_selected { "> " } else { "  " };
        let style = if is_selected { Style::new().fg(TEXT_WHITE).bold() } else { Style::new().fg(TEXT_WHITE) };
        let summary = report.summarize(app.store.transactions(), today);
        lines.push(Line::from(vec![
            Span::raw(cursor),
            Span::styled(format!("{:<15}", report.name()), style),
            Span::styled(summary.to_string(), Style::new().fg(TEXT_DIM)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
