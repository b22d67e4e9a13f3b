//! Submit confirmation popup component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::tui::theme::*;

/// Render the "Are you sure?" popup for the pending row.
pub fn render_confirm_popup(frame: &mut Frame, area: Rect, app: &App) {
    let Some(tx) = &app.pending else {
        return;
    };

    let popup_area = centered(area, 60, 8);
    frame.render_widget(Clear, popup_area);

    let amount_color = if tx.is_deposit() { CREDIT_GREEN } else { DEBIT_RED };
    let lines = vec![
        Line::from(vec![Span::styled("Are you sure?", Style::new().fg(LOGO_GOLD).bold())]),
        Line::raw(""),
        Line::from(vec![Span::styled(tx.to_string(), Style::new().fg(amount_color))]),
        Line::raw(""),
        Line::from(vec![
            Span::styled("[y]", Style::new().fg(LOGO_MINT)),
            Span::styled(" save  ", Style::new().fg(TEXT_DIM)),
            Span::styled("[n]", Style::new().fg(TEXT_WHITE)),
            Span::styled(" back to form", Style::new().fg(TEXT_DIM)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(LOGO_GOLD))
        .style(Style::new().bg(Color::Black));

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

/// Centered rect of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
