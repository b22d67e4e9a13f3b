//! Spinner popup drawn over an open picker.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Clear, Paragraph},
};

use crate::picker::Overlay;
use crate::tui::theme::*;

/// Composite `overlay` on top of the frame, anchored to `widget`.
pub fn render_picker_overlay(frame: &mut Frame, widget: Rect, overlay: &Overlay) {
    let area = overlay.area(widget, frame.area());
    if area.is_empty() {
        return;
    }
    frame.render_widget(Clear, area);

    // Rows clipped off the top are skipped
    let skipped = (area.y as i32 - (widget.y as i32 + overlay.offset_y as i32)).max(0) as usize;
    let lines: Vec<Line> = overlay
        .lines
        .iter()
        .enumerate()
        .skip(skipped)
        .map(|(i, text)| {
            let style = if i == overlay.highlighted {
                Style::new().fg(TEXT_BLACK).bg(POPUP_ACTIVE).bold()
            } else {
                Style::new().fg(TEXT_WHITE).bg(POPUP_BG)
            };
            Line::styled(text.clone(), style)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
