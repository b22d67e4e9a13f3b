//! Entry form component.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::form::{EntryForm, FormField};
use crate::tui::theme::*;

const LABEL_WIDTH: u16 = 10;

/// Render the form's labels and widgets.
///
/// Returns the area of the focused widget so the caller can place its popup.
pub fn render_entry_form(frame: &mut Frame, area: Rect, form: &EntryForm) -> Option<Rect> {
    let title = Line::from(vec![Span::styled(form.kind().title(), Style::new().fg(LOGO_LIGHT_BLUE).bold())]);
    frame.render_widget(Paragraph::new(title), Rect::new(area.x, area.y, area.width, 1));

    let mut focused_area = None;
    // One blank row between fields leaves room for the spinner popup
    for (i, field) in FormField::ALL.iter().copied().enumerate() {
        let y = area.y + 2 + (i as u16) * 2;
        if y >= area.bottom() {
            break;
        }
        let focused = form.focused_field() == field;

        if field == FormField::Submit {
            let style = if focused {
                Style::new().fg(TEXT_BLACK).bg(LOGO_MINT).bold()
            } else {
                Style::new().fg(LOGO_MINT)
            };
            let button = Paragraph::new(Line::styled("[ Submit ]", style));
            frame.render_widget(button, Rect::new(area.x + LABEL_WIDTH, y, 10, 1).intersection(area));
            continue;
        }

        let label_style = if focused { Style::new().fg(TEXT_WHITE).bold() } else { Style::new().fg(TEXT_DIM) };
        let label = Paragraph::new(Line::styled(form.label(field), label_style));
        frame.render_widget(label, Rect::new(area.x, y, LABEL_WIDTH, 1).intersection(area));

        if let Some(widget) = form.widget(field) {
            let size = widget.preferred_size();
            let widget_area =
                Rect::new(area.x + LABEL_WIDTH, y, size.width, size.height).intersection(area);
            if widget_area.is_empty() {
                continue;
            }
            widget.draw(widget_area, frame.buffer_mut(), focused);
            if focused {
                focused_area = Some(widget_area);
            }
        }
    }

    focused_area
}
