//! Popup overlay descriptor.
//!
//! A picker with an open popup describes it as plain data; the host renders
//! it on top of everything else after the main frame.

use ratatui::layout::Rect;

/// Three-row spinner popup: successor, current, predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    /// Column offset from the owning widget's left edge
    pub offset_x: u16,
    /// Row offset from the owning widget's top edge (negative = above)
    pub offset_y: i16,
    pub width: u16,
    pub lines: [String; 3],
    /// Index into `lines` drawn with the active style
    pub highlighted: usize,
}

impl Overlay {
    /// Spinner popup anchored one row above the widget, so the current value
    /// sits on the widget row itself.
    pub fn spinner(width: u16, successor: String, current: String, predecessor: String) -> Self {
        Self {
            offset_x: 0,
            offset_y: -1,
            width,
            lines: [successor, current, predecessor],
            highlighted: 1,
        }
    }

    /// Shift the overlay right, used by composites for their sub-pickers.
    pub fn shifted(mut self, dx: u16) -> Self {
        self.offset_x += dx;
        self
    }

    /// Resolve the overlay into screen space, clipped to `bounds`.
    pub fn area(&self, widget: Rect, bounds: Rect) -> Rect {
        let x = widget.x.saturating_add(self.offset_x);
        let y = (widget.y as i32 + self.offset_y as i32).max(bounds.y as i32) as u16;
        let height = self.lines.len() as u16;
        Rect::new(x, y, self.width, height).intersection(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_sits_over_widget_row() {
        let overlay = Overlay::spinner(2, "02".into(), "01".into(), "31".into());
        let area = overlay.area(Rect::new(10, 5, 2, 1), Rect::new(0, 0, 80, 24));
        assert_eq!(area, Rect::new(10, 4, 2, 3));
    }

    #[test]
    fn test_shifted_and_clipped_at_top() {
        let overlay = Overlay::spinner(4, "2025".into(), "2024".into(), "2023".into()).shifted(7);
        let area = overlay.area(Rect::new(0, 0, 11, 1), Rect::new(0, 0, 80, 24));
        assert_eq!(area.x, 7);
        assert_eq!(area.y, 0);
    }
}
