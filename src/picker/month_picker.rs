//! Month picker.
//!
//! Same popup mechanics as the integer picker over the twelve months, with
//! typeahead: typed characters collect in a rolling three-character buffer
//! that resolves by month-name prefix, then by month number, then falls back
//! to the last committed month.

use chrono::Month;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::{Rect, Size}, style::Style};

use super::listeners::{Listeners, Outcome, Rollover};
use super::overlay::Overlay;
use super::traits::{FocusDirection, Interactable, KeyResult};
use crate::events::keyboard::{closes_popup, is_activation, typed_char};
use crate::tui::theme::*;

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

const TYPED_LEN: usize = 3;
const WIDTH: u16 = 3;

/// Three-letter display name, e.g. `Jan`.
pub fn short_name(month: Month) -> &'static str {
    &month.name()[..3]
}

/// Resolve a typed buffer: name prefix first, then a 1-12 number.
pub fn resolve_typed(typed: &str) -> Option<Month> {
    let typed = typed.to_lowercase();
    MONTHS
        .iter()
        .copied()
        .find(|m| m.name().to_lowercase().starts_with(&typed))
        .or_else(|| {
            typed
                .trim()
                .parse::<u8>()
                .ok()
                .and_then(|n| Month::try_from(n).ok())
        })
}

#[derive(Debug)]
pub struct MonthPicker {
    default_value: Month,
    selected_value: Month,
    typed: String,
    popup_open: bool,
    focused: bool,
    on_change: Listeners<Month>,
    on_rollover: Listeners<Rollover>,
}

impl MonthPicker {
    pub fn new(default_value: Month) -> Self {
        Self {
            default_value,
            selected_value: default_value,
            typed: String::new(),
            popup_open: false,
            focused: false,
            on_change: Listeners::new(),
            on_rollover: Listeners::new(),
        }
    }

    /// Subscribe to changes; receives the resolved month.
    pub fn on_change(&mut self, callback: impl FnMut(&Month) + 'static) {
        self.on_change.subscribe(callback);
    }

    /// Subscribe to the December/January wrap.
    pub fn on_rollover(&mut self, callback: impl FnMut(&Rollover) + 'static) {
        self.on_rollover.subscribe(callback);
    }

    /// The month in effect, resolving any typed buffer.
    pub fn current_value(&self) -> Month {
        if self.typed.is_empty() {
            return self.selected_value;
        }
        resolve_typed(&self.typed).unwrap_or(self.selected_value)
    }

    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn is_default(&self) -> bool {
        self.current_value() == self.default_value
    }

    pub fn has_changed(&self) -> bool {
        !self.is_default()
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    /// Programmatic set: clears the typed buffer and notifies listeners.
    pub fn set_selection(&mut self, month: Month) -> Month {
        self.selected_value = month;
        self.typed.clear();
        self.on_change.emit(&month);
        month
    }

    /// Step forward one month; landing on January reports `Rollover::Up`.
    pub fn increment(&mut self) -> Option<Rollover> {
        self.set_selection(self.current_value().succ());
        let rollover = (self.selected_value == Month::January).then_some(Rollover::Up);
        self.emit_rollover(rollover)
    }

    /// Step back one month; landing on December reports `Rollover::Down`.
    pub fn decrement(&mut self) -> Option<Rollover> {
        self.set_selection(self.current_value().pred());
        let rollover = (self.selected_value == Month::December).then_some(Rollover::Down);
        self.emit_rollover(rollover)
    }

    pub fn apply_key(&mut self, key: KeyEvent) -> Outcome<Month> {
        if is_activation(&key) {
            if self.popup_open {
                self.close_popup();
            } else {
                self.popup_open = true;
            }
            return Outcome::consumed();
        }
        if let Some(c) = typed_char(&key) {
            self.typed.push(c);
            return Outcome::changed(self.update_typed());
        }
        if key.code == KeyCode::Backspace && !self.typed.is_empty() {
            self.typed.pop();
            return Outcome::changed(self.update_typed());
        }
        if self.popup_open {
            match key.code {
                KeyCode::Up => {
                    let rollover = self.increment();
                    return Outcome::changed(self.selected_value).with_rollover(rollover);
                }
                KeyCode::Down => {
                    let rollover = self.decrement();
                    return Outcome::changed(self.selected_value).with_rollover(rollover);
                }
                KeyCode::Esc | KeyCode::Delete => {
                    self.popup_open = false;
                    return Outcome::consumed();
                }
                _ if closes_popup(&key) => self.close_popup(),
                _ => {}
            }
        }
        Outcome::not_consumed()
    }

    /// Text for the field: the typed buffer while focused, else the short name.
    pub fn display_text(&self, focused: bool) -> String {
        if focused {
            self.input_value()
        } else {
            short_name(self.current_value()).to_string()
        }
    }

    fn input_value(&self) -> String {
        if self.typed.is_empty() {
            short_name(self.selected_value).to_string()
        } else {
            format!("{:>3}", self.typed)
        }
    }

    fn update_typed(&mut self) -> Month {
        let excess = self.typed.chars().count().saturating_sub(TYPED_LEN);
        if excess > 0 {
            self.typed = self.typed.chars().skip(excess).collect();
        }
        let computed = self.current_value();
        self.on_change.emit(&computed);
        computed
    }

    fn close_popup(&mut self) {
        self.popup_open = false;
        self.commit();
    }

    fn commit(&mut self) {
        self.selected_value = self.current_value();
        self.typed.clear();
    }

    fn emit_rollover(&mut self, rollover: Option<Rollover>) -> Option<Rollover> {
        if let Some(direction) = &rollover {
            self.on_rollover.emit(direction);
        }
        rollover
    }
}

impl Interactable for MonthPicker {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        self.apply_key(key).result
    }

    fn preferred_size(&self) -> Size {
        Size::new(WIDTH, 1)
    }

    fn draw(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let style = if focused {
            Style::new().fg(TEXT_BLACK).bg(FIELD_PRELIGHT)
        } else {
            Style::new().fg(TEXT_WHITE)
        };
        let x = area.x + area.width.saturating_sub(WIDTH) / 2;
        buf.set_stringn(x, area.y, self.display_text(focused), area.width as usize, style);
    }

    fn overlay(&self) -> Option<Overlay> {
        self.popup_open.then(|| {
            let current = self.current_value();
            Overlay::spinner(
                WIDTH,
                short_name(current.succ()).to_string(),
                self.input_value(),
                short_name(current.pred()).to_string(),
            )
        })
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus_gained(&mut self, _direction: FocusDirection) {
        self.focused = true;
    }

    fn focus_lost(&mut self) {
        self.focused = false;
        self.popup_open = false;
        self.commit();
    }
}
