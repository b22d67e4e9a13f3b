//! Dollar amount entry with per-keystroke validation.

use crossterm::event::KeyEvent;
use once_cell::sync::Lazy;
use ratatui::{buffer::Buffer, layout::{Rect, Size}};
use regex::Regex;

use super::listeners::Listeners;
use super::text_field::TextField;
use super::traits::{FocusDirection, Interactable, KeyResult};

/// Optional `$`, digits, then at most two decimal places.
static MONEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$?[0-9]*(?:\.[0-9]{0,2})?$").expect("valid money regex"));

/// Amounts that are zero however they are written.
static ZERO_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$?0*\.?0*$").expect("valid zero regex"));

/// Whether `text` is an acceptable non-zero dollar amount.
pub fn is_valid_amount(text: &str) -> bool {
    let digits = text.strip_prefix('$').unwrap_or(text);
    MONEY_RE.is_match(text) && digits != "." && !ZERO_RE.is_match(text)
}

/// Parse a valid amount, `$` stripped.
pub fn parse_amount(text: &str) -> Option<f64> {
    if !is_valid_amount(text) {
        return None;
    }
    text.trim_start_matches('$').parse().ok()
}

#[derive(Debug)]
pub struct MoneyPicker {
    field: TextField,
    on_change: Listeners<Option<f64>>,
}

impl MoneyPicker {
    /// An empty picker; it starts out bad.
    pub fn new(width: u16) -> Self {
        let mut field = TextField::new(width);
        field.set_bad(true);
        Self { field, on_change: Listeners::new() }
    }

    pub fn on_change(&mut self, callback: impl FnMut(&Option<f64>) + 'static) {
        self.on_change.subscribe(callback);
    }

    pub fn text(&self) -> &str {
        self.field.text()
    }

    pub fn is_bad(&self) -> bool {
        self.field.is_bad()
    }

    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    /// `None` while the text is not a valid amount.
    pub fn money_value(&self) -> Option<f64> {
        if self.is_bad() {
            return None;
        }
        parse_amount(self.field.text())
    }

    pub fn set_text(&mut self, text: &str) {
        self.field.set_text(text);
        self.revalidate();
    }

    fn revalidate(&mut self) {
        let bad = !is_valid_amount(self.field.text());
        self.field.set_bad(bad);
        let value = self.money_value();
        self.on_change.emit(&value);
    }
}

impl Interactable for MoneyPicker {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        let (result, changed) = self.field.apply_key(key);
        if changed {
            self.revalidate();
        }
        result
    }

    fn preferred_size(&self) -> Size {
        self.field.preferred_size()
    }

    fn draw(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        self.field.draw(area, buf, focused);
    }

    fn is_focused(&self) -> bool {
        self.field.is_focused()
    }

    fn focus_gained(&mut self, direction: FocusDirection) {
        self.field.focus_gained(direction);
    }

    fn focus_lost(&mut self) {
        self.field.focus_lost();
    }
}
