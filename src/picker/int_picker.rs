//! Bounded integer picker.
//!
//! Selects an integer in an inclusive `[min, max]` range. Digits shift into
//! the raw value like a rolling keypad field (`(raw * 10 + d) mod 10^digits`),
//! and the raw value is only clamped when read. The activation stroke opens a
//! spinner popup where Up/Down step through the range with wraparound.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::{Rect, Size}, style::Style};

use super::listeners::{Listeners, Outcome, Rollover};
use super::overlay::Overlay;
use super::traits::{FocusDirection, Interactable, KeyResult};
use crate::error::PickerError;
use crate::events::keyboard::{closes_popup, is_activation, typed_char};
use crate::tui::theme::*;

#[derive(Debug)]
pub struct IntPicker {
    default_value: i32,
    min_value: i32,
    max_value: i32,
    /// Raw value, unclamped while typing
    selected_value: i32,
    /// Modulus applied while typing, `10^digit_count`
    weak_max: i64,
    digit_count: usize,
    popup_open: bool,
    typing: bool,
    focused: bool,
    on_change: Listeners<i32>,
    on_rollover: Listeners<Rollover>,
}

impl IntPicker {
    /// # Panics
    ///
    /// Panics if `min_value > max_value`.
    pub fn new(default_value: i32, min_value: i32, max_value: i32) -> Self {
        assert!(
            min_value <= max_value,
            "IntPicker bounds out of order: {} > {}",
            min_value,
            max_value
        );
        let mut picker = Self {
            default_value,
            min_value,
            max_value,
            selected_value: default_value,
            weak_max: 10,
            digit_count: 1,
            popup_open: false,
            typing: false,
            focused: false,
            on_change: Listeners::new(),
            on_rollover: Listeners::new(),
        };
        picker.set_max_value(max_value);
        picker
    }

    /// Fallible constructor for bounds that come from data.
    pub fn try_new(default_value: i32, min_value: i32, max_value: i32) -> Result<Self, PickerError> {
        if min_value > max_value {
            return Err(PickerError::InvalidBounds { min: min_value, max: max_value });
        }
        Ok(Self::new(default_value, min_value, max_value))
    }

    /// Subscribe to selection changes; receives the clamped value.
    pub fn on_change(&mut self, callback: impl FnMut(&i32) + 'static) {
        self.on_change.subscribe(callback);
    }

    /// Subscribe to wraparound steps.
    pub fn on_rollover(&mut self, callback: impl FnMut(&Rollover) + 'static) {
        self.on_rollover.subscribe(callback);
    }

    /// Set the inclusive upper bound. The raw selection is left alone and
    /// clamped on read.
    pub fn set_max_value(&mut self, max_value: i32) {
        assert!(
            self.min_value <= max_value,
            "IntPicker max {} below min {}",
            max_value,
            self.min_value
        );
        self.max_value = max_value;
        self.digit_count = max_value.max(1).ilog10() as usize + 1;
        self.weak_max = 10i64.pow(self.digit_count as u32);
    }

    /// Set the inclusive lower bound.
    pub fn set_min_value(&mut self, min_value: i32) {
        assert!(
            min_value <= self.max_value,
            "IntPicker min {} above max {}",
            min_value,
            self.max_value
        );
        self.min_value = min_value;
    }

    pub fn min_value(&self) -> i32 {
        self.min_value
    }

    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    pub fn default_value(&self) -> i32 {
        self.default_value
    }

    pub fn digit_count(&self) -> usize {
        self.digit_count
    }

    /// The raw, unclamped selection.
    pub fn raw_value(&self) -> i32 {
        self.selected_value
    }

    /// The selection clamped into `[min, max]`.
    pub fn current_value(&self) -> i32 {
        self.selected_value.clamp(self.min_value, self.max_value)
    }

    pub fn has_changed(&self) -> bool {
        self.current_value() != self.default_value
    }

    pub fn is_default(&self) -> bool {
        !self.has_changed()
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    pub fn successor(&self, value: i32) -> i32 {
        if value == self.max_value { self.min_value } else { value + 1 }
    }

    pub fn predecessor(&self, value: i32) -> i32 {
        if value == self.min_value { self.max_value } else { value - 1 }
    }

    /// Programmatic set: notifies listeners and leaves typing mode.
    pub fn set_selection(&mut self, value: i32) -> i32 {
        self.typing = false;
        self.select(value)
    }

    /// Step up by one; wrapping to `min` reports `Rollover::Up`.
    pub fn increment(&mut self) -> Option<Rollover> {
        let next = self.successor(self.current_value());
        self.set_selection(next);
        // Checked after the step: only a wrap can land exactly on min.
        let rollover = (self.selected_value == self.min_value).then_some(Rollover::Up);
        self.emit_rollover(rollover)
    }

    /// Step down by one; wrapping to `max` reports `Rollover::Down`.
    pub fn decrement(&mut self) -> Option<Rollover> {
        let prev = self.predecessor(self.current_value());
        self.set_selection(prev);
        let rollover = (self.selected_value == self.max_value).then_some(Rollover::Down);
        self.emit_rollover(rollover)
    }

    /// Handle a key and report what changed.
    pub fn apply_key(&mut self, key: KeyEvent) -> Outcome<i32> {
        if let Some(digit) = typed_char(&key).and_then(|c| c.to_digit(10)) {
            let typed = ((self.selected_value as i64 * 10 + digit as i64) % self.weak_max) as i32;
            let value = self.select(typed);
            self.typing = true;
            return Outcome::changed(value);
        }
        if key.code == KeyCode::Backspace {
            let value = self.select(self.selected_value / 10);
            self.typing = true;
            return Outcome::changed(value);
        }
        if !self.popup_open && is_activation(&key) {
            self.popup_open = true;
            return Outcome::consumed();
        }
        if self.popup_open {
            if is_activation(&key) {
                self.close_popup();
                return Outcome::consumed();
            }
            match key.code {
                KeyCode::Up => {
                    let rollover = self.increment();
                    return Outcome::changed(self.current_value()).with_rollover(rollover);
                }
                KeyCode::Down => {
                    let rollover = self.decrement();
                    return Outcome::changed(self.current_value()).with_rollover(rollover);
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

    /// Text shown in the field: the raw buffer while focused or typing.
    pub fn display_text(&self, focused: bool) -> String {
        let value = if focused || self.typing { self.selected_value } else { self.current_value() };
        self.format(value)
    }

    fn format(&self, value: i32) -> String {
        format!("{:0width$}", value, width = self.digit_count)
    }

    fn select(&mut self, value: i32) -> i32 {
        self.selected_value = value;
        let computed = self.current_value();
        self.on_change.emit(&computed);
        computed
    }

    fn close_popup(&mut self) {
        self.popup_open = false;
        self.commit();
    }

    fn commit(&mut self) {
        let committed = self.current_value();
        if committed != self.selected_value {
            self.selected_value = committed;
        }
        self.typing = false;
    }

    fn emit_rollover(&mut self, rollover: Option<Rollover>) -> Option<Rollover> {
        if let Some(direction) = &rollover {
            self.on_rollover.emit(direction);
        }
        rollover
    }
}

impl Interactable for IntPicker {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        self.apply_key(key).result
    }

    fn preferred_size(&self) -> Size {
        Size::new(self.digit_count as u16, 1)
    }

    fn draw(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let style = if focused {
            Style::new().fg(TEXT_BLACK).bg(FIELD_PRELIGHT)
        } else {
            Style::new().fg(TEXT_WHITE)
        };
        let x = area.x + area.width.saturating_sub(self.digit_count as u16) / 2;
        buf.set_stringn(x, area.y, self.display_text(focused), area.width as usize, style);
    }

    fn overlay(&self) -> Option<Overlay> {
        self.popup_open.then(|| {
            let current = self.current_value();
            Overlay::spinner(
                self.digit_count as u16,
                self.format(self.successor(current)),
                self.format(self.selected_value),
                self.format(self.predecessor(current)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(picker: &mut IntPicker, digits: &str) {
        for c in digits.chars() {
            picker.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_digit_count_and_weak_max() {
        let picker = IntPicker::new(2024, 0, 9999);
        assert_eq!(picker.digit_count(), 4);
        assert_eq!(picker.weak_max, 10_000);

        let picker = IntPicker::new(5, 1, 12);
        assert_eq!(picker.digit_count(), 2);
        assert_eq!(picker.weak_max, 100);

        let picker = IntPicker::new(0, 0, 9);
        assert_eq!(picker.digit_count(), 1);
    }

    #[test]
    fn test_identity_within_range() {
        let mut picker = IntPicker::new(1, 1, 31);
        for v in 1..=31 {
            picker.set_selection(v);
            assert_eq!(picker.current_value(), v);
        }
    }

    #[test]
    fn test_clamps_on_read_only() {
        let mut picker = IntPicker::new(15, 1, 31);
        type_str(&mut picker, "99");
        assert_eq!(picker.raw_value(), 99);
        assert_eq!(picker.current_value(), 31);
        assert!(picker.is_typing());
    }

    #[test]
    fn test_typing_rolls_digits_through_modulus() {
        let mut picker = IntPicker::new(0, 0, 59);
        type_str(&mut picker, "12345");
        // 2 digits wide, so only the last two typed survive
        assert_eq!(picker.raw_value(), 45);

        let mut year = IntPicker::new(0, 0, 9999);
        type_str(&mut year, "2025");
        assert_eq!(year.raw_value(), 2025);
        type_str(&mut year, "7");
        assert_eq!(year.raw_value(), 257);
    }

    #[test]
    fn test_typing_shifts_existing_value() {
        let mut picker = IntPicker::new(3, 1, 31);
        type_str(&mut picker, "1");
        assert_eq!(picker.raw_value(), 31);
        type_str(&mut picker, "2");
        assert_eq!(picker.raw_value(), 12);
    }

    #[test]
    fn test_backspace_undoes_last_digit() {
        let mut picker = IntPicker::new(0, 0, 9999);
        type_str(&mut picker, "20");
        let before = picker.raw_value();
        type_str(&mut picker, "2");
        picker.handle_key(key(KeyCode::Backspace));
        assert_eq!(picker.raw_value(), before);
    }

    #[test]
    fn test_wraparound_law() {
        let mut picker = IntPicker::new(1, 1, 12);
        assert_eq!(picker.successor(12), 1);
        assert_eq!(picker.predecessor(1), 12);

        picker.set_selection(12);
        assert_eq!(picker.increment(), Some(Rollover::Up));
        assert_eq!(picker.current_value(), 1);

        assert_eq!(picker.decrement(), Some(Rollover::Down));
        assert_eq!(picker.current_value(), 12);

        assert_eq!(picker.decrement(), None);
        assert_eq!(picker.current_value(), 11);
    }

    #[test]
    fn test_popup_state_machine() {
        let mut picker = IntPicker::new(10, 0, 59);
        assert_eq!(picker.handle_key(key(KeyCode::Up)), KeyResult::NotConsumed);

        assert_eq!(picker.handle_key(key(KeyCode::Enter)), KeyResult::Consumed);
        assert!(picker.is_popup_open());

        picker.handle_key(key(KeyCode::Up));
        picker.handle_key(key(KeyCode::Up));
        assert_eq!(picker.current_value(), 12);
        picker.handle_key(key(KeyCode::Down));
        assert_eq!(picker.current_value(), 11);

        assert_eq!(picker.handle_key(key(KeyCode::Enter)), KeyResult::Consumed);
        assert!(!picker.is_popup_open());
    }

    #[test]
    fn test_escape_closes_popup() {
        let mut picker = IntPicker::new(10, 0, 59);
        picker.handle_key(key(KeyCode::Char(' ')));
        assert!(picker.is_popup_open());
        assert_eq!(picker.handle_key(key(KeyCode::Esc)), KeyResult::Consumed);
        assert!(!picker.is_popup_open());
        // Escape with the popup closed goes back to the host
        assert_eq!(picker.handle_key(key(KeyCode::Esc)), KeyResult::NotConsumed);
    }

    #[test]
    fn test_escape_and_delete_close_without_commit() {
        for close in [KeyCode::Esc, KeyCode::Delete] {
            let mut picker = IntPicker::new(5, 1, 12);
            picker.handle_key(key(KeyCode::Enter));
            type_str(&mut picker, "99");
            assert_eq!(picker.handle_key(key(close)), KeyResult::Consumed);
            assert!(!picker.is_popup_open());
            assert!(picker.is_typing());
            assert_eq!(picker.raw_value(), 99);
            assert_eq!(picker.current_value(), 12);
        }

        // Activation commits the clamped value
        let mut picker = IntPicker::new(5, 1, 12);
        picker.handle_key(key(KeyCode::Enter));
        type_str(&mut picker, "99");
        picker.handle_key(key(KeyCode::Enter));
        assert!(!picker.is_typing());
        assert_eq!(picker.raw_value(), 12);
    }

    #[test]
    fn test_set_min_value_clamps_and_moves_wrap_point() {
        let mut picker = IntPicker::new(3, 1, 12);
        picker.set_min_value(5);
        assert_eq!(picker.min_value(), 5);
        assert_eq!(picker.raw_value(), 3);
        assert_eq!(picker.current_value(), 5);
        assert_eq!(picker.predecessor(5), 12);
        assert_eq!(picker.successor(12), 5);

        assert_eq!(picker.decrement(), Some(Rollover::Down));
        assert_eq!(picker.current_value(), 12);
        assert_eq!(picker.increment(), Some(Rollover::Up));
        assert_eq!(picker.current_value(), 5);
        assert_eq!(picker.increment(), None);
        assert_eq!(picker.current_value(), 6);

        // Lowering min again releases values below the old bound
        picker.set_min_value(0);
        picker.set_selection(3);
        assert_eq!(picker.current_value(), 3);
        assert_eq!(picker.predecessor(0), 12);
        picker.set_selection(0);
        assert_eq!(picker.decrement(), Some(Rollover::Down));
        assert_eq!(picker.current_value(), 12);
    }

    #[test]
    #[should_panic]
    fn test_set_min_value_above_max_panics() {
        let mut picker = IntPicker::new(3, 1, 12);
        picker.set_min_value(13);
    }

    #[test]
    fn test_modified_digits_not_typed() {
        let mut picker = IntPicker::new(5, 1, 12);
        let ctrl = KeyEvent::new(KeyCode::Char('7'), KeyModifiers::CONTROL);
        let alt = KeyEvent::new(KeyCode::Char('7'), KeyModifiers::ALT);
        assert_eq!(picker.handle_key(ctrl), KeyResult::NotConsumed);
        assert_eq!(picker.handle_key(alt), KeyResult::NotConsumed);
        assert_eq!(picker.raw_value(), 5);
        assert!(!picker.is_typing());
    }

    #[test]
    fn test_traversal_closes_popup_and_propagates() {
        let mut picker = IntPicker::new(10, 0, 59);
        picker.handle_key(key(KeyCode::Enter));
        assert_eq!(picker.handle_key(key(KeyCode::Tab)), KeyResult::NotConsumed);
        assert!(!picker.is_popup_open());
    }

    #[test]
    fn test_focus_lost_commits_clamped_value() {
        let mut picker = IntPicker::new(5, 1, 12);
        picker.focus_gained(FocusDirection::Forward);
        type_str(&mut picker, "99");
        picker.handle_key(key(KeyCode::Enter));
        picker.focus_lost();
        assert!(!picker.is_popup_open());
        assert!(!picker.is_typing());
        assert_eq!(picker.raw_value(), 12);
    }

    #[test]
    fn test_bounds_change_keeps_raw_selection() {
        let mut picker = IntPicker::new(31, 1, 31);
        picker.set_max_value(28);
        assert_eq!(picker.raw_value(), 31);
        assert_eq!(picker.current_value(), 28);
        picker.set_max_value(31);
        assert_eq!(picker.current_value(), 31);
    }

    #[test]
    fn test_is_default_after_keystroke() {
        let mut picker = IntPicker::new(7, 0, 59);
        assert!(picker.is_default());
        type_str(&mut picker, "3");
        assert!(!picker.is_default());
        assert!(picker.has_changed());
    }

    #[test]
    fn test_change_listener_receives_clamped_value() {
        let seen = Rc::new(RefCell::new(vec![]));
        let mut picker = IntPicker::new(5, 1, 12);
        let sink = seen.clone();
        picker.on_change(move |v| sink.borrow_mut().push(*v));
        type_str(&mut picker, "9");
        picker.set_selection(3);
        assert_eq!(*seen.borrow(), vec![12, 3]);
    }

    #[test]
    fn test_rollover_listener_fires_once_per_wrap() {
        let seen = Rc::new(RefCell::new(vec![]));
        let mut picker = IntPicker::new(12, 1, 12);
        let sink = seen.clone();
        picker.on_rollover(move |r| sink.borrow_mut().push(*r));
        picker.increment();
        picker.increment();
        assert_eq!(*seen.borrow(), vec![Rollover::Up]);
    }

    #[test]
    fn test_unknown_key_not_consumed() {
        let mut picker = IntPicker::new(5, 1, 12);
        assert_eq!(picker.handle_key(key(KeyCode::Char('x'))), KeyResult::NotConsumed);
        assert_eq!(picker.handle_key(key(KeyCode::F(2))), KeyResult::NotConsumed);
    }

    #[test]
    fn test_display_pads_and_shows_raw_while_focused() {
        let mut picker = IntPicker::new(5, 1, 31);
        assert_eq!(picker.display_text(false), "05");
        type_str(&mut picker, "9");
        assert_eq!(picker.display_text(true), "59");
        picker.focus_lost();
        assert_eq!(picker.display_text(false), "31");
    }

    #[test]
    fn test_overlay_shows_neighbours() {
        let mut picker = IntPicker::new(1, 1, 31);
        assert!(picker.overlay().is_none());
        picker.handle_key(key(KeyCode::Enter));
        let overlay = picker.overlay().unwrap();
        assert_eq!(overlay.lines, ["02".to_string(), "01".to_string(), "31".to_string()]);
        assert_eq!(overlay.highlighted, 1);
    }

    #[test]
    fn test_draw_writes_value() {
        let picker = IntPicker::new(2024, 0, 9999);
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        picker.draw(area, &mut buf, false);
        assert_eq!(buf[(0, 0)].symbol(), "2");
        assert_eq!(buf[(3, 0)].symbol(), "4");
    }

    #[test]
    fn test_try_new_rejects_inverted_bounds() {
        assert_eq!(
            IntPicker::try_new(0, 10, 1).unwrap_err(),
            PickerError::InvalidBounds { min: 10, max: 1 }
        );
        assert!(IntPicker::try_new(0, 0, 1).is_ok());
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_inverted_bounds() {
        IntPicker::new(0, 5, 4);
    }
}
