//! Time picker: Hour, Minute and an AM/PM toggle.
//!
//! The hour wraps within 1..=12 without touching AM/PM.

use chrono::{NaiveTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::{Rect, Size}, style::Style};

use super::int_picker::IntPicker;
use super::listeners::Listeners;
use super::overlay::Overlay;
use super::traits::{FocusDirection, Interactable, KeyResult};
use crate::events::keyboard::{is_activation, typed_char};
use crate::tui::theme::*;

/// Two-state AM/PM sub-picker.
#[derive(Debug)]
pub struct AmPmPicker {
    default_am: bool,
    am: bool,
    focused: bool,
}

impl AmPmPicker {
    pub fn new(am: bool) -> Self {
        Self { default_am: am, am, focused: false }
    }

    pub fn is_am(&self) -> bool {
        self.am
    }

    pub fn set_am(&mut self, am: bool) {
        self.am = am;
    }

    pub fn is_default(&self) -> bool {
        self.am == self.default_am
    }

    fn label(&self) -> &'static str {
        if self.am { "AM" } else { "PM" }
    }

    /// Returns true when the key changed the flag.
    fn apply_key(&mut self, key: KeyEvent) -> (KeyResult, bool) {
        let before = self.am;
        if is_activation(&key) {
            self.am = !self.am;
        } else {
            match typed_char(&key) {
                Some('a' | 'A') => self.am = true,
                Some('p' | 'P') => self.am = false,
                _ => return (KeyResult::NotConsumed, false),
            }
        }
        (KeyResult::Consumed, before != self.am)
    }
}

impl Interactable for AmPmPicker {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        self.apply_key(key).0
    }

    fn preferred_size(&self) -> Size {
        Size::new(2, 1)
    }

    fn draw(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let style = if focused {
            Style::new().fg(TEXT_BLACK).bg(FIELD_PRELIGHT)
        } else {
            Style::new().fg(TEXT_WHITE)
        };
        buf.set_stringn(area.x, area.y, self.label(), area.width as usize, style);
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus_gained(&mut self, _direction: FocusDirection) {
        self.focused = true;
    }

    fn focus_lost(&mut self) {
        self.focused = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
    AmPm,
}

impl TimeField {
    const ORDER: [TimeField; 3] = [TimeField::Hour, TimeField::Minute, TimeField::AmPm];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Option<Self> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ORDER[i])
    }
}

#[derive(Debug)]
pub struct TimePicker {
    hour: IntPicker,
    minute: IntPicker,
    am_pm: AmPmPicker,
    focus: TimeField,
    focused: bool,
    on_change: Listeners<NaiveTime>,
}

impl TimePicker {
    pub fn new(default_time: NaiveTime) -> Self {
        let (pm, hour12) = default_time.hour12();
        Self {
            hour: IntPicker::new(hour12 as i32, 1, 12),
            minute: IntPicker::new(default_time.minute() as i32, 0, 59),
            am_pm: AmPmPicker::new(!pm),
            focus: TimeField::Hour,
            focused: false,
            on_change: Listeners::new(),
        }
    }

    pub fn now() -> Self {
        Self::new(chrono::Local::now().time())
    }

    pub fn on_change(&mut self, callback: impl FnMut(&NaiveTime) + 'static) {
        self.on_change.subscribe(callback);
    }

    pub fn hour(&self) -> &IntPicker {
        &self.hour
    }

    pub fn minute(&self) -> &IntPicker {
        &self.minute
    }

    pub fn am_pm(&self) -> &AmPmPicker {
        &self.am_pm
    }

    pub fn focused_field(&self) -> TimeField {
        self.focus
    }

    pub fn is_default(&self) -> bool {
        self.hour.is_default() && self.minute.is_default() && self.am_pm.is_default()
    }

    /// The resolved 24-hour time. 12 AM is midnight, 12 PM is noon.
    pub fn time_value(&self) -> NaiveTime {
        let base = if self.am_pm.is_am() { 0 } else { 12 };
        let hour = base + self.hour.current_value() % 12;
        NaiveTime::from_hms_opt(hour as u32, self.minute.current_value() as u32, 0)
            .expect("hour and minute are bounded")
    }

    pub fn set_time(&mut self, time: NaiveTime) {
        let (pm, hour12) = time.hour12();
        self.hour.set_selection(hour12 as i32);
        self.minute.set_selection(time.minute() as i32);
        self.am_pm.set_am(!pm);
        self.notify();
    }

    fn notify(&mut self) {
        let time = self.time_value();
        self.on_change.emit(&time);
    }

    fn field_mut(&mut self, field: TimeField) -> &mut dyn Interactable {
        match field {
            TimeField::Hour => &mut self.hour,
            TimeField::Minute => &mut self.minute,
            TimeField::AmPm => &mut self.am_pm,
        }
    }

    fn field(&self, field: TimeField) -> &dyn Interactable {
        match field {
            TimeField::Hour => &self.hour,
            TimeField::Minute => &self.minute,
            TimeField::AmPm => &self.am_pm,
        }
    }

    /// Column offset of each part: `HH:MM AM`.
    fn column(&self, field: TimeField) -> u16 {
        let hour_w = self.hour.preferred_size().width;
        let minute_w = self.minute.preferred_size().width;
        match field {
            TimeField::Hour => 0,
            TimeField::Minute => hour_w + 1,
            TimeField::AmPm => hour_w + 1 + minute_w + 1,
        }
    }

    fn move_focus(&mut self, to: TimeField, direction: FocusDirection) {
        let from = self.focus;
        self.field_mut(from).focus_lost();
        self.focus = to;
        self.field_mut(to).focus_gained(direction);
    }

    fn dispatch(&mut self, key: KeyEvent) -> (KeyResult, bool) {
        match self.focus {
            TimeField::Hour => {
                let outcome = self.hour.apply_key(key);
                (outcome.result, outcome.changed.is_some())
            }
            TimeField::Minute => {
                let outcome = self.minute.apply_key(key);
                (outcome.result, outcome.changed.is_some())
            }
            TimeField::AmPm => self.am_pm.apply_key(key),
        }
    }
}

impl Interactable for TimePicker {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        let (result, changed) = self.dispatch(key);
        if changed {
            self.notify();
        }
        if result.is_consumed() {
            return result;
        }

        let target = match key.code {
            KeyCode::Tab | KeyCode::Right => self.focus.next().map(|f| (f, FocusDirection::Forward)),
            KeyCode::BackTab | KeyCode::Left => self.focus.prev().map(|f| (f, FocusDirection::Backward)),
            _ => None,
        };
        match target {
            Some((to, direction)) => {
                self.move_focus(to, direction);
                KeyResult::Consumed
            }
            None => KeyResult::NotConsumed,
        }
    }

    fn preferred_size(&self) -> Size {
        Size::new(self.column(TimeField::AmPm) + self.am_pm.preferred_size().width, 1)
    }

    fn draw(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        for field in TimeField::ORDER {
            let x = self.column(field);
            let width = self.field(field).preferred_size().width;
            let sub = Rect::new(area.x + x, area.y, width, 1).intersection(area);
            self.field(field).draw(sub, buf, focused && self.focus == field);
        }
        let colon_x = area.x + self.column(TimeField::Minute) - 1;
        if colon_x < area.right() {
            buf.set_string(colon_x, area.y, ":", Style::new().fg(TEXT_WHITE));
        }
    }

    fn overlay(&self) -> Option<Overlay> {
        self.field(self.focus)
            .overlay()
            .map(|o| o.shifted(self.column(self.focus)))
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus_gained(&mut self, direction: FocusDirection) {
        self.focused = true;
        self.focus = match direction {
            FocusDirection::Forward => TimeField::Hour,
            FocusDirection::Backward => TimeField::AmPm,
        };
        let focus = self.focus;
        self.field_mut(focus).focus_gained(direction);
    }

    fn focus_lost(&mut self) {
        self.focused = false;
        let focus = self.focus;
        self.field_mut(focus).focus_lost();
    }
}
