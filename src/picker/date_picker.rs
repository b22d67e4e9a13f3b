//! Date picker: Month, Day and Year sub-pickers with rollover propagation.
//!
//! The composite owns its sub-pickers and settles every change explicitly:
//! a day wrap steps the month, a month wrap steps the year, and any month or
//! year change recomputes the day's upper bound. The composite's own
//! listener fires once per key or programmatic set, after the cascade.

use chrono::{Datelike, Month, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::{Rect, Size}};

use super::int_picker::IntPicker;
use super::listeners::{Listeners, Outcome, Rollover};
use super::month_picker::MonthPicker;
use super::overlay::Overlay;
use super::traits::{FocusDirection, Interactable, KeyResult};
use crate::log;

pub const MIN_YEAR: i32 = 0;
pub const MAX_YEAR: i32 = 9_999;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: i32, month: Month) -> i32 {
    match month {
        Month::February if is_leap_year(year) => 29,
        Month::February => 28,
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Sub-pickers in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Month,
    Day,
    Year,
}

impl DateField {
    const ORDER: [DateField; 3] = [DateField::Month, DateField::Day, DateField::Year];

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

/// What changed in one sub-picker step, fed to `settle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Change {
    field: DateField,
    rollover: Option<Rollover>,
}

#[derive(Debug)]
pub struct DatePicker {
    day: IntPicker,
    month: MonthPicker,
    year: IntPicker,
    focus: DateField,
    focused: bool,
    on_change: Listeners<NaiveDate>,
}

impl DatePicker {
    /// A picker defaulting to `default_date`.
    pub fn new(default_date: NaiveDate) -> Self {
        let month = Month::try_from(default_date.month() as u8).unwrap_or(Month::January);
        let year = default_date.year().clamp(MIN_YEAR, MAX_YEAR);
        Self {
            day: IntPicker::new(default_date.day() as i32, 1, days_in_month(year, month)),
            month: MonthPicker::new(month),
            year: IntPicker::new(year, MIN_YEAR, MAX_YEAR),
            focus: DateField::Month,
            focused: false,
            on_change: Listeners::new(),
        }
    }

    /// A picker defaulting to today's local date.
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    /// Subscribe to composite changes; fires once per settled mutation.
    pub fn on_change(&mut self, callback: impl FnMut(&NaiveDate) + 'static) {
        self.on_change.subscribe(callback);
    }

    pub fn day(&self) -> &IntPicker {
        &self.day
    }

    pub fn month(&self) -> &MonthPicker {
        &self.month
    }

    pub fn year(&self) -> &IntPicker {
        &self.year
    }

    pub fn focused_field(&self) -> DateField {
        self.focus
    }

    pub fn is_default(&self) -> bool {
        self.month.is_default() && self.day.is_default() && self.year.is_default()
    }

    /// The resolved date; the day is always within the month's length.
    pub fn date_value(&self) -> NaiveDate {
        let year = self.year.current_value();
        let month = self.month.current_value();
        let day = self.day.current_value().min(days_in_month(year, month));
        NaiveDate::from_ymd_opt(year, month.number_from_month(), day as u32)
            .expect("day is bounded by days_in_month")
    }

    /// Set all three parts. Month goes first so the day's bound is right
    /// before the day is assigned.
    pub fn set_date(&mut self, date: NaiveDate) {
        let month = Month::try_from(date.month() as u8).unwrap_or(Month::January);
        self.month.set_selection(month);
        self.settle(Change { field: DateField::Month, rollover: None });
        self.day.set_selection(date.day() as i32);
        self.year.set_selection(date.year().clamp(MIN_YEAR, MAX_YEAR));
        self.settle(Change { field: DateField::Year, rollover: None });
        self.notify();
    }

    /// Step the day forward, cascading into month and year.
    pub fn increment_day(&mut self) {
        let rollover = self.day.increment();
        self.settle(Change { field: DateField::Day, rollover });
        self.notify();
    }

    /// Step the day back, cascading into month and year.
    pub fn decrement_day(&mut self) {
        let rollover = self.day.decrement();
        self.settle(Change { field: DateField::Day, rollover });
        self.notify();
    }

    /// Run the propagation chain for one sub-picker change.
    ///
    /// At most one day-to-month and one month-to-year step happen per call.
    fn settle(&mut self, change: Change) {
        let mut month_rollover = None;
        let mut bounds_dirty = change.field != DateField::Day;

        if change.field == DateField::Day {
            month_rollover = match change.rollover {
                Some(Rollover::Up) => self.month.increment(),
                Some(Rollover::Down) => self.month.decrement(),
                None => None,
            };
            bounds_dirty = change.rollover.is_some();
        } else if change.field == DateField::Month {
            month_rollover = change.rollover;
        }

        if let Some(direction) = month_rollover {
            match direction {
                Rollover::Up => self.year.increment(),
                Rollover::Down => self.year.decrement(),
            };
            log::log_event(&format!("date rollover {:?} into year {}", direction, self.year.current_value()));
        }

        if bounds_dirty {
            self.update_day_bound();
        }

        if change.field == DateField::Day && change.rollover == Some(Rollover::Down) {
            let last_day = self.day.max_value();
            self.day.set_selection(last_day);
        }
    }

    fn update_day_bound(&mut self) {
        let days = days_in_month(self.year.current_value(), self.month.current_value());
        self.day.set_max_value(days);
    }

    fn notify(&mut self) {
        let date = self.date_value();
        self.on_change.emit(&date);
    }

    fn field_mut(&mut self, field: DateField) -> &mut dyn Interactable {
        match field {
            DateField::Month => &mut self.month,
            DateField::Day => &mut self.day,
            DateField::Year => &mut self.year,
        }
    }

    fn field(&self, field: DateField) -> &dyn Interactable {
        match field {
            DateField::Month => &self.month,
            DateField::Day => &self.day,
            DateField::Year => &self.year,
        }
    }

    fn move_focus(&mut self, to: DateField, direction: FocusDirection) {
        let from = self.focus;
        self.field_mut(from).focus_lost();
        self.focus = to;
        self.field_mut(to).focus_gained(direction);
    }

    /// Column offset of each sub-picker: `Mon DD YYYY`.
    fn column(&self, field: DateField) -> u16 {
        let month_w = self.month.preferred_size().width;
        let day_w = self.day.preferred_size().width;
        match field {
            DateField::Month => 0,
            DateField::Day => month_w + 1,
            DateField::Year => month_w + 1 + day_w + 1,
        }
    }

    fn dispatch(&mut self, key: KeyEvent) -> (KeyResult, Option<Change>) {
        let field = self.focus;
        match field {
            DateField::Month => {
                let Outcome { result, changed, rollover } = self.month.apply_key(key);
                (result, changed.map(|_| Change { field, rollover }))
            }
            DateField::Day => {
                let Outcome { result, changed, rollover } = self.day.apply_key(key);
                (result, changed.map(|_| Change { field, rollover }))
            }
            DateField::Year => {
                let Outcome { result, changed, rollover } = self.year.apply_key(key);
                (result, changed.map(|_| Change { field, rollover }))
            }
        }
    }
}

impl Interactable for DatePicker {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        let (result, change) = self.dispatch(key);
        if let Some(change) = change {
            self.settle(change);
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
        let year_w = self.year.preferred_size().width;
        Size::new(self.column(DateField::Year) + year_w, 1)
    }

    fn draw(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        for field in DateField::ORDER {
            let x = self.column(field);
            let width = self.field(field).preferred_size().width;
            let sub = Rect::new(area.x + x, area.y, width, 1).intersection(area);
            self.field(field).draw(sub, buf, focused && self.focus == field);
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
            FocusDirection::Forward => DateField::Month,
            FocusDirection::Backward => DateField::Year,
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
