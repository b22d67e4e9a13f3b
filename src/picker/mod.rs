//! Picker widgets
//!
//! Bounded integer, month, date and time pickers with in-place typing, a
//! spinner popup and wraparound stepping, plus the text and money fields
//! used by the entry form. Every widget implements `Interactable`.

#![allow(dead_code)]

mod date_picker;
mod int_picker;
mod listeners;
mod money_picker;
mod month_picker;
mod overlay;
mod text_field;
mod time_picker;
mod traits;

pub use date_picker::{DateField, DatePicker, days_in_month, is_leap_year};
pub use int_picker::IntPicker;
pub use listeners::{Listeners, Outcome, Rollover};
pub use money_picker::{MoneyPicker, is_valid_amount, parse_amount};
pub use month_picker::{MonthPicker, short_name};
pub use overlay::Overlay;
pub use text_field::TextField;
pub use time_picker::{AmPmPicker, TimeField, TimePicker};
pub use traits::{FocusDirection, Interactable, KeyResult, ListPicker};
