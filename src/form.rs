//! The "enter a ledger row" form.
//!
//! Owns one widget per field and routes keys to the focused one. Keys the
//! widget hands back drive focus traversal between fields.

use chrono::{NaiveDate, NaiveTime};
use crossterm::event::{KeyCode, KeyEvent};

use crate::error::{FormError, FormResult};
use crate::ledger::Transaction;
use crate::log;
use crate::picker::{DatePicker, FocusDirection, Interactable, MoneyPicker, Overlay, TextField, TimePicker};

const TEXT_WIDTH: u16 = 30;
const AMOUNT_WIDTH: u16 = 12;

/// Whether the form records money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Deposit,
    Payment,
}

impl EntryKind {
    pub fn title(self) -> &'static str {
        match self {
            EntryKind::Deposit => "Add deposit",
            EntryKind::Payment => "Make payment",
        }
    }

    /// Label for the counterparty field.
    pub fn vendor_label(self) -> &'static str {
        match self {
            EntryKind::Deposit => "From",
            EntryKind::Payment => "To",
        }
    }

    fn signed(self, amount: f64) -> f64 {
        match self {
            EntryKind::Deposit => amount.abs(),
            EntryKind::Payment => -amount.abs(),
        }
    }
}

/// Form fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Amount,
    Description,
    Vendor,
    Date,
    Time,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Amount,
        FormField::Description,
        FormField::Vendor,
        FormField::Date,
        FormField::Time,
        FormField::Submit,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::Amount | FormField::Description | FormField::Vendor)
    }
}

/// What the form did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResponse {
    Consumed,
    NotConsumed,
    /// Enter was pressed on the submit button
    SubmitRequested,
}

#[derive(Debug)]
pub struct EntryForm {
    kind: EntryKind,
    amount: MoneyPicker,
    description: TextField,
    vendor: TextField,
    date: DatePicker,
    time: TimePicker,
    focus: FormField,
}

impl EntryForm {
    pub fn new(kind: EntryKind, date: NaiveDate, time: NaiveTime) -> Self {
        let mut form = Self {
            kind,
            amount: MoneyPicker::new(AMOUNT_WIDTH),
            description: TextField::new(TEXT_WIDTH),
            vendor: TextField::new(TEXT_WIDTH),
            date: DatePicker::new(date),
            time: TimePicker::new(time),
            focus: FormField::Amount,
        };
        form.amount.focus_gained(FocusDirection::Forward);
        form
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn focused_field(&self) -> FormField {
        self.focus
    }

    pub fn label(&self, field: FormField) -> &'static str {
        match field {
            FormField::Amount => "Amount",
            FormField::Description => "For",
            FormField::Vendor => self.kind.vendor_label(),
            FormField::Date => "Date",
            FormField::Time => "Time",
            FormField::Submit => "Submit",
        }
    }

    /// The widget behind a field; `None` for the submit button.
    pub fn widget(&self, field: FormField) -> Option<&dyn Interactable> {
        match field {
            FormField::Amount => Some(&self.amount),
            FormField::Description => Some(&self.description),
            FormField::Vendor => Some(&self.vendor),
            FormField::Date => Some(&self.date),
            FormField::Time => Some(&self.time),
            FormField::Submit => None,
        }
    }

    fn widget_mut(&mut self, field: FormField) -> Option<&mut dyn Interactable> {
        match field {
            FormField::Amount => Some(&mut self.amount),
            FormField::Description => Some(&mut self.description),
            FormField::Vendor => Some(&mut self.vendor),
            FormField::Date => Some(&mut self.date),
            FormField::Time => Some(&mut self.time),
            FormField::Submit => None,
        }
    }

    pub fn amount(&self) -> &MoneyPicker {
        &self.amount
    }

    pub fn date(&self) -> &DatePicker {
        &self.date
    }

    pub fn time(&self) -> &TimePicker {
        &self.time
    }

    /// Popup of the focused widget, if any.
    pub fn overlay(&self) -> Option<Overlay> {
        self.widget(self.focus).and_then(|w| w.overlay())
    }

    /// True while a text field has focus and printable keys are input.
    pub fn is_editing_text(&self) -> bool {
        self.focus.is_text()
    }

    /// Every field is still at its starting value.
    pub fn is_pristine(&self) -> bool {
        self.amount.is_empty()
            && self.description.is_empty()
            && self.vendor.is_empty()
            && self.date.is_default()
            && self.time.is_default()
    }

    pub fn focus(&mut self, field: FormField) {
        let direction = if field.index() >= self.focus.index() {
            FocusDirection::Forward
        } else {
            FocusDirection::Backward
        };
        self.move_focus(field, direction);
    }

    fn move_focus(&mut self, to: FormField, direction: FocusDirection) {
        let from = self.focus;
        if let Some(widget) = self.widget_mut(from) {
            widget.focus_lost();
        }
        self.focus = to;
        if let Some(widget) = self.widget_mut(to) {
            widget.focus_gained(direction);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormResponse {
        let focus = self.focus;
        if let Some(widget) = self.widget_mut(focus)
            && widget.handle_key(key).is_consumed()
        {
            return FormResponse::Consumed;
        }

        match key.code {
            KeyCode::Enter if focus == FormField::Submit => FormResponse::SubmitRequested,
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => self.traverse(focus.next(), FocusDirection::Forward),
            KeyCode::BackTab | KeyCode::Up => self.traverse(focus.prev(), FocusDirection::Backward),
            _ => FormResponse::NotConsumed,
        }
    }

    fn traverse(&mut self, to: Option<FormField>, direction: FocusDirection) -> FormResponse {
        match to {
            Some(field) => {
                self.move_focus(field, direction);
                FormResponse::Consumed
            }
            None => FormResponse::NotConsumed,
        }
    }

    /// Validate and build the row.
    pub fn submit(&self) -> FormResult<Transaction> {
        let amount = self.amount.money_value().ok_or(FormError::InvalidAmount)?;
        let description = self.description.text().trim();
        if description.is_empty() {
            return Err(FormError::EmptyField("Description"));
        }
        let vendor = self.vendor.text().trim();
        if vendor.is_empty() {
            return Err(FormError::EmptyField(self.kind.vendor_label()));
        }

        let date_time = self.date.date_value().and_time(self.time.time_value());
        let tx = Transaction::new(date_time, description, vendor, self.kind.signed(amount));
        log::log_event(&format!("Form submitted: {}", tx));
        Ok(tx)
    }
}
