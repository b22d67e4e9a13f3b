use chrono::{Local, NaiveDate, NaiveTime};

use crate::events::Action;
use crate::form::{EntryForm, EntryKind, FormResponse};
use crate::ledger::{LedgerStore, Transaction};
use crate::log;
use crate::picker::ListPicker;
use crate::report::{DateRange, Report};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen {
    Home,  // Main menu
    Entry, // Entering a deposit or payment
    Ledger, // Browsing rows
    Reports, // Date-range summaries
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,  // Keys go to the current screen
    Help,    // Help popup showing picker keys
    Confirm, // "Are you sure?" before appending a row
}

/// Entries of the home menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    AddDeposit,
    MakePayment,
    Ledger,
    Reports,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] =
        [MenuItem::AddDeposit, MenuItem::MakePayment, MenuItem::Ledger, MenuItem::Reports, MenuItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::AddDeposit => "Add deposit",
            MenuItem::MakePayment => "Make payment",
            MenuItem::Ledger => "Ledger",
            MenuItem::Reports => "Reports",
            MenuItem::Quit => "Quit",
        }
    }
}

/// State for the home menu
#[derive(Debug, Clone, Default)]
pub struct HomeMenu {
    pub selected: usize,
}

impl ListPicker for HomeMenu {
    type Item = MenuItem;

    fn items(&self) -> &[MenuItem] {
        &MenuItem::ALL
    }

    fn selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected = index;
    }
}

/// State for the reports screen
#[derive(Debug, Clone, Default)]
pub struct ReportMenu {
    pub selected: usize,
}

impl ListPicker for ReportMenu {
    type Item = Report;

    fn items(&self) -> &[Report] {
        &Report::ALL
    }

    fn selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected = index;
    }
}

/// Which rows the ledger screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedgerFilter {
    #[default]
    All,
    Deposits,
    Payments,
}

impl LedgerFilter {
    pub fn next(self) -> Self {
        match self {
            LedgerFilter::All => LedgerFilter::Deposits,
            LedgerFilter::Deposits => LedgerFilter::Payments,
            LedgerFilter::Payments => LedgerFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LedgerFilter::All => "All",
            LedgerFilter::Deposits => "Deposits",
            LedgerFilter::Payments => "Payments",
        }
    }

    pub fn matches(self, tx: &Transaction) -> bool {
        match self {
            LedgerFilter::All => true,
            LedgerFilter::Deposits => tx.is_deposit(),
            LedgerFilter::Payments => tx.is_payment(),
        }
    }
}

/// State for the ledger screen: a filtered snapshot, newest first
#[derive(Debug, Clone, Default)]
pub struct LedgerView {
    pub filter: LedgerFilter,
    /// Report the rows are narrowed to, with its range fixed when shown
    pub report: Option<(Report, DateRange)>,
    pub rows: Vec<Transaction>,
    pub selected: usize,
}

impl LedgerView {
    pub fn refresh(&mut self, store: &LedgerStore) {
        let range = self.report.map(|(_, range)| range);
        self.rows = store
            .transactions()
            .filter(|tx| self.filter.matches(tx) && range.is_none_or(|r| r.contains(tx)))
            .cloned()
            .collect();
        // Stable sort keeps file order among equal timestamps
        self.rows.sort_by(|a, b| b.date_time.cmp(&a.date_time));
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
    }

    /// Sum of the shown rows.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|tx| tx.amount).sum()
    }
}

impl ListPicker for LedgerView {
    type Item = Transaction;

    fn items(&self) -> &[Transaction] {
        &self.rows
    }

    fn selected_index(&self) -> usize {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        self.selected = index;
    }
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub menu: HomeMenu,
    pub reports: ReportMenu,
    pub form: Option<EntryForm>,
    /// Row waiting for confirmation
    pub pending: Option<Transaction>,
    pub ledger_view: LedgerView,
    pub store: LedgerStore,
    /// Last error or notice, shown in the status line
    pub status: Option<String>,
    /// Starting time for new forms; `None` means the current time
    default_time: Option<NaiveTime>,
}

impl App {
    pub fn new(store: LedgerStore, default_time: Option<NaiveTime>) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            menu: HomeMenu::default(),
            reports: ReportMenu::default(),
            form: None,
            pending: None,
            ledger_view: LedgerView::default(),
            store,
            status: None,
            default_time,
        }
    }

    /// Apply one action to the state.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::GoHome => self.go_home(),
            Action::OpenHelp => self.input_mode = InputMode::Help,
            Action::CloseHelp => self.input_mode = InputMode::Normal,
            Action::MenuUp => self.menu.select_prev(),
            Action::MenuDown => self.menu.select_next(),
            Action::MenuSelect => {
                if let Some(item) = self.menu.selected_item().copied() {
                    self.activate(item);
                }
            }
            Action::MenuChoose(index) => {
                if let Some(item) = MenuItem::ALL.get(index).copied() {
                    self.menu.set_selected_index(index);
                    self.activate(item);
                }
            }
            Action::FormKey(key) => self.form_key(key),
            Action::ConfirmSubmit => self.confirm_submit(),
            Action::CancelSubmit => {
                self.pending = None;
                self.input_mode = InputMode::Normal;
            }
            Action::ReportUp => self.reports.select_prev(),
            Action::ReportDown => self.reports.select_next(),
            Action::ShowReport => {
                if let Some(report) = self.reports.selected_item().copied() {
                    self.show_report(report, Local::now().date_naive());
                }
            }
            Action::LedgerUp => self.ledger_view.select_prev(),
            Action::LedgerDown => self.ledger_view.select_next(),
            Action::CycleFilter => {
                self.ledger_view.filter = self.ledger_view.filter.next();
                self.ledger_view.reset_selection();
                self.ledger_view.refresh(&self.store);
            }
            Action::None => {}
        }
    }

    fn activate(&mut self, item: MenuItem) {
        match item {
            MenuItem::AddDeposit => self.open_form(EntryKind::Deposit),
            MenuItem::MakePayment => self.open_form(EntryKind::Payment),
            MenuItem::Ledger => self.open_ledger(),
            MenuItem::Reports => self.open_reports(),
            MenuItem::Quit => self.should_quit = true,
        }
    }

    pub fn open_form(&mut self, kind: EntryKind) {
        let now = Local::now();
        let time = self.default_time.unwrap_or_else(|| now.time());
        self.form = Some(EntryForm::new(kind, now.date_naive(), time));
        self.status = None;
        self.screen = Screen::Entry;
        self.input_mode = InputMode::Normal;
    }

    pub fn open_ledger(&mut self) {
        self.ledger_view.report = None;
        self.ledger_view.reset_selection();
        self.ledger_view.refresh(&self.store);
        self.status = None;
        self.screen = Screen::Ledger;
        self.input_mode = InputMode::Normal;
    }

    pub fn open_reports(&mut self) {
        self.status = None;
        self.screen = Screen::Reports;
        self.input_mode = InputMode::Normal;
    }

    /// Open the ledger narrowed to `report`'s range as of `today`.
    pub fn show_report(&mut self, report: Report, today: NaiveDate) {
        let range = report.range(today);
        log::log_event(&format!("Showing report {}: {:?}", report.name(), range));
        self.ledger_view.report = Some((report, range));
        self.ledger_view.filter = LedgerFilter::All;
        self.ledger_view.reset_selection();
        self.ledger_view.refresh(&self.store);
        self.status = None;
        self.screen = Screen::Ledger;
        self.input_mode = InputMode::Normal;
    }

    pub fn go_home(&mut self) {
        self.form = None;
        self.pending = None;
        self.screen = Screen::Home;
        self.input_mode = InputMode::Normal;
    }

    fn form_key(&mut self, key: crossterm::event::KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        if form.handle_key(key) != FormResponse::SubmitRequested {
            return;
        }
        match form.submit() {
            Ok(tx) => {
                self.status = None;
                self.pending = Some(tx);
                self.input_mode = InputMode::Confirm;
            }
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    fn confirm_submit(&mut self) {
        self.input_mode = InputMode::Normal;
        let Some(tx) = self.pending.take() else {
            return;
        };
        match self.store.append(tx) {
            Ok(()) => {
                let kind = self.form.as_ref().map(|f| f.kind().title()).unwrap_or("Entry");
                self.status = Some(format!("{} saved", kind));
                self.form = None;
                self.screen = Screen::Home;
            }
            Err(e) => {
                log::log(&format!("Append failed: {}", e));
                self.status = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormField;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn test_app() -> (App, std::path::PathBuf) {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("ledger_app_test_{}_{}", std::process::id(), n));
        let store = LedgerStore::open(dir.join("transactions.csv")).unwrap();
        (App::new(store, NaiveTime::from_hms_opt(9, 0, 0)), dir)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.dispatch(Action::FormKey(key(KeyCode::Char(c))));
        }
    }

    #[test]
    fn test_menu_wraps() {
        let (mut app, dir) = test_app();
        app.dispatch(Action::MenuUp);
        assert_eq!(app.menu.selected_item(), Some(&MenuItem::Quit));
        app.dispatch(Action::MenuDown);
        assert_eq!(app.menu.selected_item(), Some(&MenuItem::AddDeposit));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_menu_quit() {
        let (mut app, dir) = test_app();
        app.dispatch(Action::MenuChoose(4));
        assert!(app.should_quit);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_submit_confirm_append() {
        let (mut app, dir) = test_app();
        app.dispatch(Action::MenuChoose(1));
        assert_eq!(app.screen, Screen::Entry);

        type_str(&mut app, "40");
        app.dispatch(Action::FormKey(key(KeyCode::Tab)));
        type_str(&mut app, "Internet");
        app.dispatch(Action::FormKey(key(KeyCode::Tab)));
        type_str(&mut app, "ISP");
        if let Some(form) = app.form.as_mut() {
            form.focus(FormField::Submit);
        }
        app.dispatch(Action::FormKey(key(KeyCode::Enter)));
        assert_eq!(app.input_mode, InputMode::Confirm);
        assert_eq!(app.pending.as_ref().map(|tx| tx.amount), Some(-40.0));

        app.dispatch(Action::ConfirmSubmit);
        assert_eq!(app.screen, Screen::Home);
        assert_eq!(app.store.len(), 1);
        assert_eq!(app.status.as_deref(), Some("Make payment saved"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_submit_error_in_status() {
        let (mut app, dir) = test_app();
        app.dispatch(Action::MenuChoose(0));
        if let Some(form) = app.form.as_mut() {
            form.focus(FormField::Submit);
        }
        app.dispatch(Action::FormKey(key(KeyCode::Enter)));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.status.as_deref(), Some("Invalid money amount"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_cancel_returns_to_form() {
        let (mut app, dir) = test_app();
        app.dispatch(Action::MenuChoose(0));
        type_str(&mut app, "10");
        app.dispatch(Action::FormKey(key(KeyCode::Tab)));
        type_str(&mut app, "Gift");
        app.dispatch(Action::FormKey(key(KeyCode::Tab)));
        type_str(&mut app, "Aunt");
        if let Some(form) = app.form.as_mut() {
            form.focus(FormField::Submit);
        }
        app.dispatch(Action::FormKey(key(KeyCode::Enter)));
        app.dispatch(Action::CancelSubmit);
        assert_eq!(app.screen, Screen::Entry);
        assert!(app.pending.is_none());
        assert!(app.store.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_ledger_filter_and_order() {
        let (mut app, dir) = test_app();
        let at = |d: u32| {
            chrono::NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
        };
        app.store.append(Transaction::new(at(1), "Pay", "Work", 100.0)).unwrap();
        app.store.append(Transaction::new(at(3), "Food", "Shop", -20.0)).unwrap();
        app.store.append(Transaction::new(at(2), "Refund", "Shop", 5.0)).unwrap();

        app.dispatch(Action::MenuChoose(2));
        let days: Vec<String> = app.ledger_view.rows.iter().map(|tx| tx.description.clone()).collect();
        assert_eq!(days, vec!["Food", "Refund", "Pay"]);
        assert_eq!(app.ledger_view.total(), 85.0);

        app.dispatch(Action::CycleFilter);
        assert_eq!(app.ledger_view.filter, LedgerFilter::Deposits);
        assert_eq!(app.ledger_view.rows.len(), 2);
        app.dispatch(Action::CycleFilter);
        assert_eq!(app.ledger_view.rows.len(), 1);
        app.dispatch(Action::CycleFilter);
        assert_eq!(app.ledger_view.filter, LedgerFilter::All);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_reports_menu_and_show() {
        let (mut app, dir) = test_app();
        let at = |y: i32, m: u32, d: u32| {
            chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
        };
        app.store.append(Transaction::new(at(2023, 12, 1), "Rent", "Landlord", -900.0)).unwrap();
        app.store.append(Transaction::new(at(2023, 12, 31), "Gift", "Aunt", 50.0)).unwrap();
        app.store.append(Transaction::new(at(2024, 1, 1), "Pay", "Work", 1200.0)).unwrap();
        app.store.append(Transaction::new(at(2023, 11, 30), "Food", "Shop", -30.0)).unwrap();

        app.dispatch(Action::MenuChoose(3));
        assert_eq!(app.screen, Screen::Reports);
        app.dispatch(Action::ReportDown);
        assert_eq!(app.reports.selected_item(), Some(&Report::PriorMonth));

        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        app.show_report(Report::PriorMonth, today);
        assert_eq!(app.screen, Screen::Ledger);
        let shown: Vec<&str> = app.ledger_view.rows.iter().map(|tx| tx.description.as_str()).collect();
        assert_eq!(shown, vec!["Gift", "Rent"]);
        assert_eq!(app.ledger_view.total(), -850.0);

        // The kind filter narrows within the report
        app.dispatch(Action::CycleFilter);
        assert_eq!(app.ledger_view.rows.len(), 1);

        // Opening the ledger from home drops the report
        app.dispatch(Action::GoHome);
        app.dispatch(Action::MenuChoose(2));
        assert!(app.ledger_view.report.is_none());
        assert_eq!(app.ledger_view.rows.len(), 4);
        let _ = std::fs::remove_dir_all(dir);
    }
}
