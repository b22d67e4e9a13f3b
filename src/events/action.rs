//! Action enum for decoupling input handling from state changes.
//!
//! Actions represent user intents; `App::dispatch` applies them.

use crossterm::event::KeyEvent;

/// Actions that can be dispatched from event handlers.
#[derive(Debug, Clone)]
pub enum Action {
    // === Application ===
    /// Quit the application
    Quit,
    /// Return to the home menu
    GoHome,

    // === Help ===
    OpenHelp,
    CloseHelp,

    // === Home menu ===
    MenuUp,
    MenuDown,
    /// Activate the highlighted entry
    MenuSelect,
    /// Activate an entry by index (1-5 shortcuts)
    MenuChoose(usize),

    // === Entry form ===
    /// Key routed to the focused form widget
    FormKey(KeyEvent),
    /// Append the pending row to the ledger
    ConfirmSubmit,
    /// Drop the pending row and return to the form
    CancelSubmit,

    // === Reports ===
    ReportUp,
    ReportDown,
    /// Open the ledger narrowed to the highlighted report
    ShowReport,

    // === Ledger view ===
    LedgerUp,
    LedgerDown,
    /// Cycle All / Deposits / Payments
    CycleFilter,

    // === No-op ===
    /// No action to take
    None,
}
