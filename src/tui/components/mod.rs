//! UI components for the TUI.
//!
//! # Component Organization
//!
//! - `home_menu` - Menu and balance
//! - `entry_form` - Deposit/payment form with its pickers
//! - `picker_overlay` - Spinner popup of the focused picker
//! - `ledger_view` - Filtered transaction list
//! - `report_menu` - Date-range report summaries
//! - `help_popup` - Help overlay with keybindings
//! - `confirm_popup` - Submit confirmation

mod confirm_popup;
mod entry_form;
mod help_popup;
mod home_menu;
mod ledger_view;
mod picker_overlay;
mod report_menu;

// Re-export all render functions for use in ui.rs
pub use confirm_popup::{centered, render_confirm_popup};
pub use entry_form::render_entry_form;
pub use help_popup::render_help_popup;
pub use home_menu::render_home_menu;
pub use ledger_view::render_ledger_view;
pub use picker_overlay::render_picker_overlay;
pub use report_menu::render_report_menu;
