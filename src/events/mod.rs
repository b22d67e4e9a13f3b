//! Event handling module.
//!
//! Keyboard events are classified here and turned into `Action`s that the
//! `App` applies. The picker widgets reuse the key classification helpers.

mod action;
mod handler;
pub mod keyboard;

pub use action::Action;
pub use handler::EventHandler;
