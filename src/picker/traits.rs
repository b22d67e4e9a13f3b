//! Picker trait definitions
//!
//! `Interactable` is the capability interface every form widget implements.
//! `ListPicker` is the wrapping cursor used by list screens.

use crossterm::event::KeyEvent;
use ratatui::{buffer::Buffer, layout::{Rect, Size}};

use super::overlay::Overlay;

/// Whether a widget used a key or handed it back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Consumed,
    NotConsumed,
}

impl KeyResult {
    pub fn is_consumed(self) -> bool {
        self == KeyResult::Consumed
    }
}

/// Direction focus arrived from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDirection {
    /// Reached with Tab or a forward move
    Forward,
    /// Reached with Shift+Tab or a backward move
    Backward,
}

/// A widget that receives key events from the host while focused.
///
/// The host owns focus traversal: it calls `focus_gained` / `focus_lost`
/// when focus moves and passes keys to `handle_key` in between. Widgets never
/// own a window; an open popup is reported through `overlay` and drawn by
/// the host after the main frame.
pub trait Interactable {
    /// Handle a key press, reporting whether it was used.
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult;

    /// Fixed cell size the widget wants.
    fn preferred_size(&self) -> Size;

    /// Draw the widget into `area` of `buf`.
    fn draw(&self, area: Rect, buf: &mut Buffer, focused: bool);

    /// The popup to composite over the widget, if one is open.
    fn overlay(&self) -> Option<Overlay> {
        None
    }

    fn is_focused(&self) -> bool;

    fn focus_gained(&mut self, direction: FocusDirection);

    /// Collapse transient state: close popups and commit typed input.
    fn focus_lost(&mut self);
}

/// Wrapping cursor over a slice, used by the home menu and the ledger list.
///
/// Implementors expose their rows and a stored index; stepping wraps at
/// both ends.
pub trait ListPicker {
    /// The type of items in the list
    type Item;

    /// Get the list of items
    fn items(&self) -> &[Self::Item];

    /// Get the current selected index
    fn selected_index(&self) -> usize;

    /// Set the selected index
    fn set_selected_index(&mut self, index: usize);

    /// Get the number of items
    fn len(&self) -> usize {
        self.items().len()
    }

    /// Check if the list is empty
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Select the next item (wraps around)
    fn select_next(&mut self) {
        if !self.is_empty() {
            let next = (self.selected_index() + 1) % self.len();
            self.set_selected_index(next);
        }
    }

    /// Select the previous item (wraps around)
    fn select_prev(&mut self) {
        if !self.is_empty() {
            let prev = self.selected_index()
                .checked_sub(1)
                .unwrap_or(self.len() - 1);
            self.set_selected_index(prev);
        }
    }

    /// Get the currently selected item
    fn selected_item(&self) -> Option<&Self::Item> {
        self.items().get(self.selected_index())
    }

    /// Reset selection to the first item
    fn reset_selection(&mut self) {
        self.set_selected_index(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rows {
        rows: Vec<&'static str>,
        selected: usize,
    }

    impl ListPicker for Rows {
        type Item = &'static str;

        fn items(&self) -> &[&'static str] {
            &self.rows
        }

        fn selected_index(&self) -> usize {
            self.selected
        }

        fn set_selected_index(&mut self, index: usize) {
            self.selected = index;
        }
    }

    #[test]
    fn test_select_wraps_both_ways() {
        let mut rows = Rows { rows: vec!["a", "b", "c"], selected: 0 };
        rows.select_prev();
        assert_eq!(rows.selected_item(), Some(&"c"));
        rows.select_next();
        assert_eq!(rows.selected_item(), Some(&"a"));
    }

    #[test]
    fn test_empty_list_is_inert() {
        let mut rows = Rows { rows: vec![], selected: 0 };
        rows.select_next();
        rows.select_prev();
        assert_eq!(rows.selected_index(), 0);
        assert!(rows.selected_item().is_none());
    }

    #[test]
    fn test_key_result() {
        assert!(KeyResult::Consumed.is_consumed());
        assert!(!KeyResult::NotConsumed.is_consumed());
    }
}
