//! Single-line text entry.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::{Rect, Size}, style::{Modifier, Style}};

use super::listeners::Listeners;
use super::traits::{FocusDirection, Interactable, KeyResult};
use crate::tui::theme::*;

#[derive(Debug)]
pub struct TextField {
    text: String,
    /// Cursor position in chars, not bytes
    cursor: usize,
    width: u16,
    bad: bool,
    focused: bool,
    on_change: Listeners<String>,
}

impl TextField {
    pub fn new(width: u16) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            width,
            bad: false,
            focused: false,
            on_change: Listeners::new(),
        }
    }

    pub fn on_change(&mut self, callback: impl FnMut(&String) + 'static) {
        self.on_change.subscribe(callback);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_bad(&self) -> bool {
        self.bad
    }

    /// Mark the contents invalid; drawn in the error style.
    pub fn set_bad(&mut self, bad: bool) {
        self.bad = bad;
    }

    /// Replace the contents and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
        self.on_change.emit(&self.text);
    }

    /// Edit the contents. Returns the key result and whether the text changed.
    pub fn apply_key(&mut self, key: KeyEvent) -> (KeyResult, bool) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let changed = match key.code {
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char('a') if ctrl => self.move_to(0),
            KeyCode::Char('e') if ctrl => self.move_to(self.char_len()),
            KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => {
                return (KeyResult::NotConsumed, false);
            }
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_to(self.cursor.saturating_sub(1)),
            KeyCode::Right => self.move_to((self.cursor + 1).min(self.char_len())),
            KeyCode::Home => self.move_to(0),
            KeyCode::End => self.move_to(self.char_len()),
            _ => return (KeyResult::NotConsumed, false),
        };
        if changed {
            self.on_change.emit(&self.text);
        }
        (KeyResult::Consumed, changed)
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn insert(&mut self, c: char) -> bool {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
        true
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.text.remove(at);
        true
    }

    fn move_to(&mut self, cursor: usize) -> bool {
        self.cursor = cursor;
        false
    }

    /// Delete back to the start of the previous word.
    fn delete_word_back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        let (start, end) = (self.byte_index(pos), self.byte_index(self.cursor));
        self.text.drain(start..end);
        self.cursor = pos;
        true
    }

    /// Visible slice of the text and the cursor column within it.
    fn visible(&self, width: usize) -> (String, usize) {
        if width == 0 {
            return (String::new(), 0);
        }
        let skip = (self.cursor + 1).saturating_sub(width);
        let shown: String = self.text.chars().skip(skip).take(width).collect();
        (shown, self.cursor - skip)
    }
}

impl Interactable for TextField {
    fn handle_key(&mut self, key: KeyEvent) -> KeyResult {
        self.apply_key(key).0
    }

    fn preferred_size(&self) -> Size {
        Size::new(self.width, 1)
    }

    fn draw(&self, area: Rect, buf: &mut Buffer, focused: bool) {
        let base = match (self.bad, focused) {
            (true, _) => Style::new().fg(TEXT_WHITE).bg(FIELD_ERROR),
            (false, true) => Style::new().fg(TEXT_BLACK).bg(FIELD_PRELIGHT),
            (false, false) => Style::new().fg(TEXT_WHITE).bg(FIELD_BG),
        };
        buf.set_style(area, base);
        let (shown, cursor_col) = self.visible(area.width as usize);
        buf.set_stringn(area.x, area.y, &shown, area.width as usize, base);
        if focused && (cursor_col as u16) < area.width {
            let cell = &mut buf[(area.x + cursor_col as u16, area.y)];
            cell.set_style(Style::new().add_modifier(Modifier::REVERSED));
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut field = TextField::new(20);
        type_str(&mut field, "cofee");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Left));
        type_str(&mut field, "f");
        assert_eq!(field.text(), "coffee");
        assert_eq!(field.cursor(), 4);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut field = TextField::new(20);
        type_str(&mut field, "abc");
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.text(), "ab");
        field.handle_key(key(KeyCode::Home));
        field.handle_key(key(KeyCode::Delete));
        assert_eq!(field.text(), "b");
        assert_eq!(field.apply_key(key(KeyCode::Backspace)), (KeyResult::Consumed, false));
    }

    #[test]
    fn test_multibyte_chars() {
        let mut field = TextField::new(20);
        type_str(&mut field, "café");
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.text(), "caf");
        type_str(&mut field, "é!");
        field.handle_key(key(KeyCode::Left));
        field.handle_key(key(KeyCode::Backspace));
        assert_eq!(field.text(), "caf!");
    }

    #[test]
    fn test_delete_word_back() {
        let mut field = TextField::new(20);
        type_str(&mut field, "corner store  ");
        field.handle_key(ctrl('w'));
        assert_eq!(field.text(), "corner ");
        assert_eq!(field.cursor(), 7);
    }

    #[test]
    fn test_traversal_keys_not_consumed() {
        let mut field = TextField::new(20);
        assert_eq!(field.handle_key(key(KeyCode::Tab)), KeyResult::NotConsumed);
        assert_eq!(field.handle_key(key(KeyCode::Down)), KeyResult::NotConsumed);
        assert_eq!(field.handle_key(key(KeyCode::Enter)), KeyResult::NotConsumed);
        assert_eq!(field.handle_key(ctrl('x')), KeyResult::NotConsumed);
    }

    #[test]
    fn test_change_listener() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(vec![]));
        let mut field = TextField::new(20);
        let sink = seen.clone();
        field.on_change(move |t| sink.borrow_mut().push(t.clone()));
        type_str(&mut field, "hi");
        field.handle_key(key(KeyCode::Left));
        assert_eq!(*seen.borrow(), vec!["h".to_string(), "hi".to_string()]);
    }

    #[test]
    fn test_draw_scrolls_to_cursor() {
        let mut field = TextField::new(4);
        type_str(&mut field, "abcdef");
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);
        field.draw(area, &mut buf, false);
        let text: String = (0..4).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(text, "def ");
    }

    #[test]
    fn test_draw_into_zero_width_area() {
        let mut field = TextField::new(4);
        type_str(&mut field, "abc");
        assert_eq!(field.visible(0), (String::new(), 0));

        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        field.draw(Rect::new(2, 0, 0, 1), &mut buf, true);
        assert_eq!(buf[(2, 0)].symbol(), " ");
    }
}
