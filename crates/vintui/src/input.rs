#![forbid(unsafe_code)]

//! Editable line buffer for a text widget.
//!
//! `Input` owns the edited string and mirrors a *visible* rendition into
//! its text widget after every change: the part before the caret, an
//! inline cursor escape, the rest, and a trailing space for the caret to
//! sit on when it is at the end. Caret movement only responds while the
//! owning widget is focused.

use vintui_core::{KeyCode, KeyEvent};

use crate::tree::Tui;
use crate::widget::WidgetId;

/// The inline escape that parks the terminal cursor.
const CURSOR_MARK: &str = "\x1b[5m";

/// An editable single-line buffer bound to a text widget.
pub struct Input {
    buffer: String,
    capacity: usize,
    cursor: usize,
    scroll: usize,
    window: WidgetId,
}

impl Input {
    /// Bind an empty buffer of at most `capacity` characters to a text
    /// widget, and render the initial (empty) state into it.
    pub fn new(tui: &mut Tui, window: WidgetId, capacity: usize) -> Self {
        let input = Self {
            buffer: String::new(),
            capacity,
            cursor: 0,
            scroll: 0,
            window,
        };

        input.sync(tui);

        input
    }

    /// The edited content.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.buffer
    }

    /// The caret position in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The owning text widget.
    #[must_use]
    pub fn window(&self) -> WidgetId {
        self.window
    }

    /// Handle an editing key.
    ///
    /// Arrows move the caret, backspace deletes, printable ASCII inserts.
    /// Returns whether the key changed anything.
    pub fn handle_key(&mut self, tui: &mut Tui, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Right => self.caret_right(tui),
            KeyCode::Left => self.caret_left(tui),
            KeyCode::Backspace => self.delete(tui),
            _ => match key.printable() {
                Some(symbol) => self.insert(tui, symbol),
                None => false,
            },
        }
    }

    /// Empty the buffer and reset the caret.
    pub fn clear(&mut self, tui: &mut Tui) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
        self.sync(tui);
    }

    fn insert(&mut self, tui: &mut Tui, symbol: char) -> bool {
        if self.buffer.len() >= self.capacity {
            return false;
        }

        self.buffer.insert(self.cursor, symbol);
        self.cursor = (self.cursor + 1).min(self.buffer.len());

        self.sync(tui);

        true
    }

    fn delete(&mut self, tui: &mut Tui) -> bool {
        if self.cursor == 0 || self.buffer.is_empty() {
            return false;
        }

        self.buffer.remove(self.cursor - 1);
        self.cursor = (self.cursor - 1).min(self.buffer.len());

        self.sync(tui);

        true
    }

    fn caret_right(&mut self, tui: &mut Tui) -> bool {
        if !self.is_focused(tui) {
            return false;
        }

        if self.cursor >= self.buffer.len() {
            return false;
        }

        self.cursor += 1;
        self.sync(tui);

        true
    }

    fn caret_left(&mut self, tui: &mut Tui) -> bool {
        if !self.is_focused(tui) {
            return false;
        }

        if self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;

        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        }

        self.sync(tui);

        true
    }

    fn is_focused(&self, tui: &Tui) -> bool {
        tui.focus() == Some(self.window)
    }

    /// Push the visible string into the text widget.
    pub fn sync(&self, tui: &mut Tui) {
        let focused = self.is_focused(tui);

        let mut visible = String::with_capacity(self.buffer.len() + CURSOR_MARK.len() + 1);
        visible.push_str(&self.buffer[self.scroll..self.cursor]);
        visible.push_str(CURSOR_MARK);
        visible.push_str(&self.buffer[self.cursor..]);

        // Room for the caret past the last character.
        if self.cursor == self.buffer.len() && focused {
            visible.push(' ');
        }

        if let Some(text) = tui.widget_mut(self.window).and_then(|w| w.as_text_mut()) {
            text.set_string(visible);
        }
    }
}
