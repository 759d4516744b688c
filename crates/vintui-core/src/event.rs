#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! All events derive `Clone`, `PartialEq`, and `Eq` for use in tests and
//! pattern matching. Crossterm delivers raw terminal input; this module
//! maps it onto the toolkit's small, stable event vocabulary.

use bitflags::bitflags;
use crossterm::event as cte;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// New terminal width in columns.
        w: i32,
        /// New terminal height in rows.
        h: i32,
    },
}

impl Event {
    /// Convert a crossterm event into a vintui [`Event`].
    ///
    /// Returns `None` for event kinds the toolkit does not handle
    /// (mouse, paste, focus, key release).
    #[must_use]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        match event {
            cte::Event::Key(key) if key.kind != cte::KeyEventKind::Release => {
                KeyEvent::from_crossterm(key).map(Event::Key)
            }
            cte::Event::Resize(w, h) => Some(Event::Resize {
                w: i32::from(w),
                h: i32::from(h),
            }),
            _ => None,
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if this is a specific unmodified character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c) && self.modifiers.is_empty()
    }

    /// Check if this is Ctrl plus a character.
    #[must_use]
    pub fn is_ctrl(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
            && self.modifiers.contains(Modifiers::CTRL)
    }

    /// The printable ASCII character of this event, if it is one.
    ///
    /// Control-modified keys do not count as printable input.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        if self.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT) {
            return None;
        }

        match self.code {
            KeyCode::Char(c) if (' '..='~').contains(&c) => Some(c),
            _ => None,
        }
    }

    fn from_crossterm(key: cte::KeyEvent) -> Option<Self> {
        let code = match key.code {
            cte::KeyCode::Char(c) => KeyCode::Char(c),
            cte::KeyCode::Enter => KeyCode::Enter,
            cte::KeyCode::Tab => KeyCode::Tab,
            cte::KeyCode::BackTab => KeyCode::BackTab,
            cte::KeyCode::Backspace => KeyCode::Backspace,
            cte::KeyCode::Esc => KeyCode::Esc,
            cte::KeyCode::Left => KeyCode::Left,
            cte::KeyCode::Right => KeyCode::Right,
            cte::KeyCode::Up => KeyCode::Up,
            cte::KeyCode::Down => KeyCode::Down,
            _ => return None,
        };

        let mut modifiers = Modifiers::NONE;

        if key.modifiers.contains(cte::KeyModifiers::CONTROL) {
            modifiers |= Modifiers::CTRL;
        }

        if key.modifiers.contains(cte::KeyModifiers::ALT) {
            modifiers |= Modifiers::ALT;
        }

        if key.modifiers.contains(cte::KeyModifiers::SHIFT) {
            modifiers |= Modifiers::SHIFT;
        }

        Some(Self { code, modifiers })
    }
}

/// A key code.
///
/// Shift-Tab arrives as its own code (`BackTab`), matching how terminals
/// report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key.
    Char(char),
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Shift-Tab.
    BackTab,
    /// Backspace.
    Backspace,
    /// Escape.
    Esc,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE = 0;
        /// Control.
        const CTRL = 1 << 0;
        /// Alt / Meta.
        const ALT = 1 << 1;
        /// Shift.
        const SHIFT = 1 << 2;
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, KeyCode, KeyEvent, Modifiers};
    use crossterm::event as cte;

    #[test]
    fn char_key_maps() {
        let event = cte::Event::Key(cte::KeyEvent::new(
            cte::KeyCode::Char('a'),
            cte::KeyModifiers::NONE,
        ));
        assert_eq!(
            Event::from_crossterm(event),
            Some(Event::Key(KeyEvent::new(KeyCode::Char('a'))))
        );
    }

    #[test]
    fn ctrl_char_maps() {
        let event = cte::Event::Key(cte::KeyEvent::new(
            cte::KeyCode::Char('c'),
            cte::KeyModifiers::CONTROL,
        ));
        let Some(Event::Key(key)) = Event::from_crossterm(event) else {
            panic!("expected key event");
        };
        assert!(key.is_ctrl('c'));
        assert!(!key.is_char('c'));
    }

    #[test]
    fn resize_maps() {
        let event = cte::Event::Resize(80, 24);
        assert_eq!(Event::from_crossterm(event), Some(Event::Resize { w: 80, h: 24 }));
    }

    #[test]
    fn release_is_dropped() {
        let key = cte::KeyEvent {
            code: cte::KeyCode::Char('x'),
            modifiers: cte::KeyModifiers::NONE,
            kind: cte::KeyEventKind::Release,
            state: cte::KeyEventState::NONE,
        };
        assert_eq!(Event::from_crossterm(cte::Event::Key(key)), None);
    }

    #[test]
    fn printable_range() {
        assert_eq!(KeyEvent::new(KeyCode::Char(' ')).printable(), Some(' '));
        assert_eq!(KeyEvent::new(KeyCode::Char('~')).printable(), Some('~'));
        assert_eq!(KeyEvent::new(KeyCode::Enter).printable(), None);
        assert_eq!(
            KeyEvent::new(KeyCode::Char('a'))
                .with_modifiers(Modifiers::CTRL)
                .printable(),
            None
        );
    }
}
