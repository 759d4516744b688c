#![forbid(unsafe_code)]

//! Selection over an ordered set of widgets.
//!
//! `List` tracks a selected index over widget ids and moves it with the
//! arrow keys (or Tab/Shift-Tab), skipping items that did not survive
//! layout. It owns no widgets; it is bookkeeping over ids.

use vintui_core::{KeyCode, KeyEvent};

use crate::tree::Tui;
use crate::widget::WidgetId;

/// A navigable selection over widget ids.
pub struct List {
    items: Vec<WidgetId>,
    index: usize,
    is_vertical: bool,
}

impl List {
    /// An empty list; `is_vertical` picks which arrow pair navigates.
    #[must_use]
    pub fn new(is_vertical: bool) -> Self {
        Self {
            items: Vec::new(),
            index: 0,
            is_vertical,
        }
    }

    /// Append an item.
    pub fn add(&mut self, item: WidgetId) {
        self.items.push(item);
    }

    /// The items in order.
    #[must_use]
    pub fn items(&self) -> &[WidgetId] {
        &self.items
    }

    /// The selected index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The selected item, if the list has any.
    #[must_use]
    pub fn selected(&self) -> Option<WidgetId> {
        self.items.get(self.index).copied()
    }

    /// Handle a navigation key, moving the selection over visible items.
    ///
    /// Vertical lists navigate with Up/Down, horizontal with Left/Right;
    /// Tab and Shift-Tab work in both. Returns whether the selection moved.
    pub fn handle_key(&mut self, tui: &Tui, key: KeyEvent) -> bool {
        let (forward, backward) = if self.is_vertical {
            (KeyCode::Down, KeyCode::Up)
        } else {
            (KeyCode::Right, KeyCode::Left)
        };

        if key.code == forward || key.code == KeyCode::Tab {
            self.scroll_forward(tui)
        } else if key.code == backward || key.code == KeyCode::BackTab {
            self.scroll_backward(tui)
        } else {
            false
        }
    }

    /// Move the selection off an invisible item to the nearest visible
    /// one, looking forward first.
    ///
    /// Returns whether the selection moved.
    pub fn reselect_visible(&mut self, tui: &Tui) -> bool {
        let Some(current) = self.selected() else {
            return false;
        };

        if is_visible(tui, current) {
            return false;
        }

        for index in self.index + 1..self.items.len() {
            if is_visible(tui, self.items[index]) {
                self.index = index;
                return true;
            }
        }

        for index in (0..self.index).rev() {
            if is_visible(tui, self.items[index]) {
                self.index = index;
                return true;
            }
        }

        false
    }

    fn scroll_forward(&mut self, tui: &Tui) -> bool {
        for index in self.index + 1..self.items.len() {
            if is_visible(tui, self.items[index]) {
                self.index = index;
                return true;
            }
        }

        false
    }

    fn scroll_backward(&mut self, tui: &Tui) -> bool {
        for index in (0..self.index).rev() {
            if is_visible(tui, self.items[index]) {
                self.index = index;
                return true;
            }
        }

        false
    }
}

fn is_visible(tui: &Tui, id: WidgetId) -> bool {
    tui.widget(id).is_some_and(|w| w.is_visible())
}
