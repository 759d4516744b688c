#![forbid(unsafe_code)]

//! Tab navigation.
//!
//! Forward tab scans the focused widget's later siblings, then ascends
//! and scans after each ancestor, then the top-level list after the
//! ancestor's position, and finally wraps from the start. A focused
//! parent scans into its own children first, which is how focus walks
//! down into nested trees one tab at a time.
//!
//! Backward tab is the mirror, with one deliberate asymmetry: the wrap
//! does not descend to the last child of the deepest branch, it scans
//! the top-level lists from the end.

use vintui_core::{KeyCode, KeyEvent};

use crate::tree::Tui;
use crate::widget::WidgetId;

impl Tui {
    /// Route Tab / Shift-Tab to the matching walk.
    pub fn tab_event(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab => self.tab_forward(),
            KeyCode::BackTab => self.tab_backward(),
            _ => false,
        }
    }

    /// Move focus to the next visible interactable widget.
    pub fn tab_forward(&mut self) -> bool {
        let Some(focused) = self.focus else {
            return false;
        };

        // A focused parent tabs into its own children first.
        let focused_is_parent = self
            .widget(focused)
            .is_some_and(|w| w.as_parent().is_some());

        let (mut parent, mut window) = if focused_is_parent {
            (Some(focused), None)
        } else {
            (self.widget(focused).and_then(|w| w.parent), Some(focused))
        };

        while let Some(parent_id) = parent {
            let children = self.children_of(parent_id);

            let start = match window {
                None => 0,
                Some(w) => match children.iter().position(|c| *c == w) {
                    Some(index) => index + 1,
                    None => 0,
                },
            };

            if start < children.len() {
                if let Some(target) = scan_forward(self, &children[start..]) {
                    self.set_focus(target);
                    return true;
                }
            }

            window = Some(parent_id);
            parent = self.widget(parent_id).and_then(|w| w.parent);
        }

        let Some(window) = window else {
            return false;
        };

        // Continue through the top-level list holding the subtree.
        let windows = match self.menu {
            Some(menu) => match self.menu(menu) {
                Some(menu) => menu.windows.clone(),
                None => return false,
            },
            None => self.windows.clone(),
        };

        let Some(index) = windows.iter().position(|w| *w == window) else {
            return false;
        };

        if index + 1 < windows.len() {
            if let Some(target) = scan_forward(self, &windows[index + 1..]) {
                self.set_focus(target);
                return true;
            }
        }

        // Wrap: root windows from the start, then the menu's.
        let windows = self.windows.clone();
        if let Some(target) = scan_forward(self, &windows) {
            self.set_focus(target);
            return true;
        }

        if let Some(menu) = self.menu {
            let windows = self
                .menu(menu)
                .map(|m| m.windows.clone())
                .unwrap_or_default();

            if let Some(target) = scan_forward(self, &windows) {
                self.set_focus(target);
                return true;
            }
        }

        false
    }

    /// Move focus to the previous visible interactable widget.
    pub fn tab_backward(&mut self) -> bool {
        let Some(focused) = self.focus else {
            return false;
        };

        let mut window = focused;
        let mut parent = self.widget(focused).and_then(|w| w.parent);

        while let Some(parent_id) = parent {
            let children = self.children_of(parent_id);

            let Some(index) = children.iter().position(|c| *c == window) else {
                return false;
            };

            if let Some(target) = scan_backward(self, &children[..index]) {
                self.set_focus(target);
                return true;
            }

            window = parent_id;
            parent = self.widget(parent_id).and_then(|w| w.parent);
        }

        let windows = match self.menu {
            Some(menu) => match self.menu(menu) {
                Some(menu) => menu.windows.clone(),
                None => return false,
            },
            None => self.windows.clone(),
        };

        let Some(index) = windows.iter().position(|w| *w == window) else {
            return false;
        };

        if let Some(target) = scan_backward(self, &windows[..index]) {
            self.set_focus(target);
            return true;
        }

        // Wrap from the end of the top-level lists. Deliberately does not
        // descend into the deepest last branch.
        let windows = self.windows.clone();
        if let Some(target) = scan_backward(self, &windows) {
            self.set_focus(target);
            return true;
        }

        if let Some(menu) = self.menu {
            let windows = self
                .menu(menu)
                .map(|m| m.windows.clone())
                .unwrap_or_default();

            if let Some(target) = scan_backward(self, &windows) {
                self.set_focus(target);
                return true;
            }
        }

        false
    }
}

fn is_tab_stop(tui: &Tui, id: WidgetId) -> bool {
    tui.widget(id)
        .is_some_and(|w| w.frame.visible && w.is_interact)
}

fn scan_forward(tui: &Tui, windows: &[WidgetId]) -> Option<WidgetId> {
    windows.iter().copied().find(|id| is_tab_stop(tui, *id))
}

fn scan_backward(tui: &Tui, windows: &[WidgetId]) -> Option<WidgetId> {
    windows.iter().rev().copied().find(|id| is_tab_stop(tui, *id))
}
