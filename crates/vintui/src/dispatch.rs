#![forbid(unsafe_code)]

//! Key dispatch.
//!
//! A key bubbles: the focused widget sees it first, then each ancestor in
//! turn, then the active menu, then the root. The first hook returning
//! `true` consumes it.

use vintui_core::KeyEvent;

use crate::tree::Tui;

impl Tui {
    /// Offer a key along the focus chain.
    ///
    /// Returns whether anything consumed it.
    pub fn dispatch_key(&mut self, key: KeyEvent) -> bool {
        vintui_core::trace!(?key, focus = ?self.focus, "dispatch");

        let mut current = self.focus;

        while let Some(id) = current {
            if self.fire_widget_key(id, key) {
                return true;
            }

            current = self.widget(id).and_then(|w| w.parent);
        }

        if let Some(menu) = self.menu {
            if self.fire_menu_key(menu, key) {
                return true;
            }
        }

        self.fire_tui_key(key)
    }
}
