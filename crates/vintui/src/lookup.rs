#![forbid(unsafe_code)]

//! Name-path lookup.
//!
//! A search string is a space-separated token sequence walked left to
//! right. A name token matches a widget among the current scope's
//! windows or children; the token `.` steps to the parent, falling back
//! to the widget's menu scope and then the root scope when there is no
//! parent to step to.

use crate::tree::{MenuId, Tui};
use crate::widget::{WidgetId, WidgetKind};

fn split_first(search: &str) -> (&str, Option<&str>) {
    match search.find(' ') {
        Some(index) => (&search[..index], Some(&search[index + 1..])),
        None => (search, None),
    }
}

impl Tui {
    /// Resolve a path among the root's top-level widgets.
    #[must_use]
    pub fn find(&self, search: &str) -> Option<WidgetId> {
        let (token, _) = split_first(search);

        if token == "." {
            return None;
        }

        self.find_in_windows(&self.windows, search)
    }

    /// Resolve a path among a menu's top-level widgets.
    #[must_use]
    pub fn find_in_menu(&self, menu: MenuId, search: &str) -> Option<WidgetId> {
        let (token, _) = split_first(search);

        if token == "." {
            return None;
        }

        let windows = self.menu(menu)?.windows.clone();
        self.find_in_windows(&windows, search)
    }

    /// Resolve a path starting at a widget.
    ///
    /// An empty path resolves to the widget itself. Name tokens match
    /// among a parent widget's children; `.` steps out.
    #[must_use]
    pub fn find_from(&self, base: WidgetId, search: &str) -> Option<WidgetId> {
        if search.is_empty() {
            return Some(base);
        }

        let (token, rest) = split_first(search);

        if token == "." {
            let widget = self.widget(base)?;

            return match rest {
                None => widget.parent,
                Some(rest) => {
                    if let Some(parent) = widget.parent {
                        self.find_from(parent, rest)
                    } else if let Some(menu) = widget.menu {
                        self.find_in_menu(menu, rest)
                    } else {
                        self.find(rest)
                    }
                }
            };
        }

        match &self.widget(base)?.kind {
            WidgetKind::Parent(parent) => {
                let children = parent.children.clone();
                self.find_in_windows(&children, search)
            }
            _ => None,
        }
    }

    /// Resolve a path from a widget, requiring a text widget.
    #[must_use]
    pub fn find_text_from(&self, base: WidgetId, search: &str) -> Option<WidgetId> {
        self.find_from(base, search)
            .filter(|id| self.widget(*id).is_some_and(|w| w.as_text().is_some()))
    }

    /// Resolve a path from a widget, requiring a parent widget.
    #[must_use]
    pub fn find_parent_from(&self, base: WidgetId, search: &str) -> Option<WidgetId> {
        self.find_from(base, search)
            .filter(|id| self.widget(*id).is_some_and(|w| w.as_parent().is_some()))
    }

    /// Resolve a path from a widget, requiring a grid widget.
    #[must_use]
    pub fn find_grid_from(&self, base: WidgetId, search: &str) -> Option<WidgetId> {
        self.find_from(base, search)
            .filter(|id| self.widget(*id).is_some_and(|w| w.as_grid().is_some()))
    }

    /// Resolve a path in a menu and focus the result.
    ///
    /// Returns whether a widget was found.
    pub fn focus_by_path(&mut self, menu: MenuId, search: &str) -> bool {
        let Some(id) = self.find_in_menu(menu, search) else {
            return false;
        };

        self.set_focus(id);
        true
    }

    fn find_in_windows(&self, windows: &[WidgetId], search: &str) -> Option<WidgetId> {
        let (token, rest) = split_first(search);

        for id in windows {
            let widget = self.widget(*id)?;

            if widget.name.as_deref() == Some(token) {
                return match rest {
                    None => Some(*id),
                    Some(rest) => self.find_from(*id, rest),
                };
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::tree::{Anchor, MenuConfig, Tui, TuiConfig};
    use crate::widget::{ParentConfig, TextConfig};

    fn named_parent(name: &str) -> ParentConfig {
        ParentConfig {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    fn named_text(name: &str) -> TextConfig {
        TextConfig {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn nested_path_resolves() {
        let mut tui = Tui::new(TuiConfig::default());

        let outer = tui.add_parent(Anchor::Root, named_parent("outer")).unwrap();
        let inner = tui
            .add_parent(Anchor::Child(outer), named_parent("inner"))
            .unwrap();
        let label = tui.add_text(Anchor::Child(inner), named_text("label")).unwrap();

        assert_eq!(tui.find("outer"), Some(outer));
        assert_eq!(tui.find("outer inner"), Some(inner));
        assert_eq!(tui.find("outer inner label"), Some(label));
        assert_eq!(tui.find("outer missing"), None);
    }

    #[test]
    fn dot_steps_to_parent() {
        let mut tui = Tui::new(TuiConfig::default());

        let outer = tui.add_parent(Anchor::Root, named_parent("outer")).unwrap();
        let inner = tui
            .add_parent(Anchor::Child(outer), named_parent("inner"))
            .unwrap();
        let label = tui.add_text(Anchor::Child(inner), named_text("label")).unwrap();
        let sibling = tui
            .add_text(Anchor::Child(inner), named_text("sibling"))
            .unwrap();

        assert_eq!(tui.find_from(label, "."), Some(inner));
        assert_eq!(tui.find_from(label, ". ."), Some(outer));
        assert_eq!(tui.find_from(label, ". sibling"), Some(sibling));
    }

    #[test]
    fn dot_from_menu_window_searches_menu() {
        let mut tui = Tui::new(TuiConfig::default());
        let menu = tui.add_menu(MenuConfig::default());

        let first = tui.add_parent(Anchor::Menu(menu), named_parent("first")).unwrap();
        let second = tui.add_text(Anchor::Menu(menu), named_text("second")).unwrap();

        // Stepping out of a top-level menu widget searches the menu scope.
        assert_eq!(tui.find_from(first, ". second"), Some(second));
        assert_eq!(tui.find_in_menu(menu, "first"), Some(first));
    }

    #[test]
    fn leading_dot_at_root_fails() {
        let mut tui = Tui::new(TuiConfig::default());
        tui.add_parent(Anchor::Root, named_parent("outer")).unwrap();

        assert_eq!(tui.find(". outer"), None);
    }

    #[test]
    fn typed_lookups_check_variant() {
        let mut tui = Tui::new(TuiConfig::default());

        let outer = tui.add_parent(Anchor::Root, named_parent("outer")).unwrap();
        tui.add_text(Anchor::Child(outer), named_text("label")).unwrap();

        assert!(tui.find_text_from(outer, "label").is_some());
        assert!(tui.find_parent_from(outer, "label").is_none());
        assert!(tui.find_grid_from(outer, "label").is_none());
    }

    #[test]
    fn name_match_is_exact() {
        let mut tui = Tui::new(TuiConfig::default());
        tui.add_text(Anchor::Root, named_text("button")).unwrap();

        assert_eq!(tui.find("butt"), None);
        assert_eq!(tui.find("buttons"), None);
    }

    #[test]
    fn focus_by_path_sets_focus() {
        let mut tui = Tui::new(TuiConfig::default());
        let menu = tui.add_menu(MenuConfig::default());

        let button = tui
            .add_text(
                Anchor::Menu(menu),
                TextConfig {
                    name: Some("ok".into()),
                    is_interact: true,
                    ..Default::default()
                },
            )
            .unwrap();

        assert!(tui.focus_by_path(menu, "ok"));
        assert_eq!(tui.focus(), Some(button));
        assert!(!tui.focus_by_path(menu, "missing"));
    }
}
