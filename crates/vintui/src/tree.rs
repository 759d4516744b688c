#![forbid(unsafe_code)]

//! The root of the toolkit: the widget arena, menus, focus, and hooks.
//!
//! [`Tui`] owns every widget in a slot arena and every menu in a list;
//! ids are indices into those stores. Parent/menu back-references are ids
//! too, so the tree has a single owner and no cycles. Hooks are boxed
//! closures stored on their widget; firing one temporarily removes it
//! from its slot, hands the closure the whole tree, and puts it back —
//! a hook gets exclusive access without ever aliasing itself.

use std::any::Any;

use vintui_core::{KeyEvent, Size};
use vintui_style::{ColorPair, PairCache, CACHE_SIZE};

use crate::widget::{
    FrameState, GridConfig, GridWidget, ParentConfig, ParentWidget, TextConfig, TextWidget,
    Widget, WidgetHook, WidgetHooks, WidgetId, WidgetKind,
};

/// Index of a menu in the root's menu list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub(crate) u32);

impl MenuId {
    /// The raw menu slot.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Hook that observes a menu lifecycle point.
pub type MenuHook = Box<dyn FnMut(&mut Tui, MenuId)>;

/// Hook that may consume a key aimed at a menu.
pub type MenuKeyHook = Box<dyn FnMut(&mut Tui, MenuId, KeyEvent) -> bool>;

/// Event hooks of a menu.
#[derive(Default)]
pub struct MenuHooks {
    /// After the menu is created.
    pub init: Option<MenuHook>,
    /// On a key no widget consumed while the menu is active.
    pub key: Option<MenuKeyHook>,
    /// When the menu becomes active.
    pub enter: Option<MenuHook>,
    /// When the menu stops being active.
    pub exit: Option<MenuHook>,
}

/// A named page of top-level widgets.
pub struct Menu {
    /// The menu's name.
    pub name: String,
    /// Declared color; sentinel components inherit from the root.
    pub color: ColorPair,
    pub(crate) frame_color: ColorPair,
    pub(crate) windows: Vec<WidgetId>,
    pub(crate) hooks: MenuHooks,
}

impl Menu {
    /// Top-level widgets of the menu, in insertion order.
    #[must_use]
    pub fn windows(&self) -> &[WidgetId] {
        &self.windows
    }
}

/// Options for a menu.
#[derive(Default)]
pub struct MenuConfig {
    /// The menu's name.
    pub name: String,
    /// Declared color.
    pub color: ColorPair,
    /// Event hooks.
    pub hooks: MenuHooks,
}

/// Hook observing the root.
pub type TuiHook = Box<dyn FnMut(&mut Tui)>;

/// Last-resort key hook on the root.
pub type TuiKeyHook = Box<dyn FnMut(&mut Tui, KeyEvent) -> bool>;

/// Event hooks of the root.
#[derive(Default)]
pub struct TuiHooks {
    /// After the root is created.
    pub init: Option<TuiHook>,
    /// On a key nothing else consumed.
    pub key: Option<TuiKeyHook>,
}

/// Options for the root.
#[derive(Default)]
pub struct TuiConfig {
    /// Global color; the end of every inheritance chain.
    pub color: ColorPair,
    /// Event hooks.
    pub hooks: TuiHooks,
}

/// The terminal cursor the render pass may arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
    /// Whether the cursor should be shown this frame.
    pub is_active: bool,
}

/// Where a new widget is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// A top-level widget outside any menu.
    Root,
    /// A top-level widget of a menu.
    Menu(MenuId),
    /// A child of a parent widget.
    Child(WidgetId),
}

/// The widget tree's root: owns every widget, menu, and shared resource.
pub struct Tui {
    /// Global color; the end of every inheritance chain.
    pub color: ColorPair,

    pub(crate) size: Size,
    pub(crate) arena: Vec<Widget>,
    pub(crate) menus: Vec<Menu>,
    pub(crate) windows: Vec<WidgetId>,
    pub(crate) menu: Option<MenuId>,
    pub(crate) focus: Option<WidgetId>,
    pub(crate) cursor: Cursor,
    pub(crate) hooks: TuiHooks,
    pub(crate) running: bool,
    pub(crate) pairs: PairCache,
}

impl Tui {
    /// Create a root from its options and fire its `init` hook.
    #[must_use]
    pub fn new(config: TuiConfig) -> Self {
        let mut tui = Self {
            color: config.color,
            size: Size::default(),
            arena: Vec::new(),
            menus: Vec::new(),
            windows: Vec::new(),
            menu: None,
            focus: None,
            cursor: Cursor::default(),
            hooks: config.hooks,
            running: false,
            pairs: PairCache::new(CACHE_SIZE),
        };

        if let Some(mut hook) = tui.hooks.init.take() {
            hook(&mut tui);
            if tui.hooks.init.is_none() {
                tui.hooks.init = Some(hook);
            }
        }

        tui
    }

    /// The terminal size layout works against.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the terminal size layout works against.
    ///
    /// The main loop does this from resize events; headless users (tests,
    /// snapshot rendering) call it directly.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// The widget stored under `id`.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.arena.get(id.index())
    }

    /// Mutable widget access.
    #[must_use]
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.arena.get_mut(id.index())
    }

    /// Top-level widgets outside any menu, in insertion order.
    #[must_use]
    pub fn windows(&self) -> &[WidgetId] {
        &self.windows
    }

    /// The menu stored under `id`.
    #[must_use]
    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(id.index())
    }

    /// Mutable menu access.
    #[must_use]
    pub fn menu_mut(&mut self, id: MenuId) -> Option<&mut Menu> {
        self.menus.get_mut(id.index())
    }

    /// The currently active menu.
    #[must_use]
    pub fn active_menu(&self) -> Option<MenuId> {
        self.menu
    }

    /// The currently focused widget.
    #[must_use]
    pub fn focus(&self) -> Option<WidgetId> {
        self.focus
    }

    /// The cursor the last render pass armed.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The color pairs interned so far.
    #[must_use]
    pub fn pairs(&self) -> &PairCache {
        &self.pairs
    }

    /// Whether the main loop keeps going.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask the main loop to exit after the current dispatch.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Create a menu and fire its `init` hook.
    pub fn add_menu(&mut self, config: MenuConfig) -> MenuId {
        let id = MenuId(self.menus.len() as u32);

        self.menus.push(Menu {
            name: config.name,
            color: config.color,
            frame_color: ColorPair::NONE,
            windows: Vec::new(),
            hooks: config.hooks,
        });

        self.fire_menu_hook(id, |hooks| &mut hooks.init);

        id
    }

    /// Create a parent widget at `anchor`.
    ///
    /// Returns `None` when the anchor does not exist or is not a parent.
    pub fn add_parent(&mut self, anchor: Anchor, config: ParentConfig) -> Option<WidgetId> {
        let kind = WidgetKind::Parent(ParentWidget {
            children: Vec::new(),
            is_vertical: config.is_vertical,
            border: config.border,
            has_shadow: config.has_shadow,
            has_padding: config.has_padding,
            has_gap: config.has_gap,
            pos: config.pos,
            align: config.align,
        });

        self.attach(
            anchor,
            kind,
            config.name,
            config.rect,
            config.w_grow,
            config.h_grow,
            config.color,
            config.is_hidden,
            config.is_atomic,
            config.is_interact,
            config.is_contain,
            config.hooks,
            config.data,
        )
    }

    /// Create a text widget at `anchor`.
    pub fn add_text(&mut self, anchor: Anchor, config: TextConfig) -> Option<WidgetId> {
        let kind = WidgetKind::Text(TextWidget::new(
            config.string,
            config.is_secret,
            config.pos,
            config.align,
        ));

        self.attach(
            anchor,
            kind,
            config.name,
            config.rect,
            config.w_grow,
            config.h_grow,
            config.color,
            config.is_hidden,
            config.is_atomic,
            config.is_interact,
            config.is_contain,
            config.hooks,
            config.data,
        )
    }

    /// Create a grid widget at `anchor`.
    ///
    /// Returns `None` for a non-positive grid size, like any other
    /// creation failure.
    pub fn add_grid(&mut self, anchor: Anchor, config: GridConfig) -> Option<WidgetId> {
        let grid = GridWidget::new(config.size).ok()?;

        self.attach(
            anchor,
            WidgetKind::Grid(grid),
            config.name,
            config.rect,
            config.w_grow,
            config.h_grow,
            config.color,
            config.is_hidden,
            config.is_atomic,
            config.is_interact,
            config.is_contain,
            config.hooks,
            config.data,
        )
    }

    /// Move focus to a widget, firing `exit` on the old and `enter` on
    /// the new one. Invisible widgets refuse focus. Focusing a widget
    /// that belongs to a menu makes that menu active.
    pub fn set_focus(&mut self, id: WidgetId) {
        if self.focus == Some(id) {
            return;
        }

        let Some(widget) = self.widget(id) else {
            return;
        };

        if !widget.frame.visible {
            return;
        }

        let last = self.focus;
        self.focus = Some(id);

        if let Some(last) = last {
            self.fire_widget_hook(last, |hooks| &mut hooks.exit);
        }

        self.fire_widget_hook(id, |hooks| &mut hooks.enter);

        if let Some(menu) = self.widget(id).and_then(|w| w.menu) {
            self.menu = Some(menu);
        }
    }

    /// Make a menu active, firing `exit`/`enter` menu hooks.
    ///
    /// When the focused widget belongs to a different menu (or nothing is
    /// focused), focus moves to the menu's first top-level widget.
    pub fn set_menu(&mut self, id: MenuId) {
        if self.menu == Some(id) {
            return;
        }

        if self.menu(id).is_none() {
            return;
        }

        if let Some(old) = self.menu {
            self.fire_menu_hook(old, |hooks| &mut hooks.exit);
        }

        self.menu = Some(id);

        let needs_focus = match self.focus {
            None => true,
            Some(focus) => self
                .widget(focus)
                .and_then(|w| w.menu)
                .is_some_and(|m| m != id),
        };

        if needs_focus {
            if let Some(first) = self.menu(id).and_then(|m| m.windows.first().copied()) {
                self.set_focus(first);
            }
        }

        self.fire_menu_hook(id, |hooks| &mut hooks.enter);
    }

    /// Children of a widget (empty for non-parents).
    pub(crate) fn children_of(&self, id: WidgetId) -> Vec<WidgetId> {
        self.widget(id)
            .and_then(|w| w.as_parent())
            .map(|p| p.children.clone())
            .unwrap_or_default()
    }

    /// Top-level widgets of the active menu (empty without one).
    pub(crate) fn active_menu_windows(&self) -> Vec<WidgetId> {
        self.menu
            .and_then(|id| self.menu(id))
            .map(|menu| menu.windows.clone())
            .unwrap_or_default()
    }

    #[allow(clippy::too_many_arguments)]
    fn attach(
        &mut self,
        anchor: Anchor,
        kind: WidgetKind,
        name: Option<String>,
        rect: Option<vintui_core::Rect>,
        w_grow: bool,
        h_grow: bool,
        color: ColorPair,
        is_hidden: bool,
        is_atomic: bool,
        is_interact: bool,
        is_contain: bool,
        hooks: WidgetHooks,
        data: Option<Box<dyn Any>>,
    ) -> Option<WidgetId> {
        // Validate the anchor before allocating a slot.
        let (parent, menu) = match anchor {
            Anchor::Root => (None, None),
            Anchor::Menu(menu) => {
                self.menu(menu)?;
                (None, Some(menu))
            }
            Anchor::Child(parent) => {
                let widget = self.widget(parent)?;
                widget.as_parent()?;
                (Some(parent), widget.menu)
            }
        };

        let id = WidgetId(self.arena.len() as u32);

        self.arena.push(Widget {
            name,
            rect,
            w_grow,
            h_grow,
            is_atomic,
            is_hidden,
            is_interact,
            is_contain,
            color,
            data,
            kind,
            hooks,
            parent,
            menu,
            frame: FrameState {
                visible: !is_hidden,
                ..FrameState::default()
            },
        });

        match anchor {
            Anchor::Root => self.windows.push(id),
            Anchor::Menu(menu) => self.menus[menu.index()].windows.push(id),
            Anchor::Child(parent) => {
                if let Some(p) = self.widget_mut(parent).and_then(Widget::as_parent_mut) {
                    p.children.push(id);
                }
            }
        }

        self.fire_widget_hook(id, |hooks| &mut hooks.init);

        Some(id)
    }

    pub(crate) fn fire_widget_hook(
        &mut self,
        id: WidgetId,
        pick: fn(&mut WidgetHooks) -> &mut Option<WidgetHook>,
    ) {
        let Some(mut hook) = self.widget_mut(id).and_then(|w| pick(&mut w.hooks).take()) else {
            return;
        };

        hook(self, id);

        // Put the hook back unless the callback installed a replacement.
        if let Some(widget) = self.widget_mut(id) {
            let slot = pick(&mut widget.hooks);
            if slot.is_none() {
                *slot = Some(hook);
            }
        }
    }

    pub(crate) fn fire_widget_key(&mut self, id: WidgetId, key: KeyEvent) -> bool {
        let Some(mut hook) = self.widget_mut(id).and_then(|w| w.hooks.key.take()) else {
            return false;
        };

        let handled = hook(self, id, key);

        if let Some(widget) = self.widget_mut(id) {
            if widget.hooks.key.is_none() {
                widget.hooks.key = Some(hook);
            }
        }

        handled
    }

    pub(crate) fn fire_menu_hook(
        &mut self,
        id: MenuId,
        pick: fn(&mut MenuHooks) -> &mut Option<MenuHook>,
    ) {
        let Some(mut hook) = self.menu_mut(id).and_then(|m| pick(&mut m.hooks).take()) else {
            return;
        };

        hook(self, id);

        if let Some(menu) = self.menu_mut(id) {
            let slot = pick(&mut menu.hooks);
            if slot.is_none() {
                *slot = Some(hook);
            }
        }
    }

    pub(crate) fn fire_menu_key(&mut self, id: MenuId, key: KeyEvent) -> bool {
        let Some(mut hook) = self.menu_mut(id).and_then(|m| m.hooks.key.take()) else {
            return false;
        };

        let handled = hook(self, id, key);

        if let Some(menu) = self.menu_mut(id) {
            if menu.hooks.key.is_none() {
                menu.hooks.key = Some(hook);
            }
        }

        handled
    }

    pub(crate) fn fire_tui_key(&mut self, key: KeyEvent) -> bool {
        let Some(mut hook) = self.hooks.key.take() else {
            return false;
        };

        let handled = hook(self, key);

        if self.hooks.key.is_none() {
            self.hooks.key = Some(hook);
        }

        handled
    }

    fn collect_post_order(&self, id: WidgetId, order: &mut Vec<WidgetId>) {
        for child in self.children_of(id) {
            self.collect_post_order(child, order);
        }

        order.push(id);
    }
}

impl Drop for Tui {
    /// Fire every `free` hook bottom-up before the arena goes away.
    fn drop(&mut self) {
        let mut order = Vec::with_capacity(self.arena.len());

        for id in self.windows.clone() {
            self.collect_post_order(id, &mut order);
        }

        let menu_windows: Vec<WidgetId> = self
            .menus
            .iter()
            .flat_map(|menu| menu.windows.iter().copied())
            .collect();

        for id in menu_windows {
            self.collect_post_order(id, &mut order);
        }

        for id in order {
            self.fire_widget_hook(id, |hooks| &mut hooks.free);
        }
    }
}
