#![forbid(unsafe_code)]

//! # vintui
//!
//! A retro widget-tree terminal UI toolkit: parent/text/grid widgets in
//! a single-owner tree, a flex-like layout engine, two-tone borders,
//! drop shadows, color inheritance with a sentinel `None`, inline ANSI
//! color escapes, synchronous key dispatch, and tab focus navigation
//! across menu pages.
//!
//! ## Pipeline
//!
//! Every frame runs the same way:
//!
//! ```text
//! update hooks (bottom-up) → size pass (bottom-up) → place pass (top-down)
//!   → screen fill → paint (reverse declaration order) → cursor
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use vintui::{Anchor, CrosstermBackend, ParentConfig, TextConfig, Tui, TuiConfig};
//! use vintui::style::{Color, ColorPair};
//!
//! let mut tui = Tui::new(TuiConfig {
//!     color: ColorPair::new(Color::White, Color::DarkBlue),
//!     ..Default::default()
//! });
//!
//! let panel = tui
//!     .add_parent(
//!         Anchor::Root,
//!         ParentConfig {
//!             has_padding: true,
//!             has_shadow: true,
//!             ..Default::default()
//!         },
//!     )
//!     .unwrap();
//!
//! tui.add_text(
//!     Anchor::Child(panel),
//!     TextConfig {
//!         string: "hello".into(),
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//!
//! let mut backend = CrosstermBackend::stdout();
//! tui.run(&mut backend).unwrap();
//! ```

pub mod backend;
pub mod dispatch;
pub mod error;
pub mod input;
pub mod layout;
pub mod list;
pub mod lookup;
pub mod navigate;
pub mod render;
pub mod run;
pub mod tree;
pub mod widget;

pub use backend::{Backend, CrosstermBackend, TestBackend};
pub use error::Error;
pub use input::Input;
pub use list::List;
pub use tree::{
    Anchor, Cursor, Menu, MenuConfig, MenuHook, MenuHooks, MenuId, MenuKeyHook, Tui, TuiConfig,
    TuiHook, TuiHooks, TuiKeyHook,
};
pub use widget::{
    Align, Border, BorderDepth, GridConfig, GridSquare, GridWidget, ParentConfig, ParentWidget,
    Pos, TextConfig, TextWidget, Widget, WidgetHook, WidgetHooks, WidgetId, WidgetKeyHook,
    WidgetKind,
};

/// Re-exports of the companion crates.
pub mod core {
    pub use vintui_core::*;
}

/// Color model re-exports.
pub mod style {
    pub use vintui_style::*;
}

/// Text measurement re-exports.
pub mod text {
    pub use vintui_text::*;
}

/// Cell grid re-exports.
pub mod cells {
    pub use vintui_render::*;
}

pub use vintui_core::{Event, KeyCode, KeyEvent, Modifiers, Rect, Size};
pub use vintui_render::Buffer;
