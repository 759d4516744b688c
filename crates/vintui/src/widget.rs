#![forbid(unsafe_code)]

//! The widget tree's node types.
//!
//! Every widget shares one header (name, rect request, flags, color,
//! hooks) and carries a [`WidgetKind`] payload: a `Parent` laying out
//! children along one axis, a `Text` block, or a `Grid` of colored
//! squares. Widgets live in the root's arena and refer to each other by
//! [`WidgetId`]; back-references never own.
//!
//! Three scratch fields are rewritten every frame: the resolved rect, the
//! inherited color, and the visibility verdict. They are outputs of the
//! size/place/render passes, not configuration.

use std::any::Any;

use vintui_core::{KeyEvent, Rect, Size};
use vintui_style::ColorPair;
use vintui_text::strip_ansi;

use crate::error::Error;
use crate::tree::{MenuId, Tui};

/// Index of a widget in the root's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub(crate) u32);

impl WidgetId {
    /// The raw arena slot.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Cross-axis placement of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Pos {
    /// Top (horizontal axis) or left (vertical axis).
    #[default]
    Start = 0,
    /// Centered.
    Center = 1,
    /// Bottom or right.
    End = 2,
}

impl Pos {
    /// Offset of an extent within the space holding it.
    ///
    /// `Start` pins to zero, `Center` splits the slack, `End` pushes to
    /// the far edge. Negative slack clamps to zero.
    #[must_use]
    pub(crate) fn offset(self, space: i32, extent: i32) -> i32 {
        ((self as i32) * (space - extent) / 2).max(0)
    }
}

/// Main-axis distribution of children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Align {
    /// Pack children at the start, slack at the end.
    #[default]
    Start = 0,
    /// Group children in the middle.
    Center = 1,
    /// Pack children at the end.
    End = 2,
    /// Slack between adjacent children only.
    Between = 3,
    /// Slack between children and at both edges.
    Around = 4,
    /// Children resized to share the axis equally.
    Evenly = 5,
}

/// Relief style of a border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderDepth {
    /// Flat: both halves use the border color.
    #[default]
    None,
    /// Indented: dark upper-left, light lower-right.
    Low,
    /// Extruded: light upper-left, dark lower-right.
    High,
}

/// Border configuration of a parent widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Border {
    /// Draw the border at all.
    pub is_active: bool,
    /// Relief style.
    pub depth: BorderDepth,
    /// Border color; sentinel components inherit from the widget.
    pub color: ColorPair,
}

/// One square of a grid widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridSquare {
    /// Square color; sentinel components inherit from the widget.
    pub color: ColorPair,
    /// Symbol to draw; `None` renders a space.
    pub symbol: Option<char>,
}

/// Hook that observes a widget lifecycle point.
pub type WidgetHook = Box<dyn FnMut(&mut Tui, WidgetId)>;

/// Hook that may consume a key aimed at a widget.
pub type WidgetKeyHook = Box<dyn FnMut(&mut Tui, WidgetId, KeyEvent) -> bool>;

/// Event hooks of a widget.
///
/// Hooks receive the whole tree plus the widget's id; during a call the
/// hook slot is empty, so a hook never observes itself.
#[derive(Default)]
pub struct WidgetHooks {
    /// After the widget is created and attached.
    pub init: Option<WidgetHook>,
    /// Before the widget is destroyed.
    pub free: Option<WidgetHook>,
    /// On a key aimed at the widget; `true` consumes it.
    pub key: Option<WidgetKeyHook>,
    /// When the widget gains focus.
    pub enter: Option<WidgetHook>,
    /// When the widget loses focus.
    pub exit: Option<WidgetHook>,
    /// Each frame, before sizing.
    pub update: Option<WidgetHook>,
    /// Each frame, immediately before the widget paints.
    pub render: Option<WidgetHook>,
}

/// Per-frame scratch produced by the layout and render passes.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FrameState {
    /// Resolved screen rectangle.
    pub rect: Rect,
    /// Inherited, fully concrete color.
    pub color: ColorPair,
    /// Whether the widget survived layout this frame.
    pub visible: bool,
}

/// A node of the widget tree.
pub struct Widget {
    /// Lookup name; path search matches on it.
    pub name: Option<String>,
    /// Requested rectangle; `None` lets layout decide.
    pub rect: Option<Rect>,
    /// Absorb leftover main-axis space horizontally.
    pub w_grow: bool,
    /// Absorb leftover main-axis space vertically.
    pub h_grow: bool,
    /// Hide entirely instead of clipping when content does not fit.
    pub is_atomic: bool,
    /// User-requested invisibility.
    pub is_hidden: bool,
    /// Reachable by tab navigation.
    pub is_interact: bool,
    /// Excluded from the parent's intrinsic size.
    pub is_contain: bool,
    /// Declared color; sentinel components inherit.
    pub color: ColorPair,
    /// Arbitrary user payload.
    pub data: Option<Box<dyn Any>>,
    /// Event hooks; replaceable at runtime.
    pub hooks: WidgetHooks,

    pub(crate) kind: WidgetKind,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) menu: Option<MenuId>,
    pub(crate) frame: FrameState,
}

impl Widget {
    /// The resolved rectangle of the last layout pass.
    #[must_use]
    pub fn frame_rect(&self) -> Rect {
        self.frame.rect
    }

    /// The inherited color of the last render pass.
    #[must_use]
    pub fn resolved_color(&self) -> ColorPair {
        self.frame.color
    }

    /// Whether the widget survived the last layout pass.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.frame.visible
    }

    /// The parent widget, if any.
    #[must_use]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// The menu the widget belongs to, if any.
    #[must_use]
    pub fn menu(&self) -> Option<MenuId> {
        self.menu
    }

    /// The parent payload, if this is a parent widget.
    #[must_use]
    pub fn as_parent(&self) -> Option<&ParentWidget> {
        match &self.kind {
            WidgetKind::Parent(parent) => Some(parent),
            _ => None,
        }
    }

    /// Mutable parent payload.
    #[must_use]
    pub fn as_parent_mut(&mut self) -> Option<&mut ParentWidget> {
        match &mut self.kind {
            WidgetKind::Parent(parent) => Some(parent),
            _ => None,
        }
    }

    /// The text payload, if this is a text widget.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextWidget> {
        match &self.kind {
            WidgetKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Mutable text payload.
    #[must_use]
    pub fn as_text_mut(&mut self) -> Option<&mut TextWidget> {
        match &mut self.kind {
            WidgetKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The grid payload, if this is a grid widget.
    #[must_use]
    pub fn as_grid(&self) -> Option<&GridWidget> {
        match &self.kind {
            WidgetKind::Grid(grid) => Some(grid),
            _ => None,
        }
    }

    /// Mutable grid payload.
    #[must_use]
    pub fn as_grid_mut(&mut self) -> Option<&mut GridWidget> {
        match &mut self.kind {
            WidgetKind::Grid(grid) => Some(grid),
            _ => None,
        }
    }
}

/// The variant payload of a widget.
pub enum WidgetKind {
    /// Lays out children along one axis.
    Parent(ParentWidget),
    /// A wrapped text block.
    Text(TextWidget),
    /// A dense grid of colored squares.
    Grid(GridWidget),
}

/// Payload of a parent widget.
pub struct ParentWidget {
    /// Children in insertion order.
    pub(crate) children: Vec<WidgetId>,
    /// Distribute children along y instead of x.
    pub is_vertical: bool,
    /// Border configuration.
    pub border: Border,
    /// Drop a shadow below and to the right.
    pub has_shadow: bool,
    /// Pad the content box by two columns and one row per side.
    pub has_padding: bool,
    /// Keep a unit gap between adjacent children.
    pub has_gap: bool,
    /// Cross-axis placement of children.
    pub pos: Pos,
    /// Main-axis distribution of children.
    pub align: Align,
}

impl ParentWidget {
    /// The children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }
}

/// Payload of a text widget.
pub struct TextWidget {
    pub(crate) string: String,
    pub(crate) text: String,
    /// Render every visible character as `*`.
    pub is_secret: bool,
    /// Vertical placement of the wrapped block.
    pub pos: Pos,
    /// Per-line horizontal placement.
    pub align: Align,
}

impl TextWidget {
    pub(crate) fn new(string: String, is_secret: bool, pos: Pos, align: Align) -> Self {
        let text = strip_ansi(&string);

        Self {
            string,
            text,
            is_secret,
            pos,
            align,
        }
    }

    /// The raw string, escapes included.
    #[must_use]
    pub fn string(&self) -> &str {
        &self.string
    }

    /// The escape-free string that measurement sees.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the string, keeping the measured view consistent.
    pub fn set_string(&mut self, string: impl Into<String>) {
        self.string = string.into();
        self.text = strip_ansi(&self.string);
    }
}

/// Payload of a grid widget.
pub struct GridWidget {
    /// Requested logical size used by the size pass.
    pub size: Size,
    pub(crate) resolved: Size,
    pub(crate) squares: Vec<GridSquare>,
}

impl GridWidget {
    pub(crate) fn new(size: Size) -> Result<Self, Error> {
        let mut grid = Self {
            size,
            resolved: Size::default(),
            squares: Vec::new(),
        };

        grid.resize(size)?;

        Ok(grid)
    }

    /// The size the square storage is currently allocated for.
    #[must_use]
    pub fn resolved_size(&self) -> Size {
        self.resolved
    }

    /// Reallocate the squares for a new logical size.
    ///
    /// Existing content is discarded; every square resets to default.
    pub fn resize(&mut self, size: Size) -> Result<(), Error> {
        if size.w <= 0 || size.h <= 0 {
            return Err(Error::InvalidGridSize);
        }

        self.squares = vec![GridSquare::default(); (size.w * size.h) as usize];
        self.resolved = size;

        Ok(())
    }

    /// The square at (x, y), if in bounds.
    #[must_use]
    pub fn square(&self, x: i32, y: i32) -> Option<&GridSquare> {
        self.index(x, y).map(|i| &self.squares[i])
    }

    /// Mutable square access.
    #[must_use]
    pub fn square_mut(&mut self, x: i32, y: i32) -> Option<&mut GridSquare> {
        self.index(x, y).map(|i| &mut self.squares[i])
    }

    /// Overwrite the square at (x, y); out-of-bounds writes are dropped.
    pub fn set_square(&mut self, x: i32, y: i32, square: GridSquare) {
        if let Some(slot) = self.square_mut(x, y) {
            *slot = square;
        }
    }

    /// Merge into the square at (x, y): only concrete color components
    /// and a present symbol overwrite what is stored.
    pub fn modify_square(&mut self, x: i32, y: i32, square: GridSquare) {
        let Some(slot) = self.square_mut(x, y) else {
            return;
        };

        if !square.color.fg.is_none() {
            slot.color.fg = square.color.fg;
        }

        if !square.color.bg.is_none() {
            slot.color.bg = square.color.bg;
        }

        if square.symbol.is_some() {
            slot.symbol = square.symbol;
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.resolved.w && y >= 0 && y < self.resolved.h {
            Some((y * self.resolved.w + x) as usize)
        } else {
            None
        }
    }
}

/// Options for a parent widget.
#[derive(Default)]
pub struct ParentConfig {
    /// Lookup name.
    pub name: Option<String>,
    /// Event hooks.
    pub hooks: WidgetHooks,
    /// Requested rectangle; `None` lets layout decide.
    pub rect: Option<Rect>,
    /// Absorb leftover horizontal space.
    pub w_grow: bool,
    /// Absorb leftover vertical space.
    pub h_grow: bool,
    /// Declared color.
    pub color: ColorPair,
    /// Start hidden.
    pub is_hidden: bool,
    /// Hide entirely rather than clip.
    pub is_atomic: bool,
    /// Reachable by tab navigation.
    pub is_interact: bool,
    /// Excluded from the parent's intrinsic size.
    pub is_contain: bool,
    /// Border configuration.
    pub border: Border,
    /// Drop a shadow.
    pub has_shadow: bool,
    /// Pad the content box.
    pub has_padding: bool,
    /// Keep a unit gap between children.
    pub has_gap: bool,
    /// Cross-axis placement.
    pub pos: Pos,
    /// Main-axis distribution.
    pub align: Align,
    /// Distribute along y instead of x.
    pub is_vertical: bool,
    /// Arbitrary user payload.
    pub data: Option<Box<dyn Any>>,
}

/// Options for a text widget.
#[derive(Default)]
pub struct TextConfig {
    /// Lookup name.
    pub name: Option<String>,
    /// Event hooks.
    pub hooks: WidgetHooks,
    /// Requested rectangle; `None` lets layout decide.
    pub rect: Option<Rect>,
    /// Absorb leftover horizontal space.
    pub w_grow: bool,
    /// Absorb leftover vertical space.
    pub h_grow: bool,
    /// Declared color.
    pub color: ColorPair,
    /// Start hidden.
    pub is_hidden: bool,
    /// Hide entirely rather than clip.
    pub is_atomic: bool,
    /// Reachable by tab navigation.
    pub is_interact: bool,
    /// Excluded from the parent's intrinsic size.
    pub is_contain: bool,
    /// The string to display, inline escapes allowed.
    pub string: String,
    /// Render every visible character as `*`.
    pub is_secret: bool,
    /// Vertical placement of the wrapped block.
    pub pos: Pos,
    /// Per-line horizontal placement.
    pub align: Align,
    /// Arbitrary user payload.
    pub data: Option<Box<dyn Any>>,
}

/// Options for a grid widget.
#[derive(Default)]
pub struct GridConfig {
    /// Lookup name.
    pub name: Option<String>,
    /// Event hooks.
    pub hooks: WidgetHooks,
    /// Requested rectangle; `None` lets layout decide.
    pub rect: Option<Rect>,
    /// Absorb leftover horizontal space.
    pub w_grow: bool,
    /// Absorb leftover vertical space.
    pub h_grow: bool,
    /// Declared color.
    pub color: ColorPair,
    /// Start hidden.
    pub is_hidden: bool,
    /// Hide entirely rather than clip.
    pub is_atomic: bool,
    /// Reachable by tab navigation.
    pub is_interact: bool,
    /// Excluded from the parent's intrinsic size.
    pub is_contain: bool,
    /// Logical grid size in squares.
    pub size: Size,
    /// Arbitrary user payload.
    pub data: Option<Box<dyn Any>>,
}

#[cfg(test)]
mod tests {
    use super::{Align, GridSquare, GridWidget, Pos, TextWidget};
    use vintui_core::Size;
    use vintui_style::{Color, ColorPair};

    #[test]
    fn text_keeps_measured_view_in_sync() {
        let mut text = TextWidget::new("\x1b[31mhi\x1b[0m".into(), false, Pos::Start, Align::Start);
        assert_eq!(text.string(), "\x1b[31mhi\x1b[0m");
        assert_eq!(text.text(), "hi");

        text.set_string("plain");
        assert_eq!(text.text(), "plain");
    }

    #[test]
    fn grid_set_and_get_round_trip() {
        let mut grid = GridWidget::new(Size::new(3, 2)).unwrap();
        let square = GridSquare {
            color: ColorPair::new(Color::Red, Color::Black),
            symbol: Some('#'),
        };

        for y in 0..2 {
            for x in 0..3 {
                grid.set_square(x, y, square);
            }
        }

        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(grid.square(x, y), Some(&square));
            }
        }

        assert_eq!(grid.square(3, 0), None);
        assert_eq!(grid.square(0, 2), None);
    }

    #[test]
    fn grid_rejects_empty_size() {
        assert!(GridWidget::new(Size::new(0, 2)).is_err());
        assert!(GridWidget::new(Size::new(2, -1)).is_err());
    }

    #[test]
    fn grid_modify_merges() {
        let mut grid = GridWidget::new(Size::new(1, 1)).unwrap();
        grid.set_square(
            0,
            0,
            GridSquare {
                color: ColorPair::new(Color::Red, Color::Black),
                symbol: Some('a'),
            },
        );

        // Only the background changes; fg and symbol survive.
        grid.modify_square(
            0,
            0,
            GridSquare {
                color: ColorPair::new(Color::None, Color::Blue),
                symbol: None,
            },
        );

        let square = grid.square(0, 0).unwrap();
        assert_eq!(square.color, ColorPair::new(Color::Red, Color::Blue));
        assert_eq!(square.symbol, Some('a'));
    }

    #[test]
    fn grid_resize_resets_squares() {
        let mut grid = GridWidget::new(Size::new(2, 2)).unwrap();
        grid.set_square(
            0,
            0,
            GridSquare {
                color: ColorPair::new(Color::Red, Color::Red),
                symbol: Some('x'),
            },
        );

        grid.resize(Size::new(4, 4)).unwrap();
        assert_eq!(grid.resolved_size(), Size::new(4, 4));
        assert_eq!(grid.square(0, 0), Some(&GridSquare::default()));
    }

    #[test]
    fn pos_offset_rule() {
        assert_eq!(Pos::Start.offset(10, 4), 0);
        assert_eq!(Pos::Center.offset(10, 4), 3);
        assert_eq!(Pos::End.offset(10, 4), 6);
        // Negative slack clamps.
        assert_eq!(Pos::End.offset(2, 4), 0);
    }
}
