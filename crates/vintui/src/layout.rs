#![forbid(unsafe_code)]

//! The size and place passes.
//!
//! Layout is two passes over the tree. The *size pass* walks bottom-up
//! and stores each widget's intrinsic extent in its frame rect. The
//! *place pass* walks top-down: every parent carves its content box out
//! of its own rect, distributes children along its primary axis per its
//! alignment policy, clips or hides what does not fit, and translates the
//! results into screen coordinates.
//!
//! All arithmetic is integer. Slack that does not divide evenly is given
//! to the first children, one cell each, so placement is deterministic
//! and exactly accounts for every cell.

use vintui_core::{Rect, Size};
use vintui_text::{wrap_height, wrap_width};

use crate::tree::Tui;
use crate::widget::{Align, WidgetId, WidgetKind};

/// Horizontal padding, both sides combined.
const PADDING_W: i32 = 4;
/// Vertical padding, both sides combined.
const PADDING_H: i32 = 2;
/// Border thickness, both sides combined, per axis.
const BORDER_W: i32 = 2;
const BORDER_H: i32 = 2;
/// Shadow band extent.
const SHADOW_W: i32 = 2;
const SHADOW_H: i32 = 1;
/// Gap unit between siblings.
const GAP_X: i32 = 2;
const GAP_Y: i32 = 1;

impl Tui {
    /// Re-run layout against the current size.
    ///
    /// The main loop calls this on resize; headless users call it before
    /// reading frame rects.
    pub fn relayout(&mut self) {
        vintui_core::debug!(w = self.size.w, h = self.size.h, "relayout");

        size_pass(self);
        place_pass(self);
    }
}

/// Bottom-up intrinsic sizing of every top-level tree.
pub(crate) fn size_pass(tui: &mut Tui) {
    for id in tui.windows.clone() {
        size_calc(tui, id);
    }

    for id in tui.active_menu_windows() {
        size_calc(tui, id);
    }
}

/// Top-down placement of every top-level tree against the screen.
pub(crate) fn place_pass(tui: &mut Tui) {
    let Size { w, h } = tui.size;

    for id in tui.windows.clone() {
        window_rect_calc(tui, id, w, h);
    }

    for id in tui.active_menu_windows() {
        window_rect_calc(tui, id, w, h);
    }
}

/// Mark a widget and all its descendants invisible for this frame.
pub(crate) fn set_invisible(tui: &mut Tui, id: WidgetId) {
    if let Some(widget) = tui.widget_mut(id) {
        widget.frame.visible = false;
    }

    for child in tui.children_of(id) {
        set_invisible(tui, child);
    }
}

/// Variant tag copied out so the tree can be re-borrowed mutably.
enum Tag {
    Parent,
    Text,
    Grid,
}

fn tag_of(tui: &Tui, id: WidgetId) -> Option<Tag> {
    tui.widget(id).map(|w| match &w.kind {
        WidgetKind::Parent(_) => Tag::Parent,
        WidgetKind::Text(_) => Tag::Text,
        WidgetKind::Grid(_) => Tag::Grid,
    })
}

fn size_calc(tui: &mut Tui, id: WidgetId) {
    match tag_of(tui, id) {
        Some(Tag::Parent) => parent_size_calc(tui, id),
        Some(Tag::Text) => text_size_calc(tui, id),
        Some(Tag::Grid) => grid_size_calc(tui, id),
        None => {}
    }
}

fn text_size_calc(tui: &mut Tui, id: WidgetId) {
    let screen_w = tui.size.w;

    let Some(widget) = tui.widget_mut(id) else {
        return;
    };

    let user_rect = widget.rect;

    // A text widget holds at least the cursor.
    let mut rect = Rect::new(0, 0, 1, 1);

    let text = widget.as_text().map(|t| t.text().to_owned()).unwrap_or_default();

    if let Some(user) = user_rect {
        rect.w = user.w.max(0);
        rect.h = user.h.max(0);
    } else if !text.is_empty() {
        match wrap_height(&text, screen_w) {
            Some(h) if h > 0 => {
                let w = wrap_width(&text, h);
                rect = Rect::new(0, 0, w, h);
            }
            // A word wider than the screen cannot be wrapped at all;
            // the widget sits this frame out.
            _ => rect = Rect::new(0, 0, 0, 0),
        }
    }

    widget.frame.rect = rect;
}

fn grid_size_calc(tui: &mut Tui, id: WidgetId) {
    let Some(widget) = tui.widget_mut(id) else {
        return;
    };

    let user_rect = widget.rect;
    let logical = widget.as_grid().map(|g| g.size).unwrap_or_default();

    widget.frame.rect = match user_rect {
        Some(user) => Rect::new(0, 0, user.w.max(0), user.h.max(0)),
        None => Rect::new(0, 0, logical.w, logical.h),
    };
}

fn parent_size_calc(tui: &mut Tui, id: WidgetId) {
    let children = tui.children_of(id);

    for child in &children {
        size_calc(tui, *child);
    }

    let Some(widget) = tui.widget(id) else {
        return;
    };

    let user_rect = widget.rect;
    let Some(parent) = widget.as_parent() else {
        return;
    };

    let is_vertical = parent.is_vertical;
    let has_gap = parent.has_gap;
    let has_padding = parent.has_padding;
    let has_border = parent.border.is_active;
    let has_shadow = parent.has_shadow;

    let mut rect = Rect::new(0, 0, 0, 0);

    if let Some(user) = user_rect {
        rect.w = user.w.max(0);
        rect.h = user.h.max(0);
    } else if !children.is_empty() {
        let mut align_size = Size::default();
        let mut max_size = Size::default();
        let mut align_count = 0;

        for child in &children {
            let Some(child_ref) = tui.widget(*child) else {
                continue;
            };

            let child_rect = child_ref.frame.rect;

            if !child_ref.is_contain {
                max_size.w = max_size.w.max(child_rect.w);
                max_size.h = max_size.h.max(child_rect.h);
            }

            if let Some(user) = child_ref.rect {
                max_size.w = max_size.w.max(user.x + user.w);
                max_size.h = max_size.h.max(user.y + user.h);
            } else if is_vertical {
                align_count += 1;

                align_size.h += child_rect.h;

                if !child_ref.is_contain {
                    align_size.w = align_size.w.max(child_rect.w);
                }
            } else {
                align_count += 1;

                align_size.w += child_rect.w;

                if !child_ref.is_contain {
                    align_size.h = align_size.h.max(child_rect.h);
                }
            }
        }

        if has_gap && align_count > 0 {
            if is_vertical {
                align_size.h += (align_count - 1) * GAP_Y;
            } else {
                align_size.w += (align_count - 1) * GAP_X;
            }
        }

        if has_padding {
            align_size.w += PADDING_W;
            align_size.h += PADDING_H;
        }

        if has_border {
            align_size.w += BORDER_W;
            align_size.h += BORDER_H;
        }

        if has_shadow {
            align_size.w += SHADOW_W;
            align_size.h += SHADOW_H;
        }

        rect.w = max_size.w.max(align_size.w);
        rect.h = max_size.h.max(align_size.h);
    }

    if let Some(widget) = tui.widget_mut(id) {
        widget.frame.rect = rect;
    }
}

fn window_rect_calc(tui: &mut Tui, id: WidgetId, w: i32, h: i32) {
    let Some(widget) = tui.widget(id) else {
        return;
    };

    if widget.is_hidden {
        set_invisible(tui, id);
        return;
    }

    let user_rect = widget.rect;
    let is_parent = matches!(widget.kind, WidgetKind::Parent(_));

    if let Some(user) = user_rect {
        let resolved = user.resolve_in(w, h);
        if let Some(widget) = tui.widget_mut(id) {
            widget.frame.rect = resolved;
        }
    }

    let rect = tui
        .widget(id)
        .map(|widget| widget.frame.rect)
        .unwrap_or_default();

    if rect.is_empty() {
        set_invisible(tui, id);
    } else {
        if let Some(widget) = tui.widget_mut(id) {
            widget.frame.visible = true;
        }

        if is_parent {
            children_rect_calc(tui, id);
        }
    }
}

/// The per-child facts both placement passes read.
#[derive(Clone, Copy)]
struct ChildFacts {
    id: WidgetId,
    user_rect: Option<Rect>,
    size: Size,
    is_hidden: bool,
    is_atomic: bool,
    is_contain: bool,
    w_grow: bool,
    h_grow: bool,
    is_parent: bool,
}

/// The parent facts placement reads.
#[derive(Clone, Copy)]
struct ParentFacts {
    rect: Rect,
    is_vertical: bool,
    has_gap: bool,
    has_padding: bool,
    has_border: bool,
    has_shadow: bool,
    pos: crate::widget::Pos,
    align: Align,
}

impl ParentFacts {
    /// Content-box origin offsets inside the parent rect.
    fn origin_x(&self) -> i32 {
        i32::from(self.has_border) + if self.has_padding { 2 } else { 0 }
    }

    fn origin_y(&self) -> i32 {
        i32::from(self.has_border) + i32::from(self.has_padding)
    }

    /// Content-box extent: the rect minus decorations.
    fn content_size(&self) -> Size {
        let mut size = self.rect.size();

        if self.has_padding {
            size.w -= PADDING_W;
            size.h -= PADDING_H;
        }

        if self.has_border {
            size.w -= BORDER_W;
            size.h -= BORDER_H;
        }

        if self.has_shadow {
            size.w -= SHADOW_W;
            size.h -= SHADOW_H;
        }

        size
    }
}

fn gather_parent(tui: &Tui, id: WidgetId) -> Option<ParentFacts> {
    let widget = tui.widget(id)?;
    let parent = widget.as_parent()?;

    Some(ParentFacts {
        rect: widget.frame.rect,
        is_vertical: parent.is_vertical,
        has_gap: parent.has_gap,
        has_padding: parent.has_padding,
        has_border: parent.border.is_active,
        has_shadow: parent.has_shadow,
        pos: parent.pos,
        align: parent.align,
    })
}

fn gather_child(tui: &Tui, id: WidgetId) -> Option<ChildFacts> {
    let widget = tui.widget(id)?;

    Some(ChildFacts {
        id,
        user_rect: widget.rect,
        size: widget.frame.rect.size(),
        is_hidden: widget.is_hidden,
        is_atomic: widget.is_atomic,
        is_contain: widget.is_contain,
        w_grow: widget.w_grow,
        h_grow: widget.h_grow,
        is_parent: matches!(widget.kind, WidgetKind::Parent(_)),
    })
}

fn children_rect_calc(tui: &mut Tui, parent_id: WidgetId) {
    let Some(parent) = gather_parent(tui, parent_id) else {
        return;
    };

    let children: Vec<ChildFacts> = tui
        .children_of(parent_id)
        .into_iter()
        .filter_map(|id| gather_child(tui, id))
        .collect();

    let max_size = parent.content_size();

    // First pass: decide who takes part in alignment, accumulate the
    // aligned extent, count growers.
    let mut align_size = Size::default();
    let mut align_count = 0;
    let mut grow_count = 0;

    for child in &children {
        let visible;

        if child.user_rect.is_some() {
            visible = !child.is_hidden;
        } else if child.is_hidden {
            visible = false;
        } else if parent.is_vertical {
            if child.is_atomic
                && (align_size.h + child.size.h > max_size.h || child.size.w > max_size.w)
            {
                set_visible_flag(tui, child.id, false);
                continue;
            }

            visible = true;

            align_count += 1;

            align_size.h += child.size.h;

            if !child.is_contain {
                align_size.w = align_size.w.max(child.size.w);
            }

            if child.h_grow {
                grow_count += 1;
            }
        } else {
            if child.is_atomic
                && (align_size.w + child.size.w > max_size.w || child.size.h > max_size.h)
            {
                set_visible_flag(tui, child.id, false);
                continue;
            }

            visible = true;

            align_count += 1;

            align_size.w += child.size.w;

            if !child.is_contain {
                align_size.h = align_size.h.max(child.size.h);
            }

            if child.w_grow {
                grow_count += 1;
            }
        }

        set_visible_flag(tui, child.id, visible);
    }

    align_size.w = align_size.w.min(max_size.w);
    align_size.h = align_size.h.min(max_size.h);

    // Second pass: place in order, carrying the running position.
    let mut cursor = Rect::default();
    let mut align_index = 0;
    let mut grow_index = 0;

    for child in &children {
        let visible = tui
            .widget(child.id)
            .map(|w| w.frame.visible)
            .unwrap_or(false);

        if !visible {
            set_invisible(tui, child.id);
            continue;
        }

        let local = match child.user_rect {
            None => place_aligned(
                &parent,
                child,
                max_size,
                align_size,
                align_count,
                &mut align_index,
                grow_count,
                &mut grow_index,
                &mut cursor,
            ),
            Some(user) => user.resolve_in(parent.rect.w, parent.rect.h),
        };

        if local.is_empty() {
            if let Some(widget) = tui.widget_mut(child.id) {
                widget.frame.rect = local;
            }
            set_invisible(tui, child.id);
            continue;
        }

        let screen = local.translated(parent.rect.x, parent.rect.y);

        if let Some(widget) = tui.widget_mut(child.id) {
            widget.frame.rect = screen;
            widget.frame.visible = true;
        }

        if child.is_parent {
            children_rect_calc(tui, child.id);
        }
    }
}

fn set_visible_flag(tui: &mut Tui, id: WidgetId, visible: bool) {
    if let Some(widget) = tui.widget_mut(id) {
        widget.frame.visible = visible;
    }
}

/// Place one aligned child, advancing the running cursor.
///
/// Returns the child's rect in parent-local coordinates.
#[allow(clippy::too_many_arguments)]
fn place_aligned(
    parent: &ParentFacts,
    child: &ChildFacts,
    max_size: Size,
    align_size: Size,
    align_count: i32,
    align_index: &mut i32,
    grow_count: i32,
    grow_index: &mut i32,
    cursor: &mut Rect,
) -> Rect {
    if parent.is_vertical {
        place_aligned_vertical(
            parent,
            child,
            max_size,
            align_size,
            align_count,
            align_index,
            grow_count,
            grow_index,
            cursor,
        )
    } else {
        place_aligned_horizontal(
            parent,
            child,
            max_size,
            align_size,
            align_count,
            align_index,
            grow_count,
            grow_index,
            cursor,
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn place_aligned_vertical(
    parent: &ParentFacts,
    child: &ChildFacts,
    max_size: Size,
    align_size: Size,
    align_count: i32,
    align_index: &mut i32,
    grow_count: i32,
    grow_index: &mut i32,
    cursor: &mut Rect,
) -> Rect {
    if *align_index == 0 {
        cursor.y = parent.origin_y();
    }

    cursor.x = parent.origin_x();

    let mut space = max_size.h - align_size.h;

    let mut h = child.size.h;
    let mut gap_after = 0;

    if parent.align == Align::Evenly {
        // Every child gets an equal share of the whole content extent.
        let mut total = max_size.h;

        if parent.has_gap {
            gap_after += GAP_Y;
            total = (max_size.h - (align_count - 1) * GAP_Y).max(0);
        }

        h = total / align_count;

        if total - h * align_count > *align_index {
            h += 1;
        }
    } else if child.h_grow {
        if parent.has_gap {
            gap_after += GAP_Y;
            space = (space - (align_count - 1) * GAP_Y).max(0);
        }

        let share = space / grow_count;

        h += share;

        if space - share * grow_count > *grow_index {
            h += 1;
        }

        *grow_index += 1;
    } else if grow_count > 0 {
        // Growers absorb the slack; this child keeps its size.
        if parent.has_gap {
            gap_after += GAP_Y;
        }
    } else if parent.align == Align::Between {
        let gap = if align_count > 1 { space / (align_count - 1) } else { 0 };

        gap_after += gap;

        if align_count > 1 && space - gap * (align_count - 1) > *align_index {
            gap_after += 1;
        }
    } else if parent.align == Align::Around {
        let gap = space / (align_count + 1);
        let rest = space - gap * (align_count + 1);

        if *align_index == 0 && rest > 0 {
            cursor.y += rest / 2;
        }

        cursor.y += gap;
    } else {
        // Start / Center / End: a single offset before the first child.
        if *align_index == 0 {
            if parent.has_gap {
                space = (space - (align_count - 1) * GAP_Y).max(0);
            }

            cursor.y += (parent.align as i32) * space / 2;
        }

        if parent.has_gap {
            gap_after += GAP_Y;
        }
    }

    let w = if child.is_contain || child.w_grow {
        max_size.w
    } else {
        max_size.w.min(child.size.w)
    };

    // No room left on the axis: atomic children vanish, others clip.
    let end = parent.origin_y();

    if cursor.y + h > max_size.h + end {
        if child.is_atomic {
            h = 0;
        } else {
            h = max_size.h + end - cursor.y;
        }
    }

    cursor.w = w;
    cursor.h = h;

    cursor.x += parent.pos.offset(max_size.w, w);

    *align_index += 1;

    let placed = *cursor;

    cursor.y += h + gap_after;

    placed
}

#[allow(clippy::too_many_arguments)]
fn place_aligned_horizontal(
    parent: &ParentFacts,
    child: &ChildFacts,
    max_size: Size,
    align_size: Size,
    align_count: i32,
    align_index: &mut i32,
    grow_count: i32,
    grow_index: &mut i32,
    cursor: &mut Rect,
) -> Rect {
    if *align_index == 0 {
        cursor.x = parent.origin_x();
    }

    cursor.y = parent.origin_y();

    let mut space = max_size.w - align_size.w;

    let mut w = child.size.w;
    let mut gap_after = 0;

    if parent.align == Align::Evenly {
        let mut total = max_size.w;

        if parent.has_gap {
            gap_after += GAP_X;
            total = (max_size.w - (align_count - 1) * GAP_X).max(0);
        }

        w = total / align_count;

        if total - w * align_count > *align_index {
            w += 1;
        }
    } else if child.w_grow {
        if parent.has_gap {
            gap_after += GAP_X;
            space = (space - (align_count - 1) * GAP_X).max(0);
        }

        let share = space / grow_count;

        w += share;

        if space - share * grow_count > *grow_index {
            w += 1;
        }

        *grow_index += 1;
    } else if grow_count > 0 {
        if parent.has_gap {
            gap_after += GAP_X;
        }
    } else if parent.align == Align::Between {
        let gap = if align_count > 1 { space / (align_count - 1) } else { 0 };

        gap_after += gap;

        if align_count > 1 && space - gap * (align_count - 1) > *align_index {
            gap_after += 1;
        }
    } else if parent.align == Align::Around {
        let gap = space / (align_count + 1);
        let rest = space - gap * (align_count + 1);

        if *align_index == 0 && rest > 0 {
            cursor.x += rest / 2;
        }

        cursor.x += gap;
    } else {
        if *align_index == 0 {
            if parent.has_gap {
                space = (space - (align_count - 1) * GAP_X).max(0);
            }

            cursor.x += (parent.align as i32) * space / 2;
        }

        if parent.has_gap {
            gap_after += GAP_X;
        }
    }

    let h = if child.is_contain || child.h_grow {
        max_size.h
    } else {
        max_size.h.min(child.size.h)
    };

    let end = parent.origin_x();

    if cursor.x + w > max_size.w + end {
        if child.is_atomic {
            w = 0;
        } else {
            w = max_size.w + end - cursor.x;
        }
    }

    cursor.w = w;
    cursor.h = h;

    cursor.y += parent.pos.offset(max_size.h, h);

    *align_index += 1;

    let placed = *cursor;

    cursor.x += w + gap_after;

    placed
}
