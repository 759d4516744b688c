#![forbid(unsafe_code)]

//! The render pass.
//!
//! One frame: `update` hooks fire bottom-up, layout runs, the screen
//! fills with the active menu's (else the global) background, and the
//! top-level widgets paint in *reverse* insertion order so the first
//! declared ends up on top. Each widget resolves its inherited color
//! right before painting; a widget with a sentinel background simply
//! paints its content over whatever is already in the buffer, which is
//! all the transparency this model needs.

use vintui_core::Rect;
use vintui_render::{draw_border, draw_shadow, Buffer, BorderGlyphs, Cell};
use vintui_style::{Color, ColorPair};
use vintui_text::{line_widths, wrap_height, AnsiCode, AnsiScanner, AnsiToken};

use crate::tree::{Cursor, Tui};
use crate::widget::{BorderDepth, WidgetId, WidgetKind};

impl Tui {
    /// Produce one frame into `buffer`.
    ///
    /// The buffer is resized to the root's size if it differs. Rendering
    /// is idempotent: absent intervening mutation, repeated calls produce
    /// identical buffers.
    pub fn render_frame(&mut self, buffer: &mut Buffer) {
        self.cursor = Cursor::default();

        for id in self.windows.clone() {
            update_walk(self, id);
        }

        for id in self.active_menu_windows() {
            update_walk(self, id);
        }

        self.relayout();

        if buffer.width() != self.size.w || buffer.height() != self.size.h {
            buffer.resize(self.size.w, self.size.h);
        }

        let fill_color = match self.menu {
            Some(menu_id) => {
                let resolved = self
                    .menu(menu_id)
                    .map(|menu| menu.color.inherit(self.color))
                    .unwrap_or(self.color);

                if let Some(menu) = self.menu_mut(menu_id) {
                    menu.frame_color = resolved;
                }

                resolved
            }
            None => self.color,
        };

        let fill_pair = self.pairs.intern(fill_color);
        buffer.fill(Cell::blank(fill_pair));

        let windows = self.windows.clone();
        for id in windows.iter().rev() {
            if self.widget(*id).is_some_and(|w| w.frame.visible) {
                render_widget(self, buffer, *id);
            }
        }

        let menu_windows = self.active_menu_windows();
        for id in menu_windows.iter().rev() {
            if self.widget(*id).is_some_and(|w| w.frame.visible) {
                render_widget(self, buffer, *id);
            }
        }
    }
}

/// Fire `update` hooks bottom-up: children before their parent.
fn update_walk(tui: &mut Tui, id: WidgetId) {
    for child in tui.children_of(id) {
        update_walk(tui, child);
    }

    tui.fire_widget_hook(id, |hooks| &mut hooks.update);
}

fn render_widget(tui: &mut Tui, buffer: &mut Buffer, id: WidgetId) {
    tui.fire_widget_hook(id, |hooks| &mut hooks.render);

    let Some(widget) = tui.widget(id) else {
        return;
    };

    // Resolve the inherited color: nearest ancestor's resolved color,
    // else the active menu's, else the root's.
    let fallback = match widget.parent {
        Some(parent) => tui
            .widget(parent)
            .map(|p| p.frame.color)
            .unwrap_or(tui.color),
        None => match tui.menu.and_then(|m| tui.menu(m)) {
            Some(menu) => menu.frame_color,
            None => tui.color,
        },
    };

    let declared = widget.color;
    let resolved = declared.inherit(fallback);

    if let Some(widget) = tui.widget_mut(id) {
        widget.frame.color = resolved;
    }

    enum Tag {
        Parent,
        Text,
        Grid,
    }

    let tag = match tui.widget(id) {
        Some(widget) => match &widget.kind {
            WidgetKind::Parent(_) => Tag::Parent,
            WidgetKind::Text(_) => Tag::Text,
            WidgetKind::Grid(_) => Tag::Grid,
        },
        None => return,
    };

    match tag {
        Tag::Parent => render_parent(tui, buffer, id, declared, resolved),
        Tag::Text => render_text(tui, buffer, id, declared, resolved),
        Tag::Grid => render_grid(tui, buffer, id, declared, resolved),
    }
}

fn render_parent(
    tui: &mut Tui,
    buffer: &mut Buffer,
    id: WidgetId,
    declared: ColorPair,
    resolved: ColorPair,
) {
    let Some(widget) = tui.widget(id) else {
        return;
    };

    let rect = widget.frame.rect;

    let Some(parent) = widget.as_parent() else {
        return;
    };

    let border = parent.border;
    let has_shadow = parent.has_shadow;

    // Fill the rect minus the shadow band.
    if !declared.bg.is_none() {
        let shadow_w = 2 * i32::from(has_shadow);
        let shadow_h = i32::from(has_shadow);

        let pair = tui.pairs.intern(resolved);
        buffer.fill_rect(
            Rect::new(rect.x, rect.y, rect.w - shadow_w, rect.h - shadow_h),
            Cell::blank(pair),
        );
    }

    if border.is_active {
        let border_color = border.color.inherit(resolved);

        if border_color.has_color() {
            let (mut one, mut two) = (border_color, border_color);

            match border.depth {
                BorderDepth::Low => {
                    one.fg = Color::Black;
                    two.fg = Color::White;
                }
                BorderDepth::High => {
                    one.fg = Color::White;
                    two.fg = Color::Black;
                }
                BorderDepth::None => {}
            }

            let upper_left = tui.pairs.intern(one);
            let lower_right = tui.pairs.intern(two);

            draw_border(
                buffer,
                rect,
                BorderGlyphs::SQUARE,
                upper_left,
                lower_right,
                has_shadow,
            );
        }
    }

    if has_shadow {
        let pair = tui
            .pairs
            .intern(ColorPair::new(Color::None, Color::Black));
        draw_shadow(buffer, rect, pair);
    }

    for child in tui.children_of(id) {
        if tui.widget(child).is_some_and(|w| w.frame.visible) {
            render_widget(tui, buffer, child);
        }
    }
}

fn render_text(
    tui: &mut Tui,
    buffer: &mut Buffer,
    id: WidgetId,
    declared: ColorPair,
    resolved: ColorPair,
) {
    let Some(widget) = tui.widget(id) else {
        return;
    };

    let rect = widget.frame.rect;

    let Some(text) = widget.as_text() else {
        return;
    };

    let raw = text.string().to_owned();
    let stripped = text.text().to_owned();
    let is_secret = text.is_secret;
    let pos = text.pos;
    let align = text.align;

    if !declared.bg.is_none() {
        let pair = tui.pairs.intern(resolved);
        buffer.fill_rect(rect, Cell::blank(pair));
    }

    let Some(h) = wrap_height(&stripped, rect.w) else {
        return;
    };

    if h <= 0 {
        return;
    }

    let ws = line_widths(&stripped, h);

    let mut color = resolved;

    let mut x = 0;
    let mut y = 0usize;

    let y_shift = pos.offset(rect.h, h);

    for token in AnsiScanner::new(&raw) {
        let w = ws.get(y).copied().unwrap_or(0);

        let x_shift = ((align as i32) * (rect.w - w) / 2).max(0);

        match token {
            AnsiToken::Escape(AnsiCode::Reset) => color = resolved,
            AnsiToken::Escape(AnsiCode::Cursor) => {
                // Only the focused widget may park the cursor.
                if tui.focus == Some(id) {
                    tui.cursor = Cursor {
                        x: rect.x + x + x_shift,
                        y: rect.y + y as i32 + y_shift,
                        is_active: true,
                    };
                }
            }
            AnsiToken::Escape(AnsiCode::Fg(value)) => {
                color.fg = Color::from_u8(value).unwrap_or(Color::None);
            }
            AnsiToken::Escape(AnsiCode::Bg(value)) => {
                color.bg = Color::from_u8(value).unwrap_or(Color::None);
            }
            AnsiToken::Escape(AnsiCode::Other(_)) => {}
            AnsiToken::Char(letter) => {
                if x >= w {
                    x = 0;
                    y += 1;
                } else {
                    if (y as i32 + y_shift) < rect.h && (x + x_shift) < rect.w {
                        let symbol = if is_secret { '*' } else { letter };
                        let pair = tui.pairs.intern(color);

                        buffer.set(
                            rect.x + x_shift + x,
                            rect.y + y_shift + y as i32,
                            Cell::new(symbol, pair),
                        );
                    }

                    x += 1;
                }
            }
        }
    }
}

fn render_grid(
    tui: &mut Tui,
    buffer: &mut Buffer,
    id: WidgetId,
    declared: ColorPair,
    resolved: ColorPair,
) {
    let Some(widget) = tui.widget(id) else {
        return;
    };

    let rect = widget.frame.rect;

    let Some(grid) = widget.as_grid() else {
        return;
    };

    let size = grid.resolved_size();
    let squares = grid.squares.clone();

    if !declared.bg.is_none() {
        let pair = tui.pairs.intern(resolved);
        buffer.fill_rect(rect, Cell::blank(pair));
    }

    // Center the logical grid within the widget rect.
    let x_shift = ((rect.w - size.w) / 2).max(0);
    let y_shift = ((rect.h - size.h) / 2).max(0);

    for y in 0..size.h {
        for x in 0..size.w {
            if x_shift + x >= rect.w || y_shift + y >= rect.h {
                continue;
            }

            let square = squares[(y * size.w + x) as usize];

            let symbol = square.symbol.unwrap_or(' ');
            let color = square.color.inherit(resolved);
            let pair = tui.pairs.intern(color);

            buffer.set(
                rect.x + x_shift + x,
                rect.y + y_shift + y,
                Cell::new(symbol, pair),
            );
        }
    }
}
