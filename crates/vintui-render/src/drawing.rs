#![forbid(unsafe_code)]

//! Border and shadow painters.
//!
//! Borders are two-tone: the upper-left half (top edge, left edge, their
//! corners) takes one pair, the lower-right half the other. Equal pairs
//! give a flat frame; black/white splits give the indented or extruded
//! look of depth-styled panels. When the rect also carries a shadow, the
//! border pulls in off the shadow band so frame and shadow never overlap.

use crate::buffer::Buffer;
use crate::cell::Cell;
use vintui_core::Rect;
use vintui_style::PairId;

/// Characters used to draw a border around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    /// Top-left corner character.
    pub top_left: char,
    /// Top-right corner character.
    pub top_right: char,
    /// Bottom-left corner character.
    pub bottom_left: char,
    /// Bottom-right corner character.
    pub bottom_right: char,
    /// Horizontal line character.
    pub horizontal: char,
    /// Vertical line character.
    pub vertical: char,
}

impl BorderGlyphs {
    /// Simple box-drawing characters (U+250x), the ACS line set.
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// ASCII-only border.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

/// Draw a two-tone border just inside `rect`.
///
/// `upper_left` colors the top-left corner, top edge, left edge, and
/// bottom-left corner; `lower_right` colors the rest. `shadowed` reserves
/// the one-row/two-column shadow band along the bottom and right.
pub fn draw_border(
    buf: &mut Buffer,
    rect: Rect,
    glyphs: BorderGlyphs,
    upper_left: PairId,
    lower_right: PairId,
    shadowed: bool,
) {
    let shadow_h = i32::from(shadowed);
    let shadow_w = 2 * i32::from(shadowed);

    let last_x = rect.x + rect.w - 1 - shadow_w;
    let last_y = rect.y + rect.h - 1 - shadow_h;

    if last_x <= rect.x || last_y <= rect.y {
        return;
    }

    buf.set(rect.x, rect.y, Cell::new(glyphs.top_left, upper_left));
    buf.set(rect.x, last_y, Cell::new(glyphs.bottom_left, upper_left));

    for x in (rect.x + 1)..last_x {
        buf.set(x, rect.y, Cell::new(glyphs.horizontal, upper_left));
    }

    for y in (rect.y + 1)..last_y {
        buf.set(rect.x, y, Cell::new(glyphs.vertical, upper_left));
    }

    buf.set(last_x, rect.y, Cell::new(glyphs.top_right, lower_right));
    buf.set(last_x, last_y, Cell::new(glyphs.bottom_right, lower_right));

    for y in (rect.y + 1)..last_y {
        buf.set(last_x, y, Cell::new(glyphs.vertical, lower_right));
    }

    for x in (rect.x + 1)..last_x {
        buf.set(x, last_y, Cell::new(glyphs.horizontal, lower_right));
    }
}

/// Draw the shadow band: two columns along the right edge and one row
/// along the bottom, offset down-right so the panel appears lifted.
pub fn draw_shadow(buf: &mut Buffer, rect: Rect, pair: PairId) {
    let cell = Cell::blank(pair);

    for y in (rect.y + 1)..rect.bottom() {
        buf.set(rect.right() - 2, y, cell);
        buf.set(rect.right() - 1, y, cell);
    }

    for x in (rect.x + 2)..rect.right() {
        buf.set(x, rect.bottom() - 1, cell);
    }
}

#[cfg(test)]
mod tests {
    use super::{draw_border, draw_shadow, BorderGlyphs};
    use crate::buffer::Buffer;
    use vintui_core::Rect;
    use vintui_style::{Color, ColorPair, PairCache};

    #[test]
    fn border_outlines_rect() {
        let mut buf = Buffer::new(4, 3);
        let mut cache = PairCache::new(256);
        let pair = cache.intern(ColorPair::new(Color::White, Color::Black));

        draw_border(
            &mut buf,
            Rect::new(0, 0, 4, 3),
            BorderGlyphs::ASCII,
            pair,
            pair,
            false,
        );

        assert_eq!(buf.to_display_string(), "+--+\n|  |\n+--+");
    }

    #[test]
    fn two_tone_split() {
        let mut buf = Buffer::new(3, 3);
        let mut cache = PairCache::new(256);
        let one = cache.intern(ColorPair::new(Color::Black, Color::Gray));
        let two = cache.intern(ColorPair::new(Color::White, Color::Gray));

        draw_border(
            &mut buf,
            Rect::new(0, 0, 3, 3),
            BorderGlyphs::ASCII,
            one,
            two,
            false,
        );

        // Upper-left half in pair one, lower-right half in pair two.
        assert_eq!(buf.get(0, 0).unwrap().pair, one);
        assert_eq!(buf.get(1, 0).unwrap().pair, one);
        assert_eq!(buf.get(0, 2).unwrap().pair, one);
        assert_eq!(buf.get(2, 0).unwrap().pair, two);
        assert_eq!(buf.get(2, 2).unwrap().pair, two);
        assert_eq!(buf.get(1, 2).unwrap().pair, two);
    }

    #[test]
    fn shadowed_border_pulls_in() {
        let mut buf = Buffer::new(6, 4);
        let mut cache = PairCache::new(256);
        let pair = cache.intern(ColorPair::new(Color::White, Color::Black));

        draw_border(
            &mut buf,
            Rect::new(0, 0, 6, 4),
            BorderGlyphs::ASCII,
            pair,
            pair,
            true,
        );

        // The right two columns and bottom row are left for the shadow.
        assert_eq!(buf.to_display_string(), "+--+  \n|  |  \n+--+  \n      ");
    }

    #[test]
    fn shadow_band_shape() {
        let mut buf = Buffer::new(5, 4);
        let mut cache = PairCache::new(256);
        let pair = cache.intern(ColorPair::new(Color::None, Color::Black));

        draw_shadow(&mut buf, Rect::new(0, 0, 5, 4), pair);

        // Two columns on the right below the first row, one row along the
        // bottom after the first two columns.
        for y in 1..4 {
            assert_eq!(buf.get(3, y).unwrap().pair, pair);
            assert_eq!(buf.get(4, y).unwrap().pair, pair);
        }
        for x in 2..5 {
            assert_eq!(buf.get(x, 3).unwrap().pair, pair);
        }
        // Top-left region untouched.
        assert_eq!(buf.get(0, 0).unwrap().pair, vintui_style::PairId::DEFAULT);
    }

    #[test]
    fn degenerate_rect_draws_nothing() {
        let mut buf = Buffer::new(3, 3);
        draw_border(
            &mut buf,
            Rect::new(0, 0, 1, 1),
            BorderGlyphs::ASCII,
            vintui_style::PairId::DEFAULT,
            vintui_style::PairId::DEFAULT,
            false,
        );
        assert_eq!(buf.to_display_string(), "   \n   \n   ");
    }
}
