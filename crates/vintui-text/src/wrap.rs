#![forbid(unsafe_code)]

//! Word-wrap measurement.
//!
//! The layout engine asks two questions about a piece of text: how tall is
//! it at a given width, and how narrow can it be without exceeding a given
//! height. Height is monotonically non-increasing in width, so the second
//! question is answered by bisecting the first.
//!
//! Wrapping rewinds to the last space when a line overflows; a `'\n'`
//! forces a line break. A word wider than the wrap width cannot be placed
//! at all, which [`wrap_height`] reports as `None`.

/// Height of `text` word-wrapped to `w` columns.
///
/// Returns `Some(0)` for empty text or zero width, and `None` when a
/// single word is wider than `w`.
#[must_use]
pub fn wrap_height(text: &str, w: i32) -> Option<i32> {
    let chars: Vec<char> = text.chars().collect();

    if chars.is_empty() || w == 0 {
        return Some(0);
    }

    if w < 0 {
        return None;
    }

    let mut h = 1;
    let mut x = 0;

    let mut space_index = 0usize;
    let mut last_space_index = space_index;

    let mut index = 0usize;

    while index < chars.len() {
        let letter = chars[index];

        if letter == ' ' {
            space_index = index;
        }

        if letter == '\n' {
            x = 0;
            h += 1;
        } else if x >= w {
            x = 0;
            h += 1;

            // Current word cannot be wrapped
            if space_index == last_space_index {
                return None;
            }

            index = space_index;
            last_space_index = space_index;
        } else {
            x += 1;
        }

        index += 1;
    }

    Some(h)
}

/// Minimal width at which `text` wraps to at most `h` lines.
///
/// Bisects over `[1, text.len()]`; the upper bound (everything on one
/// line) is returned when no smaller width fits.
#[must_use]
pub fn wrap_width(text: &str, h: i32) -> i32 {
    let mut left = 1;
    let mut right = text.chars().count() as i32;

    let mut min_w = right;

    while left <= right {
        let mid = (left + right) / 2;

        match wrap_height(text, mid) {
            // Width too small for some word: widen.
            None => left = mid + 1,
            // Too tall: widen.
            Some(curr_h) if curr_h > h => left = mid + 1,
            // Fits: remember and try narrower.
            Some(_) => {
                min_w = mid;
                right = mid - 1;
            }
        }
    }

    min_w
}

/// Per-line widths of `text` wrapped to at most `h` lines.
///
/// The wrap width is the one [`wrap_width`] chooses for `h`, so the
/// reported widths are consistent with the rect the size pass produced.
#[must_use]
pub fn line_widths(text: &str, h: i32) -> Vec<i32> {
    if h <= 0 {
        return Vec::new();
    }

    let w = wrap_width(text, h);

    let chars: Vec<char> = text.chars().collect();
    let mut ws = vec![0; h as usize];

    let mut y = 0usize;
    let mut x = 0;

    let mut space_index = 0usize;

    let mut index = 0usize;

    while index < chars.len() && y < h as usize {
        let letter = chars[index];

        if letter == ' ' {
            space_index = index;
        }

        if letter == '\n' {
            ws[y] = x;
            y += 1;

            x = 0;
        } else if x >= w {
            // full line width - last partial word
            ws[y] = x - (index - space_index) as i32;
            y += 1;

            x = 0;

            index = space_index;
        } else {
            x += 1;
        }

        // Store the width of last line
        if index + 1 == chars.len() && y < h as usize {
            ws[y] = x;
        }

        index += 1;
    }

    ws
}
