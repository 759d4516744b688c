#![forbid(unsafe_code)]

//! Text measurement and inline ANSI scanning for vintui.
//!
//! Measurement works in terminal cells: every character is one column.
//! Input that cannot occupy exactly one column (combining marks, CJK,
//! emoji) is filtered by [`is_cell_char`] before it reaches the grid;
//! grapheme-aware shaping is out of scope for this toolkit.

pub mod ansi;
pub mod wrap;

pub use ansi::{strip_ansi, AnsiCode, AnsiScanner, AnsiToken};
pub use wrap::{line_widths, wrap_height, wrap_width};

use unicode_width::UnicodeWidthChar;

/// Check that a character occupies exactly one terminal cell.
#[must_use]
pub fn is_cell_char(ch: char) -> bool {
    UnicodeWidthChar::width(ch) == Some(1)
}
