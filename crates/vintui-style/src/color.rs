#![forbid(unsafe_code)]

//! Color types and inheritance.
//!
//! The palette is the classic 16-color terminal set plus a [`Color::None`]
//! sentinel meaning "inherit from the nearest ancestor". The numbering is
//! shifted by one against terminal color indices so that zero can be the
//! sentinel; [`Color::terminal_index`] undoes the shift.

/// A single foreground or background color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Color {
    /// Inherit from the nearest ancestor.
    #[default]
    None = 0,
    /// Black (terminal index 0).
    Black = 1,
    /// Dark red (terminal index 1).
    DarkRed = 2,
    /// Dark green (terminal index 2).
    DarkGreen = 3,
    /// Dark yellow (terminal index 3).
    DarkYellow = 4,
    /// Dark blue (terminal index 4).
    DarkBlue = 5,
    /// Purple (terminal index 5).
    Purple = 6,
    /// Aqua (terminal index 6).
    Aqua = 7,
    /// Gray (terminal index 7).
    Gray = 8,
    /// Dark gray (terminal index 8).
    DarkGray = 9,
    /// Red (terminal index 9).
    Red = 10,
    /// Green (terminal index 10).
    Green = 11,
    /// Yellow (terminal index 11).
    Yellow = 12,
    /// Blue (terminal index 12).
    Blue = 13,
    /// Magenta (terminal index 13).
    Magenta = 14,
    /// Cyan (terminal index 14).
    Cyan = 15,
    /// White (terminal index 15).
    White = 16,
}

impl Color {
    /// Total number of palette values, sentinel included.
    pub const COUNT: u8 = 17;

    /// Construct from the shifted palette value (0 = sentinel).
    ///
    /// Returns `None` for values past the palette.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Black),
            2 => Some(Self::DarkRed),
            3 => Some(Self::DarkGreen),
            4 => Some(Self::DarkYellow),
            5 => Some(Self::DarkBlue),
            6 => Some(Self::Purple),
            7 => Some(Self::Aqua),
            8 => Some(Self::Gray),
            9 => Some(Self::DarkGray),
            10 => Some(Self::Red),
            11 => Some(Self::Green),
            12 => Some(Self::Yellow),
            13 => Some(Self::Blue),
            14 => Some(Self::Magenta),
            15 => Some(Self::Cyan),
            16 => Some(Self::White),
            _ => None,
        }
    }

    /// The shifted palette value.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check for the inheritance sentinel.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// The 0-based terminal color index, or `None` for the sentinel.
    #[must_use]
    pub const fn terminal_index(self) -> Option<u8> {
        match self {
            Self::None => None,
            _ => Some(self as u8 - 1),
        }
    }
}

/// A foreground/background pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorPair {
    /// Foreground color.
    pub fg: Color,
    /// Background color.
    pub bg: Color,
}

impl ColorPair {
    /// Fully transparent pair (both components inherit).
    pub const NONE: Self = Self {
        fg: Color::None,
        bg: Color::None,
    };

    /// Create a new pair.
    #[must_use]
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    /// Check if both components are concrete.
    #[must_use]
    pub const fn is_opaque(&self) -> bool {
        !self.fg.is_none() && !self.bg.is_none()
    }

    /// Check if either component is concrete.
    #[must_use]
    pub const fn has_color(&self) -> bool {
        !self.fg.is_none() || !self.bg.is_none()
    }

    /// Replace sentinel components with the fallback's components.
    ///
    /// A pair with no sentinels is returned unchanged.
    #[must_use]
    pub fn inherit(self, fallback: ColorPair) -> Self {
        if self.is_opaque() {
            return self;
        }

        Self {
            fg: if self.fg.is_none() { fallback.fg } else { self.fg },
            bg: if self.bg.is_none() { fallback.bg } else { self.bg },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, ColorPair};

    #[test]
    fn round_trip_palette_values() {
        for value in 0..Color::COUNT {
            let color = Color::from_u8(value).expect("palette value");
            assert_eq!(color.as_u8(), value);
        }
        assert_eq!(Color::from_u8(Color::COUNT), None);
    }

    #[test]
    fn terminal_index_shift() {
        assert_eq!(Color::None.terminal_index(), None);
        assert_eq!(Color::Black.terminal_index(), Some(0));
        assert_eq!(Color::White.terminal_index(), Some(15));
    }

    #[test]
    fn inherit_replaces_only_sentinels() {
        let fallback = ColorPair::new(Color::White, Color::Blue);

        let both = ColorPair::NONE.inherit(fallback);
        assert_eq!(both, fallback);

        let fg_only = ColorPair::new(Color::None, Color::Red).inherit(fallback);
        assert_eq!(fg_only, ColorPair::new(Color::White, Color::Red));

        let opaque = ColorPair::new(Color::Green, Color::Black).inherit(fallback);
        assert_eq!(opaque, ColorPair::new(Color::Green, Color::Black));
    }

    #[test]
    fn opacity_checks() {
        assert!(!ColorPair::NONE.is_opaque());
        assert!(!ColorPair::NONE.has_color());
        assert!(ColorPair::new(Color::None, Color::Red).has_color());
        assert!(ColorPair::new(Color::White, Color::Red).is_opaque());
    }
}
