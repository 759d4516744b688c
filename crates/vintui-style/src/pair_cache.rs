#![forbid(unsafe_code)]

//! Interning of color pairs into terminal pair slots.
//!
//! Terminals expose a limited number of (fg, bg) attribute slots. The
//! cache hands out stable slot indices on demand: lookup is a linear scan
//! over the live entries, a miss appends. Slot 0 is reserved for the
//! terminal's default colors and doubles as the overflow fallback, so a
//! full cache degrades rendering to the default pair instead of failing.

use crate::color::ColorPair;

/// Maximum number of interned pairs, reserved slot included.
pub const CACHE_SIZE: usize = 128;

/// A terminal pair slot handed out by [`PairCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PairId(u16);

impl PairId {
    /// The reserved default pair.
    pub const DEFAULT: Self = Self(0);

    /// The raw slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed-capacity (fg, bg) interner.
///
/// Owned by the root and threaded through the render context; there is no
/// process-global state. Entries are never evicted.
#[derive(Debug, Clone)]
pub struct PairCache {
    entries: Vec<ColorPair>,
    limit: usize,
}

impl PairCache {
    /// Create a cache honoring the backend's pair limit.
    ///
    /// The effective capacity is the smaller of [`CACHE_SIZE`] and
    /// `backend_limit`.
    #[must_use]
    pub fn new(backend_limit: usize) -> Self {
        let mut entries = Vec::new();
        // Slot 0 is the terminal default pair.
        entries.push(ColorPair::NONE);

        Self {
            entries,
            limit: CACHE_SIZE.min(backend_limit.max(1)),
        }
    }

    /// Number of live slots, the reserved default included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if only the reserved slot exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.len() <= 1
    }

    /// Intern a pair, returning its slot.
    ///
    /// Returns [`PairId::DEFAULT`] when the cache (or the backend) cannot
    /// hold another pair.
    pub fn intern(&mut self, pair: ColorPair) -> PairId {
        for (index, entry) in self.entries.iter().enumerate().skip(1) {
            if *entry == pair {
                return PairId(index as u16);
            }
        }

        if self.entries.len() >= self.limit {
            return PairId::DEFAULT;
        }

        let id = PairId(self.entries.len() as u16);
        self.entries.push(pair);
        id
    }

    /// The pair stored in a slot.
    ///
    /// Unknown slots read as the default pair.
    #[must_use]
    pub fn get(&self, id: PairId) -> ColorPair {
        self.entries.get(id.index()).copied().unwrap_or(ColorPair::NONE)
    }
}

#[cfg(test)]
mod tests {
    use super::{PairCache, PairId, CACHE_SIZE};
    use crate::color::{Color, ColorPair};

    #[test]
    fn intern_is_stable() {
        let mut cache = PairCache::new(256);
        let pair = ColorPair::new(Color::White, Color::Blue);

        let first = cache.intern(pair);
        let second = cache.intern(pair);

        assert_ne!(first, PairId::DEFAULT);
        assert_eq!(first, second);
        assert_eq!(cache.get(first), pair);
    }

    #[test]
    fn distinct_pairs_get_distinct_slots() {
        let mut cache = PairCache::new(256);
        let a = cache.intern(ColorPair::new(Color::White, Color::Blue));
        let b = cache.intern(ColorPair::new(Color::Blue, Color::White));
        assert_ne!(a, b);
    }

    #[test]
    fn overflow_falls_back_to_default() {
        let mut cache = PairCache::new(256);

        // Fill every free slot with distinct pairs.
        let mut filled = 0;
        'outer: for fg in 0..Color::COUNT {
            for bg in 0..Color::COUNT {
                let pair = ColorPair::new(
                    Color::from_u8(fg).unwrap(),
                    Color::from_u8(bg).unwrap(),
                );
                if cache.intern(pair) == PairId::DEFAULT {
                    break 'outer;
                }
                filled += 1;
            }
        }

        assert_eq!(filled, CACHE_SIZE - 1);
        assert_eq!(cache.len(), CACHE_SIZE);

        // A known pair still resolves after overflow.
        let known = ColorPair::new(Color::from_u8(1).unwrap(), Color::from_u8(1).unwrap());
        assert_ne!(cache.intern(known), PairId::DEFAULT);
    }

    #[test]
    fn backend_limit_caps_capacity() {
        let mut cache = PairCache::new(2);
        let a = cache.intern(ColorPair::new(Color::White, Color::Blue));
        let b = cache.intern(ColorPair::new(Color::Blue, Color::White));

        assert_ne!(a, PairId::DEFAULT);
        assert_eq!(b, PairId::DEFAULT);
    }

    #[test]
    fn unknown_slot_reads_default() {
        let cache = PairCache::new(16);
        assert_eq!(cache.get(PairId(9)), ColorPair::NONE);
    }
}
