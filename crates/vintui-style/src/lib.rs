#![forbid(unsafe_code)]

//! Color model and pair interning for vintui.

pub mod color;
pub mod pair_cache;

pub use color::{Color, ColorPair};
pub use pair_cache::{PairCache, PairId, CACHE_SIZE};
