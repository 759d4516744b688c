#![forbid(unsafe_code)]

//! Core: geometry and canonical input types for vintui.

pub mod event;
pub mod geometry;
pub mod logging;

pub use event::{Event, KeyCode, KeyEvent, Modifiers};
pub use geometry::{Rect, Size};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, trace, warn};
