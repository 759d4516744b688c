#![forbid(unsafe_code)]

//! Error type for fallible toolkit operations.
//!
//! The toolkit rarely errors: impossible geometry hides widgets instead of
//! failing, and bad lookups return `None`. What remains is terminal I/O
//! and a handful of hard argument errors.

use std::fmt;
use std::io;

/// Failures surfaced by creation and the main loop.
#[derive(Debug)]
pub enum Error {
    /// The terminal backend failed.
    Backend(io::Error),
    /// A grid was created or resized with a non-positive dimension.
    InvalidGridSize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend(err) => write!(f, "terminal backend error: {err}"),
            Self::InvalidGridSize => write!(f, "grid dimensions must be positive"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            Self::InvalidGridSize => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Backend(err)
    }
}
