//! Loading Error Types
//!
//! Broken markup is never an error: the loader answers `None` for anything it
//! cannot turn into a plausible tree. The only failure is handing it something
//! that isn't markup at all.

use derive_more::{Display, Error};

/// A loading error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for loading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input can't be loaded at all; fix the call site.
    #[display("incompatible input: {_0}")]
    IncompatibleInput(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
