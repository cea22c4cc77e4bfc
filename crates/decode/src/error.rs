//! Decoding Error Types
//!
//! These errors never escape [`Decoder::decode`](crate::Decoder::decode): each
//! one marks a single failed attempt in the guess cascade, which is logged and
//! skipped. They are public for callers that want to decode with an explicit
//! label through [`decode_with`](crate::decode_with).

use derive_more::{Display, Error};

/// A decoding error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The label does not name any encoding known to the WHATWG registry.
    /// Try the next guess.
    #[display("unknown encoding: {_0}")]
    UnknownEncoding(#[error(not(source))] String),
    /// The bytes contain sequences that are invalid in this encoding.
    /// Try the next guess.
    #[display("malformed input for encoding: {_0}")]
    Malformed(#[error(not(source))] &'static str),
    /// A detector name in configuration is not one of the built-in detectors.
    #[display("unknown detector: {_0}")]
    UnknownDetector(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // The same bytes and the same label give the same answer every time.
        false
    }
}
