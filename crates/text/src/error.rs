//! Text Error Types
//!
//! Cleaning text never fails; errors only come from parsing names of options.

use derive_more::{Display, Error};

/// A text error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for text operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Not one of `nfc`, `nfd`, `nfkc` or `nfkd`.
    #[display("unknown unicode normalization form: {_0}")]
    UnknownForm(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::UnknownForm("nfx".to_string()).to_string(), "unknown unicode normalization form: nfx");
        assert!(!ErrorKind::UnknownForm("nfx".to_string()).is_retryable());
    }
}
