//! Configuration Error Types

use derive_more::{Display, Error};

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A source couldn't be read or doesn't match the schema; fix the file or
    /// environment variable named by the cause.
    #[display("failed to load configuration")]
    Load,
    /// The file extension isn't one of `toml`, `yaml`, `yml` or `json`.
    #[display("unsupported configuration format: {_0}")]
    UnsupportedFormat(#[error(not(source))] String),
    /// A value was read but is out of range.
    #[display("invalid configuration value: {_0}")]
    Invalid(#[error(not(source))] &'static str),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // A file could be mid-write; everything else needs a human.
        matches!(self, ErrorKind::Load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_display() {
        assert_eq!(ErrorKind::Invalid("text.line_cache").to_string(), "invalid configuration value: text.line_cache");
        assert_eq!(ErrorKind::UnsupportedFormat("ini".to_string()).to_string(), "unsupported configuration format: ini");
    }

    #[test]
    fn error_kind_retryable() {
        assert!(ErrorKind::Load.is_retryable());
        assert!(!ErrorKind::Invalid("decode.prefix_bytes").is_retryable());
        assert!(!ErrorKind::UnsupportedFormat("ini".to_string()).is_retryable());
    }
}
