use crate::Compression;
use std::fmt::{Display, Formatter, Result as FmtResult};

impl Display for Compression {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for Compression {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl Compression {
    /// Returns the short name of the format (for logging).
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            #[cfg(feature = "brotli")]
            Compression::Brotli => "brotli",
            Compression::Bzip2 => "bzip2",
            Compression::Gzip => "gzip",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;

    #[rstest]
    #[case(Compression::None, "none")]
    #[case(Compression::Bzip2, "bzip2")]
    #[case(Compression::Gzip, "gzip")]
    #[cfg_attr(feature = "brotli", case(Compression::Brotli, "brotli"))]
    fn test_display(#[case] format: Compression, #[case] expected: &str) {
        assert_eq!(format.to_string(), expected);
        assert_eq!(format.as_ref(), expected);
    }
}
