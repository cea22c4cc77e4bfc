use regex::bytes::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Both are matched against raw bytes of unknown encoding, so Unicode mode is
// disabled; only the ASCII-compatible part of the declaration matters.
regex!(XML_DECLARATION, r#"(?i-u)<\?xml[^>]*?encoding\s*=\s*["']?([a-z0-9_:.\-]+)"#);
regex!(META_CHARSET, r#"(?i-u)<meta[^>]+?charset\s*=\s*["']?([a-z0-9_:.\-]+)"#);

