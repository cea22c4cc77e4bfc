use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

selector!(BODY_SELECTOR, "body");
// Self-closing doctypes (`<!DOCTYPE html ... />`) confuse parsers; only ever
// matched against the first line.
regex!(DOCTYPE_TAG, r"(?i)^< ?! ?DOCTYPE.+?/ ?>");
// Only markup opening like this is parsed as a whole document; anything else
// is a fragment.
regex!(FULL_DOCUMENT, r"(?i)^\s*<(?:html|!doctype)");
// Markup that names its own byte encoding can't be parsed from a string.
regex!(XML_ENCODING_DECLARATION, r#"(?i)^\s*<\?xml[^>]*?\bencoding\s*=\s*["']?[a-z0-9_:.\-]+"#);
