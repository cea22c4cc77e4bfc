//! Line-level clean-up of extracted text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Captures;
use tracing::instrument;

use crate::consts;
use crate::memo::Memo;

pub const DEFAULT_CHAR_CACHE: usize = 16_384;
pub const DEFAULT_LINE_CACHE: usize = 1_024;
pub const DEFAULT_TRIM_CACHE: usize = 1_024;

static DEFAULT: LazyLock<Sanitizer> = LazyLock::new(Sanitizer::default);

/// Cache capacities for a [`Sanitizer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SanitizerOptions {
    pub char_cache: usize,
    pub line_cache: usize,
    pub trim_cache: usize,
}
impl Default for SanitizerOptions {
    fn default() -> Self {
        Self { char_cache: DEFAULT_CHAR_CACHE, line_cache: DEFAULT_LINE_CACHE, trim_cache: DEFAULT_TRIM_CACHE }
    }
}

/// Text clean-up with memoized hot paths.
///
/// The same boilerplate lines and the same handful of characters come up over
/// and over when processing a crawl, so per-character classification, whole
/// lines and trimmed strings are each kept in a bounded cache.
#[derive(Debug)]
pub struct Sanitizer {
    printable: Memo<char, bool>,
    lines: Memo<String, Option<String>>,
    trimmed: Memo<String, String>,
}
impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(SanitizerOptions::default())
    }
}
impl Sanitizer {
    pub fn new(options: SanitizerOptions) -> Self {
        Self {
            printable: Memo::new(options.char_cache),
            lines: Memo::new(options.line_cache),
            trimmed: Memo::new(options.trim_cache),
        }
    }

    /// The process-wide sanitizer behind the free functions of this crate.
    pub fn global() -> &'static Sanitizer {
        &DEFAULT
    }

    /// Empty every cache.
    pub fn clear(&self) {
        self.printable.clear();
        self.lines.clear();
        self.trimmed.clear();
    }

    fn is_printable(&self, c: char) -> bool {
        if c.is_ascii() {
            return !c.is_ascii_control();
        }
        self.printable.get_or_insert_with(&c, || {
            let mut buffer = [0; 4];
            !consts::NON_PRINTABLE.is_match(c.encode_utf8(&mut buffer))
        })
    }

    /// Drop every character that is neither printable nor whitespace.
    pub fn remove_control_characters<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let keep = |c: char| is_space(c) || self.is_printable(c);
        if text.chars().all(keep) {
            return Cow::Borrowed(text);
        }
        Cow::Owned(text.chars().filter(|&c| keep(c)).collect())
    }

    /// Collapse every whitespace run to a single space and strip both ends.
    pub fn trim(&self, text: &str) -> String {
        self.trimmed.get_or_insert_with(text, || trim_uncached(text))
    }

    /// Clean a single line; `None` when nothing but whitespace remains.
    pub fn line_processing(&self, line: &str) -> Option<String> {
        self.lines.get_or_insert_with(line, || {
            let line = self.remove_control_characters(line);
            let line = line.replace("&#13;", "\r").replace("&#10;", "\n").replace("&nbsp;", "\u{A0}");
            let line = trim_uncached(&join_broken_lines(&line));
            (!line.is_empty()).then_some(line)
        })
    }

    /// Clean every line of `text`, dropping those left empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rinse_text::Sanitizer;
    ///
    /// let sanitizer = Sanitizer::default();
    /// let text = "  Hello\u{200B}   world \r\n\n\t\n Second&nbsp;line ";
    /// assert_eq!(sanitizer.sanitize(text), "Hello world\nSecond line");
    /// ```
    #[instrument(level = "debug", skip_all, fields(input_size = text.len(), output_size))]
    pub fn sanitize(&self, text: &str) -> String {
        let sanitized = text
            .lines()
            .flat_map(split_unicode_lines)
            .filter_map(|line| self.line_processing(line))
            .collect::<Vec<_>>()
            .join("\n");
        tracing::Span::current().record("output_size", sanitized.len());
        sanitized
    }
}

/// [`str::lines`] only knows `\n` and `\r\n`.
fn split_unicode_lines(line: &str) -> impl Iterator<Item = &str> {
    line.split(['\r', '\u{0B}', '\u{0C}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{85}', '\u{2028}', '\u{2029}'])
}

/// Replace newlines with spaces unless they follow punctuation or a tag end.
fn join_broken_lines(text: &str) -> Cow<'_, str> {
    consts::LINE_BREAK.replace_all(text, |captures: &Captures<'_>| match captures.get(1) {
        Some(end) => format!("{}\n", end.as_str()),
        None => " ".to_string(),
    })
}

/// Unicode whitespace plus the ASCII information separators, which
/// [`char::is_whitespace`] leaves out.
fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

fn trim_uncached(text: &str) -> String {
    text.split(is_space).filter(|word| !word.is_empty()).collect::<Vec<_>>().join(" ")
}

/// [`Sanitizer::sanitize`] with the process-wide caches.
pub fn sanitize(text: &str) -> String {
    DEFAULT.sanitize(text)
}

/// [`Sanitizer::line_processing`] with the process-wide caches.
pub fn line_processing(line: &str) -> Option<String> {
    DEFAULT.line_processing(line)
}

/// [`Sanitizer::trim`] with the process-wide caches.
///
/// ```rust
/// assert_eq!(rinse_text::trim("  a   b\n c "), "a b c");
/// assert_eq!(rinse_text::trim(""), "");
/// ```
pub fn trim(text: &str) -> String {
    DEFAULT.trim(text)
}

/// [`Sanitizer::remove_control_characters`] with the process-wide caches.
pub fn remove_control_characters(text: &str) -> Cow<'_, str> {
    DEFAULT.remove_control_characters(text)
}

/// Clean a comma-separated tag list: unescape entities, collapse whitespace,
/// drop quotes and empty entries.
///
/// ```rust
/// assert_eq!(rinse_text::normalize_tags("Tech, , AI, \"Tech\""), "Tech, AI, Tech");
/// ```
pub fn normalize_tags(tags: &str) -> String {
    let tags = trim(&html_escape::decode_html_entities(tags));
    let tags = consts::QUOTES.replace_all(&tags, "");
    tags.split(", ").filter(|tag| !tag.is_empty()).collect::<Vec<_>>().join(", ")
}
