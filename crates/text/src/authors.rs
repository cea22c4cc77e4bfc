//! Canonicalization of author bylines.
//!
//! Bylines come in every shape imaginable: `"By JANE DOE 📰 (@jdoe)"`,
//! `"written by j.smith and m.müller"`, `"Staff Writer on March 5, 2024"`.
//! [`normalize_authors`] splits them into names and strips the decoration.

use std::borrow::Cow;
use std::fmt;

use regex::Captures;
use tracing::instrument;

use crate::consts;
use crate::sanitize::trim;

/// Names longer than this without a space or hyphen are almost certainly not
/// names.
const MAX_SINGLE_TOKEN_CHARS: usize = 50;

/// An ordered list of author names in which no name contains another.
///
/// Serialises to (and parses from) `"; "`-separated text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Authors(Vec<String>);
impl Authors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` unless it duplicates, contains, or is contained in a name
    /// already present. Returns whether it was added.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if name.is_empty() || self.0.iter().any(|known| known.contains(&name) || name.contains(known.as_str())) {
            return false;
        }
        self.0.push(name);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}
impl fmt::Display for Authors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}
impl From<&str> for Authors {
    /// Existing lists are trusted as they are: entries are not re-checked
    /// against each other.
    fn from(list: &str) -> Self {
        Self(list.split("; ").filter(|name| !name.is_empty()).map(str::to_string).collect())
    }
}

/// Merge the names found in `byline` into the `"; "`-separated `existing`
/// list.
///
/// URLs and e-mail addresses are not bylines, and a byline that yields no
/// usable name, leave `existing` untouched.
///
/// # Examples
///
/// ```rust
/// use rinse_text::normalize_authors;
///
/// assert_eq!(
///     normalize_authors(None, "written by jane doe and Max Müller").as_deref(),
///     Some("Jane Doe; Max Müller")
/// );
/// assert_eq!(normalize_authors(Some("Jane Doe"), "Jane").as_deref(), Some("Jane Doe"));
/// assert_eq!(normalize_authors(None, "https://example.org/staff"), None);
/// ```
#[instrument(level = "trace", ret)]
pub fn normalize_authors(existing: Option<&str>, byline: &str) -> Option<String> {
    if consts::AUTHOR_URL.is_match(byline) || consts::AUTHOR_EMAIL.is_match(byline) {
        return existing.map(str::to_string);
    }
    let mut authors = existing.map(Authors::from).unwrap_or_default();
    let known = authors.len();

    let mut byline = Cow::Borrowed(byline);
    if byline.contains("\\u") {
        byline = Cow::Owned(decode_unicode_escapes(&byline));
    }
    if byline.contains("&#") || byline.contains("&amp;") {
        byline = Cow::Owned(html_escape::decode_html_entities(&byline).into_owned());
    }
    let byline = consts::AUTHOR_REMOVE_HTML.replace_all(&byline, "");

    for candidate in consts::AUTHOR_SPLIT.split(&byline) {
        if let Some(name) = clean_name(candidate) {
            authors.insert(name);
        }
    }
    if authors.len() == known {
        return existing.map(str::to_string);
    }
    Some(authors.to_string())
}

/// Strip one split-off byline fragment down to a name.
fn clean_name(candidate: &str) -> Option<String> {
    let name = trim(candidate);
    let name = consts::AUTHOR_EMOJI_REMOVE.replace_all(&name, "");
    let name = consts::AUTHOR_TWITTER.replace_all(&name, "");
    let name = trim(&consts::AUTHOR_REPLACE_JOIN.replace_all(&name, " "));
    let name = consts::AUTHOR_REMOVE_NICKNAME.replace_all(&name, "");
    let name = consts::AUTHOR_REMOVE_SPECIAL.replace_all(&name, "");
    let name = consts::AUTHOR_PREFIX.replace(&name, "");
    let name = consts::AUTHOR_REMOVE_NUMBERS.replace(&name, "");
    let name = consts::AUTHOR_REMOVE_PREPOSITION.replace(&name, "");

    let improbable = !name.contains(' ') && !name.contains('-') && name.chars().count() >= MAX_SINGLE_TOKEN_CHARS;
    if name.is_empty() || improbable {
        return None;
    }
    match name.chars().next() {
        Some(first) if first.is_uppercase() => Some(name.into_owned()),
        _ => Some(title_case(&name)),
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if in_word {
            titled.extend(c.to_lowercase());
        } else {
            titled.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }
    titled
}

/// Decode literal `\uXXXX` escapes, pairing up surrogates. Escapes that don't
/// form a valid character are left as they are.
fn decode_unicode_escapes(text: &str) -> String {
    consts::AUTHOR_UNICODE_ESCAPE
        .replace_all(text, |captures: &Captures<'_>| {
            let escapes: Vec<&str> =
                [captures.get(1), captures.get(2)].into_iter().flatten().map(|hex| hex.as_str()).collect();
            let units: Vec<u16> = escapes.iter().filter_map(|hex| u16::from_str_radix(hex, 16).ok()).collect();
            if let [high @ 0xD800..=0xDBFF, low] = units[..]
                && let Some(Ok(c)) = char::decode_utf16([high, low]).next()
            {
                return c.to_string();
            }
            escapes
                .iter()
                .zip(units)
                .map(|(hex, unit)| char::from_u32(u32::from(unit)).map_or_else(|| format!("\\u{hex}"), String::from))
                .collect()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, "Written by John Smith, Jr. on March 5", Some("John Smith; Jr"))]
    #[case(None, "john smith and jane doe", Some("John Smith; Jane Doe"))]
    #[case(None, "Hans Meier und Eva Weber", Some("Hans Meier; Eva Weber"))]
    #[case(None, "By Peter Müller 📰", Some("Peter Müller"))]
    #[case(None, "Jane Doe (janedoe)", Some("Jane Doe"))]
    #[case(None, "Jane Doe @janedoe", Some("Jane Doe"))]
    #[case(None, "j.r.r. tolkien", Some("J R R Tolkien"))]
    #[case(None, "Anna Lee | Ben Ray / Cleo Ng", Some("Anna Lee; Ben Ray; Cleo Ng"))]
    #[case(None, "<a href=\"/staff/anna\">Anna Lee</a>", Some("Anna Lee"))]
    #[case(None, "\\u00c9mile Zola", Some("Émile Zola"))]
    #[case(None, "Ren&#233; Char", Some("René Char"))]
    #[case(None, "Tom &amp; Jerry", Some("Tom; Jerry"))]
    #[case(None, "Staff Writer on March 5, 2024", Some("Staff Writer"))]
    #[case(None, "@handle", None)]
    #[case(None, "", None)]
    #[case(None, "abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz", None)]
    #[case(None, "mailto@example.org", None)]
    #[case(Some("Jane Doe"), "Jane", Some("Jane Doe"))]
    #[case(Some("Jane"), "Jane Doe", Some("Jane"))]
    #[case(Some("Jane Doe"), "John Roe", Some("Jane Doe; John Roe"))]
    #[case(Some("Jane Doe"), "https://example.org/authors/john", Some("Jane Doe"))]
    #[case(Some("Jane Doe"), "HTTP://EXAMPLE.ORG", Some("Jane Doe"))]
    #[case(Some("Jane Doe"), "john@example.org", Some("Jane Doe"))]
    #[case(Some("Jane Doe"), "🎉🎉", Some("Jane Doe"))]
    fn test_normalize_authors(#[case] existing: Option<&str>, #[case] byline: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_authors(existing, byline).as_deref(), expected);
    }

    #[test]
    fn test_no_date_fragment() {
        let authors = normalize_authors(None, "Written by John Smith, Jr. on March 5").unwrap();
        assert!(authors.contains("John Smith"));
        assert!(!authors.contains("March"));
        assert!(!authors.contains('5'));
    }

    #[rstest]
    #[case("jane doe", "Jane Doe")]
    #[case("o'neil", "O'Neil")]
    #[case("JOHN", "John")]
    #[case("émile zola", "Émile Zola")]
    fn test_title_case(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(title_case(text), expected);
    }

    #[rstest]
    #[case("\\u00e9t\\u00e9", "été")]
    #[case("\\ud83d\\ude00!", "😀!")]
    #[case("\\ud83d alone", "\\ud83d alone")]
    #[case("\\ude00", "\\ude00")]
    #[case("no escapes", "no escapes")]
    fn test_decode_unicode_escapes(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(decode_unicode_escapes(text), expected);
    }

    #[test]
    fn test_authors_list() {
        let mut authors = Authors::from("Jane Doe; John Roe");
        assert_eq!(authors.len(), 2);
        assert!(!authors.insert("Doe"));
        assert!(!authors.insert("John Roe Jr"));
        assert!(authors.insert("Max Mustermann"));
        assert_eq!(authors.to_string(), "Jane Doe; John Roe; Max Mustermann");
        assert_eq!(Authors::from("").len(), 0);
    }
}
