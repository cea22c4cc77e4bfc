//! Turning whatever the fetch layer hands over into a navigable document.
//!
//! [`Loader::load`] accepts an already parsed [`Document`], raw bytes, text or
//! a response, and answers with a document or `None` when the input doesn't
//! look like markup worth extracting from.

mod consts;
mod document;
pub mod error;
mod parse;

use std::borrow::Cow;

use exn::OptionExt;
use rinse_decode::{Decoder, Payload};
use scraper::Html;
use tracing::instrument;

pub use crate::document::Document;
use crate::error::{ErrorKind, Result};
use crate::parse::Job;

/// How many leading characters are inspected before parsing.
pub const DEFAULT_SNIFF_CHARS: usize = 50;
/// How many children the root of dubious markup needs to be believed.
pub const DEFAULT_DUBIOUS_MIN_CHILDREN: usize = 2;

/// Anything [`Loader::load`] accepts.
pub enum Input<'a> {
    /// Already parsed; returned as-is.
    Document(Document),
    /// Raw bytes of unknown encoding, possibly compressed.
    Bytes(Cow<'a, [u8]>),
    /// Already decoded markup.
    Text(Cow<'a, str>),
    /// A response-like object; its payload is decoded like [`Input::Bytes`].
    Response(&'a dyn Payload),
}
impl<'a> Input<'a> {
    pub fn response(response: &'a dyn Payload) -> Self {
        Input::Response(response)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Input::Document(_) => "document",
            Input::Bytes(_) => "bytes",
            Input::Text(_) => "text",
            Input::Response(_) => "response",
        }
    }
}
impl std::fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Input").field(&self.kind()).finish()
    }
}
impl From<Document> for Input<'_> {
    fn from(document: Document) -> Self {
        Input::Document(document)
    }
}
impl From<Html> for Input<'_> {
    fn from(html: Html) -> Self {
        Input::Document(Document::new(html))
    }
}
impl<'a> From<&'a [u8]> for Input<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Input::Bytes(Cow::Borrowed(bytes))
    }
}
impl From<Vec<u8>> for Input<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(Cow::Owned(bytes))
    }
}
impl<'a> From<&'a str> for Input<'a> {
    fn from(text: &'a str) -> Self {
        Input::Text(Cow::Borrowed(text))
    }
}
impl<'a> From<&'a String> for Input<'a> {
    fn from(text: &'a String) -> Self {
        Input::Text(Cow::Borrowed(text.as_str()))
    }
}
impl From<String> for Input<'_> {
    fn from(text: String) -> Self {
        Input::Text(Cow::Owned(text))
    }
}

/// Tunables for a [`Loader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoaderOptions {
    pub sniff_chars: usize,
    pub dubious_min_children: usize,
}
impl Default for LoaderOptions {
    fn default() -> Self {
        Self { sniff_chars: DEFAULT_SNIFF_CHARS, dubious_min_children: DEFAULT_DUBIOUS_MIN_CHILDREN }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Loader {
    decoder: Decoder,
    options: LoaderOptions,
}
impl Loader {
    pub fn new(decoder: Decoder, options: LoaderOptions) -> Self {
        Self { decoder, options }
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Load a document from any supported input.
    ///
    /// Returns `Ok(None)` when the input is empty or doesn't look like HTML.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::IncompatibleInput`] if a response carries no payload.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rinse_markup::Loader;
    ///
    /// let loader = Loader::default();
    /// let document = loader.load("<html><body><p>hello</p></body></html>").unwrap().unwrap();
    /// assert_eq!(document.text(), "hello");
    /// assert!(loader.load("plain text, no markup").unwrap().is_none());
    /// ```
    #[instrument(skip_all, fields(kind))]
    pub fn load<'a>(&self, input: impl Into<Input<'a>>) -> Result<Option<Document>> {
        let input = input.into();
        tracing::Span::current().record("kind", input.kind());
        let markup = match input {
            Input::Document(document) => return Ok(Some(document)),
            Input::Text(text) => text,
            Input::Bytes(bytes) => Cow::Owned(self.decoder.decode(&bytes)),
            Input::Response(response) => Cow::Owned(
                self.decoder
                    .decode_response(response)
                    .ok_or_raise(|| ErrorKind::IncompatibleInput("response without payload"))?,
            ),
        };
        Ok(self.parse(&markup))
    }

    /// Parse already decoded markup. See [`load`](Self::load).
    pub fn parse(&self, markup: &str) -> Option<Document> {
        parse::run(&Job::new(markup, self.options.sniff_chars, self.options.dubious_min_children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Response(Option<&'static [u8]>);
    impl Payload for Response {
        fn data(&self) -> Option<&[u8]> {
            self.0
        }
    }

    #[test]
    fn test_document_is_identity() {
        let loader = Loader::default();
        let document = loader.load("<div><p>a</p><p>b</p></div>").unwrap().unwrap();
        let reloaded = loader.load(document.clone()).unwrap().unwrap();
        assert_eq!(reloaded, document);
    }

    #[test]
    fn test_load_full_document() {
        let document = Loader::default().load("<html><body><p>hello</p></body></html>").unwrap().unwrap();
        assert_eq!(document.root().value().name(), "html");
        assert!(document.root().descendent_elements().count() >= 2);
    }

    #[rstest]
    #[case("")]
    #[case(" \n\t ")]
    #[case("plain text, no markup")]
    #[case("<div><p>only one child</p></div>")]
    #[case("<!DOCTYPE note SYSTEM \"Note.dtd\">\n<note>just a note</note>")]
    #[case("<body>just text</body>")]
    #[case("<body><p>x</p></body>")]
    #[case("<head><title>t</title></head>")]
    fn test_load_rejected(#[case] markup: &str) {
        assert!(Loader::default().load(markup).unwrap().is_none());
    }

    #[test]
    fn test_load_malformed_doctype() {
        let markup = "<!DOCTYPE html SYSTEM \"about:legacy-compat\" />\n<html><body><p>text</p></body></html>";
        let document = Loader::default().load(markup).unwrap().unwrap();
        assert_eq!(document.text(), "text");
    }

    #[test]
    fn test_load_bytes() {
        let bytes: &[u8] = b"<html><head><meta charset=\"iso-8859-1\"></head><body><p>caf\xE9</p></body></html>";
        let document = Loader::default().load(bytes).unwrap().unwrap();
        assert_eq!(document.text(), "café");
    }

    #[test]
    fn test_load_response() {
        let loader = Loader::default();
        let response = Response(Some(b"<html><body><p>ok</p></body></html>"));
        assert!(loader.load(Input::response(&response)).unwrap().is_some());
        let err = loader.load(Input::response(&Response(None))).unwrap_err();
        assert_eq!(*err, ErrorKind::IncompatibleInput("response without payload"));
    }

    #[test]
    fn test_custom_threshold() {
        let loader = Loader::new(Decoder::default(), LoaderOptions { dubious_min_children: 1, ..Default::default() });
        assert!(loader.load("<div><p>only one child</p></div>").unwrap().is_some());
    }
}
