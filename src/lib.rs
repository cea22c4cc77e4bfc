//! Normalization and sanitization of untrusted web documents.
//!
//! Fetched pages arrive as bytes in an unknown, sometimes mislabelled encoding,
//! possibly compressed, with markup anywhere between pristine and barely
//! HTML. [`Pipeline`] turns them into a document tree and clean text fields
//! for downstream extraction:
//!
//! ```rust
//! use rinse::Pipeline;
//!
//! let pipeline = Pipeline::default();
//! let html = pipeline.decode(b"<meta charset=\"iso-8859-1\"><html><body><p>Caf\xE9 &amp; more</p></body></html>");
//! let document = pipeline.load(html.as_str()).unwrap().expect("plausible HTML");
//! assert_eq!(pipeline.sanitize(&document.text()), "Café & more");
//! assert_eq!(pipeline.normalize_authors(None, "By jane doe").as_deref(), Some("Jane Doe"));
//! ```

use std::borrow::Cow;

use tracing::instrument;

pub use rinse_config::{Config, ConfigLoader};
pub use rinse_decode::{Decoder, DecoderOptions, Detect, DetectorKind, Payload};
pub use rinse_markup::{Document, Input, Loader, LoaderOptions};
pub use rinse_text::{Authors, Form, Sanitizer, SanitizerOptions};
pub use {rinse_config as config, rinse_decode as decode, rinse_markup as markup, rinse_text as text};

/// Every stage of input normalization behind one shareable value.
///
/// `Pipeline` is `Send + Sync`; share one across worker threads so they share
/// its caches.
#[derive(Debug)]
pub struct Pipeline {
    loader: Loader,
    sanitizer: Sanitizer,
    form: Form,
}
impl Default for Pipeline {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
impl Pipeline {
    pub fn from_config(config: &Config) -> Self {
        let decoder = Decoder::new(&config.decode.options());
        Self {
            loader: Loader::new(decoder, config.markup.options()),
            sanitizer: Sanitizer::new(config.text.options()),
            form: config.text.unicode_form,
        }
    }

    /// Build from [`Config::load`]: defaults, the user's configuration file
    /// and `RINSE_*` environment variables.
    pub fn from_env() -> rinse_config::error::Result<Self> {
        Ok(Self::from_config(&Config::load()?))
    }

    pub fn decoder(&self) -> &Decoder {
        self.loader.decoder()
    }

    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// See [`Decoder::decode`].
    pub fn decode(&self, bytes: &[u8]) -> String {
        self.decoder().decode(bytes)
    }

    /// See [`Decoder::decode_response`].
    pub fn decode_response(&self, response: &(impl Payload + ?Sized)) -> Option<String> {
        self.decoder().decode_response(response)
    }

    /// The text of any loadable input. Text is passed through untouched,
    /// bytes and responses are decoded, documents are serialised.
    #[instrument(skip_all)]
    pub fn decode_input<'a>(&self, input: impl Into<Input<'a>>) -> Option<Cow<'a, str>> {
        match input.into() {
            Input::Text(text) => Some(text),
            Input::Bytes(bytes) => Some(Cow::Owned(self.decode(&bytes))),
            Input::Response(response) => self.decode_response(response).map(Cow::Owned),
            Input::Document(document) => Some(Cow::Owned(document.html().html())),
        }
    }

    /// See [`Loader::load`].
    pub fn load<'a>(&self, input: impl Into<Input<'a>>) -> rinse_markup::error::Result<Option<Document>> {
        self.loader.load(input)
    }

    /// See [`Sanitizer::sanitize`].
    pub fn sanitize(&self, text: &str) -> String {
        self.sanitizer.sanitize(text)
    }

    /// See [`Sanitizer::line_processing`].
    pub fn line_processing(&self, line: &str) -> Option<String> {
        self.sanitizer.line_processing(line)
    }

    /// See [`Sanitizer::trim`].
    pub fn trim(&self, text: &str) -> String {
        self.sanitizer.trim(text)
    }

    /// See [`rinse_text::normalize_tags`].
    pub fn normalize_tags(&self, tags: &str) -> String {
        rinse_text::normalize_tags(tags)
    }

    /// See [`rinse_text::normalize_unicode`].
    pub fn normalize_unicode(&self, text: &str, form: Form) -> String {
        rinse_text::normalize_unicode(text, form)
    }

    /// [`normalize_unicode`](Self::normalize_unicode) with the configured form.
    pub fn normalize(&self, text: &str) -> String {
        rinse_text::normalize_unicode(text, self.form)
    }

    /// See [`rinse_text::normalize_authors`].
    pub fn normalize_authors(&self, existing: Option<&str>, byline: &str) -> Option<String> {
        rinse_text::normalize_authors(existing, byline)
    }

    /// Empty the caches of this pipeline and the process-wide ones; results
    /// are unaffected.
    pub fn clear_caches(&self) {
        self.sanitizer.clear();
        Sanitizer::global().clear();
    }
}
