//! Best-effort decoding of fetched byte payloads into Unicode text.
//!
//! Web payloads arrive compressed or not, labelled correctly or not, and in
//! any encoding. [`Decoder::decode`] never fails: it decompresses, takes the
//! UTF-8 fast path when it can, asks its [detectors](Detect) for a list of
//! guesses, tries each guess in turn, and finally degrades to lossy UTF-8.

mod consts;
mod decompress;
pub mod detect;
pub mod error;
mod truncate;

use std::sync::Arc;

use encoding_rs::Encoding;
use exn::OptionExt;
use tracing::instrument;

pub use crate::decompress::decompress;
pub use crate::detect::{Declared, Detect, DetectorKind, Statistical};
use crate::error::{ErrorKind, Result};
pub use crate::truncate::{DEFAULT_PREFIX_BYTES, safe_html_truncate};

/// Anything that exposes a (possibly missing) byte payload, such as an HTTP
/// response handed over by the fetch layer.
pub trait Payload {
    /// The response body, or `None` if it was never read or already consumed.
    fn data(&self) -> Option<&[u8]>;
}
impl<P: Payload + ?Sized> Payload for &P {
    fn data(&self) -> Option<&[u8]> {
        (**self).data()
    }
}

/// Tunables for a [`Decoder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Attempt Brotli on payloads without gzip/bzip2 magic bytes.
    pub brotli: bool,
    /// How many leading bytes the detectors inspect first.
    pub prefix_bytes: usize,
    /// Which detectors to consult, in order.
    pub detectors: Vec<DetectorKind>,
}
impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            brotli: true,
            prefix_bytes: DEFAULT_PREFIX_BYTES,
            detectors: vec![DetectorKind::Declared, DetectorKind::Statistical],
        }
    }
}

/// Decompresses, detects the encoding of, and decodes byte payloads.
///
/// Cheap to clone; detectors are shared.
#[derive(Clone, Debug)]
pub struct Decoder {
    detectors: Vec<Arc<dyn Detect>>,
    brotli: bool,
}
impl Default for Decoder {
    fn default() -> Self {
        Self::new(&DecoderOptions::default())
    }
}
impl From<&DecoderOptions> for Decoder {
    fn from(options: &DecoderOptions) -> Self {
        Self::new(options)
    }
}
impl Decoder {
    pub fn new(options: &DecoderOptions) -> Self {
        Self {
            detectors: options.detectors.iter().map(|kind| Arc::from(kind.build(options.prefix_bytes))).collect(),
            brotli: options.brotli,
        }
    }

    /// Use exactly these detectors, in this order. An empty list is valid:
    /// anything that isn't UTF-8 then goes straight to the lossy fallback.
    pub fn with_detectors(mut self, detectors: Vec<Arc<dyn Detect>>) -> Self {
        self.detectors = detectors;
        self
    }

    pub fn with_brotli(mut self, brotli: bool) -> Self {
        self.brotli = brotli;
        self
    }

    /// Ordered, de-duplicated encoding guesses from every detector, excluding
    /// UTF-8 under any alias. Callers are expected to have ruled out UTF-8
    /// already; see [`detect_encoding`](Self::detect_encoding).
    #[instrument(level = "debug", skip(self, bytes), fields(input_size = bytes.len()))]
    pub fn guesses(&self, bytes: &[u8]) -> Vec<String> {
        let mut guesses: Vec<String> = Vec::new();
        for detector in &self.detectors {
            let Some(label) = detector.detect(bytes) else {
                continue;
            };
            tracing::trace!(detector = detector.name(), %label, "encoding guess");
            if !detect::is_utf8_alias(&label) && !guesses.contains(&label) {
                guesses.push(label);
            }
        }
        guesses
    }

    /// The encoding labels worth trying, most confident first. Valid UTF-8
    /// short-circuits to `["utf-8"]` without consulting any detector.
    pub fn detect_encoding(&self, bytes: &[u8]) -> Vec<String> {
        if is_utf8(bytes) {
            return vec!["utf-8".to_string()];
        }
        self.guesses(bytes)
    }

    /// Decode a payload into text. Never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use rinse_decode::Decoder;
    ///
    /// let decoder = Decoder::default();
    /// assert_eq!(decoder.decode("Grüße".as_bytes()), "Grüße");
    /// // Latin-1 declared in the markup
    /// let latin1 = b"<meta charset=\"iso-8859-1\"><p>Gr\xFC\xDFe</p>";
    /// assert!(decoder.decode(latin1).contains("Grüße"));
    /// ```
    #[instrument(skip(self, bytes), fields(input_size = bytes.len(), encoding))]
    pub fn decode(&self, bytes: &[u8]) -> String {
        let bytes = decompress(bytes, self.brotli);
        if let Ok(text) = std::str::from_utf8(&bytes) {
            tracing::Span::current().record("encoding", "utf-8");
            return text.to_string();
        }
        for label in self.guesses(&bytes) {
            match decode_with(&bytes, &label) {
                Ok(text) => {
                    tracing::Span::current().record("encoding", label.as_str());
                    return text;
                },
                Err(err) => tracing::warn!(%label, error = %err, "wrong encoding detected"),
            }
        }
        tracing::Span::current().record("encoding", "utf-8 (lossy)");
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Decode the payload of a response-like object. `None` when the response
    /// carries no payload.
    pub fn decode_response(&self, response: &(impl Payload + ?Sized)) -> Option<String> {
        response.data().map(|bytes| self.decode(bytes))
    }
}

/// Returns `true` when `bytes` are strictly valid UTF-8.
#[inline]
#[must_use]
pub fn is_utf8(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok()
}

/// Strictly decode `bytes` with the encoding named by `label`, honouring a
/// matching byte-order mark.
///
/// # Errors
///
/// - [`ErrorKind::UnknownEncoding`] if the label isn't a known encoding
/// - [`ErrorKind::Malformed`] if the bytes aren't valid in that encoding
pub fn decode_with(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.as_bytes()).ok_or_raise(|| ErrorKind::UnknownEncoding(label.to_string()))?;
    let skip = match Encoding::for_bom(bytes) {
        Some((bom, length)) if bom == encoding => length,
        _ => 0,
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[skip..])
        .map(|text| text.into_owned())
        .ok_or_raise(|| ErrorKind::Malformed(encoding.name()))
}
