//! Encoding detectors.
//!
//! A detector answers one question: "given these bytes, which encoding label
//! is most likely?" Detectors are optional and composable; a [`Decoder`]
//! may carry zero, one or several of them, and asks each in turn.
//!
//! [`Decoder`]: crate::Decoder

use std::fmt::Debug;
use std::str::FromStr;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use tracing::instrument;

use crate::error::{Error, ErrorKind};
use crate::{DEFAULT_PREFIX_BYTES, consts, is_utf8, safe_html_truncate};

/// Something that can guess the encoding of a byte buffer.
pub trait Detect: Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the best-guess encoding label (lower-cased), or `None` when the
    /// detector has no opinion.
    fn detect(&self, bytes: &[u8]) -> Option<String>;
}

/// Built-in detector implementations, selectable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DetectorKind {
    /// Byte-order marks and in-document declarations (`<meta charset>`,
    /// `<?xml encoding?>`).
    Declared,
    /// Frequency analysis with `chardetng`.
    Statistical,
}
impl DetectorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorKind::Declared => "declared",
            DetectorKind::Statistical => "statistical",
        }
    }

    /// Build the detector, sniffing at most `prefix` bytes before falling back
    /// to the whole buffer.
    pub fn build(&self, prefix: usize) -> Box<dyn Detect> {
        match self {
            DetectorKind::Declared => Box::new(Declared { prefix }),
            DetectorKind::Statistical => Box::new(Statistical { prefix }),
        }
    }
}
impl FromStr for DetectorKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "declared" => Ok(DetectorKind::Declared),
            "statistical" | "chardet" => Ok(DetectorKind::Statistical),
            _ => exn::bail!(ErrorKind::UnknownDetector(s.to_string())),
        }
    }
}

/// Statistical detection with `chardetng`.
///
/// Analyses a bounded prefix first. The whole buffer is analysed instead when
/// `chardetng` is not confident about the prefix, or when the prefix is valid
/// UTF-8 and so says nothing about which legacy encoding the rest uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Statistical {
    prefix: usize,
}
impl Default for Statistical {
    fn default() -> Self {
        Self { prefix: DEFAULT_PREFIX_BYTES }
    }
}
impl Statistical {
    pub fn new(prefix: usize) -> Self {
        Self { prefix }
    }

    fn assess(bytes: &[u8]) -> (&'static Encoding, bool) {
        let mut detector = EncodingDetector::new();
        detector.feed(bytes, true);
        // UTF-8 has already been ruled out by the caller.
        detector.guess_assess(None, false)
    }
}
impl Detect for Statistical {
    fn name(&self) -> &'static str {
        DetectorKind::Statistical.as_str()
    }

    #[instrument(level = "trace", skip(bytes), fields(input_size = bytes.len()))]
    fn detect(&self, bytes: &[u8]) -> Option<String> {
        let prefix = safe_html_truncate(bytes, self.prefix);
        let (mut encoding, confident) = Self::assess(prefix);
        if prefix.len() < bytes.len() && (!confident || is_utf8(prefix)) {
            encoding = Self::assess(bytes).0;
        }
        Some(encoding.name().to_lowercase())
    }
}

/// Detection from what the document says about itself: a byte-order mark,
/// an XML declaration or a `<meta>` charset.
///
/// Declarations are expected near the top of the document, so only a
/// bounded prefix is searched first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Declared {
    prefix: usize,
}
impl Default for Declared {
    fn default() -> Self {
        Self { prefix: DEFAULT_PREFIX_BYTES }
    }
}
impl Declared {
    pub fn new(prefix: usize) -> Self {
        Self { prefix }
    }

    fn sniff(bytes: &[u8]) -> Option<String> {
        if let Some((encoding, _)) = Encoding::for_bom(bytes) {
            return Some(encoding.name().to_lowercase());
        }
        [&consts::XML_DECLARATION, &consts::META_CHARSET]
            .into_iter()
            .find_map(|regex| regex.captures(bytes))
            .and_then(|captures| captures.get(1))
            .map(|label| String::from_utf8_lossy(label.as_bytes()).to_lowercase())
    }
}
impl Detect for Declared {
    fn name(&self) -> &'static str {
        DetectorKind::Declared.as_str()
    }

    #[instrument(level = "trace", skip(bytes), fields(input_size = bytes.len()))]
    fn detect(&self, bytes: &[u8]) -> Option<String> {
        let prefix = safe_html_truncate(bytes, self.prefix);
        Self::sniff(prefix).or_else(|| if prefix.len() < bytes.len() { Self::sniff(bytes) } else { None })
    }
}

/// Returns `true` when `label` names UTF-8 under any of its aliases.
pub(crate) fn is_utf8_alias(label: &str) -> bool {
    label == "utf_8" || Encoding::for_label(label.as_bytes()) == Some(UTF_8)
}
