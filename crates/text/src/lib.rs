//! Hygiene for text pulled out of web pages: control characters, broken
//! lines, stray whitespace, Unicode forms, tag lists and author bylines.
//!
//! The free functions share one process-wide [`Sanitizer`]; build your own to
//! size (or disable) its caches.

pub mod authors;
mod consts;
pub mod error;
pub mod memo;
mod normalize;
mod sanitize;
mod similarity;
mod util;

pub use crate::authors::{Authors, normalize_authors};
pub use crate::memo::Memo;
pub use crate::normalize::{Form, normalize_unicode};
pub use crate::sanitize::{
    DEFAULT_CHAR_CACHE, DEFAULT_LINE_CACHE, DEFAULT_TRIM_CACHE, Sanitizer, SanitizerOptions, line_processing,
    normalize_tags, remove_control_characters, sanitize, trim,
};
pub use crate::similarity::{DEFAULT_SIMILARITY_THRESHOLD, is_similar_domain, similarity_ratio};
pub use crate::util::{Chunks, make_chunks, uniquify};
