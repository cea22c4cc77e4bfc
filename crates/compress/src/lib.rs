//! Decompression of fetched payloads with magic-byte format detection.
//!
//! Web servers routinely hand back compressed bodies regardless of what was
//! negotiated, so every payload is sniffed before decoding:
//!
//! - **Format detection** from magic bytes ([`Compression::from_magic_bytes`])
//! - **In-memory** decompression ([`Compression::decompress`]) and compression
//!   ([`Compression::compress`], mostly useful for building fixtures)
//!
//! Bzip2 and Gzip are always available. Brotli is behind the `brotli` feature;
//! it has no magic bytes, so it can only ever be *attempted*.

mod construct;
pub mod error;
mod ops;
mod util;

/// A supported compression format.
///
/// [`Brotli`](Self::Brotli) is only available when the `brotli` feature is
/// enabled. Defaults to [`None`](Self::None) (uncompressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed
    #[default]
    None,
    /// Brotli compression (no magic bytes)
    #[cfg(feature = "brotli")]
    Brotli,
    /// Bzip2 compression (`BZh`)
    Bzip2,
    /// Gzip compression (`1f 8b`)
    Gzip,
}

#[cfg(test)]
mod tests {
    use crate::Compression;

    #[test]
    fn compression_default() {
        assert_eq!(Compression::default(), Compression::None);
    }
}
