//! Compression Operations

use crate::Compression;
use crate::error::{ErrorKind, Result};
#[cfg(feature = "brotli")]
use brotli::{CompressorWriter as BrotliEncoder, Decompressor as BrotliDecoder};
use bzip2::{Compression as BzCompression, read::MultiBzDecoder, write::BzEncoder};
use exn::ResultExt;
use flate2::{Compression as GzCompression, read::MultiGzDecoder, write::GzEncoder};
use std::io::{Read, Write};
use tracing::instrument;

// Compression only exists to build fixtures and round-trip checks, so the
// default levels are plenty.
const BZIP2_LEVEL: BzCompression = BzCompression::new(6);
const GZIP_LEVEL: GzCompression = GzCompression::new(6);
#[cfg(feature = "brotli")]
const BROTLI_LEVEL: u32 = 5;
#[cfg(feature = "brotli")]
const BROTLI_BUFFER_SIZE: usize = 4096;
#[cfg(feature = "brotli")]
const BROTLI_LG_WINDOW_SIZE: u32 = 22;

impl Compression {
    /// Compress a byte slice in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use rinse_compress::Compression;
    ///
    /// let compressed = Compression::Gzip.compress(b"Hello, world!").unwrap();
    /// assert_eq!(Compression::from_magic_bytes(&compressed), Compression::Gzip);
    /// ```
    #[instrument(skip(input), fields(format = %self, input_size = input.len(), output_size))]
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        match self {
            Compression::None => output.extend_from_slice(input),
            #[cfg(feature = "brotli")]
            Compression::Brotli => {
                let mut encoder =
                    BrotliEncoder::new(&mut output, BROTLI_BUFFER_SIZE, BROTLI_LEVEL, BROTLI_LG_WINDOW_SIZE);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                // Brotli doesn't have some sort of finish/flush method?!
                drop(encoder);
            },
            Compression::Bzip2 => {
                let mut encoder = BzEncoder::new(&mut output, BZIP2_LEVEL);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                encoder.finish().or_raise(|| ErrorKind::Io)?;
            },
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(&mut output, GZIP_LEVEL);
                encoder.write_all(input).or_raise(|| ErrorKind::Io)?;
                encoder.finish().or_raise(|| ErrorKind::Io)?;
            },
        }
        tracing::Span::current().record("output_size", output.len());
        Ok(output)
    }

    /// Decompress a byte slice in memory.
    ///
    /// Fails with [`ErrorKind::InvalidData`] when the input is not a complete,
    /// valid stream of this format.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rinse_compress::Compression;
    ///
    /// let original = b"Hello, world!";
    /// let compressed = Compression::Gzip.compress(original).unwrap();
    /// let decompressed = Compression::Gzip.decompress(&compressed).unwrap();
    /// assert_eq!(decompressed, original);
    /// ```
    #[instrument(skip(input), fields(format = %self, input_size = input.len(), output_size))]
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        match self {
            Compression::None => output.extend_from_slice(input),
            #[cfg(feature = "brotli")]
            Compression::Brotli => {
                let mut decoder = BrotliDecoder::new(input, BROTLI_BUFFER_SIZE);
                decoder.read_to_end(&mut output).or_raise(|| ErrorKind::InvalidData)?;
            },
            Compression::Bzip2 => {
                let mut decoder = MultiBzDecoder::new(input);
                decoder.read_to_end(&mut output).or_raise(|| ErrorKind::InvalidData)?;
            },
            Compression::Gzip => {
                let mut decoder = MultiGzDecoder::new(input);
                decoder.read_to_end(&mut output).or_raise(|| ErrorKind::InvalidData)?;
            },
        }
        tracing::Span::current().record("output_size", output.len());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case(Compression::None)]
    #[case(Compression::Bzip2)]
    #[case(Compression::Gzip)]
    #[cfg_attr(feature = "brotli", case(Compression::Brotli))]
    fn test_compress_decompress(#[case] format: Compression) {
        let original = "<html><body><p>Grüße aus Köln</p></body></html>".as_bytes();
        let compressed = format.compress(original).unwrap();
        assert_eq!(format.decompress(&compressed).unwrap(), original);
    }

    #[rstest]
    #[case(Compression::Bzip2)]
    #[case(Compression::Gzip)]
    #[cfg_attr(feature = "brotli", case(Compression::Brotli))]
    fn test_invalid_compressed_data(#[case] format: Compression) {
        let err = format.decompress(b"This is not compressed data").unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidData);
    }

    // Concatenated members/streams decode as one.
    #[rstest]
    #[case(Compression::Bzip2)]
    #[case(Compression::Gzip)]
    fn test_concatenated_streams(#[case] format: Compression) {
        let mut stream = format.compress(b"<p>first</p>").unwrap();
        stream.extend(format.compress(b"<p>second</p>").unwrap());
        assert_eq!(format.decompress(&stream).unwrap(), b"<p>first</p><p>second</p>");
    }

    #[test]
    fn test_truncated_gzip() {
        let compressed = Compression::Gzip.compress(b"Hello, world! Hello, world!").unwrap();
        let truncated = &compressed[..compressed.len() / 2];
        assert!(Compression::Gzip.decompress(truncated).is_err());
    }
}
