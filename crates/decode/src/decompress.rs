use std::borrow::Cow;

use rinse_compress::Compression;
use tracing::instrument;

/// Undo transport compression, if any.
///
/// Gzip and bzip2 announce themselves through magic bytes, so a failure to
/// decompress them is worth a warning. Brotli doesn't, so when `brotli` is
/// set it is attempted on everything else and a failure simply means the
/// payload wasn't Brotli. Either way the original bytes are returned on
/// failure: corrupt compression is never fatal.
#[instrument(level = "debug", skip(bytes), fields(input_size = bytes.len(), format))]
pub fn decompress(bytes: &[u8], brotli: bool) -> Cow<'_, [u8]> {
    let format = Compression::from_magic_bytes(bytes);
    if format.is_self_describing() {
        tracing::Span::current().record("format", format.as_str());
        return match format.decompress(bytes) {
            Ok(decompressed) => Cow::Owned(decompressed),
            Err(err) => {
                tracing::warn!(%format, error = %err, "invalid compressed payload, using it as-is");
                Cow::Borrowed(bytes)
            },
        };
    }
    // A leading 0xFF byte is already a complete, empty Brotli stream, which
    // would swallow UTF-16LE payloads whole.
    #[cfg(feature = "brotli")]
    if brotli
        && !bytes.is_empty()
        && let Ok(decompressed) = Compression::Brotli.decompress(bytes)
        && !decompressed.is_empty()
    {
        tracing::Span::current().record("format", Compression::Brotli.as_str());
        return Cow::Owned(decompressed);
    }
    #[cfg(not(feature = "brotli"))]
    let _ = brotli;
    Cow::Borrowed(bytes)
}
