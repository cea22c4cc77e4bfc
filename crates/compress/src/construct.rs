use crate::Compression;

const BZIP2_MAGIC: [u8; 3] = [0x42, 0x5A, 0x68];
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

impl From<&[u8]> for Compression {
    fn from(value: &[u8]) -> Self {
        Compression::from_magic_bytes(value)
    }
}
impl Compression {
    /// Detect compression format from magic bytes.
    ///
    /// Returns the `None` variant if no magic bytes match or if the input is
    /// too short to detect any format. Brotli is never returned: it has no
    /// magic bytes.
    #[must_use]
    pub fn from_magic_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&GZIP_MAGIC) {
            return Compression::Gzip;
        }
        if bytes.starts_with(&BZIP2_MAGIC) {
            return Compression::Bzip2;
        }
        Compression::None
    }

    /// Returns `true` when the format announces itself through magic bytes,
    /// so that a failure to decompress is worth reporting.
    #[inline]
    #[must_use]
    pub fn is_self_describing(&self) -> bool {
        matches!(self, Compression::Bzip2 | Compression::Gzip)
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;

    #[rstest]
    #[case(b"<!DOCTYPE html>", Compression::None)]
    #[case(b"", Compression::None)]
    #[case(&[0x1F], Compression::None)]
    #[case(&[0x42, 0x5A, 0x68, 0x39], Compression::Bzip2)]
    #[case(&[0x1F, 0x8B, 0x08, 0x00], Compression::Gzip)]
    fn test_from_magic_bytes(#[case] bytes: &[u8], #[case] expected: Compression) {
        assert_eq!(Compression::from_magic_bytes(bytes), expected);
        assert_eq!(<&[u8] as Into<Compression>>::into(bytes), expected);
    }

    #[rstest]
    #[case(Compression::None, false)]
    #[case(Compression::Bzip2, true)]
    #[case(Compression::Gzip, true)]
    #[cfg_attr(feature = "brotli", case(Compression::Brotli, false))]
    fn test_is_self_describing(#[case] format: Compression, #[case] expected: bool) {
        assert_eq!(format.is_self_describing(), expected);
    }
}
