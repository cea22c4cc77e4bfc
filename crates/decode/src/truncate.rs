//! Bounded prefixes of raw markup for cheap encoding sniffing.

use memchr::memrchr;

/// How many leading bytes the detectors look at before falling back to the
/// whole buffer.
pub const DEFAULT_PREFIX_BYTES: usize = 15_000;

/// Truncates raw markup bytes to approximately `max_bytes` while ensuring
/// the cut point is at a safe boundary (not mid-tag or mid-entity).
///
/// Operates on raw bytes, since the encoding isn't known yet. The tag and
/// entity markers (`<`, `>`, `&`, `;`) are all ASCII-range bytes, so
/// searching is safe in every ASCII-compatible encoding.
///
/// # Examples
///
/// ```rust
/// use rinse_decode::safe_html_truncate;
/// let html = b"<div>Hello World</div>";
/// // Will truncate at a safe boundary, not mid-tag
/// assert_eq!(safe_html_truncate(html, 10).len(), 10);
/// assert_eq!(safe_html_truncate(html, 18).len(), 16)
/// ```
pub fn safe_html_truncate(html: &[u8], max_bytes: usize) -> &[u8] {
    if html.len() <= max_bytes {
        return html;
    }
    let candidate = &html[..max_bytes];
    let open_tag_match = memrchr(b'<', candidate);
    let close_tag_match = memrchr(b'>', candidate);
    if let Some(open_tag_position) = open_tag_match
        && close_tag_match.map(|gt| gt < open_tag_position).unwrap_or(true)
    {
        return &candidate[..open_tag_position];
    }
    let start_entity_match = memrchr(b'&', candidate);
    let end_entity_match = memrchr(b';', candidate);
    if let Some(amp_pos) = start_entity_match
        && end_entity_match.map(|semi| semi < amp_pos).unwrap_or(true)
    {
        return &candidate[..amp_pos];
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_truncation_needed() {
        let html = b"<div>Hello</div>";
        assert_eq!(safe_html_truncate(html, 100), html);
    }

    #[test]
    fn does_not_cut_mid_meta() {
        let html = b"<head><meta charset=\"windows-1251\"></head>";
        let result = safe_html_truncate(html, 20);
        assert_eq!(result, b"<head>");
    }

    #[test]
    fn handles_entities() {
        let html = b"<p>Hello &amp; World</p>";
        let result = safe_html_truncate(html, 12);
        assert_eq!(result, b"<p>Hello ");
    }

    #[test]
    fn handles_non_utf8() {
        let html = b"<p>Hello \xe9\xe8\xe0 and more</p>";
        let result = safe_html_truncate(html, 14);
        assert_eq!(result.len(), 14);
    }

    #[test]
    fn zero_max_bytes() {
        assert!(safe_html_truncate(b"<div>Hello</div>", 0).is_empty());
    }
}
