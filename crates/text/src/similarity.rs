//! Fuzzy comparison of domain names.

use std::sync::LazyLock;

use crate::consts;
use crate::memo::Memo;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;
const SIMILARITY_CACHE: usize = 1_024;

static RATIOS: LazyLock<Memo<(String, String), f64>> = LazyLock::new(|| Memo::new(SIMILARITY_CACHE));

/// Whether two domain names look alike once their extensions are removed,
/// e.g. `bbc.com` and `bbc.co.uk`.
///
/// ```rust
/// use rinse_text::is_similar_domain;
///
/// assert!(is_similar_domain("bbc.com", "bbc.co.uk", 0.5));
/// assert!(!is_similar_domain("bbc.com", "nytimes.com", 0.5));
/// ```
pub fn is_similar_domain(reference: &str, candidate: &str, threshold: f64) -> bool {
    if reference == candidate {
        return true;
    }
    let key = (reference.to_string(), candidate.to_string());
    let ratio = RATIOS.get_or_insert_with(&key, || {
        similarity_ratio(
            &consts::STRIP_EXTENSION.replace(reference, ""),
            &consts::STRIP_EXTENSION.replace(candidate, ""),
        )
    });
    ratio >= threshold
}

/// Ratcliff/Obershelp similarity: twice the number of matching characters
/// divided by the total number of characters. Two empty strings are equal.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

/// Characters in the longest common block, plus (recursively) those to its
/// left and to its right.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, size) = longest_match(a, b);
    if size == 0 {
        return 0;
    }
    size + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + size..], &b[j + size..])
}

/// Start in `a`, start in `b` and length of the longest common block. Ties go
/// to the block starting earliest in `a`, then in `b`.
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut previous = vec![0; b.len() + 1];
    for (i, x) in a.iter().enumerate() {
        let mut current = vec![0; b.len() + 1];
        for (j, y) in b.iter().enumerate() {
            if x == y {
                let size = previous[j] + 1;
                current[j + 1] = size;
                if size > best.2 {
                    best = (i + 1 - size, j + 1 - size, size);
                }
            }
        }
        previous = current;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abcd", "bcde", 0.75)]
    #[case("abc", "abc", 1.0)]
    #[case("abc", "xyz", 0.0)]
    #[case("", "", 1.0)]
    #[case("", "abc", 0.0)]
    #[case("example", "sample", 10.0 / 13.0)]
    fn test_similarity_ratio(#[case] a: &str, #[case] b: &str, #[case] expected: f64) {
        assert!((similarity_ratio(a, b) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case("bbc.com", "bbc.co.uk", true)]
    #[case("example.org", "sample.net", true)]
    #[case("bbc.com", "nytimes.com", false)]
    #[case("localhost", "localhost", true)]
    fn test_is_similar_domain(#[case] reference: &str, #[case] candidate: &str, #[case] expected: bool) {
        assert_eq!(is_similar_domain(reference, candidate, DEFAULT_SIMILARITY_THRESHOLD), expected);
    }

    #[test]
    fn test_threshold() {
        assert!(is_similar_domain("example.org", "sample.net", 0.75));
        assert!(!is_similar_domain("example.org", "sample.net", 0.8));
        assert!(is_similar_domain("same.org", "same.org", 2.0));
    }
}
