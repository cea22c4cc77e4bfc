//! Small collection helpers.

use std::collections::HashSet;
use std::hash::Hash;

/// Remove duplicates, keeping the first occurrence of each item in order.
///
/// ```rust
/// assert_eq!(rinse_text::uniquify(["b", "a", "b", "c", "a"]), vec!["b", "a", "c"]);
/// ```
pub fn uniquify<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.clone())).collect()
}

/// Lazily split `items` into `Vec`s of `size` items; the last one may be
/// shorter. A size of zero yields nothing.
///
/// ```rust
/// let chunks: Vec<_> = rinse_text::make_chunks(1..=5, 2).collect();
/// assert_eq!(chunks, vec![vec![1, 2], vec![3, 4], vec![5]]);
/// ```
pub fn make_chunks<I: IntoIterator>(items: I, size: usize) -> Chunks<I::IntoIter> {
    Chunks { items: items.into_iter(), size }
}

/// Iterator returned by [`make_chunks`].
#[derive(Clone, Debug)]
pub struct Chunks<I> {
    items: I,
    size: usize,
}
impl<I: Iterator> Iterator for Chunks<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<_> = self.items.by_ref().take(self.size).collect();
        (!chunk.is_empty()).then_some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_uniquify() {
        assert_eq!(uniquify(vec![3, 1, 3, 2, 1]), vec![3, 1, 2]);
        assert!(uniquify(Vec::<String>::new()).is_empty());
    }

    #[rstest]
    #[case(6, 3, 2)]
    #[case(7, 3, 3)]
    #[case(0, 3, 0)]
    #[case(5, 10, 1)]
    #[case(5, 0, 0)]
    fn test_make_chunks(#[case] len: usize, #[case] size: usize, #[case] chunks: usize) {
        let collected: Vec<Vec<usize>> = make_chunks(0..len, size).collect();
        assert_eq!(collected.len(), chunks);
        assert_eq!(collected.concat(), if size == 0 { vec![] } else { (0..len).collect::<Vec<_>>() });
    }

    #[test]
    fn test_make_chunks_is_lazy() {
        let mut chunks = make_chunks((0..).map(|n| n * 2), 2);
        assert_eq!(chunks.next(), Some(vec![0, 2]));
        assert_eq!(chunks.next(), Some(vec![4, 6]));
    }
}
