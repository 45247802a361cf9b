use std::cmp::min;
use std::fmt;

/// An owned slice of a full key: the bytes attributable to the edge between
/// a node and its parent. Immutable once built; splits and joins allocate.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Fragment {
    data: Box<[u8]>,
}

impl Fragment {
    pub(crate) fn empty() -> Self {
        Self { data: Box::from(&[][..]) }
    }

    pub(crate) fn from_slice(src: &[u8]) -> Self {
        Self { data: Box::from(src) }
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    #[inline(always)]
    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline(always)]
    pub(crate) fn at(&self, pos: usize) -> u8 {
        assert!(pos < self.data.len());
        self.data[pos]
    }

    /// First byte, i.e. the dispatch byte in the parent's child map.
    #[inline(always)]
    pub(crate) fn first(&self) -> Option<u8> {
        self.data.first().copied()
    }

    /// The fragment truncated to its first `length` bytes.
    pub(crate) fn before(&self, length: usize) -> Self {
        assert!(length <= self.data.len());
        Fragment::from_slice(&self.data[..length])
    }

    /// The fragment with its first `start` bytes dropped.
    pub(crate) fn after(&self, start: usize) -> Self {
        assert!(start <= self.data.len());
        Fragment::from_slice(&self.data[start..])
    }

    /// `self` followed by `other`. Used when an erase collapse folds a
    /// single-child node into its child.
    pub(crate) fn join(&self, other: &Self) -> Self {
        let mut data = Vec::with_capacity(self.data.len() + other.data.len());
        data.extend_from_slice(&self.data);
        data.extend_from_slice(&other.data);
        Self { data: data.into_boxed_slice() }
    }

    pub(crate) fn common_prefix_len(&self, slice: &[u8]) -> usize {
        let len = min(self.data.len(), slice.len());
        let mut idx = 0;
        while idx < len {
            if self.data[idx] != slice[idx] {
                break;
            }
            idx += 1;
        }
        idx
    }

    /// True when `slice` begins with the whole fragment.
    pub(crate) fn matches_start_of(&self, slice: &[u8]) -> bool {
        slice.len() >= self.data.len() && slice[..self.data.len()] == *self.data
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.data) {
            Ok(s) => write!(f, "Fragment({s:?})"),
            Err(_) => write!(f, "Fragment({:?})", self.data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Fragment;

    #[test]
    fn split_and_join() {
        let frag = Fragment::from_slice(b"rother");
        assert_eq!(frag.before(2).as_slice(), b"ro");
        assert_eq!(frag.after(2).as_slice(), b"ther");
        assert_eq!(frag.before(2).join(&frag.after(2)), frag);
        assert_eq!(frag.first(), Some(b'r'));
        assert!(Fragment::empty().first().is_none());
    }

    #[test]
    fn common_prefix() {
        let frag = Fragment::from_slice(b"binary");
        assert_eq!(frag.common_prefix_len(b"bind"), 3);
        assert_eq!(frag.common_prefix_len(b"binary"), 6);
        assert_eq!(frag.common_prefix_len(b"x"), 0);
        assert_eq!(frag.common_prefix_len(b""), 0);
    }

    #[test]
    fn start_matching() {
        let frag = Fragment::from_slice(b"bin");
        assert!(frag.matches_start_of(b"binary"));
        assert!(frag.matches_start_of(b"bin"));
        assert!(!frag.matches_start_of(b"bi"));
        assert!(!frag.matches_start_of(b"bix"));
        assert!(Fragment::empty().matches_start_of(b""));
    }
}
