use std::fmt;

/// Half-open `[start, end)` window into the input buffer owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_range() {
        let range = ByteRange::new(6, 18);
        assert_eq!(range.len(), 12);
        assert!(!range.is_empty());
        assert_eq!(range.to_string(), "[6, 18)");

        assert!(ByteRange::new(4, 4).is_empty());
        assert_eq!(ByteRange::new(4, 4).len(), 0);
    }
}
