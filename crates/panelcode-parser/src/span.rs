//! Byte ranges into Panelcode source text.

use std::ops::Range;

/// A half-open byte range `start..end` into the parsed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span from a byte range.
    ///
    /// An inverted range is collapsed to an empty span at `start`.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Create an empty span at `offset`.
    pub fn at(offset: usize) -> Self {
        Self::new(offset..offset)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Convert this span back into a byte range.
    pub fn to_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(3..7);

        assert_eq!(span.start(), 3);
        assert_eq!(span.end(), 7);
        assert_eq!(span.len(), 4);
        assert_eq!(span.to_range(), 3..7);
        assert!(!span.is_empty());
    }

    #[test]
    fn test_inverted_range_collapses() {
        #[allow(clippy::reversed_empty_ranges)]
        let span = Span::new(9..2);

        assert_eq!(span, Span::at(9));
        assert!(span.is_empty());
    }
}
