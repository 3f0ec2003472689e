//! Common types used by libreckon.

/// Describes the character span of a substring in a source expression.
///
/// For example, in "sin(x)", "sin" has the span (0, 3).
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default)]
pub struct Span {
    /// Inclusive lower bound index of the span
    pub lo: usize,
    /// Exclusive upper bound index of the span
    pub hi: usize,
}

impl Span {
    pub fn new(lo: usize, hi: usize) -> Self {
        Self { lo, hi }
    }

    /// Creates a span covering a single character at `pos`.
    pub fn at(pos: usize) -> Self {
        Self { lo: pos, hi: pos + 1 }
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.lo >= self.hi
    }
}

impl From<(usize, usize)> for Span {
    fn from(span: (usize, usize)) -> Self {
        Self {
            lo: span.0,
            hi: span.1,
        }
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(span: std::ops::Range<usize>) -> Self {
        Self {
            lo: span.start,
            hi: span.end,
        }
    }
}

impl From<Span> for (usize, usize) {
    fn from(span: Span) -> Self {
        (span.lo, span.hi)
    }
}
