use std::{fmt, ops::Range};

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a byte range
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Create a span covering the character at a 1-based line and byte column.
    ///
    /// Positions past the end of a line or of the source are clamped, so the
    /// span always lies within `source`. A zero line or column counts as the
    /// first one.
    pub fn at_line_column(source: &str, line: usize, column: usize) -> Self {
        let mut offset = 0;
        for (index, text) in source.split_inclusive('\n').enumerate() {
            if index + 1 == line.max(1) {
                let within = column.saturating_sub(1).min(text.len());
                offset += within;
                break;
            }
            offset += text.len();
        }
        let offset = floor_char_boundary(source, offset.min(source.len()));

        let end = source[offset..]
            .chars()
            .next()
            .filter(|ch| *ch != '\n')
            .map_or(offset, |ch| offset + ch.len_utf8());
        Self::new(offset..end)
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

fn floor_char_boundary(source: &str, mut offset: usize) -> usize {
    while !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_span_accessors() {
        let span = Span::new(4..9);

        assert_eq!(span.start(), 4);
        assert_eq!(span.end(), 9);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert_eq!(span.to_string(), "4..9");
    }

    #[test]
    fn test_at_line_column_first_line() {
        let span = Span::at_line_column("{\"a\": x}", 1, 7);

        assert_eq!(span, Span::new(6..7));
    }

    #[test]
    fn test_at_line_column_later_line() {
        let source = "{\n  \"shapes\": ?\n}";

        let span = Span::at_line_column(source, 2, 13);

        assert_eq!(&source[Range::from(span)], "?");
    }

    #[test]
    fn test_at_line_column_past_end() {
        let source = "{\"shapes\": [";

        let span = Span::at_line_column(source, 1, 40);

        assert_eq!(span.start(), source.len());
        assert!(span.is_empty());
    }

    #[test]
    fn test_at_line_column_multibyte() {
        let source = "{\"name\": \"Größe\" x}";

        let span = Span::at_line_column(source, 1, 20);

        assert_eq!(&source[Range::from(span)], "x");
    }

    proptest! {
        #[test]
        fn prop_at_line_column_stays_in_source(
            source in "(.|\n){0,64}",
            line in 0usize..8,
            column in 0usize..80,
        ) {
            let span = Span::at_line_column(&source, line, column);
            prop_assert!(span.end() <= source.len());
            prop_assert!(source.is_char_boundary(span.start()));
            prop_assert!(source.is_char_boundary(span.end()));
        }
    }
}
