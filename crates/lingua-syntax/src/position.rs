//! Byte offset to line and column conversion.
//!
//! Tokens and diagnostics carry byte offsets. For user-facing messages we
//! prefer one-based line and column numbers, with columns counted in
//! characters.

use std::fmt;

/// A one-based line and column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineColumn {
    /// One-based line number.
    pub line: u32,
    /// One-based column, counted in characters.
    pub column: u32,
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line starts for one source text.
#[derive(Debug, Clone)]
pub struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<usize>,
}

impl<'src> LineIndex<'src> {
    /// Indexes the line starts of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    /// Returns the number of lines. An empty source has one line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a one-based line and column.
    ///
    /// Offsets past the end clamp to the end of the source.
    #[must_use]
    pub fn line_column(&self, offset: usize) -> LineColumn {
        let clamped = offset.min(self.source.len());
        let line_index = self
            .line_starts
            .partition_point(|&start| start <= clamped)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line_index).copied().unwrap_or(0);
        let column = self
            .source
            .get(line_start..)
            .map_or(0, |line| {
                line.char_indices()
                    .take_while(|&(index, _)| line_start + index < clamped)
                    .count()
            });

        // Line and column numbers will realistically never exceed u32::MAX.
        LineColumn {
            line: u32::try_from(line_index.saturating_add(1)).unwrap_or(u32::MAX),
            column: u32::try_from(column.saturating_add(1)).unwrap_or(u32::MAX),
        }
    }
}
