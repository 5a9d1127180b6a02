//! Source locations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A region of source text. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub file: String,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceSpan {
    pub fn new(
        file: impl Into<String>,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            file: file.into(),
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// A span covering a single line from `start_column` to `end_column`.
    pub fn on_line(file: impl Into<String>, line: u32, start_column: u32, end_column: u32) -> Self {
        Self::new(file, line, start_column, line, end_column)
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.start_line, self.start_column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_start_position() {
        let span = SourceSpan::new("src/Service.cs", 12, 9, 12, 40);
        assert_eq!(span.to_string(), "src/Service.cs:12:9");
    }

    #[test]
    fn spans_order_by_file_then_position() {
        let a = SourceSpan::on_line("a.cs", 10, 1, 5);
        let b = SourceSpan::on_line("a.cs", 2, 1, 5);
        let c = SourceSpan::on_line("b.cs", 1, 1, 5);
        let mut spans = vec![c.clone(), a.clone(), b.clone()];
        spans.sort();
        assert_eq!(spans, vec![b, a, c]);
    }
}
