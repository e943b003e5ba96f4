//! Span-based text editing

use std::ops::Range;
use thiserror::Error;

/// Errors that can occur during edit application
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Overlapping edits detected at offset {0}")]
    OverlappingEdits(usize),

    #[error("Edit span {start}..{end} out of bounds for source length {len}")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },
}

/// A single replacement of a byte range in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte range of the text being replaced
    pub span: Range<usize>,
    /// The replacement text
    pub replacement: String,
    /// Name of the rule that produced this edit
    pub rule: String,
}

impl Edit {
    /// Create a new edit
    pub fn new(span: Range<usize>, replacement: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
            rule: rule.into(),
        }
    }

    /// Get the byte offset where this edit starts
    pub fn start_offset(&self) -> usize {
        self.span.start
    }

    /// Get the byte offset where this edit ends
    pub fn end_offset(&self) -> usize {
        self.span.end
    }
}

/// Apply edits to a text
///
/// Edits are applied in reverse order (from end to start) so that the
/// offsets of the remaining edits stay valid. The input order of `edits`
/// does not matter.
///
/// # Returns
/// * `Ok(String)` - The modified text
/// * `Err(EditError)` - If edits overlap or are out of bounds
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String, EditError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    // Descending by start; at equal starts the longer edit goes first so an
    // empty insertion lands in front of it.
    let mut sorted_edits: Vec<&Edit> = edits.iter().collect();
    sorted_edits.sort_by(|a, b| {
        b.start_offset()
            .cmp(&a.start_offset())
            .then(b.end_offset().cmp(&a.end_offset()))
    });

    let source_len = source.len();
    let mut prev_start: Option<usize> = None;

    for edit in &sorted_edits {
        let start = edit.start_offset();
        let end = edit.end_offset();

        if start > end || end > source_len {
            return Err(EditError::SpanOutOfBounds {
                start,
                end,
                len: source_len,
            });
        }

        if let Some(prev) = prev_start {
            if end > prev {
                return Err(EditError::OverlappingEdits(start));
            }
        }

        prev_start = Some(start);
    }

    let mut result = source.to_string();
    for edit in sorted_edits {
        result.replace_range(edit.span.clone(), &edit.replacement);
    }

    Ok(result)
}

/// Convert byte offset to line and column numbers (1-based)
pub fn offset_to_line_column(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;

    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }

    (line, column)
}
