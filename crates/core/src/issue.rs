use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostic::RuleKey;
use crate::input::InputFile;

/// Why a reported span was refused during issue construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpanError {
    #[error("line {line} is outside the file (1..={line_count})")]
    LineOutOfRange { line: i32, line_count: u32 },
    #[error("negative column {column}")]
    NegativeColumn { column: i32 },
    #[error("column {column} is past the end of line {line} (length {line_length})")]
    ColumnOutOfRange {
        line: u32,
        column: u32,
        line_length: u32,
    },
    #[error("end {end_line}:{end_column} precedes start {start_line}:{start_column}")]
    Inverted {
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    },
    #[error("empty range at {line}:{column}")]
    Empty { line: u32, column: u32 },
}

/// Span that has been checked against the file it points into: both ends lie
/// on real lines, columns fit the line lengths, and the range is non-empty
/// and forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    start_line: u32,
    start_column: u32,
    end_line: u32,
    end_column: u32,
}

impl Span {
    /// Fallible constructor: the only way to obtain a `Span`. Rejection here
    /// is what drives the resolver's degradation ladder.
    pub fn in_file(
        file: &InputFile,
        start_line: i32,
        start_column: i32,
        end_line: i32,
        end_column: i32,
    ) -> Result<Self, SpanError> {
        let start_line = line_in_file(file, start_line)?;
        let end_line = line_in_file(file, end_line)?;
        let start_column = column_on_line(file, start_line, start_column)?;
        let end_column = column_on_line(file, end_line, end_column)?;

        if (end_line, end_column) < (start_line, start_column) {
            return Err(SpanError::Inverted {
                start_line,
                start_column,
                end_line,
                end_column,
            });
        }
        if start_line == end_line && start_column == end_column {
            return Err(SpanError::Empty {
                line: start_line,
                column: start_column,
            });
        }

        Ok(Self {
            start_line,
            start_column,
            end_line,
            end_column,
        })
    }

    pub fn start_line(&self) -> u32 {
        self.start_line
    }

    pub fn start_column(&self) -> u32 {
        self.start_column
    }

    pub fn end_line(&self) -> u32 {
        self.end_line
    }

    pub fn end_column(&self) -> u32 {
        self.end_column
    }
}

fn line_in_file(file: &InputFile, line: i32) -> Result<u32, SpanError> {
    let line_count = file.line_count();
    if line < 1 || line as u32 > line_count {
        return Err(SpanError::LineOutOfRange { line, line_count });
    }
    Ok(line as u32)
}

fn column_on_line(file: &InputFile, line: u32, column: i32) -> Result<u32, SpanError> {
    if column < 0 {
        return Err(SpanError::NegativeColumn { column });
    }
    let column = column as u32;
    let line_length = file
        .line(line)
        .map_or(0, |text| text.chars().count() as u32);
    if column > line_length {
        return Err(SpanError::ColumnOutOfRange {
            line,
            column,
            line_length,
        });
    }
    Ok(column)
}

/// Primary location of a resolved issue, from most to least precise. The
/// resolver only ever degrades downwards: `Span` to `Line` to, when the
/// diagnostic carries no line at all, `File`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueLocation {
    /// The file as a whole, no span.
    File,
    /// Line-only fallback, no column information.
    Line { line: u32 },
    /// Exact range.
    Span(Span),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryLocation {
    pub span: Span,
    pub message: String,
}

/// A diagnostic after location resolution, ready to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub file: String,
    pub rule: RuleKey,
    pub cost: Option<f64>,
    pub message: String,
    pub location: IssueLocation,
    pub secondaries: Vec<SecondaryLocation>,
}
