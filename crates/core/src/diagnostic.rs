use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the check that produced a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckId(pub String);

impl CheckId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted rule identity a check maps to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub repository: String,
    pub rule: String,
}

impl RuleKey {
    pub fn new(repository: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            rule: rule.into(),
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.rule)
    }
}

/// Raw span as reported by the scanner. Nothing here is validated; scanners
/// have been observed to report inverted or misaligned ranges, notably for
/// multi-line tokens. Validation happens in [`crate::Span::in_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start_line: i32,
    pub start_column: i32,
    pub end_line: i32,
    pub end_column: i32,
}

impl TextSpan {
    pub fn new(start_line: i32, start_column: i32, end_line: i32, end_column: i32) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

/// Secondary finding attached to a diagnostic, always span-addressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryMessage {
    pub span: TextSpan,
    pub text: String,
}

/// One message produced by the external rule engine for a file.
///
/// `line == None` marks a file-scoped diagnostic. When a span is present the
/// line is carried alongside it anyway; the resolver reads the line from here
/// and only the columns and end position from the span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub check: CheckId,
    pub text: String,
    pub cost: Option<f64>,
    pub line: Option<u32>,
    pub span: Option<TextSpan>,
    pub secondaries: Vec<SecondaryMessage>,
}

impl Diagnostic {
    pub fn new(check: CheckId, text: impl Into<String>) -> Self {
        Self {
            check,
            text: text.into(),
            cost: None,
            line: None,
            span: None,
            secondaries: Vec::new(),
        }
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Attaches a span and keeps `line` in sync with its start line.
    pub fn with_span(mut self, span: TextSpan) -> Self {
        if span.start_line > 0 {
            self.line = Some(span.start_line as u32);
        }
        self.span = Some(span);
        self
    }

    pub fn with_secondary(mut self, span: TextSpan, text: impl Into<String>) -> Self {
        self.secondaries.push(SecondaryMessage {
            span,
            text: text.into(),
        });
        self
    }
}
