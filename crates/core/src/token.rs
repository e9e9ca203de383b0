use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Word,
    Number,
    StringLiteral,
    Punctuation,
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriviaKind {
    Comment,
    Whitespace,
}

/// Comment or whitespace attached to a token by the lexer. Trivia carry their
/// own position, independent of the host token's span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trivia {
    pub kind: TriviaKind,
    pub line: u32,
    pub column: u32,
    pub text: String,
}

impl Trivia {
    pub fn comment(line: u32, column: u32, text: impl Into<String>) -> Self {
        Self {
            kind: TriviaKind::Comment,
            line,
            column,
            text: text.into(),
        }
    }

    pub fn whitespace(line: u32, column: u32, text: impl Into<String>) -> Self {
        Self {
            kind: TriviaKind::Whitespace,
            line,
            column,
            text: text.into(),
        }
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TriviaKind::Comment
    }
}

/// One lexed token. Lines are 1-based, columns 0-based. The literal text may
/// span multiple physical lines (string literals, quoted identifiers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub line: u32,
    pub column: u32,
    pub text: String,
    pub kind: TokenKind,
    pub trivia: Vec<Trivia>,
}

impl Token {
    pub fn new(kind: TokenKind, line: u32, column: u32, text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            text: text.into(),
            kind,
            trivia: Vec::new(),
        }
    }

    pub fn eof(line: u32, column: u32) -> Self {
        Self::new(TokenKind::Eof, line, column, "")
    }

    pub fn with_trivia(mut self, trivia: Trivia) -> Self {
        self.trivia.push(trivia);
        self
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Full extent of a token's literal text, end position included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenLocation {
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl TokenLocation {
    /// Derives the end position from the token text itself, so a literal that
    /// wraps over several physical lines ends on its last one.
    pub fn of(token: &Token) -> Self {
        let mut segments = token.text.split('\n');
        let first = segments.next().unwrap_or("");
        let mut end_line = token.line;
        let mut end_column = token.column + chars_len(first);
        for segment in segments {
            end_line += 1;
            end_column = chars_len(segment.strip_suffix('\r').unwrap_or(segment));
        }
        Self {
            line: token.line,
            column: token.column,
            end_line,
            end_column,
        }
    }
}

fn chars_len(s: &str) -> u32 {
    s.chars().count() as u32
}
