mod analyze;
mod diagnostic;
mod fs;
mod input;
mod issue;
mod lines;
mod progress;
mod resolve;
mod store;
mod token;

pub use analyze::{
    AnalyzeOptions, FileScanner, LexError, SourceLexer, analyze_directory, analyze_files,
};

pub use diagnostic::{CheckId, Diagnostic, RuleKey, SecondaryMessage, TextSpan};

pub use fs::{DEFAULT_MAX_FILE_SIZE_BYTES, WalkOptions, collect_input_files, default_extensions};

pub use input::InputFile;

pub use issue::{Issue, IssueLocation, SecondaryLocation, Span, SpanError};

pub use lines::LineClassifier;

pub use progress::ProgressReport;

pub use resolve::resolve_issue;

pub use store::{CpdStore, CpdTokens, IssueStore, Metric, MetricsRecord, MetricsStore};

pub use token::{Token, TokenKind, TokenLocation, Trivia, TriviaKind};
