use std::io;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::warn;

use crate::diagnostic::{CheckId, Diagnostic, RuleKey};
use crate::fs::{WalkOptions, collect_input_files};
use crate::input::InputFile;
use crate::lines::LineClassifier;
use crate::progress::ProgressReport;
use crate::resolve::resolve_issue;
use crate::store::{CpdStore, CpdTokens, IssueStore, MetricsStore};
use crate::token::{Token, TokenLocation};


/// Error surfaced by the external lexer.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct LexError(pub String);

/// The external tokenizer. The returned stream is terminated by an
/// end-of-stream sentinel token.
pub trait SourceLexer {
    fn lex(&self, contents: &str) -> Result<Vec<Token>, LexError>;
}

/// The external syntax-tree rule engine, together with the mapping from its
/// check identities to persisted rule keys.
pub trait FileScanner {
    fn scan_file(&mut self, file: &InputFile) -> Vec<Diagnostic>;
    fn rule_key(&self, check: &CheckId) -> RuleKey;
}

#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub progress_period: Duration,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            progress_period: Duration::from_secs(10),
        }
    }
}

/// Drives the whole analysis over `files`, in the order given.
///
/// Pass one, per file: lex and classify lines into the metrics store, scan
/// and resolve diagnostics into the issue store, advance the progress report.
/// Pass two, per file: lex fresh and register every non-sentinel token with
/// the duplicate-detection store. The passes are independent: a lex failure
/// in either one skips that file's output for that pass only, and issues
/// already saved stay saved.
pub fn analyze_files<L, S, C>(
    files: &[InputFile],
    lexer: &L,
    scanner: &mut S,
    stores: &mut C,
    options: &AnalyzeOptions,
) where
    L: SourceLexer,
    S: FileScanner,
    C: MetricsStore + IssueStore + CpdStore,
{
    let mut progress = ProgressReport::new(options.progress_period);
    progress.start(files.len());

    for file in files {
        classify_lines(file, lexer, stores);

        for diagnostic in scanner.scan_file(file) {
            let rule = scanner.rule_key(&diagnostic.check);
            stores.save_issue(resolve_issue(file, rule, &diagnostic));
        }

        progress.next_file();
    }

    progress.stop();

    for file in files {
        save_cpd_tokens(file, lexer, stores);
    }
}

/// Enumerates the eligible files under `root` and runs [`analyze_files`] over
/// them. Only the enumeration itself can fail; the analysis is best-effort
/// per file.
pub fn analyze_directory<L, S, C>(
    root: &Path,
    walk: &WalkOptions,
    lexer: &L,
    scanner: &mut S,
    stores: &mut C,
    options: &AnalyzeOptions,
) -> io::Result<()>
where
    L: SourceLexer,
    S: FileScanner,
    C: MetricsStore + IssueStore + CpdStore,
{
    let files = collect_input_files(root, walk)?;
    analyze_files(&files, lexer, scanner, stores, options);
    Ok(())
}

fn classify_lines<L: SourceLexer, C: MetricsStore>(file: &InputFile, lexer: &L, stores: &mut C) {
    let tokens = match lexer.lex(file.contents()) {
        Ok(tokens) => tokens,
        Err(err) => {
            warn!(file = file.key(), %err, "cannot lex file, skipping line metrics");
            return;
        }
    };

    let mut classifier = LineClassifier::new();
    for token in &tokens {
        classifier.on_token(token);
    }

    // A missing record for a file we were handed to analyze is a
    // context-tracking bug upstream, not a user-facing condition.
    let Some(record) = stores.create_for(file) else {
        panic!("no line metrics record for {}", file.key());
    };
    classifier.finish(file.line_count(), record);
}

fn save_cpd_tokens<L: SourceLexer, C: CpdStore>(file: &InputFile, lexer: &L, stores: &mut C) {
    let tokens = match lexer.lex(file.contents()) {
        Ok(tokens) => tokens,
        Err(err) => {
            warn!(file = file.key(), %err, "cannot lex file, skipping cpd tokens");
            return;
        }
    };

    let mut sink = stores.on_file(file);
    for token in tokens.iter().filter(|token| !token.is_eof()) {
        sink.add_token(TokenLocation::of(token), &token.text);
    }
    sink.save();
}
