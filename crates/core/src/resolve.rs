use tracing::debug;

use crate::diagnostic::{Diagnostic, RuleKey};
use crate::input::InputFile;
use crate::issue::{Issue, IssueLocation, SecondaryLocation, Span};

/// Maps one diagnostic onto a persistable issue. Total: a rejected span
/// degrades the location instead of failing, so one malformed message never
/// takes down the rest of the file's diagnostics.
///
/// Degradation only ever moves from exact span to line-only; a diagnostic
/// without a line was file-scoped to begin with and stays that way.
pub fn resolve_issue(file: &InputFile, rule: RuleKey, diagnostic: &Diagnostic) -> Issue {
    let location = primary_location(file, diagnostic);

    let mut secondaries = Vec::with_capacity(diagnostic.secondaries.len());
    for secondary in &diagnostic.secondaries {
        let span = secondary.span;
        match Span::in_file(
            file,
            span.start_line,
            span.start_column,
            span.end_line,
            span.end_column,
        ) {
            Ok(span) => secondaries.push(SecondaryLocation {
                span,
                message: secondary.text.clone(),
            }),
            Err(reason) => {
                debug!(
                    file = file.key(),
                    %reason,
                    "dropping secondary location with rejected span"
                );
            }
        }
    }

    Issue {
        file: file.key().to_string(),
        rule,
        cost: diagnostic.cost,
        message: diagnostic.text.clone(),
        location,
        secondaries,
    }
}

fn primary_location(file: &InputFile, diagnostic: &Diagnostic) -> IssueLocation {
    let Some(line) = diagnostic.line else {
        return IssueLocation::File;
    };

    let Some(span) = diagnostic.span else {
        return IssueLocation::Line { line };
    };

    // The reported line wins over the span's own start line; only the columns
    // and the end position are taken from the span.
    match Span::in_file(
        file,
        line as i32,
        span.start_column,
        span.end_line,
        span.end_column,
    ) {
        Ok(span) => IssueLocation::Span(span),
        Err(reason) => {
            debug!(
                file = file.key(),
                line,
                %reason,
                "primary span rejected, falling back to line location"
            );
            IssueLocation::Line { line }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{CheckId, TextSpan};

    fn file() -> InputFile {
        InputFile::new("pkg.sql", "CREATE PACKAGE p AS\n  PROCEDURE x;\nEND p;\n")
    }

    fn rule() -> RuleKey {
        RuleKey::new("sqlscan", "S100")
    }

    fn diagnostic() -> Diagnostic {
        Diagnostic::new(CheckId::new("DeadCode"), "Remove this.")
    }

    #[test]
    fn no_line_resolves_to_whole_file() {
        let issue = resolve_issue(&file(), rule(), &diagnostic());
        assert_eq!(issue.location, IssueLocation::File);
        assert_eq!(issue.file, "pkg.sql");
        assert_eq!(issue.message, "Remove this.");
        assert!(issue.secondaries.is_empty());
    }

    #[test]
    fn valid_span_resolves_exactly() {
        let diagnostic = diagnostic().with_span(TextSpan::new(2, 2, 2, 11));
        let issue = resolve_issue(&file(), rule(), &diagnostic);
        let IssueLocation::Span(span) = issue.location else {
            panic!("expected a span location, got {:?}", issue.location);
        };
        assert_eq!(
            (
                span.start_line(),
                span.start_column(),
                span.end_line(),
                span.end_column()
            ),
            (2, 2, 2, 11)
        );
    }

    #[test]
    fn rejected_span_degrades_to_line_only() {
        // End precedes start, as seen with misreported multi-line tokens.
        let diagnostic = diagnostic().at_line(2).with_span(TextSpan {
            start_line: 2,
            start_column: 5,
            end_line: 1,
            end_column: 2,
        });
        let issue = resolve_issue(&file(), rule(), &diagnostic);
        assert_eq!(issue.location, IssueLocation::Line { line: 2 });
    }

    #[test]
    fn line_without_span_resolves_to_line_only() {
        let issue = resolve_issue(&file(), rule(), &diagnostic().at_line(3));
        assert_eq!(issue.location, IssueLocation::Line { line: 3 });
    }

    #[test]
    fn diagnostic_line_overrides_span_start_line() {
        let mut diagnostic = diagnostic();
        diagnostic.line = Some(3);
        diagnostic.span = Some(TextSpan::new(1, 0, 3, 4));
        let issue = resolve_issue(&file(), rule(), &diagnostic);
        let IssueLocation::Span(span) = issue.location else {
            panic!("expected a span location");
        };
        assert_eq!(span.start_line(), 3);
        assert_eq!(span.end_line(), 3);
    }

    #[test]
    fn invalid_secondary_is_dropped_but_valid_one_survives() {
        let diagnostic = diagnostic()
            .with_span(TextSpan::new(1, 0, 1, 6))
            .with_secondary(TextSpan::new(2, 2, 2, 11), "declared here")
            .with_secondary(TextSpan::new(40, 0, 40, 3), "out of range");
        let issue = resolve_issue(&file(), rule(), &diagnostic);

        assert!(matches!(issue.location, IssueLocation::Span(_)));
        assert_eq!(issue.secondaries.len(), 1);
        assert_eq!(issue.secondaries[0].message, "declared here");
        assert_eq!(issue.secondaries[0].span.start_line(), 2);
    }

    #[test]
    fn secondary_failure_never_degrades_the_primary() {
        let diagnostic = diagnostic()
            .at_line(1)
            .with_secondary(TextSpan::new(1, 9, 1, 2), "inverted");
        let issue = resolve_issue(&file(), rule(), &diagnostic);
        assert_eq!(issue.location, IssueLocation::Line { line: 1 });
        assert!(issue.secondaries.is_empty());
    }

    #[test]
    fn cost_and_rule_are_carried_through() {
        let issue = resolve_issue(&file(), rule(), &diagnostic().with_cost(5.0));
        assert_eq!(issue.cost, Some(5.0));
        assert_eq!(issue.rule, RuleKey::new("sqlscan", "S100"));
    }
}
