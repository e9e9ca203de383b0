use std::collections::HashSet;

use crate::store::{Metric, MetricsRecord};
use crate::token::Token;

/// Classifies the physical lines of one file as code and/or comment.
///
/// Built fresh per file and consumed by [`LineClassifier::finish`]; nothing is
/// reused across files. The two sets are independent: a line holding a code
/// token with a trailing comment is in both.
#[derive(Debug, Default)]
pub struct LineClassifier {
    code_lines: HashSet<u32>,
    comment_lines: HashSet<u32>,
}

impl LineClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every physical line the token's text occupies as code, then the
    /// line of each attached comment trivia as comment. The end-of-stream
    /// sentinel is ignored.
    pub fn on_token(&mut self, token: &Token) {
        if token.is_eof() {
            return;
        }

        let segments = token.text.split('\n').count() as u32;
        for line in token.line..token.line + segments {
            self.code_lines.insert(line);
        }

        for trivia in &token.trivia {
            if trivia.is_comment() {
                self.comment_lines.insert(trivia.line);
            }
        }
    }

    /// Writes a 0/1 flag per metric for every line `1..=line_count` and saves
    /// the record. Lines holding neither code nor comment come out 0/0.
    pub fn finish<R: MetricsRecord>(self, line_count: u32, mut record: R) {
        for line in 1..=line_count {
            record.set_int_value(
                Metric::NclocData,
                line,
                u32::from(self.code_lines.contains(&line)),
            );
            record.set_int_value(
                Metric::CommentLinesData,
                line,
                u32::from(self.comment_lines.contains(&line)),
            );
        }
        record.save();
    }
}
