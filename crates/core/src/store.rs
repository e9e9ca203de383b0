use serde::{Deserialize, Serialize};

use crate::input::InputFile;
use crate::issue::Issue;
use crate::token::TokenLocation;

/// Per-line metric written by the line classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    NclocData,
    CommentLinesData,
}

impl Metric {
    pub fn key(self) -> &'static str {
        match self {
            Metric::NclocData => "ncloc_data",
            Metric::CommentLinesData => "comment_lines_data",
        }
    }
}

/// One file's per-line metrics, persisted as a unit.
pub trait MetricsRecord {
    fn set_int_value(&mut self, metric: Metric, line: u32, value: u32);
    fn save(self);
}

pub trait MetricsStore {
    type Record: MetricsRecord;

    /// `None` means the store does not know the file. The orchestrator treats
    /// that as a context-tracking bug and aborts.
    fn create_for(&mut self, file: &InputFile) -> Option<Self::Record>;
}

pub trait IssueStore {
    fn save_issue(&mut self, issue: Issue);
}

/// Duplicate-detection token stream for one file, persisted as a unit.
pub trait CpdTokens {
    fn add_token(&mut self, location: TokenLocation, text: &str);
    fn save(self);
}

pub trait CpdStore {
    type Tokens: CpdTokens;

    fn on_file(&mut self, file: &InputFile) -> Self::Tokens;
}
