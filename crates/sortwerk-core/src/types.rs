// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Sortwerk document sorter.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker placed in the end-date slot when no printed date was recognised.
///
/// Distinct from an absent end date: it tells the reviewer the dates are
/// most likely handwritten and must be read off the paper.
pub const HANDWRITTEN_DATE_SENTINEL: &str = "HANDWRITTEN DATE - CHECK MANUALLY";

/// Start and end date pulled from one page, normalised to `YYYY/MM/DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePair {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DatePair {
    /// No date found: `(absent, sentinel)`.
    pub fn manual_check() -> Self {
        Self {
            start: None,
            end: Some(HANDWRITTEN_DATE_SENTINEL.to_string()),
        }
    }

    /// Exactly one date found: `(date, absent)`.
    pub fn single(start: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: None,
        }
    }

    /// Two or more dates found: the first two.
    pub fn range(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Whether this pair carries the handwritten-date marker.
    pub fn needs_manual_check(&self) -> bool {
        self.start.is_none() && self.end.as_deref() == Some(HANDWRITTEN_DATE_SENTINEL)
    }
}

/// Result of searching one document for its identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// The identifier found, if any page matched.
    pub identifier: Option<String>,
    /// Dates from the matching page, or the manual-check marker.
    pub dates: DatePair,
    /// 1-based number of the page that matched.
    pub page: Option<usize>,
}

impl MatchOutcome {
    pub fn matched(identifier: impl Into<String>, dates: DatePair, page: usize) -> Self {
        Self {
            identifier: Some(identifier.into()),
            dates,
            page: Some(page),
        }
    }

    /// No page matched.
    pub fn unmatched() -> Self {
        Self {
            identifier: None,
            dates: DatePair::manual_check(),
            page: None,
        }
    }

    pub fn is_match(&self) -> bool {
        self.identifier.is_some()
    }
}

/// A relocated document whose page count exceeds the oversized threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LargeDocumentEntry {
    /// Path after the move.
    pub path: PathBuf,
    /// Page count read from the moved file.
    pub page_count: usize,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// What happened to one discovered PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Identifier found and the file was moved.
    Moved {
        source: PathBuf,
        destination: PathBuf,
        identifier: String,
        dates: DatePair,
        page_count: usize,
    },
    /// Identifier found but the destination already existed; file left in place.
    Conflict {
        source: PathBuf,
        destination: PathBuf,
        identifier: String,
    },
    /// No page carried the identifier; file left in place.
    Unmatched { path: PathBuf, page_count: usize },
    /// Processing this file failed; the batch carried on.
    Failed { path: PathBuf, error: String },
}

/// Everything one batch run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// One entry per discovered PDF, in traversal order.
    pub outcomes: Vec<FileOutcome>,
    /// Oversized documents, in the order they were moved.
    pub large_documents: Vec<LargeDocumentEntry>,
}

impl BatchReport {
    pub fn moved_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Moved { .. }))
    }

    pub fn conflict_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Conflict { .. }))
    }

    pub fn unmatched_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unmatched { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(o)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_check_is_distinct_from_missing_end() {
        assert!(DatePair::manual_check().needs_manual_check());
        assert!(!DatePair::single("2024/03/15").needs_manual_check());
        assert_eq!(DatePair::single("2024/03/15").end, None);
    }

    #[test]
    fn unmatched_outcome_carries_sentinel() {
        let outcome = MatchOutcome::unmatched();
        assert!(!outcome.is_match());
        assert_eq!(outcome.dates.end.as_deref(), Some(HANDWRITTEN_DATE_SENTINEL));
    }

    #[test]
    fn report_counts_by_kind() {
        let now = Utc::now();
        let report = BatchReport {
            started_at: now,
            finished_at: now,
            outcomes: vec![
                FileOutcome::Unmatched {
                    path: "a.pdf".into(),
                    page_count: 3,
                },
                FileOutcome::Failed {
                    path: "b.pdf".into(),
                    error: "boom".into(),
                },
                FileOutcome::Unmatched {
                    path: "c.pdf".into(),
                    page_count: 1,
                },
            ],
            large_documents: Vec::new(),
        };
        assert_eq!(report.unmatched_count(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.moved_count(), 0);
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let outcome = FileOutcome::Unmatched {
            path: "scan.pdf".into(),
            page_count: 5,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains(r#""outcome":"unmatched""#));
    }
}
