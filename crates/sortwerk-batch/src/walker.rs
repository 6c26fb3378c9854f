// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch walker — finds every PDF under a root folder, locates and files each
// one, and collects the oversized-document report.
//
// Each file is processed on its own: a failure is logged, recorded as
// `FileOutcome::Failed`, and the walk moves on to the next file.

use std::path::{Path, PathBuf};

use chrono::Utc;
use sortwerk_core::error::SortwerkError;
use sortwerk_core::human_errors::{Severity, humanize_error};
use sortwerk_core::types::{BatchReport, FileOutcome, LargeDocumentEntry};
use sortwerk_document::count_pages;
use tracing::{error, info, instrument, warn};
use walkdir::WalkDir;

use crate::locator::DocumentLocator;
use crate::organizer::{FileOrganizer, Placement};

/// Default oversized-document threshold (strictly greater than).
pub const DEFAULT_LARGE_PAGE_THRESHOLD: usize = 20;

/// Drives the locator and organizer over a folder tree.
pub struct BatchWalker {
    locator: DocumentLocator,
    organizer: FileOrganizer,
    large_page_threshold: usize,
}

impl BatchWalker {
    pub fn new(locator: DocumentLocator, organizer: FileOrganizer) -> Self {
        Self {
            locator,
            organizer,
            large_page_threshold: DEFAULT_LARGE_PAGE_THRESHOLD,
        }
    }

    pub fn with_large_page_threshold(mut self, threshold: usize) -> Self {
        self.large_page_threshold = threshold;
        self
    }

    /// Process every PDF under `root` and return what happened.
    ///
    /// All PDFs are discovered before the first one is moved, so folders
    /// created during the run are never walked.
    #[instrument(skip(self), fields(root = %root.display()))]
    pub fn run(&self, root: &Path) -> BatchReport {
        let started_at = Utc::now();
        let files = discover_pdfs(root);
        info!(count = files.len(), "PDFs discovered");

        let mut outcomes = Vec::with_capacity(files.len());
        let mut large_documents = Vec::new();

        for path in files {
            let outcome = match self.process_file(&path, &mut large_documents) {
                Ok(outcome) => outcome,
                Err(err) => {
                    log_failure(&path, &err);
                    FileOutcome::Failed {
                        path,
                        error: err.to_string(),
                    }
                }
            };
            outcomes.push(outcome);
        }

        BatchReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
            large_documents,
        }
    }

    #[instrument(skip(self, large_documents), fields(path = %path.display()))]
    fn process_file(
        &self,
        path: &Path,
        large_documents: &mut Vec<LargeDocumentEntry>,
    ) -> Result<FileOutcome, SortwerkError> {
        let page_count = count_pages(path)?;
        let outcome = self.locator.locate(path)?;

        let Some(identifier) = outcome.identifier else {
            info!(page_count, "Skipping, no matching string found");
            return Ok(FileOutcome::Unmatched {
                path: path.to_path_buf(),
                page_count,
            });
        };

        match self.organizer.organize(path, &identifier)? {
            Placement::Skipped(destination) => Ok(FileOutcome::Conflict {
                source: path.to_path_buf(),
                destination,
                identifier,
            }),
            Placement::Moved(destination) => {
                // The move is committed; a failed recount must not hide it.
                let moved_page_count = match count_pages(&destination) {
                    Ok(after) => {
                        if after != page_count {
                            warn!(before = page_count, after, "Page count changed during move");
                        }
                        after
                    }
                    Err(err) => {
                        warn!(
                            destination = %destination.display(),
                            error = %err,
                            "Cannot recount pages after move; keeping pre-move count"
                        );
                        page_count
                    }
                };

                if moved_page_count > self.large_page_threshold {
                    large_documents.push(LargeDocumentEntry {
                        path: destination.clone(),
                        page_count: moved_page_count,
                        start_date: outcome.dates.start.clone(),
                        end_date: outcome.dates.end.clone(),
                    });
                }

                Ok(FileOutcome::Moved {
                    source: path.to_path_buf(),
                    destination,
                    identifier,
                    dates: outcome.dates,
                    page_count: moved_page_count,
                })
            }
        }
    }
}

/// Every file under `root` whose name ends in `.pdf` (any case), in
/// traversal order. Unreadable directory entries are logged and skipped.
pub fn discover_pdfs(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "Cannot read directory entry; skipping");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_pdf_name(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn is_pdf_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".pdf"))
        .unwrap_or(false)
}

fn log_failure(path: &Path, err: &SortwerkError) {
    let human = humanize_error(err);
    match human.severity {
        Severity::Transient => warn!(
            path = %path.display(),
            error = %err,
            suggestion = %human.suggestion,
            "{}", human.message
        ),
        Severity::ActionRequired | Severity::Permanent => error!(
            path = %path.display(),
            error = %err,
            suggestion = %human.suggestion,
            "{}", human.message
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Rewrite, Script, write_pdf};
    use sortwerk_core::types::DatePair;

    fn walker(script: &Script, output_root: &Path) -> BatchWalker {
        BatchWalker::new(script.locator(), FileOrganizer::new(output_root))
    }

    #[test]
    fn discovers_pdfs_recursively_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("2024").join("march");
        std::fs::create_dir_all(&nested).unwrap();
        for path in [
            dir.path().join("a.pdf"),
            nested.join("B.PDF"),
            nested.join("c.Pdf"),
            dir.path().join("notes.txt"),
            dir.path().join("pdf"),
        ] {
            std::fs::write(path, b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("folder.pdf")).unwrap();

        let mut names: Vec<String> = discover_pdfs(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, ["B.PDF", "a.pdf", "c.Pdf"]);
    }

    #[test]
    fn oversized_match_is_moved_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let inbox = dir.path().join("inbox");
        std::fs::create_dir(&inbox).unwrap();
        let source = inbox.join("scan_0001.pdf");
        write_pdf(&source, 25);

        let mut pages = vec!["blank"; 25];
        pages[2] = "Account B7654321 period 2023/01/10 to 31/12/2023";
        let script = Script::new().document("scan_0001.pdf", &pages);

        let report = walker(&script, dir.path()).run(dir.path());

        let destination = dir.path().join("B7654321").join("B7654321.pdf");
        assert!(destination.exists());
        assert!(!source.exists());
        assert_eq!(script.recognized_pages(), 3);
        assert_eq!(
            report.large_documents,
            [LargeDocumentEntry {
                path: destination.clone(),
                page_count: 25,
                start_date: Some("2023/01/10".into()),
                end_date: Some("2023/12/31".into()),
            }]
        );
        assert_eq!(
            report.outcomes,
            [FileOutcome::Moved {
                source,
                destination,
                identifier: "B7654321".into(),
                dates: DatePair::range("2023/01/10", "2023/12/31"),
                page_count: 25,
            }]
        );
    }

    #[test]
    fn unmatched_file_stays_put() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("letter.pdf");
        write_pdf(&source, 5);
        let script = Script::new().document("letter.pdf", &["no key"; 5]);

        let report = walker(&script, dir.path()).run(dir.path());

        assert!(source.exists());
        assert!(report.large_documents.is_empty());
        assert_eq!(
            report.outcomes,
            [FileOutcome::Unmatched {
                path: source,
                page_count: 5,
            }]
        );
    }

    #[test]
    fn threshold_is_strictly_greater_than() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("twenty.pdf"), 20);
        write_pdf(&dir.path().join("twentyone.pdf"), 21);
        let script = Script::new()
            .document("twenty.pdf", &["A0000020"])
            .document("twentyone.pdf", &["A0000021 2024/01/01"]);

        let report = walker(&script, dir.path()).run(dir.path());

        assert_eq!(report.moved_count(), 2);
        assert_eq!(report.large_documents.len(), 1);
        let entry = &report.large_documents[0];
        assert_eq!(entry.page_count, 21);
        assert_eq!(entry.start_date.as_deref(), Some("2024/01/01"));
        assert_eq!(entry.end_date, None);
    }

    #[test]
    fn sentinel_date_is_carried_into_report() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("handwritten.pdf"), 30);
        let script = Script::new().document("handwritten.pdf", &["Z9999999 signed"]);

        let report = walker(&script, dir.path()).run(dir.path());

        let entry = &report.large_documents[0];
        assert_eq!(entry.start_date, None);
        assert_eq!(
            entry.end_date.as_deref(),
            Some(sortwerk_core::types::HANDWRITTEN_DATE_SENTINEL)
        );
    }

    #[test]
    fn duplicate_identifier_is_a_conflict_not_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let inbox = dir.path().join("inbox");
        std::fs::create_dir(&inbox).unwrap();
        write_pdf(&inbox.join("first.pdf"), 2);
        write_pdf(&inbox.join("second.pdf"), 2);
        let script = Script::new()
            .document("first.pdf", &["C1234567"])
            .document("second.pdf", &["C1234567"]);

        let report = walker(&script, dir.path()).run(dir.path());

        assert_eq!(report.moved_count(), 1);
        assert_eq!(report.conflict_count(), 1);
        assert_eq!(report.failed_count(), 0);
        let leftover = std::fs::read_dir(&inbox).unwrap().count();
        assert_eq!(leftover, 1, "the conflicting file stays in the inbox");
    }

    #[test]
    fn corrupt_pdf_does_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("broken.pdf"), b"not a pdf").unwrap();
        write_pdf(&dir.path().join("good.pdf"), 3);
        let script = Script::new().document("good.pdf", &["x", "E7777777"]);

        let report = walker(&script, dir.path()).run(dir.path());

        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.moved_count(), 1);
        assert!(dir.path().join("E7777777").join("E7777777.pdf").exists());
    }

    #[test]
    fn rasterizer_failure_is_recorded_per_file() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("unscripted.pdf"), 1);
        let script = Script::new();

        let report = walker(&script, dir.path()).run(dir.path());

        assert!(matches!(
            &report.outcomes[..],
            [FileOutcome::Failed { error, .. }] if error.contains("rasterization failed")
        ));
    }

    #[test]
    fn page_count_after_move_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(&dir.path().join("grown.pdf"), 3);
        let script = Script::new()
            .document("grown.pdf", &["F1010101 2024/05/01"])
            .rewrite_during_scan("grown.pdf", Rewrite::Pages(22));

        let report = walker(&script, dir.path()).run(dir.path());

        let destination = dir.path().join("F1010101").join("F1010101.pdf");
        assert!(matches!(
            &report.outcomes[..],
            [FileOutcome::Moved { page_count: 22, .. }]
        ));
        assert_eq!(report.large_documents.len(), 1);
        assert_eq!(report.large_documents[0].path, destination);
        assert_eq!(report.large_documents[0].page_count, 22);
    }

    #[test]
    fn failed_recount_still_reports_the_move() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("damaged.pdf");
        write_pdf(&source, 4);
        let script = Script::new()
            .document("damaged.pdf", &["G2020202"])
            .rewrite_during_scan("damaged.pdf", Rewrite::Garbage);

        let report = walker(&script, dir.path()).run(dir.path());

        let destination = dir.path().join("G2020202").join("G2020202.pdf");
        assert!(destination.exists());
        assert!(!source.exists());
        assert_eq!(report.failed_count(), 0);
        assert_eq!(
            report.outcomes,
            [FileOutcome::Moved {
                source,
                destination,
                identifier: "G2020202".into(),
                dates: DatePair::manual_check(),
                page_count: 4,
            }]
        );
    }
}
