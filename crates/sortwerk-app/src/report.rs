// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Console rendering of a finished batch.

use std::fmt::Write;
use std::path::Path;

use sortwerk_core::error::Result;
use sortwerk_core::types::BatchReport;

/// The oversized-document list followed by a one-line summary.
pub fn render(report: &BatchReport, threshold: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\nPDFs with more than {threshold} pages:");
    if report.large_documents.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for entry in &report.large_documents {
        let _ = writeln!(
            out,
            "{} - Pages: {} - Start Date: {} - End Date: {}",
            entry.path.display(),
            entry.page_count,
            entry.start_date.as_deref().unwrap_or("none"),
            entry.end_date.as_deref().unwrap_or("none"),
        );
    }

    let elapsed = report.finished_at - report.started_at;
    let _ = writeln!(
        out,
        "\n{} PDFs: {} moved, {} skipped (destination exists), {} unmatched, {} failed in {}s",
        report.outcomes.len(),
        report.moved_count(),
        report.conflict_count(),
        report.unmatched_count(),
        report.failed_count(),
        elapsed.num_seconds(),
    );
    out
}

/// Write the full report as pretty JSON.
pub fn write_json(report: &BatchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}
