// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the people sorting the scans.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity decides whether the batch log shows it as a warning or an error.

use crate::error::SortwerkError;

/// Severity of an error from the operator's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A stalled tool or a busy disk. Re-running the batch may succeed.
    Transient,
    /// The operator must fix something (install a tool, fix a path).
    ActionRequired,
    /// This file will never process as-is (corrupt PDF, unreadable image).
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the operator should try.
    pub suggestion: String,
    /// Severity level (drives log level).
    pub severity: Severity,
}

impl std::fmt::Display for HumanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.message, self.suggestion)
    }
}

/// Convert a `SortwerkError` into a `HumanError`.
pub fn humanize_error(err: &SortwerkError) -> HumanError {
    match err {
        SortwerkError::PdfError(_) => HumanError {
            message: "This PDF could not be read.".into(),
            suggestion: "The file may be damaged or password protected. Open it in a PDF viewer and re-save or re-scan it.".into(),
            severity: Severity::Permanent,
        },

        SortwerkError::RasterError(detail) => humanize_tool_error(detail, "pdftoppm", "poppler-utils"),

        SortwerkError::ImageError(_) => HumanError {
            message: "A page image could not be decoded.".into(),
            suggestion: "Re-scan the document; the rendered page was unreadable.".into(),
            severity: Severity::Permanent,
        },

        SortwerkError::OcrError(detail) => humanize_tool_error(detail, "tesseract", "tesseract-ocr"),

        SortwerkError::ToolTimeout { tool, seconds } => HumanError {
            message: format!("`{tool}` took longer than {seconds} seconds and was stopped."),
            suggestion: "The page may be unusually large or noisy. Raise the timeout or process this file on its own.".into(),
            severity: Severity::Transient,
        },

        SortwerkError::InvalidPattern { pattern, .. } => HumanError {
            message: format!("The identifier pattern `{pattern}` is not a valid regular expression."),
            suggestion: "Fix the pattern; the default is [A-Z][0-9]{7}.".into(),
            severity: Severity::ActionRequired,
        },

        SortwerkError::Config(detail) => HumanError {
            message: "The configuration is not usable.".into(),
            suggestion: format!("Check the config file and command-line flags. ({detail})"),
            severity: Severity::ActionRequired,
        },

        SortwerkError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "A file or folder couldn't be found.".into(),
                suggestion: "It may have been moved or deleted while the batch was running.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied while reading or moving a file.".into(),
                suggestion: "Check that the scan folder and output folder are writable.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                severity: Severity::Transient,
            },
        },

        SortwerkError::Serialization(_) => HumanError {
            message: "A JSON file could not be read or written.".into(),
            suggestion: "Check the config file syntax, or choose a different report path.".into(),
            severity: Severity::ActionRequired,
        },
    }
}

/// Map failures of the external helper binaries.
fn humanize_tool_error(detail: &str, tool: &str, package: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("not found") || lower.contains("no such file") {
        HumanError {
            message: format!("`{tool}` is not installed or not on PATH."),
            suggestion: format!("Install {package}, or point the config at the binary."),
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("syntax error") || lower.contains("may not be a pdf") {
        HumanError {
            message: "This PDF could not be rendered.".into(),
            suggestion: "The file may be damaged. Re-save or re-scan it.".into(),
            severity: Severity::Permanent,
        }
    } else {
        HumanError {
            message: format!("`{tool}` failed on this file."),
            suggestion: format!("Re-run with RUST_LOG=debug for details. (Detail: {detail})"),
            severity: Severity::Transient,
        }
    }
}
