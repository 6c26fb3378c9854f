// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Sortwerk.

use thiserror::Error;

/// Top-level error type for all Sortwerk operations.
#[derive(Debug, Error)]
pub enum SortwerkError {
    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("rasterization failed: {0}")]
    RasterError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("OCR failed: {0}")]
    OcrError(String),

    #[error("external tool `{tool}` timed out after {seconds}s")]
    ToolTimeout { tool: String, seconds: u64 },

    // -- Configuration --
    #[error("invalid identifier pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SortwerkError>;
