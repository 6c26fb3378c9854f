// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open existing PDF documents with `lopdf` and inspect their
// page tree.

use std::path::Path;

use lopdf::Document;
use sortwerk_core::error::SortwerkError;
use tracing::{debug, instrument};

/// Read-only view of a PDF file.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfReader {
    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SortwerkError> {
        let path_ref = path.as_ref();

        let document = Document::load(path_ref).map_err(|err| {
            SortwerkError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }
}

/// Count the pages of the PDF at `path`.
///
/// The parsed document is dropped before returning, so no handle outlives
/// the call.
pub fn count_pages(path: impl AsRef<Path>) -> Result<usize, SortwerkError> {
    let reader = PdfReader::open(path)?;
    Ok(reader.page_count())
}
