// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document locator — runs rasterize → prepare → recognize → match over the
// pages of one PDF, stopping at the first page that carries an identifier.

use std::path::Path;

use sortwerk_core::error::SortwerkError;
use sortwerk_core::types::MatchOutcome;
use sortwerk_document::{
    IdentifierMatcher, OcrPreprocessor, PageRasterizer, TextRecognizer, extract_dates,
};
use tracing::{debug, info, instrument};

/// Finds the identifier (and the dates printed next to it) in a PDF.
pub struct DocumentLocator {
    rasterizer: Box<dyn PageRasterizer>,
    recognizer: Box<dyn TextRecognizer>,
    preprocessor: OcrPreprocessor,
    matcher: IdentifierMatcher,
}

impl DocumentLocator {
    pub fn new(
        rasterizer: Box<dyn PageRasterizer>,
        recognizer: Box<dyn TextRecognizer>,
        preprocessor: OcrPreprocessor,
        matcher: IdentifierMatcher,
    ) -> Self {
        Self {
            rasterizer,
            recognizer,
            preprocessor,
            matcher,
        }
    }

    /// Search `pdf_path` page by page.
    ///
    /// Dates come from the matching page only. When no page matches the
    /// outcome carries the manual-check date marker.
    #[instrument(skip(self), fields(pattern = self.matcher.pattern()))]
    pub fn locate(&self, pdf_path: &Path) -> Result<MatchOutcome, SortwerkError> {
        let document = self.rasterizer.rasterize(pdf_path)?;
        if document.is_empty() {
            return Err(SortwerkError::RasterError(format!(
                "no pages rendered for {}",
                pdf_path.display()
            )));
        }
        debug!(pages = document.len(), "Searching pages");

        for (index, page) in document.pages().enumerate() {
            let page_number = index + 1;
            let prepared = self.preprocessor.prepare(page?);
            let text = self.recognizer.recognize(&prepared)?;
            info!(page = page_number, "--- Page {page_number} ---\n{text}");

            if let Some(identifier) = self.matcher.find(&text) {
                let dates = extract_dates(&text);
                info!(
                    identifier,
                    page = page_number,
                    start = dates.start.as_deref().unwrap_or("none"),
                    end = dates.end.as_deref().unwrap_or("none"),
                    "Identifier found"
                );
                return Ok(MatchOutcome::matched(identifier, dates, page_number));
            }
        }

        info!("Identifier not found in any page");
        Ok(MatchOutcome::unmatched())
    }
}
