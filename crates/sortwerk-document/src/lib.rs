// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sortwerk-document — Document processing for the Sortwerk sorter.
//
// Provides PDF page counting and rasterization, OCR preparation (grayscale,
// inverse threshold, dilation), text recognition, and the identifier and
// date matchers that run over recognised text.

pub mod image;
pub mod pdf;
pub mod process;
pub mod scan;
pub mod text;

// Re-export the primary types so callers can use `sortwerk_document::PdfReader` etc.
pub use crate::image::processor::ImageProcessor;
pub use pdf::raster::{PageRasterizer, PdftoppmRasterizer, RasterizedDocument};
pub use pdf::reader::{PdfReader, count_pages};
pub use scan::ocr::{TesseractRecognizer, TextRecognizer};
pub use scan::prepare::OcrPreprocessor;
pub use text::dates::extract_dates;
pub use text::identifier::IdentifierMatcher;

#[cfg(feature = "ocr")]
pub use scan::ocrs_engine::{OcrsModels, OcrsRecognizer};
