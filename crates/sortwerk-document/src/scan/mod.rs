// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — OCR preparation (binarization, dilation) and text
// recognition.

pub mod ocr;
pub mod prepare;

#[cfg(feature = "ocr")]
pub mod ocrs_engine;

pub use ocr::{RecognitionConfig, TesseractRecognizer, TextRecognizer};
pub use prepare::OcrPreprocessor;

#[cfg(feature = "ocr")]
pub use ocrs_engine::{OcrsModels, OcrsRecognizer};
