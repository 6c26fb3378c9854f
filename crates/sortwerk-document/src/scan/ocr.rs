// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text recognition for prepared page images.
//
// The default engine is the Tesseract command-line tool. Each page is written
// to a scratch PNG and recognised with the LSTM engine (`--oem 1`) and the
// "single uniform block of text" segmentation mode (`--psm 6`). A pure-Rust
// engine based on `ocrs` is available behind the `ocr` feature; see
// `scan::ocrs_engine`.

use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use image::{GrayImage, ImageFormat};
use sortwerk_core::error::SortwerkError;
use tracing::{debug, instrument};

use crate::process::run_tool;

/// Converts a prepared page image into text.
///
/// Empty text is a valid result and means nothing legible was found.
pub trait TextRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<String, SortwerkError>;
}

/// Engine and layout modes passed to Tesseract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionConfig {
    /// `--oem`: 1 selects the LSTM engine only.
    pub engine_mode: u8,
    /// `--psm`: 6 assumes a single uniform block (column) of text.
    pub page_seg_mode: u8,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            engine_mode: 1,
            page_seg_mode: 6,
        }
    }
}

impl RecognitionConfig {
    fn args(&self) -> [String; 4] {
        [
            "--oem".to_string(),
            self.engine_mode.to_string(),
            "--psm".to_string(),
            self.page_seg_mode.to_string(),
        ]
    }
}

/// Recognizer backed by the `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    program: PathBuf,
    config: RecognitionConfig,
    timeout: Option<Duration>,
}

impl TesseractRecognizer {
    pub fn new(program: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            config: RecognitionConfig::default(),
            timeout,
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &GrayImage) -> Result<String, SortwerkError> {
        let scratch = tempfile::Builder::new()
            .prefix("sortwerk-ocr-")
            .suffix(".png")
            .tempfile()?;
        image
            .save_with_format(scratch.path(), ImageFormat::Png)
            .map_err(|err| SortwerkError::ImageError(format!("failed to write OCR input: {err}")))?;

        let mut command = Command::new(&self.program);
        command
            .arg(scratch.path())
            .arg("stdout")
            .args(self.config.args());

        let output = run_tool(command, self.timeout, SortwerkError::OcrError)?;
        if !output.status.success() {
            return Err(SortwerkError::OcrError(format!(
                "tesseract exited with {}: {}",
                output.status,
                output.stderr_text()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(
            line_count = text.lines().count(),
            char_count = text.len(),
            "OCR recognition complete"
        );
        Ok(text)
    }
}
