// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pure-Rust text recognizer built on the `ocrs` crate, with neural network
// models executed via `rten`. Useful where installing Tesseract is not an
// option.
//
// # Feature Gate
//
// This module is only available when the `ocr` feature is enabled:
//
// ```toml
// sortwerk-document = { path = "crates/sortwerk-document", features = ["ocr"] }
// ```
//
// # Model Setup
//
// The engine needs two model files in one directory:
//
// - `text-detection.rten` — locates text regions in the image.
// - `text-recognition.rten` — decodes characters from detected regions.
//
// Running `ocrs-cli` once downloads both into `$XDG_CACHE_HOME/ocrs`
// (typically `~/.cache/ocrs`); pass that directory via `--ocrs-models`.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage};
use ocrs::{ImageSource, OcrEngine as OcrsEngine, OcrEngineParams};
use rten::Model;
use sortwerk_core::error::SortwerkError;
use tracing::{debug, info, instrument};

use crate::scan::ocr::TextRecognizer;

const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Locations of the two `ocrs` model files.
#[derive(Debug, Clone)]
pub struct OcrsModels {
    pub detection_model_path: PathBuf,
    pub recognition_model_path: PathBuf,
}

impl OcrsModels {
    /// Expect `text-detection.rten` and `text-recognition.rten` inside `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Verify that both model files exist.
    pub fn validate(&self) -> Result<(), SortwerkError> {
        for path in [&self.detection_model_path, &self.recognition_model_path] {
            if !path.exists() {
                return Err(SortwerkError::OcrError(format!(
                    "model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Recognizer running the `ocrs` engine in-process.
///
/// Model loading is the expensive step, so build one recognizer per run and
/// reuse it for every page.
pub struct OcrsRecognizer {
    engine: OcrsEngine,
}

impl OcrsRecognizer {
    #[instrument(skip_all, fields(
        detection = %models.detection_model_path.display(),
        recognition = %models.recognition_model_path.display(),
    ))]
    pub fn new(models: OcrsModels) -> Result<Self, SortwerkError> {
        models.validate()?;

        let load = |path: &Path| {
            Model::load_file(path).map_err(|err| {
                SortwerkError::OcrError(format!(
                    "failed to load model from {}: {}",
                    path.display(),
                    err
                ))
            })
        };

        info!("Loading OCR models");
        let detection_model = load(&models.detection_model_path)?;
        let recognition_model = load(&models.recognition_model_path)?;

        let engine = OcrsEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| SortwerkError::OcrError(format!("failed to initialise OCR engine: {}", err)))?;

        info!("OCR engine initialised");
        Ok(Self { engine })
    }
}

impl TextRecognizer for OcrsRecognizer {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &GrayImage) -> Result<String, SortwerkError> {
        // ocrs expects RGB8 input.
        let rgb = DynamicImage::ImageLuma8(image.clone()).to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            SortwerkError::OcrError(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| SortwerkError::OcrError(format!("OCR preprocessing failed: {}", err)))?;

        let text = self
            .engine
            .get_text(&input)
            .map_err(|err| SortwerkError::OcrError(format!("OCR text recognition failed: {}", err)))?;

        debug!(line_count = text.lines().count(), "OCR recognition complete");
        Ok(text)
    }
}
