// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR preparation — turns a rasterized page into a binarized, stroke-thickened
// image for the text recognizer.

use image::{DynamicImage, GrayImage};
use tracing::{debug, instrument};

use crate::image::processor::ImageProcessor;

/// Default inverse-threshold cutoff on the 0-255 scale.
pub const DEFAULT_CUTOFF: u8 = 150;

/// Binarizes and dilates page images ahead of recognition.
///
/// The pipeline never fails: any decodable image yields an output image,
/// however poor the recognition result might be.
#[derive(Debug, Clone, Copy)]
pub struct OcrPreprocessor {
    /// Inverse threshold cutoff.
    pub cutoff: u8,
    /// Dilation kernel (width, height).
    pub kernel: (u32, u32),
    /// Dilation passes.
    pub iterations: u32,
}

impl Default for OcrPreprocessor {
    fn default() -> Self {
        Self {
            cutoff: DEFAULT_CUTOFF,
            kernel: (2, 2),
            iterations: 1,
        }
    }
}

impl OcrPreprocessor {
    pub fn with_cutoff(cutoff: u8) -> Self {
        Self {
            cutoff,
            ..Self::default()
        }
    }

    /// Run the full preparation pipeline:
    ///
    /// 1. Convert to grayscale
    /// 2. Inverse binary threshold at `cutoff`
    /// 3. Dilate with a `kernel` rectangle, `iterations` times
    #[instrument(skip_all, fields(cutoff = self.cutoff))]
    pub fn prepare(&self, page: DynamicImage) -> GrayImage {
        let processor = ImageProcessor::from_dynamic(page);
        debug!(
            width = processor.width(),
            height = processor.height(),
            "Preparing page for OCR"
        );

        let (kernel_w, kernel_h) = self.kernel;
        processor
            .grayscale()
            .threshold_inverted(self.cutoff)
            .dilate(kernel_w, kernel_h, self.iterations)
            .into_luma8()
    }
}
