// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — grayscale conversion, fixed-cutoff thresholding, and
// morphological dilation on in-memory images using the `image` and
// `imageproc` crates.

use image::{DynamicImage, GrayImage, Luma};
use imageproc::contrast::{ThresholdType, threshold};
use imageproc::morphology::{Mask, grayscale_dilate};
use tracing::{debug, instrument};

// BT.601 luma weights in 14-bit fixed point, rounding half up.
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Image processing pipeline operating on a single in-memory image.
///
/// Each method consumes `self` and returns a new `ImageProcessor` wrapping
/// the transformed image, enabling method chaining.
///
/// ```ignore
/// let binary = ImageProcessor::from_dynamic(page)
///     .grayscale()
///     .threshold_inverted(150)
///     .dilate(2, 2, 1)
///     .into_luma8();
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return a single-channel 8-bit image.
    ///
    /// Colour input is reduced with BT.601 weights
    /// (`0.299 R + 0.587 G + 0.114 B`); alpha is discarded.
    pub fn into_luma8(self) -> GrayImage {
        match self.image {
            DynamicImage::ImageLuma8(gray) => gray,
            other => {
                let rgb = other.to_rgb8();
                GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                    let [r, g, b] = rgb.get_pixel(x, y).0;
                    Luma([bt601_luma(r, g, b)])
                })
            }
        }
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Convert the image to single-channel grayscale.
    #[instrument(skip(self))]
    pub fn grayscale(self) -> Self {
        debug!("Converting to grayscale");
        Self {
            image: DynamicImage::ImageLuma8(self.into_luma8()),
        }
    }

    /// Inverse binary threshold at a fixed `cutoff`.
    ///
    /// Pixels brighter than `cutoff` become 0 (background); pixels at or
    /// below it become 255 (foreground). Dark print on light paper therefore
    /// ends up as white strokes on black.
    #[instrument(skip(self), fields(cutoff))]
    pub fn threshold_inverted(self, cutoff: u8) -> Self {
        let gray = self.into_luma8();
        let binary = threshold(&gray, cutoff, ThresholdType::BinaryInverted);
        debug!(cutoff, "Inverse threshold applied");
        Self {
            image: DynamicImage::ImageLuma8(binary),
        }
    }

    /// Grayscale dilation with a `kernel_w` x `kernel_h` rectangle of ones.
    ///
    /// The anchor sits at the kernel centre (`kernel_w / 2`, `kernel_h / 2`),
    /// so an even-sized kernel reaches further up and to the left. Pixels
    /// outside the image are ignored. Kernel sides are capped at 255.
    #[instrument(skip(self), fields(kernel_w, kernel_h, iterations))]
    pub fn dilate(self, kernel_w: u32, kernel_h: u32, iterations: u32) -> Self {
        let mut gray = self.into_luma8();
        if kernel_w == 0 || kernel_h == 0 {
            return Self {
                image: DynamicImage::ImageLuma8(gray),
            };
        }
        let mask = rect_mask(kernel_w, kernel_h);
        for _ in 0..iterations {
            gray = grayscale_dilate(&gray, &mask);
        }
        Self {
            image: DynamicImage::ImageLuma8(gray),
        }
    }
}

/// Filled rectangular structuring element anchored at its centre.
fn rect_mask(kernel_w: u32, kernel_h: u32) -> Mask {
    let (w, h) = (kernel_w.min(255), kernel_h.min(255));
    let ones = GrayImage::from_pixel(w, h, Luma([255]));
    Mask::from_image(&ones, (w / 2) as u8, (h / 2) as u8)
}

fn bt601_luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = LUMA_R * u32::from(r) + LUMA_G * u32::from(g) + LUMA_B * u32::from(b);
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT).min(255) as u8
}
