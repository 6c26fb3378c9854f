// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterization — turn a PDF into one image per page, in document order.
//
// The production rasterizer shells out to Poppler's `pdftoppm`, writing PNG
// pages into a scratch directory that lives as long as the returned
// `RasterizedDocument`. Pages are decoded lazily, one at a time.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use image::DynamicImage;
use sortwerk_core::error::SortwerkError;
use tempfile::TempDir;
use tracing::{debug, info, instrument};

use crate::process::run_tool;

/// Converts a PDF file into an ordered sequence of page images.
pub trait PageRasterizer {
    /// Rasterize every page of `pdf_path`.
    ///
    /// Fails if the file is unreadable or not a valid PDF.
    fn rasterize(&self, pdf_path: &Path) -> Result<RasterizedDocument, SortwerkError>;
}

enum PageSource {
    File(PathBuf),
    Decoded(DynamicImage),
}

/// The pages of one rasterized PDF.
///
/// File-backed pages are removed from disk when this value is dropped.
pub struct RasterizedDocument {
    pages: Vec<PageSource>,
    _scratch: Option<TempDir>,
}

impl RasterizedDocument {
    /// Wrap already-decoded page images.
    pub fn from_images(images: Vec<DynamicImage>) -> Self {
        Self {
            pages: images.into_iter().map(PageSource::Decoded).collect(),
            _scratch: None,
        }
    }

    fn from_files(files: Vec<PathBuf>, scratch: TempDir) -> Self {
        Self {
            pages: files.into_iter().map(PageSource::File).collect(),
            _scratch: Some(scratch),
        }
    }

    /// Number of rasterized pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate over the page images in document order.
    pub fn pages(&self) -> impl Iterator<Item = Result<DynamicImage, SortwerkError>> + '_ {
        self.pages.iter().map(|source| match source {
            PageSource::Decoded(image) => Ok(image.clone()),
            PageSource::File(path) => image::open(path).map_err(|err| {
                SortwerkError::ImageError(format!(
                    "failed to decode rendered page {}: {}",
                    path.display(),
                    err
                ))
            }),
        })
    }
}

/// Rasterizer backed by Poppler's `pdftoppm`.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    program: PathBuf,
    dpi: u32,
    timeout: Option<Duration>,
}

impl PdftoppmRasterizer {
    pub fn new(program: impl Into<PathBuf>, dpi: u32, timeout: Option<Duration>) -> Self {
        Self {
            program: program.into(),
            dpi,
            timeout,
        }
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    #[instrument(skip(self), fields(dpi = self.dpi))]
    fn rasterize(&self, pdf_path: &Path) -> Result<RasterizedDocument, SortwerkError> {
        let scratch = tempfile::Builder::new()
            .prefix("sortwerk-raster-")
            .tempdir()?;
        let prefix = scratch.path().join("page");

        let mut command = Command::new(&self.program);
        command
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(pdf_path)
            .arg(&prefix);

        let output = run_tool(command, self.timeout, SortwerkError::RasterError)?;
        if !output.status.success() {
            return Err(SortwerkError::RasterError(format!(
                "pdftoppm failed on {} ({}): {}",
                pdf_path.display(),
                output.status,
                output.stderr_text()
            )));
        }

        let files = collect_pages(scratch.path())?;
        if files.is_empty() {
            return Err(SortwerkError::RasterError(format!(
                "pdftoppm produced no pages for {}",
                pdf_path.display()
            )));
        }

        info!(pages = files.len(), "PDF rasterized");
        Ok(RasterizedDocument::from_files(files, scratch))
    }
}

/// List `page-N.png` files in `dir`, ordered by page number.
///
/// pdftoppm zero-pads the number to the width of the page count, so the
/// suffix is parsed rather than sorted lexically.
fn collect_pages(dir: &Path) -> Result<Vec<PathBuf>, SortwerkError> {
    let mut numbered = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let number = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(page_number);
        if let Some(number) = number {
            numbered.push((number, path));
        }
    }
    numbered.sort_by_key(|(number, _)| *number);
    debug!(count = numbered.len(), "Rendered pages collected");
    Ok(numbered.into_iter().map(|(_, path)| path).collect())
}

fn page_number(file_name: &str) -> Option<u32> {
    file_name
        .strip_prefix("page-")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}
