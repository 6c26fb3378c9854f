// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test doubles: a scripted rasterizer/recognizer pair and a blank PDF writer.
//
// The rasterizer emits page N as an N-pixel-wide image; the recognizer reads
// the width back to pick that page's scripted text. Preparation keeps image
// dimensions, so the mapping survives the pipeline.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use image::{DynamicImage, GrayImage, Luma};
use lopdf::{Document, Object, dictionary};
use sortwerk_core::error::SortwerkError;
use sortwerk_document::{
    IdentifierMatcher, OcrPreprocessor, PageRasterizer, RasterizedDocument, TextRecognizer,
};

use crate::locator::DocumentLocator;

/// Replacement written over a PDF while it is being scanned, so the file that
/// gets moved differs from the one counted before the scan.
#[derive(Clone, Copy)]
pub enum Rewrite {
    Pages(usize),
    Garbage,
}

#[derive(Default)]
struct ScriptState {
    documents: HashMap<String, Vec<String>>,
    rewrites: HashMap<String, Rewrite>,
    current: Mutex<Vec<String>>,
    recognized: AtomicUsize,
}

/// Page texts keyed by PDF file name.
#[derive(Clone, Default)]
pub struct Script {
    state: Arc<ScriptState>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the recognised text of each page of `file_name`.
    pub fn document(mut self, file_name: &str, pages: &[&str]) -> Self {
        Arc::get_mut(&mut self.state)
            .expect("script is configured before use")
            .documents
            .insert(file_name.to_string(), pages.iter().map(|p| p.to_string()).collect());
        self
    }

    /// Overwrite `file_name` on disk when it is rasterized.
    pub fn rewrite_during_scan(mut self, file_name: &str, rewrite: Rewrite) -> Self {
        Arc::get_mut(&mut self.state)
            .expect("script is configured before use")
            .rewrites
            .insert(file_name.to_string(), rewrite);
        self
    }

    /// Number of pages sent to the recognizer so far.
    pub fn recognized_pages(&self) -> usize {
        self.state.recognized.load(Ordering::SeqCst)
    }

    pub fn locator(&self) -> DocumentLocator {
        DocumentLocator::new(
            Box::new(ScriptedRasterizer(self.state.clone())),
            Box::new(ScriptedRecognizer(self.state.clone())),
            OcrPreprocessor::default(),
            IdentifierMatcher::default(),
        )
    }
}

struct ScriptedRasterizer(Arc<ScriptState>);

impl PageRasterizer for ScriptedRasterizer {
    fn rasterize(&self, pdf_path: &Path) -> Result<RasterizedDocument, SortwerkError> {
        let name = pdf_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let pages = self
            .0
            .documents
            .get(&name)
            .ok_or_else(|| SortwerkError::RasterError(format!("no script for {name}")))?;

        match self.0.rewrites.get(&name) {
            Some(Rewrite::Pages(count)) => write_pdf(pdf_path, *count),
            Some(Rewrite::Garbage) => std::fs::write(pdf_path, b"no longer a pdf").unwrap(),
            None => {}
        }

        *self.0.current.lock().unwrap() = pages.clone();
        let images = (1..=pages.len() as u32)
            .map(|width| DynamicImage::ImageLuma8(GrayImage::from_pixel(width, 1, Luma([255]))))
            .collect();
        Ok(RasterizedDocument::from_images(images))
    }
}

struct ScriptedRecognizer(Arc<ScriptState>);

impl TextRecognizer for ScriptedRecognizer {
    fn recognize(&self, image: &GrayImage) -> Result<String, SortwerkError> {
        self.0.recognized.fetch_add(1, Ordering::SeqCst);
        let index = image.width() as usize - 1;
        Ok(self.0.current.lock().unwrap()[index].clone())
    }
}

/// Write a PDF with `pages` empty A4 pages to `path`.
pub fn write_pdf(path: &Path, pages: usize) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            })
            .into()
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
