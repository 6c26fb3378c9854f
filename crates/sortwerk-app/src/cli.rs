// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and their merge onto the file configuration.

use std::path::PathBuf;

use clap::Parser;
use sortwerk_core::SortConfig;
use sortwerk_core::error::Result;

/// Sort scanned PDFs into folders named after the identifier printed on them.
#[derive(Parser, Debug)]
#[command(name = "sortwerk", version, about)]
pub struct Cli {
    /// Folder to scan recursively for PDFs (overrides the config file).
    pub root: Option<PathBuf>,

    /// JSON config file; flags given on the command line take precedence.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Create identifier folders here instead of inside the scan root.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Identifier regular expression.
    #[arg(long)]
    pub pattern: Option<String>,

    /// Path to the tesseract binary.
    #[arg(long)]
    pub tesseract: Option<PathBuf>,

    /// Path to Poppler's pdftoppm binary.
    #[arg(long)]
    pub pdftoppm: Option<PathBuf>,

    /// Rasterization resolution.
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Seconds before an external tool is killed (0 = no limit).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Use the built-in ocrs engine with models from this directory
    /// instead of tesseract (requires the `ocr` feature).
    #[arg(long)]
    pub ocrs_models: Option<PathBuf>,

    /// Also write the full batch report as JSON to this file.
    #[arg(long)]
    pub report_json: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Build the run configuration: defaults, then the config file, then flags.
    pub fn resolve_config(&self) -> Result<SortConfig> {
        let mut config = match &self.config {
            Some(path) => SortConfig::load(path)?,
            None => SortConfig::default(),
        };

        if let Some(root) = &self.root {
            config.scan_root = root.clone();
        }
        if let Some(output) = &self.output {
            config.output_root = Some(output.clone());
        }
        if let Some(pattern) = &self.pattern {
            config.identifier_pattern = pattern.clone();
        }
        if let Some(tesseract) = &self.tesseract {
            config.tesseract_cmd = tesseract.clone();
        }
        if let Some(pdftoppm) = &self.pdftoppm {
            config.pdftoppm_cmd = pdftoppm.clone();
        }
        if let Some(dpi) = self.dpi {
            config.raster_dpi = dpi;
        }
        if let Some(timeout) = self.timeout {
            config.recognition_timeout_secs = timeout;
        }
        if let Some(dir) = &self.ocrs_models {
            config.ocrs_model_dir = Some(dir.clone());
        }

        config.validate()?;
        Ok(config)
    }
}
