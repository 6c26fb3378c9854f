// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sortwerk — Batch OCR sorter for scanned PDF documents
//
// Entry point. Initialises logging, resolves the configuration, wires the
// rasterizer, recognizer and organizer together, and runs one batch.

mod cli;
mod report;

use std::process::ExitCode;

use clap::Parser;
use sortwerk_batch::{BatchWalker, DocumentLocator, FileOrganizer};
use sortwerk_core::SortConfig;
use sortwerk_core::error::Result;
use sortwerk_core::human_errors::humanize_error;
use sortwerk_document::{
    IdentifierMatcher, OcrPreprocessor, PdftoppmRasterizer, TesseractRecognizer, TextRecognizer,
};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    tracing::info!("Sortwerk starting");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let human = humanize_error(&e);
            tracing::error!(error = %e, "batch could not start");
            eprintln!("{human}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.resolve_config()?;
    let walker = build_walker(&config)?;

    let batch = walker.run(&config.scan_root);
    print!("{}", report::render(&batch, config.large_page_threshold));

    if let Some(path) = &cli.report_json {
        report::write_json(&batch, path)?;
        tracing::info!(path = %path.display(), "JSON report written");
    }
    Ok(())
}

fn build_walker(config: &SortConfig) -> Result<BatchWalker> {
    let timeout = config.tool_timeout();
    let rasterizer = PdftoppmRasterizer::new(&config.pdftoppm_cmd, config.raster_dpi, timeout);
    let recognizer = build_recognizer(config)?;
    let matcher = IdentifierMatcher::new(&config.identifier_pattern)?;

    let locator = DocumentLocator::new(
        Box::new(rasterizer),
        recognizer,
        OcrPreprocessor::with_cutoff(config.binarize_cutoff),
        matcher,
    );
    let organizer = FileOrganizer::new(config.output_root());

    Ok(BatchWalker::new(locator, organizer).with_large_page_threshold(config.large_page_threshold))
}

fn build_recognizer(config: &SortConfig) -> Result<Box<dyn TextRecognizer>> {
    match &config.ocrs_model_dir {
        None => Ok(Box::new(TesseractRecognizer::new(
            &config.tesseract_cmd,
            config.tool_timeout(),
        ))),
        #[cfg(feature = "ocr")]
        Some(dir) => {
            let models = sortwerk_document::OcrsModels::from_dir(dir);
            Ok(Box::new(sortwerk_document::OcrsRecognizer::new(models)?))
        }
        #[cfg(not(feature = "ocr"))]
        Some(_) => Err(sortwerk_core::SortwerkError::Config(
            "ocrs models were given but this build lacks the `ocr` feature".into(),
        )),
    }
}
