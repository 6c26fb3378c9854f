// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Batch configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SortwerkError};

/// One uppercase ASCII letter followed by exactly seven ASCII digits.
pub const DEFAULT_IDENTIFIER_PATTERN: &str = "[A-Z][0-9]{7}";

/// Settings for one sorting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Folder walked recursively for PDFs.
    pub scan_root: PathBuf,
    /// Where identifier folders are created. `None` means the scan root.
    pub output_root: Option<PathBuf>,
    /// Regular expression locating the document identifier.
    pub identifier_pattern: String,
    /// Tesseract binary (name on PATH or absolute path).
    pub tesseract_cmd: PathBuf,
    /// Poppler `pdftoppm` binary (name on PATH or absolute path).
    pub pdftoppm_cmd: PathBuf,
    /// Rasterization resolution in dots per inch.
    pub raster_dpi: u32,
    /// Inverse binarization cutoff (0-255). Pixels above become background.
    pub binarize_cutoff: u8,
    /// Documents with strictly more pages than this are reported.
    pub large_page_threshold: usize,
    /// Kill an external tool after this many seconds. 0 disables the limit.
    pub recognition_timeout_secs: u64,
    /// Model directory for the built-in `ocrs` engine. When set, it replaces
    /// tesseract (needs a build with the `ocr` feature).
    pub ocrs_model_dir: Option<PathBuf>,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            scan_root: PathBuf::from("."),
            output_root: None,
            identifier_pattern: DEFAULT_IDENTIFIER_PATTERN.to_string(),
            tesseract_cmd: PathBuf::from("tesseract"),
            pdftoppm_cmd: PathBuf::from("pdftoppm"),
            raster_dpi: 200,
            binarize_cutoff: 150,
            large_page_threshold: 20,
            recognition_timeout_secs: 120,
            ocrs_model_dir: None,
        }
    }
}

impl SortConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Resolved destination root for identifier folders.
    pub fn output_root(&self) -> &Path {
        self.output_root.as_deref().unwrap_or(&self.scan_root)
    }

    /// Timeout for external tools, `None` when disabled.
    pub fn tool_timeout(&self) -> Option<std::time::Duration> {
        (self.recognition_timeout_secs > 0)
            .then(|| std::time::Duration::from_secs(self.recognition_timeout_secs))
    }

    /// Check the settings before a run starts.
    pub fn validate(&self) -> Result<()> {
        let pattern = regex::Regex::new(&self.identifier_pattern).map_err(|err| {
            SortwerkError::InvalidPattern {
                pattern: self.identifier_pattern.clone(),
                reason: err.to_string(),
            }
        })?;
        if pattern.is_match("") {
            return Err(SortwerkError::InvalidPattern {
                pattern: self.identifier_pattern.clone(),
                reason: "pattern matches the empty string".into(),
            });
        }

        if self.raster_dpi == 0 {
            return Err(SortwerkError::Config("raster_dpi must be greater than zero".into()));
        }
        if !self.scan_root.is_dir() {
            return Err(SortwerkError::Config(format!(
                "scan root {} is not a directory",
                self.scan_root.display()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let config = SortConfig::default();
        assert_eq!(config.identifier_pattern, "[A-Z][0-9]{7}");
        assert_eq!(config.binarize_cutoff, 150);
        assert_eq!(config.large_page_threshold, 20);
        assert_eq!(config.output_root(), Path::new("."));
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sortwerk.json");
        std::fs::write(&path, r#"{ "scan_root": "/srv/scans", "raster_dpi": 300 }"#).unwrap();

        let config = SortConfig::load(&path).unwrap();
        assert_eq!(config.scan_root, PathBuf::from("/srv/scans"));
        assert_eq!(config.raster_dpi, 300);
        assert_eq!(config.tesseract_cmd, PathBuf::from("tesseract"));
        assert_eq!(config.output_root(), Path::new("/srv/scans"));
    }

    #[test]
    fn validate_rejects_bad_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let config = SortConfig {
            scan_root: dir.path().to_path_buf(),
            identifier_pattern: "[A-Z".into(),
            ..SortConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SortwerkError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn validate_rejects_pattern_matching_empty_string() {
        let dir = tempfile::tempdir().unwrap();
        for pattern in ["x*", "[A-Z]?[0-9]{0,7}", ""] {
            let config = SortConfig {
                scan_root: dir.path().to_path_buf(),
                identifier_pattern: pattern.into(),
                ..SortConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(SortwerkError::InvalidPattern { .. })),
                "{pattern:?} must be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_missing_scan_root() {
        let config = SortConfig {
            scan_root: PathBuf::from("/nonexistent/sortwerk/scans"),
            ..SortConfig::default()
        };
        assert!(matches!(config.validate(), Err(SortwerkError::Config(_))));
    }

    #[test]
    fn zero_timeout_disables_limit() {
        let config = SortConfig {
            recognition_timeout_secs: 0,
            ..SortConfig::default()
        };
        assert!(config.tool_timeout().is_none());
    }
}
