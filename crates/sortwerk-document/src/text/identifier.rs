// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Identifier matcher — finds the document key in recognised text.

use regex::Regex;
use sortwerk_core::config::DEFAULT_IDENTIFIER_PATTERN;
use sortwerk_core::error::SortwerkError;

/// Searches text for the first substring matching the identifier pattern.
#[derive(Debug, Clone)]
pub struct IdentifierMatcher {
    regex: Regex,
}

impl IdentifierMatcher {
    /// Compile a custom identifier pattern.
    pub fn new(pattern: &str) -> Result<Self, SortwerkError> {
        let regex = Regex::new(pattern).map_err(|err| SortwerkError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// The pattern this matcher was built from.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// First match in `text` that can name a folder and file, or `None`.
    ///
    /// Empty matches, `.`/`..`, and matches containing a path separator are
    /// passed over. Later matches on the same text are ignored.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .find_iter(text)
            .map(|m| m.as_str())
            .find(|candidate| is_file_name_safe(candidate))
    }
}

fn is_file_name_safe(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate != "."
        && candidate != ".."
        && !candidate.contains(['/', '\\'])
}

impl Default for IdentifierMatcher {
    /// One ASCII uppercase letter followed by exactly seven ASCII digits.
    fn default() -> Self {
        Self {
            regex: Regex::new(DEFAULT_IDENTIFIER_PATTERN).expect("default identifier pattern is valid"),
        }
    }
}
