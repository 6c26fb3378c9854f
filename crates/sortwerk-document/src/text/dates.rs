// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Date extraction — pulls `YYYY/MM/DD` and `DD/MM/YYYY` dates out of
// recognised text and normalises them to `YYYY/MM/DD`.
//
// Candidates are ordered by format, not by position: every year-first date
// comes before every day-first date. No calendar validation is done, so
// `45/67/2024` becomes `2024/67/45`.

use std::sync::LazyLock;

use regex::Regex;
use sortwerk_core::types::DatePair;

static YEAR_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{4}/[0-9]{2}/[0-9]{2}\b").expect("valid regex"));

static DAY_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<day>[0-9]{2})/(?P<month>[0-9]{2})/(?P<year>[0-9]{4})\b").expect("valid regex")
});

/// All date candidates in `text`, year-first matches then day-first matches.
pub fn date_candidates(text: &str) -> Vec<String> {
    let year_first = YEAR_FIRST.find_iter(text).map(|m| m.as_str().to_string());
    let day_first = DAY_FIRST
        .captures_iter(text)
        .map(|caps| format!("{}/{}/{}", &caps["year"], &caps["month"], &caps["day"]));
    year_first.chain(day_first).collect()
}

/// Extract the start and end date from `text`.
///
/// - no candidates: `(None, HANDWRITTEN_DATE_SENTINEL)`
/// - one candidate: `(Some(date), None)`
/// - two or more: the first two candidates
pub fn extract_dates(text: &str) -> DatePair {
    let mut candidates = date_candidates(text).into_iter();
    match (candidates.next(), candidates.next()) {
        (None, _) => DatePair::manual_check(),
        (Some(start), None) => DatePair::single(start),
        (Some(start), Some(end)) => DatePair::range(start, end),
    }
}
