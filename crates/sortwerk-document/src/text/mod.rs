// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text module — identifier and date extraction from recognised text.

pub mod dates;
pub mod identifier;

pub use dates::extract_dates;
pub use identifier::IdentifierMatcher;
