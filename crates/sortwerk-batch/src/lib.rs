// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sortwerk-batch — Per-document search, filing, and the batch walk that ties
// them together.

pub mod locator;
pub mod organizer;
pub mod walker;

#[cfg(test)]
mod testing;

pub use locator::DocumentLocator;
pub use organizer::{FileOrganizer, Placement};
pub use walker::{BatchWalker, discover_pdfs};
