// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File organizer — moves a matched PDF to `<output root>/<folder>/<identifier>.pdf`,
// never overwriting an existing destination.

use std::io;
use std::path::{Path, PathBuf};

use sortwerk_core::error::SortwerkError;
use tracing::{debug, info, instrument, warn};

/// Where a matched document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// The file now lives at this path.
    Moved(PathBuf),
    /// This destination already existed; the source was left untouched.
    Skipped(PathBuf),
}

/// Files matched PDFs into identifier-named folders.
#[derive(Debug, Clone)]
pub struct FileOrganizer {
    output_root: PathBuf,
}

impl FileOrganizer {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    /// Folder name for `identifier`: spaces become underscores.
    pub fn folder_name(identifier: &str) -> String {
        identifier.replace(' ', "_")
    }

    /// Destination path for `identifier`.
    pub fn destination_for(&self, identifier: &str) -> PathBuf {
        self.output_root
            .join(Self::folder_name(identifier))
            .join(format!("{identifier}.pdf"))
    }

    /// Move `source` into the folder for `identifier`.
    ///
    /// The folder is created if missing. An existing destination is a
    /// conflict, not an error: the source stays where it is and
    /// [`Placement::Skipped`] is returned.
    #[instrument(skip(self), fields(root = %self.output_root.display()))]
    pub fn organize(&self, source: &Path, identifier: &str) -> Result<Placement, SortwerkError> {
        let destination = self.destination_for(identifier);
        if let Some(folder) = destination.parent() {
            std::fs::create_dir_all(folder)?;
        }

        if destination.exists() {
            warn!(
                destination = %destination.display(),
                "File already exists! Skipping move"
            );
            return Ok(Placement::Skipped(destination));
        }

        move_file(source, &destination)?;
        info!(destination = %destination.display(), "Renamed and moved PDF");
        Ok(Placement::Moved(destination))
    }
}

/// Rename within a volume, copy-then-delete across volumes.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match std::fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            debug!("Cross-device move; copying then removing source");
            copy_then_remove(
                source,
                destination,
                |from, to| std::fs::copy(from, to),
                |path| std::fs::remove_file(path),
            )
        }
        Err(err) => Err(err),
    }
}

/// Copy `source` to `destination`, then remove `source`.
///
/// If either step fails the copy at `destination` is deleted, so the file
/// only ever exists at one of the two paths when this returns.
fn copy_then_remove(
    source: &Path,
    destination: &Path,
    copy: fn(&Path, &Path) -> io::Result<u64>,
    remove: fn(&Path) -> io::Result<()>,
) -> io::Result<()> {
    if let Err(err) = copy(source, destination) {
        discard_copy(destination);
        return Err(err);
    }
    if let Err(err) = remove(source) {
        warn!(source = %source.display(), error = %err, "Cannot remove source; rolling back copy");
        discard_copy(destination);
        return Err(err);
    }
    Ok(())
}

fn discard_copy(destination: &Path) {
    match std::fs::remove_file(destination) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(
            destination = %destination.display(),
            error = %err,
            "Cannot remove incomplete copy"
        ),
    }
}
