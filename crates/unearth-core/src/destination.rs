//! Per-archive destination folder layout.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::formats::archive_stem;
use crate::scanner::ArchiveEntry;

/// An archive paired with the isolated folder it extracts into.
#[derive(Debug, Clone)]
pub struct ExtractionTarget {
    /// The archive being extracted.
    pub entry: ArchiveEntry,
    /// The destination folder, unique for the lifetime of the run.
    pub destination: PathBuf,
}

/// Allocates collision-free destination folders for the lifetime of a run.
///
/// The destination is derived from the archive's own directory and name; a
/// `_N` suffix is appended while the candidate collides with either the
/// filesystem or a name already issued this run. The archive → folder mapping
/// is therefore injective even before any directory is created on disk.
#[derive(Debug, Default)]
pub struct DestinationAllocator {
    issued: HashSet<PathBuf>,
}

impl DestinationAllocator {
    /// Creates an allocator with no issued names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the destination folder for `entry`.
    pub fn allocate(&mut self, entry: &ArchiveEntry) -> ExtractionTarget {
        let parent = entry.path.parent().unwrap_or_else(|| Path::new("."));
        let stem = archive_stem(&entry.path);

        let mut candidate = parent.join(&stem);
        let mut counter = 1u32;
        while candidate.exists() || self.issued.contains(&candidate) {
            candidate = parent.join(format!("{stem}_{counter}"));
            counter += 1;
        }

        self.issued.insert(candidate.clone());
        ExtractionTarget {
            entry: entry.clone(),
            destination: candidate,
        }
    }
}

/// Wipes `dir` back to an empty directory.
///
/// Partial output from a failed attempt is untrusted; it is removed before
/// another engine or another password gets to write into the same folder.
pub fn reset_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)
}

/// Removes `dir` when it exists and contains nothing.
///
/// Failed and skipped archives should not leave empty folders behind; errors
/// here are ignored since a leftover empty directory is harmless.
pub fn remove_if_empty(dir: &Path) {
    if let Ok(mut entries) = fs::read_dir(dir)
        && entries.next().is_none()
    {
        let _ = fs::remove_dir(dir);
    }
}
