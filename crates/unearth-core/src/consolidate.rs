//! Post-run consolidation of extracted output.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::destination::ExtractionTarget;
use crate::formats::archive_stem;
use crate::scanner::ArchiveEntry;

/// Whether and how extracted output is merged after the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsolidationMode {
    /// Leave output in per-archive folders.
    None,
    /// Copy every successful archive's output into one merged directory.
    All {
        /// The merged directory.
        into: PathBuf,
    },
    /// Copy only the named archives' output into one merged directory.
    Selective {
        /// The merged directory.
        into: PathBuf,
        /// Archive file names to include.
        archives: Vec<String>,
    },
}

impl ConsolidationMode {
    /// The merged directory, when consolidation is enabled.
    #[must_use]
    pub fn merged_dir(&self) -> Option<&Path> {
        match self {
            Self::None => None,
            Self::All { into } | Self::Selective { into, .. } => Some(into),
        }
    }

    /// Whether this archive's output participates in consolidation.
    #[must_use]
    pub fn selects(&self, entry: &ArchiveEntry) -> bool {
        match self {
            Self::None => false,
            Self::All { .. } => true,
            Self::Selective { archives, .. } => {
                let name = entry.file_name();
                archives.iter().any(|candidate| candidate == &name)
            }
        }
    }
}

/// Summary of one consolidation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySummary {
    /// The merged directory files were copied into.
    pub destination: PathBuf,
    /// Files copied successfully.
    pub files_copied: usize,
    /// Files renamed to resolve a name collision.
    pub files_renamed: usize,
    /// Total bytes copied.
    pub bytes_copied: u64,
    /// Per-file copy failures, as human-readable messages.
    pub failures: Vec<String>,
}

/// Copies extracted files from per-archive folders into one merged directory.
///
/// Consolidation only copies; per-archive folders are never modified or
/// deleted. When two source files map to the same merged name, the later one
/// (in scan order) is renamed with a suffix derived from its source archive,
/// so no file is silently overwritten.
#[derive(Debug)]
pub struct Consolidator {
    into: PathBuf,
}

impl Consolidator {
    /// Creates a consolidator targeting `into`.
    pub fn new(into: impl Into<PathBuf>) -> Self {
        Self { into: into.into() }
    }

    /// Copies the contents of each target's destination folder.
    ///
    /// Per-file copy failures are recorded in the summary and do not stop the
    /// pass; only failing to create the merged directory itself is an error.
    pub fn run(&self, completed: &[ExtractionTarget]) -> io::Result<CopySummary> {
        fs::create_dir_all(&self.into)?;

        let mut summary = CopySummary {
            destination: self.into.clone(),
            files_copied: 0,
            files_renamed: 0,
            bytes_copied: 0,
            failures: Vec::new(),
        };

        for target in completed {
            let label = archive_stem(&target.entry.path);
            let files = WalkDir::new(&target.destination)
                .sort_by_file_name()
                .into_iter()
                .flatten()
                .filter(|e| e.file_type().is_file());

            for file in files {
                let name = file.file_name().to_string_lossy().into_owned();
                let (merged, renamed) = self.merged_path(&name, &label);

                match fs::copy(file.path(), &merged) {
                    Ok(bytes) => {
                        summary.files_copied += 1;
                        summary.bytes_copied = summary.bytes_copied.saturating_add(bytes);
                        if renamed {
                            summary.files_renamed += 1;
                        }
                    }
                    Err(err) => {
                        summary
                            .failures
                            .push(format!("failed to copy {name}: {err}"));
                    }
                }
            }
        }

        Ok(summary)
    }

    /// Picks a collision-free merged path for `file_name`, renaming with the
    /// source archive's label (then a counter) when the plain name is taken.
    fn merged_path(&self, file_name: &str, label: &str) -> (PathBuf, bool) {
        let direct = self.into.join(file_name);
        if !direct.exists() {
            return (direct, false);
        }

        let (stem, ext) = file_name
            .rsplit_once('.')
            .map_or((file_name, String::new()), |(s, e)| (s, format!(".{e}")));

        let mut candidate = self.into.join(format!("{stem}_{label}{ext}"));
        let mut counter = 1u32;
        while candidate.exists() {
            candidate = self.into.join(format!("{stem}_{label}_{counter}{ext}"));
            counter += 1;
        }
        (candidate, true)
    }
}
