//! Candidate archive discovery.

use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::formats::ArchiveFormat;
use crate::formats::detect_format;

/// How far the scanner descends from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Scan the root directory only.
    CurrentDirOnly,
    /// Scan the root directory and all subdirectories.
    Recursive,
}

/// A discovered candidate archive. Immutable once discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Absolute (or root-relative) path of the archive file.
    pub path: PathBuf,
    /// Format detected from the file name.
    pub format: ArchiveFormat,
    /// Size of the archive file in bytes, 0 when unreadable.
    pub size: u64,
}

impl ArchiveEntry {
    /// File name of the archive, for display and selection.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned())
    }
}

/// Directories the scanner must not enter.
///
/// Destination folders created during the current run are registered here so
/// a rescan never re-processes freshly extracted content, even when nested
/// under the scan root.
#[derive(Debug, Default)]
pub struct ExclusionSet {
    dirs: HashSet<PathBuf>,
}

impl ExclusionSet {
    /// Creates an empty exclusion set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a directory to exclude from scanning.
    pub fn insert(&mut self, dir: PathBuf) {
        self.dirs.insert(dir);
    }

    /// Returns `true` if `path` is an excluded directory or lies inside one.
    #[must_use]
    pub fn excludes(&self, path: &Path) -> bool {
        path.ancestors().any(|a| self.dirs.contains(a))
    }
}

/// Result of one scan pass: candidate archives in deterministic order plus
/// non-fatal warnings for unreadable directories.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Discovered archives, sorted lexicographically by path.
    pub entries: Vec<ArchiveEntry>,
    /// Human-readable warnings for skipped, unreadable locations.
    pub warnings: Vec<String>,
}

/// Walks a root directory and yields candidate archives by extension.
///
/// Scans are restartable: `scan` can be called any number of times and
/// produces the same ordering for unchanged directory contents.
#[derive(Debug)]
pub struct ArchiveScanner {
    root: PathBuf,
    mode: ScanMode,
}

impl ArchiveScanner {
    /// Creates a scanner for `root` with the given mode.
    pub fn new(root: impl Into<PathBuf>, mode: ScanMode) -> Self {
        Self {
            root: root.into(),
            mode,
        }
    }

    /// Performs one scan pass, pruning everything inside `exclusions`.
    ///
    /// Unreadable directories are recorded as warnings and skipped; the scan
    /// continues over the remaining entries.
    #[must_use]
    pub fn scan(&self, exclusions: &ExclusionSet) -> ScanReport {
        let max_depth = match self.mode {
            ScanMode::CurrentDirOnly => 1,
            ScanMode::Recursive => usize::MAX,
        };

        let mut report = ScanReport::default();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !exclusions.excludes(e.path()));

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    if let Some(format) = detect_format(entry.path()) {
                        let size = entry.metadata().map_or(0, |m| m.len());
                        report.entries.push(ArchiveEntry {
                            path: entry.path().to_path_buf(),
                            format,
                            size,
                        });
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    let location = err
                        .path()
                        .map_or_else(|| self.root.display().to_string(), |p| p.display().to_string());
                    report
                        .warnings
                        .push(format!("skipped unreadable entry {location}: {err}"));
                }
            }
        }

        // sort_by_file_name orders per directory; a final full-path sort makes
        // the report order reproducible across the whole tree.
        report.entries.sort_by(|a, b| a.path.cmp(&b.path));
        report
    }
}
