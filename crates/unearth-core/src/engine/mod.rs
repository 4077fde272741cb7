//! Extraction engine boundary.
//!
//! Engines are opaque capability providers: given an archive, a destination
//! folder, and an optional password, they either extract and report
//! statistics or fail with a classified reason. The orchestrator composes
//! two of them (external primary, library fallback) with a fixed-order
//! fallback policy.

pub mod native;
pub mod sevenzip;

use std::path::Path;

use walkdir::WalkDir;

use crate::error::FailureKind;

/// Statistics from a successful extraction attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Number of files written under the destination folder.
    pub files: usize,
    /// Total bytes written under the destination folder.
    pub bytes: u64,
}

/// A failed extraction attempt, classified into the cause taxonomy.
#[derive(Debug, Clone)]
pub struct EngineFailure {
    /// Classified cause.
    pub kind: FailureKind,
    /// Engine diagnostic text.
    pub message: String,
}

impl EngineFailure {
    /// Creates a failure with the given cause and diagnostic.
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EngineFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// A collaborator capable of extracting archives.
pub trait Engine {
    /// Short engine name for diagnostics.
    fn name(&self) -> &'static str;

    /// Attempts to extract `archive` into `dest`, optionally with a password.
    ///
    /// Implementations write only under `dest` and classify every failure
    /// into [`FailureKind`].
    fn extract(
        &self,
        archive: &Path,
        dest: &Path,
        password: Option<&str>,
    ) -> std::result::Result<EngineStats, EngineFailure>;
}

/// Classifies free-form engine diagnostics into a failure cause.
///
/// This is the single classification point for both engines; anything not
/// recognized stays [`FailureKind::Other`].
pub(crate) fn classify_diagnostic(text: &str) -> FailureKind {
    let lower = text.to_ascii_lowercase();

    if lower.contains("password") || lower.contains("encrypt") {
        FailureKind::WrongPassword
    } else if lower.contains("unsupported") || lower.contains("not supported") {
        FailureKind::UnsupportedFormat
    } else if lower.contains("as archive")
        || lower.contains("headers error")
        || lower.contains("unexpected end")
        || lower.contains("crc")
        || lower.contains("data error")
        || lower.contains("corrupt")
        || lower.contains("invalid")
    {
        FailureKind::CorruptArchive
    } else {
        FailureKind::Other
    }
}

/// Counts files and bytes under `dest` after a successful attempt.
///
/// Engines report what actually landed on disk rather than trusting their
/// own entry accounting, so both engines agree on what "extracted" means.
pub(crate) fn measure_tree(dest: &Path) -> EngineStats {
    let mut stats = EngineStats::default();
    for entry in WalkDir::new(dest).into_iter().flatten() {
        if entry.file_type().is_file()
            && let Ok(metadata) = entry.metadata()
        {
            stats.files += 1;
            stats.bytes = stats.bytes.saturating_add(metadata.len());
        }
    }
    stats
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_classify_password_diagnostics() {
        assert_eq!(
            classify_diagnostic("ERROR: Wrong password : secret.txt"),
            FailureKind::WrongPassword
        );
        assert_eq!(
            classify_diagnostic("Can not open encrypted archive"),
            FailureKind::WrongPassword
        );
    }

    #[test]
    fn test_classify_unsupported_diagnostics() {
        assert_eq!(
            classify_diagnostic("Unsupported method"),
            FailureKind::UnsupportedFormat
        );
        assert_eq!(
            classify_diagnostic("compression method not supported"),
            FailureKind::UnsupportedFormat
        );
    }

    #[test]
    fn test_classify_corrupt_diagnostics() {
        assert_eq!(
            classify_diagnostic("Can not open the file as archive"),
            FailureKind::CorruptArchive
        );
        assert_eq!(
            classify_diagnostic("Headers Error"),
            FailureKind::CorruptArchive
        );
        assert_eq!(classify_diagnostic("CRC failed"), FailureKind::CorruptArchive);
    }

    #[test]
    fn test_classify_unknown_diagnostics() {
        assert_eq!(classify_diagnostic("something odd"), FailureKind::Other);
    }

    #[test]
    fn test_measure_tree_counts_nested_files() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("a.txt"), b"12345").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub").join("b.txt"), b"123").unwrap();

        let stats = measure_tree(temp.path());
        assert_eq!(stats.files, 2);
        assert_eq!(stats.bytes, 8);
    }

    #[test]
    fn test_engine_failure_display() {
        let failure = EngineFailure::new(FailureKind::CorruptArchive, "bad header");
        assert_eq!(failure.to_string(), "corrupt archive: bad header");
    }
}
