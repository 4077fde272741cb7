//! Error types for batch extraction runs.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `RunError`.
pub type Result<T> = std::result::Result<T, RunError>;

/// Fatal errors that abort a run.
///
/// Only conditions at the scan root (or outside per-archive processing)
/// surface through this type. A failure scoped to a single archive is never
/// an `Err`: it is recorded as that archive's terminal outcome in the run
/// report, and the run continues with the remaining archives.
#[derive(Error, Debug)]
pub enum RunError {
    /// Scan root path does not exist.
    #[error("scan root does not exist: {path}")]
    RootNotFound {
        /// The missing root path.
        path: PathBuf,
    },

    /// Scan root exists but is not a directory.
    #[error("scan root is not a directory: {path}")]
    RootNotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// I/O operation failed outside per-archive processing.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cause taxonomy for archives whose extraction failed.
///
/// Both engines classify their diagnostics into these causes; the run report
/// groups failures by them. Finer-grained engine error codes are an extension
/// point, not part of this contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FailureKind {
    /// The archive is encrypted and the password was missing or wrong.
    WrongPassword,
    /// The engine could not be invoked at all (e.g. missing binary).
    EngineUnavailable,
    /// No engine handles this archive's format or compression method.
    UnsupportedFormat,
    /// The engine recognized the format but the archive data is damaged.
    CorruptArchive,
    /// Any other failure (I/O, permissions, unexpected engine exit).
    Other,
}

impl FailureKind {
    /// Stable machine-readable label, used by the JSON output surface.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WrongPassword => "wrong-password",
            Self::EngineUnavailable => "engine-unavailable",
            Self::UnsupportedFormat => "unsupported-format",
            Self::CorruptArchive => "corrupt-archive",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::WrongPassword => "wrong password",
            Self::EngineUnavailable => "engine unavailable",
            Self::UnsupportedFormat => "unsupported format",
            Self::CorruptArchive => "corrupt archive",
            Self::Other => "other failure",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_not_found_display() {
        let err = RunError::RootNotFound {
            path: PathBuf::from("/no/such/dir"),
        };
        assert!(err.to_string().contains("does not exist"));
        assert!(err.to_string().contains("/no/such/dir"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RunError = io_err.into();
        assert!(matches!(err, RunError::Io(_)));
    }

    #[test]
    fn test_failure_kind_labels() {
        assert_eq!(FailureKind::WrongPassword.as_str(), "wrong-password");
        assert_eq!(FailureKind::EngineUnavailable.to_string(), "engine unavailable");
        assert_eq!(FailureKind::CorruptArchive.as_str(), "corrupt-archive");
    }
}
