//! Error conversion utilities for CLI.
//!
//! Converts unearth-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use std::path::Path;
use unearth_core::RunError;

/// Converts `RunError` to a user-friendly anyhow error with context
pub fn convert_run_error(err: RunError, root: &Path) -> anyhow::Error {
    match err {
        RunError::RootNotFound { path } => {
            anyhow!(
                "Scan root not found: {}\n\
                 HINT: pass an existing directory, or run from inside one.",
                path.display()
            )
        }
        RunError::RootNotADirectory { path } => {
            anyhow!(
                "Scan root is not a directory: {}\n\
                 HINT: point unearth at a folder containing archives, not a file.",
                path.display()
            )
        }
        RunError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                root.display(),
                io_err
            )
        }
    }
}

/// Adds context to a run-level error.
pub fn add_run_context<T>(result: Result<T, RunError>, root: &Path) -> Result<T> {
    result.map_err(|e| convert_run_error(e, root))
}
