//! Run configuration.

use std::path::PathBuf;

use crate::consolidate::ConsolidationMode;
use crate::password::PasswordMode;
use crate::scanner::ScanMode;

/// Configuration for one extraction run.
///
/// All choices are made once at run start; nothing is re-decided per archive.
///
/// # Examples
///
/// ```
/// use unearth_core::PasswordMode;
/// use unearth_core::RunConfig;
/// use unearth_core::ScanMode;
///
/// let config = RunConfig::new("./downloads")
///     .with_scan_mode(ScanMode::Recursive)
///     .with_password_mode(PasswordMode::SkipAll);
/// ```
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root directory to scan for archives.
    pub root: PathBuf,
    /// How far the scan descends.
    pub scan_mode: ScanMode,
    /// How encrypted archives are handled.
    pub password_mode: PasswordMode,
    /// Whether extracted output is merged after the run.
    pub consolidation: ConsolidationMode,
}

impl RunConfig {
    /// Creates a configuration with current-directory scanning, per-archive
    /// password prompts, and no consolidation.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            scan_mode: ScanMode::CurrentDirOnly,
            password_mode: PasswordMode::PerArchive,
            consolidation: ConsolidationMode::None,
        }
    }

    /// Sets the scan mode.
    #[must_use]
    pub fn with_scan_mode(mut self, mode: ScanMode) -> Self {
        self.scan_mode = mode;
        self
    }

    /// Sets the password-handling mode.
    #[must_use]
    pub fn with_password_mode(mut self, mode: PasswordMode) -> Self {
        self.password_mode = mode;
        self
    }

    /// Sets the consolidation mode.
    #[must_use]
    pub fn with_consolidation(mut self, mode: ConsolidationMode) -> Self {
        self.consolidation = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::new("/tmp/x");
        assert_eq!(config.scan_mode, ScanMode::CurrentDirOnly);
        assert_eq!(config.password_mode, PasswordMode::PerArchive);
        assert_eq!(config.consolidation, ConsolidationMode::None);
    }

    #[test]
    fn test_builders() {
        let config = RunConfig::new("/tmp/x")
            .with_scan_mode(ScanMode::Recursive)
            .with_password_mode(PasswordMode::SharedSecret);
        assert_eq!(config.scan_mode, ScanMode::Recursive);
        assert_eq!(config.password_mode, PasswordMode::SharedSecret);
    }
}
