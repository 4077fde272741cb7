//! Progress bar implementation for extraction runs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use unearth_core::ExtractionOutcome;
use unearth_core::RunObserver;
use unearth_core::scanner::ArchiveEntry;

/// CLI progress bar implementing `RunObserver`.
///
/// Displays one tick per archive with the current archive name when running
/// in a TTY. Automatically cleans up on drop.
pub struct CliProgress {
    bar: ProgressBar,
    prefix: &'static str,
    initialized: bool,
}

impl CliProgress {
    /// Creates a new CLI progress bar. The length is learned from the first
    /// observer callback.
    #[must_use]
    pub fn new(prefix: &'static str) -> Self {
        let bar = ProgressBar::new(0);

        // Template: "Extracting photos.zip [████░░░░] 3/12 archives"
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} archives")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(prefix);

        Self {
            bar,
            prefix,
            initialized: false,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl RunObserver for CliProgress {
    fn on_archive_start(&mut self, entry: &ArchiveEntry, _current: usize, total: usize) {
        if !self.initialized {
            self.bar.set_length(total as u64);
            self.initialized = true;
        }
        self.bar
            .set_message(format!("{} {}", self.prefix, entry.file_name()));
    }

    fn on_archive_complete(&mut self, _entry: &ArchiveEntry, _outcome: &ExtractionOutcome) {
        self.bar.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use unearth_core::formats::ArchiveFormat;

    #[test]
    fn test_observer_ticks_through_archives() {
        let mut progress = CliProgress::new("Extracting");
        let entry = ArchiveEntry {
            path: PathBuf::from("a.zip"),
            format: ArchiveFormat::Zip,
            size: 0,
        };

        progress.on_archive_start(&entry, 1, 2);
        progress.on_archive_complete(
            &entry,
            &ExtractionOutcome::Skipped {
                reason: unearth_core::report::SkipReason::UserDeclined,
            },
        );

        assert_eq!(progress.bar.position(), 1);
        assert_eq!(progress.bar.length(), Some(2));
    }
}
