//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use unearth_core::ExtractionOutcome;
use unearth_core::RunReport;
use unearth_core::scanner::ArchiveEntry;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    /// Status mark for one archive line, colored when the terminal allows.
    fn mark(&self, outcome: &ExtractionOutcome) -> String {
        if !self.use_colors {
            return "-".to_string();
        }
        match outcome {
            ExtractionOutcome::Extracted { .. } => style("✓").green().bold().to_string(),
            ExtractionOutcome::Failed { .. } => style("✗").red().bold().to_string(),
            ExtractionOutcome::Skipped { .. } => style("-").yellow().bold().to_string(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_scan_result(&self, entries: &[ArchiveEntry]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in entries {
            let _ = self.term.write_line(&format!(
                "{} ({}, {})",
                entry.path.display(),
                entry.format.name(),
                Self::format_size(entry.size)
            ));
        }

        if entries.is_empty() {
            let _ = self.term.write_line("No archives found");
        } else {
            let _ = self
                .term
                .write_line(&format!("Found {} archives", entries.len()));
        }

        Ok(())
    }

    fn format_run_report(&self, report: &RunReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let records = report.records();
        if records.is_empty() {
            let _ = self.term.write_line("No archives found");
            return Ok(());
        }

        let total = records.len();
        for (index, (entry, outcome)) in records.iter().enumerate() {
            let prefix = format!("[{}/{total}]", index + 1);
            let mark = self.mark(outcome);
            let line = match outcome {
                ExtractionOutcome::Extracted { files, bytes, .. } => {
                    format!(
                        "{prefix} {mark} {}: {files} files, {}",
                        entry.file_name(),
                        Self::format_size(*bytes)
                    )
                }
                ExtractionOutcome::Failed { kind, .. } => {
                    format!("{prefix} {mark} {}: failed ({kind})", entry.file_name())
                }
                ExtractionOutcome::Skipped { reason } => {
                    format!("{prefix} {mark} {}: skipped ({reason})", entry.file_name())
                }
            };
            let _ = self.term.write_line(&line);

            if self.verbose {
                match outcome {
                    ExtractionOutcome::Extracted { destination, .. } => {
                        let _ = self
                            .term
                            .write_line(&format!("        -> {}", destination.display()));
                    }
                    ExtractionOutcome::Failed { reason, .. } => {
                        let _ = self.term.write_line(&format!("        {reason}"));
                    }
                    ExtractionOutcome::Skipped { .. } => {}
                }
            }
        }

        let summary = report.summary();
        let _ = self.term.write_line("");
        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ));
        } else {
            let _ = self.term.write_line("Extraction complete");
        }

        let _ = self
            .term
            .write_line(&format!("  Archives found:  {}", summary.archives_found));
        let _ = self
            .term
            .write_line(&format!("  Extracted:       {}", summary.succeeded));
        if summary.failed > 0 {
            let _ = self
                .term
                .write_line(&format!("  Failed:          {}", summary.failed));
        }
        if summary.skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Skipped:         {}", summary.skipped));
        }
        let _ = self
            .term
            .write_line(&format!("  Files extracted: {}", summary.files_extracted));
        let _ = self.term.write_line(&format!(
            "  Total size:      {}",
            Self::format_size(summary.bytes_extracted)
        ));

        if !summary.failures_by_cause.is_empty() {
            let _ = self.term.write_line("");
            let _ = self.term.write_line("Failures by cause:");
            for (kind, count) in &summary.failures_by_cause {
                let _ = self.term.write_line(&format!("  - {kind}: {count}"));
            }
        }

        if let Some(copy) = report.consolidation() {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Consolidated into {}",
                copy.destination.display()
            ));
            let _ = self
                .term
                .write_line(&format!("  Files copied:    {}", copy.files_copied));
            if copy.files_renamed > 0 {
                let _ = self
                    .term
                    .write_line(&format!("  Renamed:         {}", copy.files_renamed));
            }
            let _ = self.term.write_line(&format!(
                "  Total size:      {}",
                Self::format_size(copy.bytes_copied)
            ));
            for failure in &copy.failures {
                self.format_warning(failure);
            }
        }

        if !report.warnings().is_empty() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in report.warnings() {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
