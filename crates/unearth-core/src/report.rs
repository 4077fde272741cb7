//! Run reporting and summary.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::consolidate::CopySummary;
use crate::error::FailureKind;
use crate::scanner::ArchiveEntry;

/// Why an archive was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The user declined to supply a password.
    UserDeclined,
    /// The run was configured to skip all encrypted archives.
    PasswordsDisabled,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::UserDeclined => "user declined to supply a password",
            Self::PasswordsDisabled => "encrypted archives skipped by policy",
        };
        f.write_str(text)
    }
}

/// Terminal outcome for one archive. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Extraction succeeded.
    Extracted {
        /// Files written under the destination folder.
        files: usize,
        /// Bytes written under the destination folder.
        bytes: u64,
        /// The destination folder.
        destination: PathBuf,
    },
    /// Extraction failed after exhausting the engine chain.
    Failed {
        /// Classified cause.
        kind: FailureKind,
        /// Engine diagnostic.
        reason: String,
    },
    /// The archive was skipped by the password policy.
    Skipped {
        /// Why it was skipped.
        reason: SkipReason,
    },
}

impl ExtractionOutcome {
    /// Returns `true` for a successful extraction.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }
}

/// Ordered accumulator of per-archive outcomes for one run.
///
/// Records are appended in scan order by the orchestrator and never mutated
/// afterwards; every discovered archive yields exactly one record.
#[derive(Debug, Default)]
pub struct RunReport {
    records: Vec<(ArchiveEntry, ExtractionOutcome)>,
    warnings: Vec<String>,
    consolidation: Option<CopySummary>,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one archive's terminal outcome.
    pub fn record(&mut self, entry: ArchiveEntry, outcome: ExtractionOutcome) {
        self.records.push((entry, outcome));
    }

    /// Appends a non-fatal warning (unreadable scan locations, consolidation
    /// problems).
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Stores the consolidation pass summary.
    pub fn set_consolidation(&mut self, summary: CopySummary) {
        self.consolidation = Some(summary);
    }

    /// All (archive, outcome) pairs in scan order.
    #[must_use]
    pub fn records(&self) -> &[(ArchiveEntry, ExtractionOutcome)] {
        &self.records
    }

    /// Warnings accumulated during the run.
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Consolidation summary, when a consolidation pass ran.
    #[must_use]
    pub fn consolidation(&self) -> Option<&CopySummary> {
        self.consolidation.as_ref()
    }

    /// Produces the final counts snapshot.
    #[must_use]
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            archives_found: self.records.len(),
            ..RunSummary::default()
        };

        for (_, outcome) in &self.records {
            match outcome {
                ExtractionOutcome::Extracted { files, bytes, .. } => {
                    summary.succeeded += 1;
                    summary.files_extracted += files;
                    summary.bytes_extracted = summary.bytes_extracted.saturating_add(*bytes);
                }
                ExtractionOutcome::Failed { kind, .. } => {
                    summary.failed += 1;
                    *summary.failures_by_cause.entry(*kind).or_insert(0) += 1;
                }
                ExtractionOutcome::Skipped { .. } => summary.skipped += 1,
            }
        }

        summary
    }
}

/// Final counts for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Archives discovered by the scan.
    pub archives_found: usize,
    /// Archives extracted successfully.
    pub succeeded: usize,
    /// Archives that failed extraction.
    pub failed: usize,
    /// Archives skipped by the password policy.
    pub skipped: usize,
    /// Total files extracted across all archives.
    pub files_extracted: usize,
    /// Total bytes extracted across all archives.
    pub bytes_extracted: u64,
    /// Failure counts grouped by cause.
    pub failures_by_cause: BTreeMap<FailureKind, usize>,
}
