//! Run orchestration: the per-archive extraction state machine.
//!
//! Each discovered archive moves through a bounded state machine: probe
//! extraction with no password; on success, done; on a password-required
//! failure, ask the policy for a decision and make at most one retry with
//! the supplied secret. Wrong-password failures never consult the fallback
//! engine (the password, not the engine, is the blocking factor); every
//! other primary failure triggers exactly one fallback attempt against a
//! destination wiped of partial output. Every archive ends in exactly one
//! terminal outcome, and no per-archive failure aborts the run.

use std::fs;
use std::path::Path;

use crate::config::RunConfig;
use crate::consolidate::Consolidator;
use crate::destination::DestinationAllocator;
use crate::destination::ExtractionTarget;
use crate::destination::remove_if_empty;
use crate::destination::reset_dir;
use crate::engine::Engine;
use crate::engine::EngineFailure;
use crate::engine::EngineStats;
use crate::engine::native::NativeEngine;
use crate::engine::sevenzip::SevenZipEngine;
use crate::error::FailureKind;
use crate::error::Result;
use crate::error::RunError;
use crate::password::PasswordDecision;
use crate::password::PasswordMode;
use crate::password::PasswordPolicy;
use crate::password::PasswordPrompt;
use crate::report::ExtractionOutcome;
use crate::report::RunReport;
use crate::report::SkipReason;
use crate::scanner::ArchiveEntry;
use crate::scanner::ArchiveScanner;
use crate::scanner::ExclusionSet;

/// Callback for live run progress.
///
/// Implement this to surface per-archive progress (the CLI renders a
/// progress bar from it). All methods have empty defaults.
pub trait RunObserver {
    /// Called before an archive is processed. `current` is 1-indexed.
    fn on_archive_start(&mut self, entry: &ArchiveEntry, current: usize, total: usize) {
        let _ = (entry, current, total);
    }

    /// Called after an archive reached its terminal outcome.
    fn on_archive_complete(&mut self, entry: &ArchiveEntry, outcome: &ExtractionOutcome) {
        let _ = (entry, outcome);
    }
}

/// Observer that does nothing.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Primary/fallback engine pair with the fixed-order fallback policy.
pub struct EnginePair {
    primary: Box<dyn Engine>,
    fallback: Box<dyn Engine>,
}

impl EnginePair {
    /// Composes the default pair: external 7-Zip primary, library fallback.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            primary: Box::new(SevenZipEngine::new()),
            fallback: Box::new(NativeEngine::new()),
        }
    }

    /// Composes an explicit pair. Useful for tests and custom installs.
    #[must_use]
    pub fn new(primary: Box<dyn Engine>, fallback: Box<dyn Engine>) -> Self {
        Self { primary, fallback }
    }

    /// One bounded attempt chain for a single password decision.
    ///
    /// At most two extraction attempts happen here: primary, then (unless
    /// the primary failure was wrong-password) one fallback attempt against
    /// a destination cleared of the primary's partial output. If the
    /// fallback also fails, its reason wins.
    fn attempt(
        &self,
        archive: &Path,
        dest: &Path,
        password: Option<&str>,
    ) -> std::result::Result<EngineStats, EngineFailure> {
        match self.primary.extract(archive, dest, password) {
            Ok(stats) => Ok(stats),
            Err(failure) if failure.kind == FailureKind::WrongPassword => Err(failure),
            Err(_) => {
                reset_dir(dest).map_err(|e| {
                    EngineFailure::new(
                        FailureKind::Other,
                        format!("cannot clear destination for fallback: {e}"),
                    )
                })?;
                self.fallback.extract(archive, dest, password)
            }
        }
    }
}

/// Drives a complete run: scan, per-archive extraction, optional
/// consolidation, report accumulation.
///
/// Archives are processed one at a time in scan order. The shared-secret
/// cache and the report accumulator live inside the run, so separate runs
/// never share state.
pub struct Orchestrator {
    config: RunConfig,
    engines: EnginePair,
}

impl Orchestrator {
    /// Creates an orchestrator with the default engine pair.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            engines: EnginePair::detect(),
        }
    }

    /// Creates an orchestrator with an explicit engine pair.
    #[must_use]
    pub fn with_engines(config: RunConfig, engines: EnginePair) -> Self {
        Self { config, engines }
    }

    /// Runs without progress reporting.
    pub fn run(&self, prompt: &mut dyn PasswordPrompt) -> Result<RunReport> {
        self.run_with_observer(prompt, &mut NoopObserver)
    }

    /// Runs the full pipeline.
    ///
    /// # Errors
    ///
    /// Only a missing or non-directory scan root is fatal; every per-archive
    /// failure is recorded in the report instead.
    pub fn run_with_observer(
        &self,
        prompt: &mut dyn PasswordPrompt,
        observer: &mut dyn RunObserver,
    ) -> Result<RunReport> {
        let root = &self.config.root;
        if !root.exists() {
            return Err(RunError::RootNotFound { path: root.clone() });
        }
        if !root.is_dir() {
            return Err(RunError::RootNotADirectory { path: root.clone() });
        }

        let mut policy = PasswordPolicy::new(self.config.password_mode);
        let mut exclusions = ExclusionSet::new();
        let scanner = ArchiveScanner::new(root, self.config.scan_mode);
        let scan = scanner.scan(&exclusions);

        let mut report = RunReport::new();
        for warning in scan.warnings {
            report.add_warning(warning);
        }

        let mut allocator = DestinationAllocator::new();
        let mut completed: Vec<ExtractionTarget> = Vec::new();
        let total = scan.entries.len();

        for (index, entry) in scan.entries.into_iter().enumerate() {
            observer.on_archive_start(&entry, index + 1, total);

            let target = allocator.allocate(&entry);
            exclusions.insert(target.destination.clone());

            let outcome = self.process(&target, &mut policy, prompt);
            if outcome.is_success() {
                completed.push(target);
            } else {
                remove_if_empty(&target.destination);
            }

            observer.on_archive_complete(&entry, &outcome);
            report.record(entry, outcome);
        }

        if let Some(merged) = self.config.consolidation.merged_dir() {
            let selected: Vec<ExtractionTarget> = completed
                .into_iter()
                .filter(|t| self.config.consolidation.selects(&t.entry))
                .collect();
            match Consolidator::new(merged).run(&selected) {
                Ok(summary) => report.set_consolidation(summary),
                Err(err) => report.add_warning(format!("consolidation failed: {err}")),
            }
        }

        Ok(report)
    }

    /// Runs one archive through the state machine to its terminal outcome.
    fn process(
        &self,
        target: &ExtractionTarget,
        policy: &mut PasswordPolicy,
        prompt: &mut dyn PasswordPrompt,
    ) -> ExtractionOutcome {
        let archive = &target.entry.path;
        let dest = &target.destination;

        if let Err(err) = fs::create_dir_all(dest) {
            return ExtractionOutcome::Failed {
                kind: FailureKind::Other,
                reason: format!("cannot create destination folder: {err}"),
            };
        }

        // Probe without a password first, so non-encrypted archives never
        // reach the prompt boundary.
        match self.engines.attempt(archive, dest, None) {
            Ok(stats) => extracted(stats, dest),
            Err(failure) if failure.kind == FailureKind::WrongPassword => {
                self.resolve_with_password(target, &failure, policy, prompt)
            }
            Err(failure) => ExtractionOutcome::Failed {
                kind: failure.kind,
                reason: failure.message,
            },
        }
    }

    /// The archive is confirmed encrypted: ask the policy, then make at most
    /// one retry with the supplied secret.
    fn resolve_with_password(
        &self,
        target: &ExtractionTarget,
        probe_failure: &EngineFailure,
        policy: &mut PasswordPolicy,
        prompt: &mut dyn PasswordPrompt,
    ) -> ExtractionOutcome {
        match policy.decide(&target.entry, prompt) {
            PasswordDecision::Skip => {
                let reason = if policy.mode() == PasswordMode::SkipAll {
                    SkipReason::PasswordsDisabled
                } else {
                    SkipReason::UserDeclined
                };
                ExtractionOutcome::Skipped { reason }
            }
            // The no-password attempt already happened; there is nothing
            // left to try.
            PasswordDecision::NoPasswordNeeded => ExtractionOutcome::Failed {
                kind: FailureKind::WrongPassword,
                reason: probe_failure.message.clone(),
            },
            PasswordDecision::Supplied(secret) => {
                if let Err(err) = reset_dir(&target.destination) {
                    return ExtractionOutcome::Failed {
                        kind: FailureKind::Other,
                        reason: format!("cannot clear destination for retry: {err}"),
                    };
                }
                match self
                    .engines
                    .attempt(&target.entry.path, &target.destination, Some(&secret))
                {
                    Ok(stats) => extracted(stats, &target.destination),
                    Err(failure) => ExtractionOutcome::Failed {
                        kind: failure.kind,
                        reason: failure.message,
                    },
                }
            }
        }
    }
}

fn extracted(stats: EngineStats, dest: &Path) -> ExtractionOutcome {
    ExtractionOutcome::Extracted {
        files: stats.files,
        bytes: stats.bytes,
        destination: dest.to_path_buf(),
    }
}
