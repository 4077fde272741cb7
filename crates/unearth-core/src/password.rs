//! Password-handling policy for encrypted archives.
//!
//! Archives are never probed for encryption up front. The orchestrator first
//! attempts extraction without a password; only when an engine reports a
//! password-required failure does it ask the policy for a decision. That
//! two-phase protocol keeps non-encrypted archives prompt-free.

use crate::scanner::ArchiveEntry;

/// Password-handling mode, selected once at run start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordMode {
    /// Prompt for each encrypted archive individually.
    PerArchive,
    /// Prompt once, cache the secret, and reuse it for the whole run.
    SharedSecret,
    /// Skip every encrypted archive without prompting.
    SkipAll,
}

/// Per-archive decision produced by the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordDecision {
    /// Extraction proceeds without supplying a password.
    NoPasswordNeeded,
    /// Extraction retries with this secret.
    Supplied(String),
    /// The archive is skipped.
    Skip,
}

/// Interactive prompt boundary.
///
/// The core depends only on it returning a secret string or an explicit
/// decline; the CLI implements it over a terminal, tests with scripts.
pub trait PasswordPrompt {
    /// Requests a password for `entry`. `None` or an empty string means the
    /// user declined.
    fn request_password(&mut self, entry: &ArchiveEntry) -> Option<String>;
}

/// Prompt that always declines. Pairs with [`PasswordMode::SkipAll`] and
/// non-interactive runs.
#[derive(Debug, Default)]
pub struct NoopPrompt;

impl PasswordPrompt for NoopPrompt {
    fn request_password(&mut self, _entry: &ArchiveEntry) -> Option<String> {
        None
    }
}

/// Resolves a [`PasswordDecision`] per archive according to the selected mode.
///
/// The shared-secret cache is scoped to this value: construct a fresh policy
/// per run so separate runs (and tests) never leak state into each other. A
/// declined shared prompt is cached too, so the prompt boundary is invoked at
/// most once per run in `SharedSecret` mode.
#[derive(Debug)]
pub struct PasswordPolicy {
    mode: PasswordMode,
    shared: Option<Option<String>>,
}

impl PasswordPolicy {
    /// Creates a policy for the given mode with an empty cache.
    #[must_use]
    pub fn new(mode: PasswordMode) -> Self {
        Self { mode, shared: None }
    }

    /// The mode this policy was configured with.
    #[must_use]
    pub fn mode(&self) -> PasswordMode {
        self.mode
    }

    /// Decides how to handle an archive the engines reported as
    /// password-protected.
    pub fn decide(
        &mut self,
        entry: &ArchiveEntry,
        prompt: &mut dyn PasswordPrompt,
    ) -> PasswordDecision {
        match self.mode {
            PasswordMode::SkipAll => PasswordDecision::Skip,
            PasswordMode::PerArchive => {
                normalize(prompt.request_password(entry))
                    .map_or(PasswordDecision::Skip, PasswordDecision::Supplied)
            }
            PasswordMode::SharedSecret => {
                let cached = if let Some(cached) = &self.shared {
                    cached.clone()
                } else {
                    let response = normalize(prompt.request_password(entry));
                    self.shared = Some(response.clone());
                    response
                };
                cached.map_or(PasswordDecision::Skip, PasswordDecision::Supplied)
            }
        }
    }
}

/// Empty responses count as a decline.
fn normalize(response: Option<String>) -> Option<String> {
    response.filter(|s| !s.is_empty())
}
