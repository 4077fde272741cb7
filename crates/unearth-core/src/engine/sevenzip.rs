//! External 7-Zip process engine.
//!
//! The primary engine drives the `7z` command-line tool as a blocking child
//! process. It is format-aware across the full suffix set (including RAR and
//! nested compound archives) and is preferred whenever a binary can be
//! located; when it cannot, every attempt classifies as engine-unavailable
//! and the orchestrator falls back to the library engine.

use std::io;
use std::path::Path;
use std::process::Command;
use std::process::Stdio;

use crate::error::FailureKind;

use super::Engine;
use super::EngineFailure;
use super::EngineStats;
use super::classify_diagnostic;
use super::measure_tree;

/// Candidate 7-Zip program names and install locations, probed in order.
#[cfg(windows)]
const CANDIDATES: &[&str] = &[
    "C:\\Program Files\\7-Zip\\7z.exe",
    "C:\\Program Files (x86)\\7-Zip\\7z.exe",
    "7z",
];

/// Candidate 7-Zip program names and install locations, probed in order.
#[cfg(not(windows))]
const CANDIDATES: &[&str] = &[
    "/usr/bin/7z",
    "/usr/bin/7zz",
    "/usr/bin/7za",
    "/usr/local/bin/7z",
    "/usr/local/bin/7za",
    "7z",
    "7zz",
    "7za",
];

/// High-reliability engine invoking 7-Zip as an external process.
#[derive(Debug, Clone)]
pub struct SevenZipEngine {
    program: String,
}

impl SevenZipEngine {
    /// Creates an engine bound to the first usable 7-Zip binary found among
    /// the platform candidates.
    ///
    /// When no candidate responds, the engine still constructs with the bare
    /// `7z` name; its attempts then classify as engine-unavailable, which is
    /// what drives the fallback.
    #[must_use]
    pub fn new() -> Self {
        let program = Self::locate().unwrap_or_else(|| "7z".to_string());
        Self { program }
    }

    /// Creates an engine bound to a specific program name or path.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Probes the candidate list for a binary that can be spawned.
    fn locate() -> Option<String> {
        CANDIDATES
            .iter()
            .find(|candidate| {
                Command::new(candidate)
                    .arg("i")
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .status()
                    .is_ok()
            })
            .map(|candidate| (*candidate).to_string())
    }
}

impl Default for SevenZipEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for SevenZipEngine {
    fn name(&self) -> &'static str {
        "7-zip"
    }

    fn extract(
        &self,
        archive: &Path,
        dest: &Path,
        password: Option<&str>,
    ) -> std::result::Result<EngineStats, EngineFailure> {
        std::fs::create_dir_all(dest)
            .map_err(|e| EngineFailure::new(FailureKind::Other, e.to_string()))?;

        let mut cmd = Command::new(&self.program);
        cmd.arg("x")
            .arg(archive)
            .arg(format!("-o{}", dest.display()))
            .arg("-y")
            .arg("-bso0");

        // An explicit -p keeps 7z from blocking on its own password prompt:
        // encrypted archives fail fast with a wrong-password diagnostic, which
        // is what the two-phase probe relies on.
        match password {
            Some(secret) => cmd.arg(format!("-p{secret}")),
            None => cmd.arg("-p"),
        };

        let output = match cmd.stdin(Stdio::null()).output() {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(EngineFailure::new(
                    FailureKind::EngineUnavailable,
                    format!("{} not found; install 7-Zip/p7zip", self.program),
                ));
            }
            Err(err) => {
                return Err(EngineFailure::new(
                    FailureKind::EngineUnavailable,
                    format!("failed to invoke {}: {err}", self.program),
                ));
            }
        };

        if output.status.success() {
            return Ok(measure_tree(dest));
        }

        let mut diagnostic = String::from_utf8_lossy(&output.stderr).into_owned();
        diagnostic.push_str(&String::from_utf8_lossy(&output.stdout));
        let kind = classify_diagnostic(&diagnostic);

        let summary = diagnostic
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .unwrap_or("no diagnostic output")
            .to_string();

        Err(EngineFailure::new(
            kind,
            format!("7z exited with {}: {summary}", output.status),
        ))
    }
}
