//! Batch discovery and extraction of archive files.
//!
//! `unearth-core` walks a directory tree for archives (zip, rar, 7z, tar and
//! its compressed variants, bare gz/bz2/xz streams), extracts each into an
//! isolated destination folder using an external 7-Zip process with an
//! in-process library fallback, applies a configurable password-handling
//! policy for encrypted archives, and can consolidate the extracted output
//! into one merged directory.
//!
//! # Examples
//!
//! ```no_run
//! use unearth_core::Orchestrator;
//! use unearth_core::RunConfig;
//! use unearth_core::ScanMode;
//! use unearth_core::password::NoopPrompt;
//!
//! # fn main() -> Result<(), unearth_core::RunError> {
//! let config = RunConfig::new("./downloads").with_scan_mode(ScanMode::Recursive);
//! let report = Orchestrator::new(config).run(&mut NoopPrompt)?;
//! println!("{} archives extracted", report.summary().succeeded);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod consolidate;
pub mod destination;
pub mod engine;
pub mod error;
pub mod formats;
pub mod orchestrator;
pub mod password;
pub mod report;
pub mod scanner;
pub mod test_utils;

// Re-export main API types
pub use config::RunConfig;
pub use consolidate::ConsolidationMode;
pub use consolidate::CopySummary;
pub use error::FailureKind;
pub use error::Result;
pub use error::RunError;
pub use orchestrator::EnginePair;
pub use orchestrator::Orchestrator;
pub use orchestrator::RunObserver;
pub use password::PasswordMode;
pub use report::ExtractionOutcome;
pub use report::RunReport;
pub use report::RunSummary;
pub use scanner::ArchiveEntry;
pub use scanner::ScanMode;
