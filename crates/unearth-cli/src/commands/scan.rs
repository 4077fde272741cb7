//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::error::convert_run_error;
use crate::output::OutputFormatter;
use anyhow::Context;
use anyhow::Result;
use std::env;
use unearth_core::RunError;
use unearth_core::ScanMode;
use unearth_core::scanner::ArchiveScanner;
use unearth_core::scanner::ExclusionSet;

pub fn execute(args: &ScanArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let root = match &args.root {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    if !root.exists() {
        return Err(convert_run_error(
            RunError::RootNotFound { path: root.clone() },
            &root,
        ));
    }
    if !root.is_dir() {
        return Err(convert_run_error(
            RunError::RootNotADirectory { path: root.clone() },
            &root,
        ));
    }

    let mode = if args.recursive {
        ScanMode::Recursive
    } else {
        ScanMode::CurrentDirOnly
    };

    let scan = ArchiveScanner::new(&root, mode).scan(&ExclusionSet::new());

    for warning in &scan.warnings {
        formatter.format_warning(warning);
    }
    formatter.format_scan_result(&scan.entries)
}
