//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_run_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use crate::prompt::TermPrompt;
use anyhow::Context;
use anyhow::Result;
use std::env;
use unearth_core::ConsolidationMode;
use unearth_core::Orchestrator;
use unearth_core::PasswordMode;
use unearth_core::RunConfig;
use unearth_core::ScanMode;

pub fn execute(
    args: &ExtractArgs,
    formatter: &dyn OutputFormatter,
    quiet: bool,
    json: bool,
) -> Result<()> {
    let root = match &args.root {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    let scan_mode = if args.recursive {
        ScanMode::Recursive
    } else {
        ScanMode::CurrentDirOnly
    };

    let consolidation = match &args.merge_into {
        None => ConsolidationMode::None,
        Some(into) if args.only.is_empty() => ConsolidationMode::All { into: into.clone() },
        Some(into) => ConsolidationMode::Selective {
            into: into.clone(),
            archives: args.only.clone(),
        },
    };

    let config = RunConfig::new(&root)
        .with_scan_mode(scan_mode)
        .with_password_mode(PasswordMode::from(args.passwords))
        .with_consolidation(consolidation);

    let orchestrator = Orchestrator::new(config);
    let mut prompt = TermPrompt::new();

    // Use progress bar if TTY is detected (not quiet, not JSON, is terminal)
    let report = if CliProgress::should_show() && !quiet && !json {
        let mut progress = CliProgress::new("Extracting");
        add_run_context(
            orchestrator.run_with_observer(&mut prompt, &mut progress),
            &root,
        )?
    } else {
        add_run_context(orchestrator.run(&mut prompt), &root)?
    };

    formatter.format_run_report(&report)?;

    Ok(())
}
