//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use std::path::PathBuf;

use unearth_core::PasswordMode;

#[derive(Parser)]
#[command(name = "unearth")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover and extract every archive under a directory
    Extract(ExtractArgs),
    /// List candidate archives without extracting
    Scan(ScanArgs),
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Directory to search for archives (default: current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// How to handle encrypted archives
    #[arg(long, value_enum, default_value_t = PasswordHandling::Ask)]
    pub passwords: PasswordHandling,

    /// Copy all extracted files into this directory after the run
    #[arg(long, value_name = "DIR")]
    pub merge_into: Option<PathBuf>,

    /// Consolidate only the named archives (repeatable)
    #[arg(long = "only", value_name = "ARCHIVE", requires = "merge_into")]
    pub only: Vec<String>,
}

/// Password policy choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PasswordHandling {
    /// Prompt for each encrypted archive
    Ask,
    /// Prompt once and reuse the same password for the whole run
    Shared,
    /// Skip all encrypted archives without prompting
    Skip,
}

impl From<PasswordHandling> for PasswordMode {
    fn from(handling: PasswordHandling) -> Self {
        match handling {
            PasswordHandling::Ask => Self::PerArchive,
            PasswordHandling::Shared => Self::SharedSecret,
            PasswordHandling::Skip => Self::SkipAll,
        }
    }
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Directory to search for archives (default: current directory)
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,
}
