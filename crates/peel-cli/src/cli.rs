//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "peel")]
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
    /// Extract an archive, dropping its top-level directory
    Extract(ExtractArgs),
    /// List archive entries and the names they extract to
    List(ListArgs),
    /// Check that paths exist inside an extracted directory
    Verify(VerifyArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the tar archive, plain or compressed with gzip, bzip2, xz or zstd
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Target directory, created if missing (default: current directory)
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: Option<PathBuf>,

    /// Path expected inside the target after extraction (can be repeated)
    #[arg(long = "check", short = 'c', value_name = "PATH")]
    pub checks: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the tar archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Show entry type and size
    #[arg(short, long)]
    pub long: bool,
}

#[derive(clap::Args)]
pub struct VerifyArgs {
    /// Directory the archive was extracted into
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: PathBuf,

    /// Paths relative to the target directory
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
