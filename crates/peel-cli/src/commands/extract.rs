//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use crate::progress::ENTRY_ECHO_LIMIT;
use crate::progress::EntryEcho;
use anyhow::Context;
use anyhow::Result;
use peel_core::ExtractOptions;
use peel_core::NoopProgress;
use peel_core::ProgressCallback;
use peel_core::list_archive;
use peel_core::verify_paths;
use std::env;
use std::path::Path;
use tracing::debug;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter, verbose: bool) -> Result<()> {
    let output_dir = match &args.target_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };

    formatter.format_extraction_start(&args.archive, &output_dir);

    let mut progress = select_progress(&args.archive, formatter, verbose);
    let options = ExtractOptions::new(&args.archive, &output_dir);
    let report = add_archive_context(
        options.extract_with_progress(progress.as_mut()),
        &args.archive,
    )?;
    drop(progress);

    let checks = verify_paths(&output_dir, &args.checks);
    formatter.format_extraction_result(&report, &checks)?;

    Ok(())
}

/// Picks how entries are reported while the archive is written.
///
/// The entry count is read once, up front, and only when something is
/// going to be displayed.
fn select_progress(
    archive: &Path,
    formatter: &dyn OutputFormatter,
    verbose: bool,
) -> Box<dyn ProgressCallback> {
    if !formatter.shows_progress() {
        return Box::new(NoopProgress);
    }
    if verbose {
        return Box::new(EntryEcho::new());
    }

    // A broken archive is reported by the extraction itself, after the
    // target directory has been created.
    let total = match list_archive(archive) {
        Ok(manifest) => manifest.total_entries,
        Err(err) => {
            debug!(error = %err, "could not count archive entries");
            return Box::new(NoopProgress);
        }
    };
    debug!(total, "counted archive entries");

    if total < ENTRY_ECHO_LIMIT {
        Box::new(EntryEcho::new())
    } else if CliProgress::should_show() {
        Box::new(CliProgress::new(total))
    } else {
        Box::new(NoopProgress)
    }
}
