//! Verify command implementation
//!
//! A missing path is reported, never treated as a failure.

use crate::cli::VerifyArgs;
use crate::output::OutputFormatter;
use anyhow::Result;
use peel_core::verify_paths;

pub fn execute(args: &VerifyArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    if !args.target_dir.is_dir() {
        formatter.format_warning(&format!(
            "target directory '{}' does not exist",
            args.target_dir.display()
        ));
    }

    let outcomes = verify_paths(&args.target_dir, &args.paths);
    formatter.format_verification(&args.target_dir, &outcomes)
}
