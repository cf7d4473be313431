//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use crate::progress::humanize_bytes;
use anyhow::Result;
use console::Term;
use console::style;
use peel_core::ArchiveManifest;
use peel_core::EntryType;
use peel_core::ExtractionReport;
use peel_core::ManifestEntry;
use peel_core::VerificationOutcome;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }

    fn write_checks(&self, outcomes: &[VerificationOutcome]) {
        for outcome in outcomes {
            self.line(&Self::check_line(outcome));
        }
    }

    fn check_line(outcome: &VerificationOutcome) -> String {
        format!("Verifying: {}: {}", outcome.path.display(), outcome.exists)
    }

    fn manifest_line(entry: &ManifestEntry) -> String {
        entry.stripped.as_ref().map_or_else(
            || format!("{} (skipped)", entry.name),
            |stripped| format!("{} -> {}", entry.name, stripped.display()),
        )
    }

    fn manifest_line_long(entry: &ManifestEntry) -> String {
        let type_char = match entry.entry_type {
            EntryType::File => "-",
            EntryType::Directory => "d",
            EntryType::Symlink { .. } => "l",
            EntryType::Hardlink { .. } => "h",
            EntryType::Other { .. } => "?",
        };
        let link = match &entry.entry_type {
            EntryType::Symlink { target } | EntryType::Hardlink { target } => {
                format!(" => {target}")
            }
            _ => String::new(),
        };

        format!(
            "{type_char} {:>10}  {}{link}",
            humanize_bytes(entry.size),
            Self::manifest_line(entry)
        )
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_start(&self, archive: &Path, target: &Path) {
        if self.quiet {
            return;
        }
        self.line(&format!(
            "Extracting {} to {}",
            archive.display(),
            target.display()
        ));
    }

    fn format_extraction_result(
        &self,
        report: &ExtractionReport,
        checks: &[VerificationOutcome],
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            self.line(&format!(
                "{} Extraction complete",
                style("✓").green().bold()
            ));
        } else {
            self.line("Extraction complete");
        }

        self.line(&format!(
            "  Files extracted: {}",
            Self::format_number(report.files_extracted)
        ));
        self.line(&format!(
            "  Directories: {}",
            Self::format_number(report.directories_created)
        ));
        self.line(&format!(
            "  Total size: {}",
            humanize_bytes(report.bytes_written)
        ));

        if self.verbose {
            self.line(&format!("  Symlinks: {}", report.symlinks_created));
            self.line(&format!("  Hardlinks: {}", report.hardlinks_created));
            self.line(&format!("  Skipped: {}", report.entries_skipped));
            self.line(&format!("  Duration: {:?}", report.duration));
        }

        if report.has_warnings() {
            if self.use_colors {
                self.line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                self.line("Warnings:");
            }
            for warning in &report.warnings {
                self.line(&format!("  - {warning}"));
            }
        }

        self.write_checks(checks);
        Ok(())
    }

    fn format_manifest(&self, manifest: &ArchiveManifest, long: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in &manifest.entries {
            if long {
                self.line(&Self::manifest_line_long(entry));
            } else {
                self.line(&Self::manifest_line(entry));
            }
        }

        if long {
            self.line("");
            self.line(&format!(
                "Total: {} entries ({} extracted), {}",
                Self::format_number(manifest.total_entries),
                Self::format_number(manifest.extractable_entries()),
                humanize_bytes(manifest.total_size)
            ));
        }

        Ok(())
    }

    fn format_verification(
        &self,
        _target: &Path,
        outcomes: &[VerificationOutcome],
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_checks(outcomes);
        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        let stderr = Term::stderr();
        if self.use_colors {
            let _ = stderr.write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = stderr.write_line(&format!("WARNING: {message}"));
        }
    }

    fn shows_progress(&self) -> bool {
        !self.quiet
    }
}
