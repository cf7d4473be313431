//! JSON output formatter for machine-readable results.

use super::formatter::CheckOutput;
use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use peel_core::ArchiveManifest;
use peel_core::ExtractionReport;
use peel_core::VerificationOutcome;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct ExtractionOutput {
    files_extracted: usize,
    directories_created: usize,
    symlinks_created: usize,
    hardlinks_created: usize,
    entries_skipped: usize,
    bytes_written: u64,
    duration_ms: u128,
    extracted: Vec<String>,
    checks: Vec<CheckOutput>,
    warnings: Vec<String>,
}

impl ExtractionOutput {
    fn new(report: &ExtractionReport, checks: &[VerificationOutcome]) -> Self {
        Self {
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            symlinks_created: report.symlinks_created,
            hardlinks_created: report.hardlinks_created,
            entries_skipped: report.entries_skipped,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            extracted: report
                .extracted
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            checks: checks.iter().map(CheckOutput::from).collect(),
            warnings: report.warnings.clone(),
        }
    }
}

#[derive(Serialize)]
struct ManifestOutput {
    format: &'static str,
    total_entries: usize,
    total_size: u64,
    entries: Vec<ManifestEntryOutput>,
}

#[derive(Serialize)]
struct ManifestEntryOutput {
    name: String,
    stripped: Option<String>,
    #[serde(rename = "type")]
    entry_type: &'static str,
    size: u64,
}

impl From<&ArchiveManifest> for ManifestOutput {
    fn from(manifest: &ArchiveManifest) -> Self {
        Self {
            format: manifest.format.name(),
            total_entries: manifest.total_entries,
            total_size: manifest.total_size,
            entries: manifest
                .entries
                .iter()
                .map(|e| ManifestEntryOutput {
                    name: e.name.clone(),
                    stripped: e.stripped.as_ref().map(|p| p.display().to_string()),
                    entry_type: e.entry_type.label(),
                    size: e.size,
                })
                .collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_start(&self, _archive: &Path, _target: &Path) {}

    fn format_extraction_result(
        &self,
        report: &ExtractionReport,
        checks: &[VerificationOutcome],
    ) -> Result<()> {
        Self::output(&JsonOutput::success(
            "extract",
            ExtractionOutput::new(report, checks),
        ))
    }

    fn format_manifest(&self, manifest: &ArchiveManifest, _long: bool) -> Result<()> {
        Self::output(&JsonOutput::success("list", ManifestOutput::from(manifest)))
    }

    fn format_verification(
        &self,
        target: &Path,
        outcomes: &[VerificationOutcome],
    ) -> Result<()> {
        #[derive(Serialize)]
        struct VerificationOutput {
            target_dir: String,
            checks: Vec<CheckOutput>,
        }

        Self::output(&JsonOutput::success(
            "verify",
            VerificationOutput {
                target_dir: target.display().to_string(),
                checks: outcomes.iter().map(CheckOutput::from).collect(),
            },
        ))
    }

    fn format_warning(&self, message: &str) {
        // stdout carries exactly one JSON document per command
        let _ = writeln!(io::stderr(), "WARNING: {message}");
    }

    fn shows_progress(&self) -> bool {
        false
    }
}
