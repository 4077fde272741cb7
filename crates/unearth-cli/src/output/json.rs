//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::io::{self};
use unearth_core::ExtractionOutcome;
use unearth_core::RunReport;
use unearth_core::scanner::ArchiveEntry;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_scan_result(&self, entries: &[ArchiveEntry]) -> Result<()> {
        #[derive(Serialize)]
        struct ScanEntry {
            path: String,
            format: &'static str,
            size_bytes: u64,
        }

        #[derive(Serialize)]
        struct ScanOutput {
            count: usize,
            archives: Vec<ScanEntry>,
        }

        let data = ScanOutput {
            count: entries.len(),
            archives: entries
                .iter()
                .map(|entry| ScanEntry {
                    path: entry.path.display().to_string(),
                    format: entry.format.name(),
                    size_bytes: entry.size,
                })
                .collect(),
        };

        let output = JsonOutput::success("scan", data);
        Self::output(&output)
    }

    fn format_run_report(&self, report: &RunReport) -> Result<()> {
        #[derive(Serialize)]
        struct RecordOutput {
            archive: String,
            format: &'static str,
            status: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            files: Option<usize>,
            #[serde(skip_serializing_if = "Option::is_none")]
            bytes: Option<u64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            destination: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            cause: Option<&'static str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            reason: Option<String>,
        }

        #[derive(Serialize)]
        struct SummaryOutput {
            archives_found: usize,
            succeeded: usize,
            failed: usize,
            skipped: usize,
            files_extracted: usize,
            bytes_extracted: u64,
            failures_by_cause: BTreeMap<&'static str, usize>,
        }

        #[derive(Serialize)]
        struct ConsolidationOutput {
            destination: String,
            files_copied: usize,
            files_renamed: usize,
            bytes_copied: u64,
            failures: Vec<String>,
        }

        #[derive(Serialize)]
        struct RunOutput {
            archives: Vec<RecordOutput>,
            summary: SummaryOutput,
            warnings: Vec<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            consolidation: Option<ConsolidationOutput>,
        }

        let archives = report
            .records()
            .iter()
            .map(|(entry, outcome)| {
                let mut record = RecordOutput {
                    archive: entry.path.display().to_string(),
                    format: entry.format.name(),
                    status: "failed",
                    files: None,
                    bytes: None,
                    destination: None,
                    cause: None,
                    reason: None,
                };
                match outcome {
                    ExtractionOutcome::Extracted {
                        files,
                        bytes,
                        destination,
                    } => {
                        record.status = "extracted";
                        record.files = Some(*files);
                        record.bytes = Some(*bytes);
                        record.destination = Some(destination.display().to_string());
                    }
                    ExtractionOutcome::Failed { kind, reason } => {
                        record.cause = Some(kind.as_str());
                        record.reason = Some(reason.clone());
                    }
                    ExtractionOutcome::Skipped { reason } => {
                        record.status = "skipped";
                        record.reason = Some(reason.to_string());
                    }
                }
                record
            })
            .collect();

        let summary = report.summary();
        let data = RunOutput {
            archives,
            summary: SummaryOutput {
                archives_found: summary.archives_found,
                succeeded: summary.succeeded,
                failed: summary.failed,
                skipped: summary.skipped,
                files_extracted: summary.files_extracted,
                bytes_extracted: summary.bytes_extracted,
                failures_by_cause: summary
                    .failures_by_cause
                    .iter()
                    .map(|(kind, count)| (kind.as_str(), *count))
                    .collect(),
            },
            warnings: report.warnings().to_vec(),
            consolidation: report.consolidation().map(|copy| ConsolidationOutput {
                destination: copy.destination.display().to_string(),
                files_copied: copy.files_copied,
                files_renamed: copy.files_renamed,
                bytes_copied: copy.bytes_copied,
                failures: copy.failures.clone(),
            }),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
