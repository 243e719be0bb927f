//! One-shot sync command

use crate::executor::{sync_all, SyncEvent};
use crate::types::{SyncError, SyncOutcome, SyncReport};
use crate::ui::ProgressReporter;
use crate::Config;
use std::collections::BTreeMap;
use std::io::ErrorKind;

/// Run a one-shot sync of every tracked file
///
/// Returns the report even when some files were missing or failed; only a
/// missing target directory is an error.
pub fn run(config: &Config) -> Result<SyncReport, SyncError> {
    let reporter = ProgressReporter::for_sync(config.files.len() as u64);
    reporter.header(config, &format!("backsync v{}: one-shot sync", crate::VERSION));

    let progress_cb = |event: &SyncEvent| reporter.handle(event);
    let report = sync_all(config, Some(&progress_cb))?;

    reporter.finish_sync(&report);
    let records = collect_error_records(&report);
    if !records.is_empty() {
        reporter.println(format_error_summary(&records));
    }

    Ok(report)
}

#[derive(Debug)]
struct ErrorRecord {
    kind: &'static str,
    file: String,
    message: String,
    suggestion: Option<String>,
}

impl ErrorRecord {
    fn from_outcome(file: &str, outcome: &SyncOutcome) -> Option<Self> {
        match outcome {
            SyncOutcome::Copied { .. } => None,
            SyncOutcome::SourceMissing => Some(Self {
                kind: "Source missing",
                file: file.to_string(),
                message: "Source file was not found".to_string(),
                suggestion: Some("Check the file name in the job file.".to_string()),
            }),
            SyncOutcome::CopyFailed(error) => {
                let (message, suggestion) = humanize_error(error);
                Some(Self {
                    kind: error_kind_label(error),
                    file: file.to_string(),
                    message,
                    suggestion,
                })
            }
        }
    }
}

fn collect_error_records(report: &SyncReport) -> Vec<ErrorRecord> {
    report
        .results
        .iter()
        .filter_map(|r| ErrorRecord::from_outcome(&r.file, &r.outcome))
        .collect()
}

fn humanize_error(error: &SyncError) -> (String, Option<String>) {
    if error.is_permission_error() {
        return (
            "Permission denied while writing the target".to_string(),
            Some("Check file permissions or close programs holding the file open.".to_string()),
        );
    }
    if error.is_disk_full() {
        return (
            "Not enough disk space to complete the copy".to_string(),
            Some("Free disk space on the target drive and retry.".to_string()),
        );
    }

    match error {
        SyncError::Backup { source, .. } => (
            format!("Could not save the previous target: {}", source),
            Some("The target was left untouched; retry once the issue is fixed.".to_string()),
        ),
        SyncError::Copy { source, .. } => match source.kind() {
            ErrorKind::NotFound => (
                "File disappeared while it was being copied".to_string(),
                Some("Verify the path still exists and retry.".to_string()),
            ),
            ErrorKind::IsADirectory => (
                "A directory is in the way of the target file".to_string(),
                Some("Remove or rename the conflicting directory, then retry.".to_string()),
            ),
            _ => (
                format!("I/O operation failed: {}", source),
                Some("Retry the sync. If this keeps happening, check the drive.".to_string()),
            ),
        },
        other => (other.to_string(), None),
    }
}

fn error_kind_label(error: &SyncError) -> &'static str {
    if error.is_permission_error() {
        return "Permission denied";
    }
    if error.is_disk_full() {
        return "Disk full";
    }
    match error {
        SyncError::Backup { .. } => "Backup failed",
        SyncError::Copy { .. } => "Copy failed",
        SyncError::Io(_) => "I/O error",
        SyncError::Config(_) => "Configuration error",
        SyncError::TargetDirectoryMissing { .. } => "Target missing",
    }
}

fn format_error_summary(records: &[ErrorRecord]) -> String {
    let mut groups: BTreeMap<&'static str, Vec<&ErrorRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.kind).or_default().push(record);
    }

    let mut lines = Vec::new();
    lines.push("Error summary:".to_string());
    for (kind, items) in groups {
        lines.push(format!("  {} ({}):", kind, items.len()));
        for record in items {
            lines.push(format!("    - {}: {}", record.file, record.message));
            if let Some(suggestion) = &record.suggestion {
                lines.push(format!("      Try: {}", suggestion));
            }
        }
    }
    lines.join("\n")
}
