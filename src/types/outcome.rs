//! Per-file outcomes and the aggregate sync report

use super::SyncError;
use std::path::PathBuf;

/// Result of syncing one tracked file
#[derive(Debug)]
pub enum SyncOutcome {
    /// Source copied over the target
    Copied {
        /// Bytes written to the target
        bytes: u64,
        /// Where the previous target was saved, if there was one
        backup: Option<PathBuf>,
    },

    /// Source file does not exist; skipped
    SourceMissing,

    /// Backup or copy failed with an I/O error
    CopyFailed(SyncError),
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Copied { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            SyncOutcome::Copied { .. } => "Copied",
            SyncOutcome::SourceMissing => "SourceMissing",
            SyncOutcome::CopyFailed(_) => "CopyFailed",
        }
    }
}

/// Outcome for a named tracked file
#[derive(Debug)]
pub struct FileResult {
    pub file: String,
    pub outcome: SyncOutcome,
}

/// Aggregate report of a `sync_all` run, in configured list order
#[derive(Debug, Default)]
pub struct SyncReport {
    pub results: Vec<FileResult>,
}

impl SyncReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the outcome for one file
    pub fn record(&mut self, file: impl Into<String>, outcome: SyncOutcome) {
        self.results.push(FileResult {
            file: file.into(),
            outcome,
        });
    }

    /// Number of tracked files in the run
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of files copied successfully
    pub fn succeeded(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }

    pub fn missing(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, SyncOutcome::SourceMissing))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, SyncOutcome::CopyFailed(_)))
            .count()
    }

    /// True when every tracked file was copied
    pub fn is_success(&self) -> bool {
        self.succeeded() == self.total()
    }

    /// Look up the outcome recorded for `file`
    pub fn outcome(&self, file: &str) -> Option<&SyncOutcome> {
        self.results
            .iter()
            .find(|r| r.file == file)
            .map(|r| &r.outcome)
    }
}
