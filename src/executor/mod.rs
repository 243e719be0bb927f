//! Executor module: per-file sync and the one-shot batch

pub mod copy;

use crate::types::{SyncError, SyncOutcome, SyncReport};
use crate::Config;
use std::path::PathBuf;
use tracing::{debug, info, warn};

pub use copy::{backup_path, copy_preserving, copy_with_backup, CopyReport};

/// Events emitted while syncing tracked files.
#[derive(Debug)]
pub enum SyncEvent {
    /// Sync of a tracked file started.
    FileStarted {
        index: usize,
        total: usize,
        file: String,
    },
    /// A watched file's modification time advanced.
    ChangeDetected { file: String },
    /// Previous target saved before overwriting.
    BackupCreated { file: String, backup: PathBuf },
    /// Source copied over the target.
    Copied { file: String, bytes: u64 },
    /// Source file not found; skipped.
    SourceMissing { file: String },
    /// Backup or copy failed; the run continues.
    CopyFailed { file: String, error: String },
}

/// Optional callback used to receive sync events.
pub type SyncCallback<'a> = dyn Fn(&SyncEvent) + Send + Sync + 'a;

/// Fail with `TargetDirectoryMissing` unless the target directory exists
pub fn ensure_target_dir(config: &Config) -> Result<(), SyncError> {
    if config.target.is_dir() {
        Ok(())
    } else {
        Err(SyncError::TargetDirectoryMissing {
            path: config.target.clone(),
        })
    }
}

/// Sync every tracked file, in configured order
///
/// Checks the target directory once up front and copies nothing if it is
/// missing. After that, per-file problems become outcomes in the report and
/// never abort the batch. Files already copied stay copied.
pub fn sync_all(config: &Config, on_event: Option<&SyncCallback<'_>>) -> Result<SyncReport, SyncError> {
    ensure_target_dir(config)?;

    let total = config.files.len();
    let mut report = SyncReport::new();

    for (idx, file) in config.files.iter().enumerate() {
        emit_event(
            on_event,
            &SyncEvent::FileStarted {
                index: idx + 1,
                total,
                file: file.clone(),
            },
        );
        let outcome = sync_file(config, file, on_event);
        debug!(file = file.as_str(), outcome = outcome.label(), "file done");
        report.record(file.as_str(), outcome);
    }

    info!(
        succeeded = report.succeeded(),
        total,
        missing = report.missing(),
        failed = report.failed(),
        "sync finished"
    );
    Ok(report)
}

/// Sync one tracked file, turning every failure into an outcome
pub fn sync_file(config: &Config, file: &str, on_event: Option<&SyncCallback<'_>>) -> SyncOutcome {
    let source = config.source_path(file);
    if !source.exists() {
        debug!(file, source = %source.display(), "source file not found");
        emit_event(
            on_event,
            &SyncEvent::SourceMissing {
                file: file.to_string(),
            },
        );
        return SyncOutcome::SourceMissing;
    }

    let target = config.target_path(file);
    match copy_with_backup(&source, &target) {
        Ok(CopyReport {
            bytes_copied,
            backup,
        }) => {
            if let Some(backup) = &backup {
                emit_event(
                    on_event,
                    &SyncEvent::BackupCreated {
                        file: file.to_string(),
                        backup: backup.clone(),
                    },
                );
            }
            debug!(file, bytes = bytes_copied, "copied");
            emit_event(
                on_event,
                &SyncEvent::Copied {
                    file: file.to_string(),
                    bytes: bytes_copied,
                },
            );
            SyncOutcome::Copied {
                bytes: bytes_copied,
                backup,
            }
        }
        Err(error) => {
            warn!(file, %error, "copy failed");
            emit_event(
                on_event,
                &SyncEvent::CopyFailed {
                    file: file.to_string(),
                    error: error.to_string(),
                },
            );
            SyncOutcome::CopyFailed(error)
        }
    }
}

pub(crate) fn emit_event(on_event: Option<&SyncCallback<'_>>, event: &SyncEvent) {
    if let Some(callback) = on_event {
        callback(event);
    }
}
