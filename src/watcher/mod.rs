//! Polling watcher
//!
//! Re-copies a tracked file whenever its modification time moves forward.
//! The loop alternates between `Idle` (waiting out the poll interval) and
//! `Checking` (one pass over the tracked files), and stops when the shutdown
//! future passed to [`Watcher::run`] resolves.
//!
//! A file modified while it is being copied may land in the target half
//! updated; the next tick sees the newer mtime and copies it again.

use crate::executor::{emit_event, ensure_target_dir, sync_file, SyncCallback, SyncEvent};
use crate::types::{ModificationRecord, SyncError, SyncOutcome};
use crate::Config;
use std::fs;
use std::future::Future;
use tracing::{debug, info};

/// Watch loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Waiting for the next tick
    Idle,
    /// Evaluating tracked files
    Checking,
}

/// A change handled during one tick
#[derive(Debug)]
pub struct ChangeEvent {
    pub file: String,
    pub outcome: SyncOutcome,
}

/// Counters for a finished watch session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub ticks: u64,
    pub changes: u64,
    pub copied: u64,
    pub failed: u64,
}

/// Polling watcher over one sync job
pub struct Watcher {
    config: Config,
    record: ModificationRecord,
    state: WatchState,
}

impl Watcher {
    /// Check the target directory and seed the record with current mtimes.
    ///
    /// Source files that do not exist yet are left out of the record and
    /// count as changed once they appear.
    pub fn new(config: Config) -> Result<Self, SyncError> {
        ensure_target_dir(&config)?;

        let mut record = ModificationRecord::new();
        for file in &config.files {
            if let Some(mtime) = source_mtime(&config, file) {
                record.seed(file.as_str(), mtime);
            }
        }
        debug!(seeded = record.len(), tracked = config.files.len(), "watcher ready");

        Ok(Self {
            config,
            record,
            state: WatchState::Idle,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn record(&self) -> &ModificationRecord {
        &self.record
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Run one check pass over the tracked files, in configured order.
    ///
    /// Each file whose mtime is new or newer than recorded is copied on its
    /// own; a failure does not stop the pass. Missing sources are skipped.
    pub fn tick(&mut self, on_event: Option<&SyncCallback<'_>>) -> Vec<ChangeEvent> {
        self.state = WatchState::Checking;
        let mut changes = Vec::new();

        for file in &self.config.files {
            let Some(mtime) = source_mtime(&self.config, file) else {
                continue;
            };
            if !self.record.observe(file, mtime) {
                continue;
            }

            info!(file = file.as_str(), "change detected");
            emit_event(
                on_event,
                &SyncEvent::ChangeDetected { file: file.clone() },
            );
            let outcome = sync_file(&self.config, file, on_event);
            changes.push(ChangeEvent {
                file: file.clone(),
                outcome,
            });
        }

        self.state = WatchState::Idle;
        changes
    }

    /// Tick every poll interval until `shutdown` resolves.
    ///
    /// Shutdown is checked between ticks; a tick in progress always finishes.
    pub async fn run<F>(&mut self, shutdown: F, on_event: Option<&SyncCallback<'_>>) -> WatchStats
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut stats = WatchStats::default();

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }

            for change in self.tick(on_event) {
                stats.changes += 1;
                match change.outcome {
                    SyncOutcome::Copied { .. } => stats.copied += 1,
                    SyncOutcome::CopyFailed(_) => stats.failed += 1,
                    SyncOutcome::SourceMissing => {}
                }
            }
            stats.ticks += 1;
        }

        info!(ticks = stats.ticks, changes = stats.changes, "watcher stopped");
        stats
    }
}

fn source_mtime(config: &Config, file: &str) -> Option<std::time::SystemTime> {
    fs::metadata(config.source_path(file))
        .and_then(|metadata| metadata.modified())
        .ok()
}
