//! Progress reporting

use crate::executor::SyncEvent;
use crate::types::SyncReport;
use crate::watcher::WatchStats;
use crate::Config;
use console::style;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Progress reporter for sync and watch runs
///
/// Per-file lines are printed above the bar with `suspend`, so they still
/// reach stdout when the bar itself is hidden (non-terminal output).
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Reporter with a file-count bar for a one-shot sync of `total` files
    pub fn for_sync(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} files | {msg}")
        {
            bar.set_style(style.progress_chars("=>-"));
        }
        Self { bar }
    }

    /// Reporter without a bar, for watch mode
    pub fn for_watch() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Print a line above the bar
    pub fn println(&self, line: impl AsRef<str>) {
        self.bar.suspend(|| println!("{}", line.as_ref()));
    }

    /// Print the run header
    pub fn header(&self, config: &Config, title: &str) {
        self.println(format_header(config, title, &local_timestamp()));
    }

    /// Handle one sync event: advance the bar and print its line.
    pub fn handle(&self, event: &SyncEvent) {
        match event {
            SyncEvent::FileStarted { file, .. } => {
                self.bar.set_message(file.clone());
            }
            SyncEvent::Copied { .. }
            | SyncEvent::SourceMissing { .. }
            | SyncEvent::CopyFailed { .. } => self.bar.inc(1),
            SyncEvent::ChangeDetected { .. } | SyncEvent::BackupCreated { .. } => {}
        }
        self.println(format_event(event));
    }

    /// Finalize a one-shot sync and print the summary
    pub fn finish_sync(&self, report: &SyncReport) {
        self.bar.finish_and_clear();
        self.println(format_summary(report));
    }

    /// Print the closing line of a watch session
    pub fn finish_watch(&self, stats: &WatchStats) {
        self.println(format_watch_summary(stats));
    }
}

/// Local time as shown in headers
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn format_header(config: &Config, title: &str, time: &str) -> String {
    format!(
        "{}\n{}\nSource: {}\nTarget: {}\nFiles:  {}\nTime:   {}\n",
        style(title).bold(),
        rule(),
        config.source.display(),
        config.target.display(),
        config.files.len(),
        time
    )
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn format_event(event: &SyncEvent) -> String {
    match event {
        SyncEvent::FileStarted { file, .. } => format!("Syncing {}...", file),
        SyncEvent::ChangeDetected { file } => {
            format!("\n{} Change detected in {}", style("*").cyan(), file)
        }
        SyncEvent::BackupCreated { backup, .. } => {
            format!("  Created backup: {}", file_name(backup))
        }
        SyncEvent::Copied { file, bytes } => format!(
            "  {} Copied: {} ({})",
            style("ok").green(),
            file,
            HumanBytes(*bytes)
        ),
        SyncEvent::SourceMissing { file } => {
            format!("  {} Source file not found: {}", style("!!").yellow(), file)
        }
        SyncEvent::CopyFailed { file, error } => {
            format!("  {} Error copying {}: {}", style("xx").red(), file, error)
        }
    }
}

fn format_summary(report: &SyncReport) -> String {
    let mut lines = vec![
        String::new(),
        rule(),
        format!(
            "Sync completed: {}/{} files updated",
            report.succeeded(),
            report.total()
        ),
    ];
    if report.is_success() {
        lines.push(style("All files synced successfully!").green().to_string());
    } else {
        lines.push(format!(
            "{} ({} missing, {} failed). Check the messages above.",
            style("Some files were not synced").yellow(),
            report.missing(),
            report.failed()
        ));
    }
    lines.join("\n")
}

fn format_watch_summary(stats: &WatchStats) -> String {
    format!(
        "\nFile watcher stopped after {} checks: {} changes ({} copied, {} failed)",
        stats.ticks, stats.changes, stats.copied, stats.failed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SyncError, SyncOutcome};
    use std::io::{Error, ErrorKind};
    use std::path::PathBuf;

    #[test]
    fn test_sync_progress_counts_finished_files() {
        let reporter = ProgressReporter::for_sync(3);
        reporter.handle(&SyncEvent::FileStarted {
            index: 1,
            total: 3,
            file: "a.txt".to_string(),
        });
        reporter.handle(&SyncEvent::Copied {
            file: "a.txt".to_string(),
            bytes: 10,
        });
        reporter.handle(&SyncEvent::SourceMissing {
            file: "b.txt".to_string(),
        });

        assert_eq!(reporter.bar.position(), 2);
        assert_eq!(reporter.bar.length(), Some(3));
    }

    #[test]
    fn test_backup_line_shows_file_name_only() {
        let line = format_event(&SyncEvent::BackupCreated {
            file: "a.txt".to_string(),
            backup: PathBuf::from("/deep/target/a.txt.backup"),
        });
        assert_eq!(line, "  Created backup: a.txt.backup");
    }

    #[test]
    fn test_failure_line_includes_error_text() {
        let error = SyncError::Copy {
            path: PathBuf::from("a.txt"),
            source: Error::new(ErrorKind::PermissionDenied, "access denied"),
        };
        let line = format_event(&SyncEvent::CopyFailed {
            file: "a.txt".to_string(),
            error: error.to_string(),
        });
        assert!(line.contains("Error copying a.txt"));
        assert!(line.contains("access denied"));
    }

    #[test]
    fn test_header_lists_roots_and_time() {
        let config = Config::new("/src", "/dst", ["a.txt", "b.txt"]);
        let header = format_header(&config, "backsync", "2024-01-02 03:04:05");
        assert!(header.contains("Source: /src"));
        assert!(header.contains("Target: /dst"));
        assert!(header.contains("Files:  2"));
        assert!(header.contains("2024-01-02 03:04:05"));
    }

    #[test]
    fn test_summary_counts_successes() {
        let mut report = SyncReport::new();
        report.record(
            "a.txt",
            SyncOutcome::Copied {
                bytes: 1,
                backup: None,
            },
        );
        report.record("b.txt", SyncOutcome::SourceMissing);

        let summary = format_summary(&report);
        assert!(summary.contains("Sync completed: 1/2 files updated"));
        assert!(summary.contains("1 missing, 0 failed"));
    }

    #[test]
    fn test_watch_summary_reports_counters() {
        let stats = WatchStats {
            ticks: 4,
            changes: 2,
            copied: 1,
            failed: 1,
        };
        let line = format_watch_summary(&stats);
        assert!(line.contains("after 4 checks"));
        assert!(line.contains("2 changes (1 copied, 1 failed)"));
    }
}
