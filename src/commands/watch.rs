//! Watch command

use crate::executor::SyncEvent;
use crate::types::SyncError;
use crate::ui::ProgressReporter;
use crate::watcher::{WatchStats, Watcher};
use crate::Config;
use tokio::runtime::Builder;
use tracing::{info, warn};

/// Watch the tracked files until Ctrl+C
///
/// Fails before the loop starts if the target directory is missing.
pub fn run(config: &Config) -> Result<WatchStats, SyncError> {
    let reporter = ProgressReporter::for_watch();
    reporter.header(config, &format!("backsync v{}: watching for changes", crate::VERSION));

    let mut watcher = Watcher::new(config.clone())?;
    reporter.println(format!(
        "Checking every {}s. Press Ctrl+C to stop.",
        watcher.config().poll_interval.as_secs()
    ));

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(SyncError::Io)?;

    let progress_cb = |event: &SyncEvent| reporter.handle(event);
    let stats = runtime.block_on(watcher.run(
        async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("received Ctrl+C, shutting down"),
                Err(err) => {
                    warn!(%err, "cannot listen for Ctrl+C; watching until killed");
                    std::future::pending::<()>().await;
                }
            }
        },
        Some(&progress_cb),
    ));

    reporter.finish_watch(&stats);
    Ok(stats)
}
