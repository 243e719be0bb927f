//! Command entry points used by the binary

pub mod sync;
pub mod watch;

use crate::types::SyncError;

/// Operator-facing message for an error that stops the run
pub fn format_fatal(error: &SyncError) -> String {
    match error {
        SyncError::TargetDirectoryMissing { path } => format!(
            "Target directory not found: {}\nMake sure the folder exists and is accessible.",
            path.display()
        ),
        other => other.to_string(),
    }
}
