//! Error types for backsync

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for backsync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable job configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The target directory is absent; nothing was copied
    #[error("Target directory not found: {}", .path.display())]
    TargetDirectoryMissing { path: PathBuf },

    /// Saving the previous target file to its `.backup` failed
    #[error("Backup of {} failed: {source}", .path.display())]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Copying the source file over the target failed
    #[error("Copy to {} failed: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Check if this error aborts a whole run rather than a single file
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SyncError::TargetDirectoryMissing { .. } | SyncError::Config(_)
        )
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        self.io_kind() == Some(ErrorKind::PermissionDenied)
    }

    /// Check if this error is related to disk space
    pub fn is_disk_full(&self) -> bool {
        match self.io_error() {
            Some(io) => {
                io.kind() == ErrorKind::StorageFull || matches!(io.raw_os_error(), Some(28 | 122))
            }
            None => false,
        }
    }

    /// Underlying I/O error, if any
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            SyncError::Io(io)
            | SyncError::Backup { source: io, .. }
            | SyncError::Copy { source: io, .. } => Some(io),
            SyncError::Config(_) | SyncError::TargetDirectoryMissing { .. } => None,
        }
    }

    fn io_kind(&self) -> Option<ErrorKind> {
        self.io_error().map(std::io::Error::kind)
    }
}
