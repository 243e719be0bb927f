//! # backsync - fixed-list file sync with backups
//!
//! Copies a configured list of files from a source directory into a target
//! directory, saving each overwritten target as `<name>.backup`. A watch
//! mode polls source modification times and re-copies files as they change.

// Module declarations
pub mod config;
pub mod executor;
pub mod watcher;
pub mod ui;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use types::{ModificationRecord, SyncError, SyncOutcome, SyncReport};
pub use config::Config;
pub use executor::{copy_with_backup, sync_all};
pub use watcher::Watcher;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
