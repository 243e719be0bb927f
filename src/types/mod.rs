//! Core type definitions for backsync

mod error;
mod outcome;
mod record;

pub use error::SyncError;
pub use outcome::{FileResult, SyncOutcome, SyncReport};
pub use record::ModificationRecord;
