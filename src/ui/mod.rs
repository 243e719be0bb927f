//! Console output

mod progress;

pub use progress::{local_timestamp, ProgressReporter};
