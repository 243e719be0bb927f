//! Configuration management

use super::types::SyncError;
use clap::Parser;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Job file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "backsync.toml";

/// Default delay between watch ticks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "backsync", version, about)]
pub struct Cli {
    /// Keep running and re-copy files whenever their modification time advances
    #[arg(long)]
    pub watch: bool,

    /// Job file describing source, target and tracked files
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

/// On-disk shape of a job file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobFile {
    source: PathBuf,
    target: PathBuf,
    files: Vec<String>,
    poll_interval_secs: Option<u64>,
}

/// One sync job: immutable for the duration of a run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the tracked files are read from
    pub source: PathBuf,

    /// Directory the tracked files are written to
    pub target: PathBuf,

    /// Tracked file names, in sync order
    pub files: Vec<String>,

    /// Delay between watch ticks
    pub poll_interval: Duration,

    /// Watch mode enabled?
    pub watch: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            target: PathBuf::new(),
            files: Vec::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            watch: false,
        }
    }
}

impl Config {
    /// Build a config for `files` copied from `source` into `target`
    pub fn new(
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        files: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            files: files.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Load and validate a job file.
    ///
    /// Relative `source`/`target` paths are resolved against the directory
    /// containing the job file.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = fs::read_to_string(path).map_err(|e| {
            SyncError::Config(format!("Cannot read job file {}: {}", path.display(), e))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml(&text, base)
    }

    /// Parse job file contents, resolving relative paths against `base`
    pub fn from_toml(text: &str, base: &Path) -> Result<Self, SyncError> {
        let job: JobFile = toml::from_str(text)
            .map_err(|e| SyncError::Config(format!("Invalid job file: {}", e)))?;

        let poll_interval = match job.poll_interval_secs {
            Some(secs) => Duration::from_secs(secs),
            None => DEFAULT_POLL_INTERVAL,
        };

        let config = Self {
            source: base.join(job.source),
            target: base.join(job.target),
            files: job.files,
            poll_interval,
            watch: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.files.is_empty() {
            return Err(SyncError::Config("No files to sync".to_string()));
        }

        let mut seen = HashSet::new();
        for name in &self.files {
            if name.trim().is_empty() {
                return Err(SyncError::Config("File names cannot be empty".to_string()));
            }
            if Path::new(name).is_absolute() {
                return Err(SyncError::Config(format!(
                    "File names must be relative to the source directory: {}",
                    name
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(SyncError::Config(format!("File listed twice: {}", name)));
            }
        }

        if self.source == self.target {
            return Err(SyncError::Config(
                "Source and target cannot be the same".to_string(),
            ));
        }

        if self.poll_interval.is_zero() {
            return Err(SyncError::Config(
                "Poll interval must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// Source path of a tracked file
    pub fn source_path(&self, file: &str) -> PathBuf {
        self.source.join(file)
    }

    /// Target path of a tracked file
    pub fn target_path(&self, file: &str) -> PathBuf {
        self.target.join(file)
    }
}

impl TryFrom<Cli> for Config {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let mut config = Config::load(&cli.config)?;
        config.watch = cli.watch;
        Ok(config)
    }
}
