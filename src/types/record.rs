//! ModificationRecord - last observed mtime per tracked file

use std::collections::HashMap;
use std::time::SystemTime;

/// Last observed modification time of each tracked file.
///
/// Lives only for the duration of a watch session. A file with no entry has
/// never been observed, so any timestamp counts as newer.
#[derive(Debug, Clone, Default)]
pub struct ModificationRecord {
    seen: HashMap<String, SystemTime>,
}

impl ModificationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `mtime` for `file` without treating it as a change
    pub fn seed(&mut self, file: impl Into<String>, mtime: SystemTime) {
        self.seen.insert(file.into(), mtime);
    }

    /// Record an observation.
    ///
    /// Returns `true` (and stores `mtime`) when the file was unseen or
    /// `mtime` is strictly newer than the stored value.
    pub fn observe(&mut self, file: &str, mtime: SystemTime) -> bool {
        match self.seen.get_mut(file) {
            Some(last) if mtime > *last => {
                *last = mtime;
                true
            }
            Some(_) => false,
            None => {
                self.seen.insert(file.to_string(), mtime);
                true
            }
        }
    }

    pub fn get(&self, file: &str) -> Option<SystemTime> {
        self.seen.get(file).copied()
    }

    pub fn contains(&self, file: &str) -> bool {
        self.seen.contains_key(file)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
