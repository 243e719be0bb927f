//! Metadata-preserving file copy and the backup-then-copy step

use crate::types::SyncError;
use filetime::FileTime;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix of the file holding the previous target content
pub const BACKUP_SUFFIX: &str = ".backup";

const PART_SUFFIX: &str = ".part";

/// What a successful `copy_with_backup` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    /// Bytes written to the target
    pub bytes_copied: u64,
    /// Backup written before the copy, if the target existed
    pub backup: Option<PathBuf>,
}

/// `path` with `suffix` appended to its file name (`a.cls` -> `a.cls.backup`)
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Backup path used for `target`
pub fn backup_path(target: &Path) -> PathBuf {
    with_suffix(target, BACKUP_SUFFIX)
}

/// Copy `source` to `target`, saving any existing target as `target.backup`.
///
/// The backup overwrites an earlier one. Both copies keep the permission bits
/// and access/modification times of the file they were taken from. Nothing is
/// retried; the first failure is returned.
///
/// A symlinked target is written through: the file it points to receives the
/// new content and the link itself stays in place. The backup is a regular
/// file next to the link.
pub fn copy_with_backup(source: &Path, target: &Path) -> Result<CopyReport, SyncError> {
    let backup = if target.exists() {
        let backup = backup_path(target);
        copy_preserving(target, &backup).map_err(|err| SyncError::Backup {
            path: backup.clone(),
            source: err,
        })?;
        debug!(backup = %backup.display(), "saved previous target");
        Some(backup)
    } else {
        None
    };

    let dest = resolve_link(target);
    let bytes_copied = copy_preserving(source, &dest).map_err(|err| SyncError::Copy {
        path: target.to_path_buf(),
        source: err,
    })?;

    Ok(CopyReport {
        bytes_copied,
        backup,
    })
}

/// Final file behind `target` when it is a symlink, else `target` itself.
///
/// Dangling links resolve to nothing and are replaced like a regular file.
fn resolve_link(target: &Path) -> PathBuf {
    match fs::symlink_metadata(target) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(target).unwrap_or_else(|_| target.to_path_buf())
        }
        _ => target.to_path_buf(),
    }
}

/// Copy a file through a `.part` file, then rename it into place
///
/// 1. Stream `src` into `<dest>.part`
/// 2. Flush and sync to disk
/// 3. Apply permissions, atime and mtime of `src`
/// 4. Rename over `dest`
///
/// The `.part` file is removed if any step fails. The rename replaces `dest`
/// itself, so a symlink at `dest` becomes a regular file; `copy_with_backup`
/// resolves links before calling this.
pub fn copy_preserving(src: &Path, dest: &Path) -> io::Result<u64> {
    let part_path = with_suffix(dest, PART_SUFFIX);

    let result = write_part(src, &part_path).and_then(|bytes| {
        fs::rename(&part_path, dest)?;
        Ok(bytes)
    });

    if result.is_err() && part_path.exists() {
        let _ = fs::remove_file(&part_path);
    }
    result
}

fn write_part(src: &Path, part_path: &Path) -> io::Result<u64> {
    let mut src_file = File::open(src)?;
    let src_metadata = src_file.metadata()?;
    let mut part_file = File::create(part_path)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        part_file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    part_file.sync_all()?;
    // Drop the handle before rename (required on Windows)
    drop(part_file);

    fs::set_permissions(part_path, src_metadata.permissions())?;
    filetime::set_file_times(
        part_path,
        FileTime::from_last_access_time(&src_metadata),
        FileTime::from_last_modification_time(&src_metadata),
    )?;

    Ok(total_bytes)
}
