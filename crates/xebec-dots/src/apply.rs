//! Write a generated config file, keeping a timestamped copy of whatever was
//! there before.
//!
//! Order is fixed: parent directory, backup, overwrite. The first failing step
//! aborts the rest, so the original file is never touched before its backup
//! exists.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::info;

use crate::error::{Error, Result};

pub const BACKUP_DIR: &str = "backups";
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub destination: PathBuf,
    pub backup: Option<PathBuf>,
    pub bytes_written: usize,
}

pub fn ensure_dir(p: &Path) -> Result<()> {
    if p.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(p).map_err(|e| Error::io_at("create dir", p, e))?;
    info!(dir = %p.display(), "created directory");
    Ok(())
}

/// `<dir of dest>/backups`
pub fn backup_dir(dest: &Path) -> PathBuf {
    dest.parent()
        .unwrap_or_else(|| Path::new("."))
        .join(BACKUP_DIR)
}

/// `alacritty.toml` at 2026-01-02 03:04:05 becomes
/// `alacritty_2026-01-02_03-04-05.toml`.
pub fn backup_file_name(dest: &Path, at: NaiveDateTime) -> String {
    let stem = dest
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("config");
    let ts = at.format(BACKUP_TIMESTAMP_FORMAT);
    match dest.extension().and_then(|s| s.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{stem}_{ts}.{ext}"),
        _ => format!("{stem}_{ts}"),
    }
}

/// Copy `dest` into its backup directory. `Ok(None)` when there is nothing to
/// back up.
pub fn backup_existing(dest: &Path, at: NaiveDateTime) -> Result<Option<PathBuf>> {
    if !dest.is_file() {
        return Ok(None);
    }
    let dir = backup_dir(dest);
    fs::create_dir_all(&dir).map_err(|e| Error::io_at("create backup dir", &dir, e))?;

    let backup = dir.join(backup_file_name(dest, at));
    fs::copy(dest, &backup).map_err(|e| {
        Error::msg(format!(
            "failed to back up {} -> {}: {e}",
            dest.display(),
            backup.display()
        ))
    })?;
    info!(from = %dest.display(), to = %backup.display(), "backup created");
    Ok(Some(backup))
}

pub fn apply_config(dest: &Path, content: &str, at: NaiveDateTime) -> Result<ApplyReport> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let backup = backup_existing(dest, at)?;
    fs::write(dest, content).map_err(|e| Error::io_at("write", dest, e))?;
    info!(dest = %dest.display(), bytes = content.len(), "config written");
    Ok(ApplyReport {
        destination: dest.to_path_buf(),
        backup,
        bytes_written: content.len(),
    })
}

/// Backups taken for `dest`, oldest first (timestamped names sort
/// chronologically).
pub fn list_backups(dest: &Path) -> Result<Vec<PathBuf>> {
    let dir = backup_dir(dest);
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let prefix = format!(
        "{}_",
        dest.file_stem().and_then(|s| s.to_str()).unwrap_or("config")
    );
    let mut out = Vec::new();
    for entry in fs::read_dir(&dir).map_err(|e| Error::io_at("read", &dir, e))? {
        let path = entry.map_err(|e| Error::io_at("read", &dir, e))?.path();
        let matches = path
            .file_name()
            .and_then(|s| s.to_str())
            .is_some_and(|n| n.starts_with(&prefix));
        if matches && path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}
