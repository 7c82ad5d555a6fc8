//! Backup-protected file replacement shared by the deployer and the descriptor patcher.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::{AppError, backup_path};

/// What a protected write did to the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteAction {
    /// The destination did not exist before.
    Created,
    /// The previous destination content now lives at `backup`.
    Replaced { backup: PathBuf },
}

/// Hidden sibling the new content is staged in before it is renamed into place.
fn staging_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(destination.file_name().unwrap_or_default());
    name.push(".brandkit-tmp");
    destination.with_file_name(name)
}

/// Replace `destination` with content produced by `stage`.
///
/// `stage` writes the new content to a sibling temp file. Only once that
/// succeeds is an existing destination renamed to `<destination>.backup`
/// (replacing any older backup) and the temp file renamed into place. If
/// the final rename fails the original content is copied back from the
/// backup, so the destination is never left missing or partially written.
pub fn replace_with_backup<F>(destination: &Path, stage: F) -> Result<WriteAction, AppError>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    replace_with(destination, stage, |from, to| fs::rename(from, to))
}

fn replace_with<F, R>(destination: &Path, stage: F, rename: R) -> Result<WriteAction, AppError>
where
    F: FnOnce(&Path) -> io::Result<()>,
    R: Fn(&Path, &Path) -> io::Result<()>,
{
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }

    let staging = staging_path(destination);
    if let Err(err) = stage(&staging) {
        let _ = fs::remove_file(&staging);
        return Err(err.into());
    }

    let backup = if destination.exists() {
        let backup = backup_path(destination);
        if let Err(err) = rename(destination, &backup) {
            let _ = fs::remove_file(&staging);
            return Err(err.into());
        }
        Some(backup)
    } else {
        None
    };

    if let Err(err) = rename(&staging, destination) {
        let _ = fs::remove_file(&staging);
        if let Some(backup) = &backup
            && let Err(restore_err) = fs::copy(backup, destination)
        {
            warn!(
                path = %destination.display(),
                error = %restore_err,
                "failed to restore original from backup"
            );
        }
        return Err(err.into());
    }

    Ok(match backup {
        Some(backup) => WriteAction::Replaced { backup },
        None => WriteAction::Created,
    })
}

/// Copy `source` into `destination` with backup protection, keeping the
/// source's permissions and modification time.
pub fn copy_with_backup(source: &Path, destination: &Path) -> Result<WriteAction, AppError> {
    replace_with_backup(destination, |staging| {
        let metadata = fs::metadata(source)?;
        fs::copy(source, staging)?;
        let modified = metadata.modified()?;
        fs::File::options().write(true).open(staging)?.set_modified(modified)?;
        Ok(())
    })
}

/// Write `content` into `destination` with backup protection. An existing
/// destination's permissions carry over to the new file.
pub fn write_with_backup(destination: &Path, content: &str) -> Result<WriteAction, AppError> {
    replace_with_backup(destination, |staging| {
        fs::write(staging, content)?;
        match fs::metadata(destination) {
            Ok(metadata) => fs::set_permissions(staging, metadata.permissions()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err),
        }
    })
}
