// Moves the produced artifact into its destination and opens it

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::downloader::errors::DownloadError;

/// Launches a file with the platform's default handler.
pub trait FileOpener {
    fn open(&self, path: &Path) -> Result<(), DownloadError>;
}

/// Default-handler dispatch: Windows `start`, macOS `open`, other POSIX
/// `xdg-open`. The launch is fire-and-forget; the child is not waited on.
pub struct SystemOpener;

impl FileOpener for SystemOpener {
    fn open(&self, path: &Path) -> Result<(), DownloadError> {
        launcher(path).spawn().map(|_| ()).map_err(|e| {
            DownloadError::ExecutionError(format!("Failed to open {}: {}", path.display(), e))
        })
    }
}

#[cfg(target_os = "windows")]
fn launcher(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    // Empty string is the window title slot of `start`
    cmd.arg("/C").arg("start").arg("").arg(path);
    cmd
}

#[cfg(target_os = "macos")]
fn launcher(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn launcher(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

/// Move the artifact into `dest_dir` under its own file name, replacing any
/// file already there (last-write-wins, no backups). When source and
/// destination already resolve to the same file the move is skipped.
pub fn place_artifact(artifact: &Path, dest_dir: &Path) -> Result<PathBuf, DownloadError> {
    let file_name = artifact.file_name().ok_or_else(|| {
        DownloadError::ExecutionError(format!("Artifact has no file name: {}", artifact.display()))
    })?;
    let final_path = dest_dir.join(file_name);

    if is_same_file(artifact, &final_path) {
        return Ok(final_path);
    }

    if final_path.exists() {
        std::fs::remove_file(&final_path).map_err(|e| {
            DownloadError::ExecutionError(format!(
                "Failed to replace {}: {}",
                final_path.display(),
                e
            ))
        })?;
    }

    move_file(artifact, &final_path)?;
    Ok(final_path)
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

fn move_file(from: &Path, to: &Path) -> Result<(), DownloadError> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }

    // rename fails across mount points; fall back to copy + remove
    std::fs::copy(from, to).map_err(|e| {
        DownloadError::ExecutionError(format!(
            "Failed to move {} to {}: {}",
            from.display(),
            to.display(),
            e
        ))
    })?;
    let _ = std::fs::remove_file(from);
    Ok(())
}

/// Remove the temporary download directory. Only succeeds when the
/// directory is empty; every failure is ignored.
pub fn cleanup_temp_dir(dir: &Path) {
    let _ = std::fs::remove_dir(dir);
}
