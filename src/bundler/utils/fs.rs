//! File system utilities for bundle staging.
//!
//! Provides idempotent directory operations, symlink-preserving copies and
//! moves that survive crossing filesystem boundaries (the scratch workspace
//! usually lives on a different volume than the output directory).

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("failed to create directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "failed to remove directory".into(),
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Removes a file or symlink if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Fs {
            context: "failed to remove file".into(),
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks below the root on platforms that support them; a
/// symlinked `from` is resolved and its contents copied.
/// Fails if the source path is not a directory or doesn't exist,
/// or if the destination path already exists.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        return Err(Error::Fs {
            context: "cannot copy, not a directory".into(),
            path: from.to_path_buf(),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
    }
    if fs::symlink_metadata(to).await.is_ok() {
        return Err(Error::Fs {
            context: "refusing to overwrite".into(),
            path: to.to_path_buf(),
            source: io::Error::from(io::ErrorKind::AlreadyExists),
        });
    }

    let source = from.to_path_buf();
    let dest = to.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || copy_tree(&source, &dest))
        .await
        .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
        .fs_context("failed to copy directory", from)
}

fn copy_tree(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent)?;
    }

    for entry in walkdir::WalkDir::new(from) {
        let entry = entry?;
        let rel_path = entry
            .path()
            .strip_prefix(from)
            .map_err(io::Error::other)?;
        let dest_path = to.join(rel_path);

        // The root is copied as a directory even when `from` is a symlink.
        if entry.depth() == 0 {
            std::fs::create_dir_all(dest_path)?;
        } else if entry.file_type().is_symlink() {
            let target = std::fs::read_link(entry.path())?;
            if entry.path().is_dir() {
                symlink_dir(&target, &dest_path)?;
            } else {
                symlink_file(&target, &dest_path)?;
            }
        } else if entry.file_type().is_dir() {
            std::fs::create_dir_all(dest_path)?;
        } else {
            std::fs::copy(entry.path(), dest_path)?;
        }
    }

    Ok(())
}

/// Moves a directory, falling back to copy-and-remove across filesystems.
///
/// Fails if the destination already exists.
pub async fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if fs::symlink_metadata(to).await.is_ok() {
        return Err(Error::Fs {
            context: "refusing to overwrite".into(),
            path: to.to_path_buf(),
            source: io::Error::from(io::ErrorKind::AlreadyExists),
        });
    }

    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            log::debug!(
                "{} and {} are on different filesystems, copying instead",
                from.display(),
                to.display()
            );
            copy_dir(from, to).await?;
            remove_dir_all(from).await
        }
        Err(e) => Err(Error::Fs {
            context: format!("failed to move to {}", to.display()),
            path: from.to_path_buf(),
            source: e,
        }),
    }
}

/// Lists the top-level entries of `dir` with the given extension, sorted by path.
///
/// Descendants are not visited, so bundles nested inside matching entries are
/// never reported.
pub async fn list_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .fs_context("failed to list directory", dir)?;

    let mut matches = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .fs_context("failed to list directory", dir)?
    {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == extension) {
            matches.push(path);
        }
    }

    matches.sort();
    Ok(matches)
}
