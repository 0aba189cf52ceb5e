//! Scratch workspace lifecycle.

use crate::bundler::{Result, utils::fs};
use std::path::{Path, PathBuf};

/// Prefix of scratch workspace directory names.
pub const WORKSPACE_PREFIX: &str = "xcframework-builder-";

/// Uniquely named scratch directory owned by one conversion.
///
/// The directory is removed when the guard is dropped, so every exit path,
/// including errors and panics, tears it down. [`close`](Self::close) removes
/// it explicitly and reports failures; with `keep` set the directory is left
/// on disk for inspection.
#[derive(Debug)]
pub struct ScratchWorkspace {
    root: PathBuf,
    keep: bool,
    released: bool,
}

impl ScratchWorkspace {
    /// Creates `<parent>/xcframework-builder-<uuid>`.
    pub async fn create(parent: &Path, keep: bool) -> Result<Self> {
        let root = parent.join(format!("{WORKSPACE_PREFIX}{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&root, false).await?;

        log::debug!("Working directory is located at: {}", root.display());

        Ok(Self {
            root,
            keep,
            released: false,
        })
    }

    /// Workspace directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Tears the workspace down, unless it is configured to be kept.
    pub async fn close(mut self) -> Result<()> {
        self.released = true;

        if self.keep {
            log::info!("Keeping working directory at: {}", self.root.display());
            return Ok(());
        }

        fs::remove_dir_all(&self.root).await?;
        log::debug!("Removed working directory {}", self.root.display());
        Ok(())
    }
}

impl Drop for ScratchWorkspace {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        if self.keep {
            log::info!("Keeping working directory at: {}", self.root.display());
            return;
        }

        match std::fs::remove_dir_all(&self.root) {
            Ok(()) => log::debug!("Removed working directory {}", self.root.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log::warn!(
                "Failed to remove working directory {}: {}",
                self.root.display(),
                e
            ),
        }
    }
}
