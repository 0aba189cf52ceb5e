//! Bundle checksum calculation.
//!
//! Combined bundles are directory trees, so the checksum covers every file's
//! relative path and content plus every symlink's relative path and target,
//! visited in sorted order. Two bundles with identical trees hash equally
//! regardless of where they live.

use crate::bundler::{Result, error::ErrorExt};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates the SHA-256 checksum of a file or directory tree.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the path cannot be read
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading metadata for hashing", path)?;

    if metadata.is_dir() {
        calculate_directory_sha256(path).await
    } else {
        let mut hasher = Sha256::new();
        hash_file(&mut hasher, path).await?;
        Ok(format!("{:x}", hasher.finalize()))
    }
}

async fn calculate_directory_sha256(dir_path: &Path) -> Result<String> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir_path).follow_links(false) {
        let entry = entry
            .map_err(std::io::Error::from)
            .fs_context("traversing directory for hashing", dir_path)?;
        if !entry.file_type().is_dir() {
            entries.push(entry);
        }
    }

    // Sort by path for deterministic ordering
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let mut hasher = Sha256::new();

    for entry in entries {
        // Include relative path in hash (preserves directory structure)
        if let Ok(rel_path) = entry.path().strip_prefix(dir_path) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }

        if entry.file_type().is_symlink() {
            let target = tokio::fs::read_link(entry.path())
                .await
                .fs_context("reading symlink for hashing", entry.path())?;
            hasher.update(b"->");
            hasher.update(target.to_string_lossy().as_bytes());
        } else {
            hash_file(&mut hasher, entry.path()).await?;
        }
    }

    Ok(format!("{:x}", hasher.finalize()))
}

async fn hash_file(hasher: &mut Sha256, path: &Path) -> Result<()> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(())
}
