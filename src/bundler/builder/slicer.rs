//! Per-platform framework slicing.
//!
//! A platform slice is a full copy of the framework bundle whose primary
//! binary holds only the architectures of one platform. Slices are written to
//! `<output_dir>/<platform>/<Name>.framework`.

use crate::bundler::{
    Architecture, Framework, Platform, Result,
    error::ErrorExt,
    platform::macos::Lipo,
    utils::{fs, process::CommandRunner},
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Symlink hops followed when locating the real binary file.
const MAX_SYMLINK_HOPS: usize = 8;

/// Creates the platform slice of `framework` containing `architectures`.
///
/// Partially written slice directories are left for workspace teardown.
///
/// # Returns
///
/// Path of the sliced `<Name>.framework` copy.
pub async fn slice_framework<R: CommandRunner>(
    lipo: &Lipo<'_, R>,
    framework: &Framework,
    platform: Platform,
    architectures: &[Architecture],
    output_dir: &Path,
) -> Result<PathBuf> {
    let platform_dir = output_dir.join(platform.dir_name());
    fs::create_dir_all(&platform_dir, false).await?;

    let copy = framework.relocated_to(&platform_dir);
    log::debug!(
        "Copying {} to {}",
        framework.path().display(),
        copy.path().display()
    );
    fs::copy_dir(framework.path(), copy.path()).await?;

    let binary = primary_binary_location(&copy).await?;
    fs::remove_file(&binary).await?;

    log::info!(
        "Extracting {} slice [{}] of {}",
        platform,
        architectures
            .iter()
            .map(Architecture::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        framework.name()
    );
    lipo.extract(architectures, &framework.binary_path(), &binary)
        .await?;

    Ok(copy.path().to_path_buf())
}

/// Resolves the file the primary binary entry stands for.
///
/// Versioned bundles expose `<Name>` as a symlink into `Versions/`; replacing
/// the link target instead of the link keeps that structure intact. Links
/// leaving the bundle are not followed.
async fn primary_binary_location(framework: &Framework) -> Result<PathBuf> {
    let bundle = framework
        .path()
        .absolutize()
        .fs_context("failed to resolve bundle path", framework.path())?
        .into_owned();
    let mut current = framework.binary_path();

    for _ in 0..MAX_SYMLINK_HOPS {
        let metadata = tokio::fs::symlink_metadata(&current)
            .await
            .fs_context("failed to inspect primary binary", &current)?;
        if !metadata.file_type().is_symlink() {
            return Ok(current);
        }

        let target = tokio::fs::read_link(&current)
            .await
            .fs_context("failed to read symlink", &current)?;
        let parent = current.parent().unwrap_or(&bundle);
        let resolved = parent
            .join(target)
            .absolutize()
            .fs_context("failed to resolve symlink", &current)?
            .into_owned();

        if !resolved.starts_with(&bundle) {
            log::debug!(
                "{} points outside the bundle, replacing the link itself",
                current.display()
            );
            return Ok(current);
        }
        current = resolved;
    }

    Ok(current)
}
