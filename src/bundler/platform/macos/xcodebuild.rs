//! XCFramework assembly with `xcodebuild -create-xcframework`.

use crate::bundler::{
    Error, Result,
    error::ErrorExt,
    utils::{
        fs,
        process::{CommandRunner, command_line},
    },
};
use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Name of the `xcodebuild` executable.
pub const XCODEBUILD: &str = "xcodebuild";

/// Wrapper around `xcodebuild`'s xcframework creation.
#[derive(Debug)]
pub struct Xcodebuild<'a, R> {
    runner: &'a R,
    program: &'a Path,
}

impl<'a, R: CommandRunner> Xcodebuild<'a, R> {
    /// Creates a wrapper invoking `program` through `runner`.
    pub fn new(runner: &'a R, program: &'a Path) -> Self {
        Self { runner, program }
    }

    /// Combines platform slice bundles into one xcframework at `output`.
    ///
    /// On failure any partial output left by the tool is removed, so an
    /// existing path at `output` always means a completed bundle.
    ///
    /// # Errors
    ///
    /// [`Error::AssemblyFailed`] if `xcodebuild` exits non-zero.
    pub async fn create_xcframework(&self, frameworks: &[PathBuf], output: &Path) -> Result<()> {
        if frameworks.is_empty() {
            crate::bail!("no platform slices to combine into {}", output.display());
        }

        let mut args = vec![
            OsString::from("-create-xcframework"),
            OsString::from("-output"),
            output.as_os_str().to_owned(),
        ];
        for framework in frameworks {
            args.push(OsString::from("-framework"));
            args.push(framework.as_os_str().to_owned());
        }

        let result = self
            .runner
            .run(self.program, &args)
            .await
            .fs_context("failed to execute xcodebuild", self.program)?;

        if !result.success() {
            discard_partial_output(output).await;
            return Err(Error::AssemblyFailed {
                command: command_line(self.program, &args),
                exit_code: result.exit_code,
                message: result.diagnostic(),
            });
        }

        if !output.is_dir() {
            crate::bail!(
                "xcodebuild reported success but {} was not created",
                output.display()
            );
        }

        log::info!("Created {}", output.display());
        Ok(())
    }
}

/// Best-effort removal of whatever a failed run left at `output`.
async fn discard_partial_output(output: &Path) {
    let Ok(metadata) = tokio::fs::symlink_metadata(output).await else {
        return;
    };
    let removed = if metadata.is_dir() {
        fs::remove_dir_all(output).await
    } else {
        fs::remove_file(output).await
    };
    if let Err(e) = removed {
        log::warn!("Failed to remove partial output {}: {}", output.display(), e);
    }
}
