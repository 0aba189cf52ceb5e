//! External tool detection and availability checking.
//!
//! Both tools are resolved once, before any filesystem work starts, so a
//! missing dependency is reported before expensive work begins.

use crate::bundler::{
    Error, Result, Settings,
    platform::macos::{LIPO, XCODEBUILD},
    utils::process::CommandRunner,
};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Resolved locations of the required tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    lipo: PathBuf,
    xcodebuild: PathBuf,
}

impl Toolchain {
    /// Resolves `lipo` and `xcodebuild`, honoring configured overrides.
    ///
    /// # Errors
    ///
    /// [`Error::ToolNotAvailable`] naming the first tool that cannot be found.
    pub fn detect<R: CommandRunner>(runner: &R, settings: &Settings) -> Result<Self> {
        let lipo = locate_tool(runner, LIPO, settings.lipo())?;
        let xcodebuild = locate_tool(runner, XCODEBUILD, settings.xcodebuild())?;

        Ok(Self { lipo, xcodebuild })
    }

    /// `lipo` executable.
    pub fn lipo(&self) -> &Path {
        &self.lipo
    }

    /// `xcodebuild` executable.
    pub fn xcodebuild(&self) -> &Path {
        &self.xcodebuild
    }
}

fn locate_tool<R: CommandRunner>(
    runner: &R,
    name: &str,
    configured: Option<&Path>,
) -> Result<PathBuf> {
    let query = configured.map_or(OsStr::new(name), Path::as_os_str);

    match runner.locate(query) {
        Some(path) => {
            log::debug!("✓ {} available at {}", name, path.display());
            Ok(path)
        }
        None => Err(Error::ToolNotAvailable {
            tool: query.to_string_lossy().into_owned(),
        }),
    }
}
