//! Architecture inspection and extraction with Apple's `lipo` tool.
//!
//! `lipo` reports the architectures embedded in a fat Mach-O binary and can
//! write a new binary containing only a subset of them. Every operation first
//! checks the input with `lipo -info` so that a missing or non-Mach-O file is
//! reported as [`Error::InvalidBinary`] rather than as a tool failure.

use crate::bundler::{
    Architecture, Error, Result,
    error::ErrorExt,
    utils::process::{CommandRunner, command_line},
};
use std::{ffi::OsString, path::Path};

/// Name of the `lipo` executable.
pub const LIPO: &str = "lipo";

/// Wrapper around the `lipo` command.
#[derive(Debug)]
pub struct Lipo<'a, R> {
    runner: &'a R,
    program: &'a Path,
}

impl<'a, R: CommandRunner> Lipo<'a, R> {
    /// Creates a wrapper invoking `program` through `runner`.
    pub fn new(runner: &'a R, program: &'a Path) -> Self {
        Self { runner, program }
    }

    /// Lists the supported architectures embedded in `binary`.
    ///
    /// Tokens that do not name a known [`Architecture`] are skipped, so the
    /// result may be empty.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBinary`] if the file is missing or rejected by `lipo -info`
    /// - [`Error::InspectionFailed`] if `lipo -archs` exits non-zero
    pub async fn architectures(&self, binary: &Path) -> Result<Vec<Architecture>> {
        self.validate_binary(binary).await?;

        let args = vec![binary.as_os_str().to_owned(), OsString::from("-archs")];
        let output = self
            .runner
            .run(self.program, &args)
            .await
            .fs_context("failed to execute lipo", self.program)?;

        if !output.success() {
            return Err(Error::InspectionFailed {
                command: command_line(self.program, &args),
                exit_code: output.exit_code,
                message: output.diagnostic(),
            });
        }

        Ok(parse_architectures(&output.stdout))
    }

    /// Writes a binary at `output` containing only `architectures` of `binary`.
    ///
    /// All architectures are extracted in one `lipo` invocation. The source
    /// binary is left untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBinary`] if the file is missing or rejected by `lipo -info`
    /// - [`Error::ExtractionFailed`] if `lipo -extract` exits non-zero
    pub async fn extract(
        &self,
        architectures: &[Architecture],
        binary: &Path,
        output: &Path,
    ) -> Result<()> {
        if architectures.is_empty() {
            crate::bail!(
                "no architectures requested for extraction from {}",
                binary.display()
            );
        }

        self.validate_binary(binary).await?;

        let mut args = vec![
            binary.as_os_str().to_owned(),
            OsString::from("-output"),
            output.as_os_str().to_owned(),
        ];
        for arch in architectures {
            args.push(OsString::from("-extract"));
            args.push(OsString::from(arch.as_str()));
        }

        let result = self
            .runner
            .run(self.program, &args)
            .await
            .fs_context("failed to execute lipo", self.program)?;

        if !result.success() {
            return Err(Error::ExtractionFailed {
                command: command_line(self.program, &args),
                exit_code: result.exit_code,
                message: result.diagnostic(),
            });
        }

        Ok(())
    }

    async fn validate_binary(&self, binary: &Path) -> Result<()> {
        if !binary.is_file() {
            return Err(Error::InvalidBinary {
                path: binary.to_path_buf(),
            });
        }

        let args = vec![OsString::from("-info"), binary.as_os_str().to_owned()];
        let info = self
            .runner
            .run(self.program, &args)
            .await
            .fs_context("failed to execute lipo", self.program)?;

        if !info.success() {
            log::debug!(
                "lipo -info rejected {}: {}",
                binary.display(),
                info.diagnostic()
            );
            return Err(Error::InvalidBinary {
                path: binary.to_path_buf(),
            });
        }

        Ok(())
    }
}

/// Parses `lipo -archs` output, dropping unsupported tokens.
pub fn parse_architectures(output: &str) -> Vec<Architecture> {
    output
        .split_whitespace()
        .filter_map(|token| match token.parse::<Architecture>() {
            Ok(arch) => Some(arch),
            Err(e) => {
                log::debug!("Skipping {}", e);
                None
            }
        })
        .collect()
}
