//! External command execution.
//!
//! Every external tool (`lipo`, `xcodebuild`) and the tool-presence check go
//! through [`CommandRunner`]. The system implementation drains stdout and
//! stderr concurrently while waiting for the child, so large outputs cannot
//! fill a pipe and stall the process.

use std::{
    ffi::{OsStr, OsString},
    future::Future,
    io,
    path::{Path, PathBuf},
};

/// Captured result of one external command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub exit_code: Option<i32>,
    /// Captured standard output (lossy UTF-8)
    pub stdout: String,
    /// Captured standard error (lossy UTF-8)
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Diagnostic text for error reports: stderr, or stdout when stderr is empty.
    pub fn diagnostic(&self) -> String {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim().to_string()
        } else {
            stderr.to_string()
        }
    }
}

/// Runs external programs synchronously from the caller's point of view:
/// the returned future resolves only after the process has exited.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, capturing exit status, stdout and stderr.
    ///
    /// An `Err` means the process could not be started at all.
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
    ) -> impl Future<Output = io::Result<CommandOutput>> + Send;

    /// Resolves a tool name or path to an executable, `None` if unavailable.
    fn locate(&self, program: &OsStr) -> Option<PathBuf>;
}

/// [`CommandRunner`] backed by real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &Path, args: &[OsString]) -> io::Result<CommandOutput> {
        log::debug!("Running: {}", command_line(program, args));

        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn locate(&self, program: &OsStr) -> Option<PathBuf> {
        match which::which(program) {
            Ok(path) => {
                log::debug!("Found {} at: {}", program.to_string_lossy(), path.display());
                Some(path)
            }
            Err(e) => {
                log::debug!("{} not found: {}", program.to_string_lossy(), e);
                None
            }
        }
    }
}

/// Renders a command line for logs and error messages.
pub fn command_line(program: &Path, args: &[OsString]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}
