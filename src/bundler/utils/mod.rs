//! Filesystem and process helpers shared by the conversion pipeline.

pub mod fs;
pub mod process;

pub use process::{CommandOutput, CommandRunner, SystemRunner};
