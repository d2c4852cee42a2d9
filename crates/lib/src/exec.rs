//! External tool invocation.
//!
//! Conan and CMake run as blocking child processes with inherited stdio so
//! their output streams straight to the terminal. The [`CommandRunner`]
//! trait is the seam the build driver and packager execute through.

use std::process::Command;

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while running an external tool.
#[derive(Debug, Error)]
pub enum ExecError {
  /// The process could not be started.
  #[error("failed to start {program}: {source}")]
  Spawn { program: String, source: std::io::Error },

  /// The process exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  Failed { cmd: String, code: Option<i32> },
}

/// Runs one external command to completion.
pub trait CommandRunner {
  /// Run `program` with `args`, failing on a non-zero exit.
  fn run(&mut self, program: &str, args: &[String]) -> Result<(), ExecError>;
}

/// Runs commands as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&mut self, program: &str, args: &[String]) -> Result<(), ExecError> {
    let cmd = command_line(program, args);
    info!(cmd = %cmd, "executing command");

    let status = Command::new(program)
      .args(args)
      .status()
      .map_err(|source| ExecError::Spawn {
        program: program.to_string(),
        source,
      })?;

    if !status.success() {
      return Err(ExecError::Failed {
        cmd,
        code: status.code(),
      });
    }

    debug!(cmd = %cmd, "command finished");
    Ok(())
  }
}

/// Space-joined command line for logs and error messages.
pub fn command_line(program: &str, args: &[String]) -> String {
  std::iter::once(program)
    .chain(args.iter().map(String::as_str))
    .collect::<Vec<_>>()
    .join(" ")
}
