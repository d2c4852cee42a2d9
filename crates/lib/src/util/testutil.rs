//! Test utilities for xmsconan-lib.
//!
//! Cross-platform shell helpers and a [`CommandRunner`] that records
//! invocations instead of spawning processes.

use crate::exec::{CommandRunner, ExecError, command_line};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Records every command; optionally fails the command at `fail_at` (0-based).
#[derive(Debug, Default)]
pub struct RecordingRunner {
  pub calls: Vec<Vec<String>>,
  pub fail_at: Option<usize>,
}

impl RecordingRunner {
  pub fn failing_at(index: usize) -> Self {
    Self {
      calls: Vec::new(),
      fail_at: Some(index),
    }
  }
}

impl CommandRunner for RecordingRunner {
  fn run(&mut self, program: &str, args: &[String]) -> Result<(), ExecError> {
    let index = self.calls.len();
    let mut call = vec![program.to_string()];
    call.extend(args.iter().cloned());
    self.calls.push(call);

    if self.fail_at == Some(index) {
      return Err(ExecError::Failed {
        cmd: command_line(program, args),
        code: Some(1),
      });
    }
    Ok(())
  }
}
