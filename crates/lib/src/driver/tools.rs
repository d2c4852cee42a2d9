use std::env;
use std::path::PathBuf;

use tracing::warn;

use crate::driver::DriverError;
use crate::platform::paths::python_env_bin_dirs;

/// Find an executable on `PATH`, then in the active Python environment.
pub fn find_tool(name: &str) -> Option<PathBuf> {
  if let Ok(path) = which::which(name) {
    return Some(path);
  }

  let env_dirs = python_env_bin_dirs();
  if env_dirs.is_empty() {
    return None;
  }
  let search_path = env::join_paths(env_dirs).ok()?;
  let cwd = env::current_dir().unwrap_or_default();
  which::which_in(name, Some(search_path), cwd).ok()
}

/// Executables the build driver invokes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tools {
  pub conan: String,
  pub cmake: String,
}

impl Tools {
  /// Locate Conan and CMake.
  ///
  /// When `lenient`, a missing tool falls back to its bare name so that
  /// commands can still be shown.
  ///
  /// # Errors
  ///
  /// Returns [`DriverError::ToolNotFound`] for a missing tool unless `lenient`.
  pub fn locate(lenient: bool) -> Result<Self, DriverError> {
    Ok(Self {
      conan: locate_one("conan", lenient)?,
      cmake: locate_one("cmake", lenient)?,
    })
  }
}

fn locate_one(name: &str, lenient: bool) -> Result<String, DriverError> {
  match find_tool(name) {
    Some(path) => Ok(path.to_string_lossy().into_owned()),
    None if lenient => {
      warn!(tool = name, "tool not found, using bare name");
      Ok(name.to_string())
    }
    None => Err(DriverError::ToolNotFound { tool: name.to_string() }),
  }
}
