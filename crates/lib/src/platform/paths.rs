use std::env;
use std::path::PathBuf;

use crate::consts::{APP_NAME, PROFILES_DIR_ENV, TEMPLATES_DIR_ENV};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  env::var_os("USERPROFILE")
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the directory for data files for the application
#[cfg(windows)]
pub fn data_dir() -> PathBuf {
  env::var_os("APPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(|| home_dir().join("AppData").join("Roaming"))
    .join(APP_NAME)
}

/// Returns the directory for data files for the application
#[cfg(not(windows))]
pub fn data_dir() -> PathBuf {
  let data_home = env::var_os("XDG_DATA_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|| home_dir().join(".local").join("share"));
  data_home.join(APP_NAME)
}

/// Directory holding the bundled build profiles.
pub fn profiles_dir() -> PathBuf {
  env::var_os(PROFILES_DIR_ENV)
    .map(PathBuf::from)
    .unwrap_or_else(|| data_dir().join("profiles"))
}

/// Directory holding the bundled `.jinja` templates.
pub fn templates_dir() -> PathBuf {
  env::var_os(TEMPLATES_DIR_ENV)
    .map(PathBuf::from)
    .unwrap_or_else(|| data_dir().join("templates"))
}

/// Executable directories of the active Python environment, if any.
///
/// Conan and CMake are usually pip-installed, so a virtualenv or conda
/// environment is searched after `PATH`.
pub fn python_env_bin_dirs() -> Vec<PathBuf> {
  let scripts = if cfg!(windows) { "Scripts" } else { "bin" };
  ["VIRTUAL_ENV", "CONDA_PREFIX"]
    .iter()
    .filter_map(|var| env::var_os(var))
    .map(|prefix| PathBuf::from(prefix).join(scripts))
    .collect()
}
