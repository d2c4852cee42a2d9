//! Profile rendering for generated configurations.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::matrix::{Configuration, bool_literal};
use crate::profile::ProfileError;

/// Render a configuration in Conan profile format.
///
/// Options are written with the `&:` root-package scope; unset build
/// environment variables are written with an empty value.
pub fn render_profile(config: &Configuration) -> String {
  let mut out = String::from("[settings]\n");
  for (name, value) in config.settings.iter() {
    let _ = writeln!(out, "{name}={value}");
  }

  out.push_str("\n[options]\n");
  let _ = writeln!(out, "&:wchar_t={}", config.options.wchar_t);
  let _ = writeln!(out, "&:pybind={}", bool_literal(config.options.pybind));
  let _ = writeln!(out, "&:testing={}", bool_literal(config.options.testing));

  out.push_str("\n[buildenv]\n");
  for (name, value) in config.buildenv.entries() {
    let _ = writeln!(out, "{name}={}", value.unwrap_or_default());
  }
  out
}

/// Write a configuration's profile to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_profile(config: &Configuration, path: &Path) -> Result<(), ProfileError> {
  fs::write(path, render_profile(config)).map_err(|source| ProfileError::Write {
    path: path.to_path_buf(),
    source,
  })
}
