//! Lookup of bundled build profiles.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::driver::DriverError;

/// Bundled profiles under `dir`, keyed by file name.
///
/// A missing directory yields no profiles.
pub fn bundled_profiles(dir: &Path) -> BTreeMap<String, PathBuf> {
  WalkDir::new(dir)
    .into_iter()
    .filter_map(Result::ok)
    .filter(|entry| entry.file_type().is_file())
    .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.into_path()))
    .collect()
}

/// Resolve a requested profile to an absolute file path.
///
/// A bundled profile name takes precedence over a file path of the same name.
///
/// # Errors
///
/// Returns [`DriverError::InvalidProfile`] listing the bundled names if the
/// request is neither a bundled profile nor an existing file.
pub fn resolve_profile(requested: &str, dir: &Path) -> Result<PathBuf, DriverError> {
  let profiles = bundled_profiles(dir);
  let candidate = match profiles.get(requested) {
    Some(path) => path.clone(),
    None if !requested.is_empty() && Path::new(requested).is_file() => PathBuf::from(requested),
    None => {
      return Err(DriverError::InvalidProfile {
        requested: requested.to_string(),
        available: profiles.keys().cloned().collect::<Vec<_>>().join(", "),
      });
    }
  };

  dunce::canonicalize(&candidate).map_err(|source| DriverError::Canonicalize { path: candidate, source })
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::TempDir;

  fn profiles_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("windows")).unwrap();
    fs::write(temp.path().join("windows").join("VS2022_TESTING"), "[options]\ntesting=True\n").unwrap();
    fs::write(temp.path().join("GCC12_d"), "[settings]\n").unwrap();
    temp
  }

  #[test]
  fn walks_nested_profile_directories() {
    let dir = profiles_dir();
    let names: Vec<_> = bundled_profiles(dir.path()).into_keys().collect();
    assert_eq!(names, vec!["GCC12_d".to_string(), "VS2022_TESTING".to_string()]);
  }

  #[test]
  fn missing_directory_has_no_profiles() {
    let dir = TempDir::new().unwrap();
    assert!(bundled_profiles(&dir.path().join("missing")).is_empty());
  }

  #[test]
  fn bundled_name_resolves() {
    let dir = profiles_dir();
    let path = resolve_profile("VS2022_TESTING", dir.path()).unwrap();

    assert!(path.is_absolute());
    assert!(path.ends_with("windows/VS2022_TESTING"));
  }

  #[test]
  fn file_path_resolves() {
    let dir = profiles_dir();
    let custom = dir.path().join("custom_profile");
    fs::write(&custom, "").unwrap();

    let path = resolve_profile(custom.to_str().unwrap(), &dir.path().join("missing")).unwrap();

    assert_eq!(path, dunce::canonicalize(&custom).unwrap());
  }

  #[test]
  fn unknown_profile_lists_available_names() {
    let dir = profiles_dir();
    let err = resolve_profile("CLANG_RELEASE", dir.path()).unwrap_err();

    assert!(matches!(err, DriverError::InvalidProfile { .. }));
    assert!(err.to_string().contains("[GCC12_d, VS2022_TESTING]"));
  }
}
