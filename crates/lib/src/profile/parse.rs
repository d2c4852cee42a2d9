//! Root option extraction from Conan profiles.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::profile::ProfileError;

/// Unscoped `[options]` of a profile, keyed by bare option name.
pub type ProfileOptions = BTreeMap<String, String>;

const INCLUDE_KEYWORD: &str = "include(";
const ROOT_SCOPE: &str = "&:";

/// Parse the root package options of a profile and everything it includes.
///
/// Included profiles are merged at the point of the `include()` line, so
/// options assigned later in the including file win. Missing files and
/// include cycles contribute nothing instead of failing. Keys scoped to a
/// dependency or version (containing `/` or `:`) are dropped.
///
/// # Errors
///
/// Returns an error if an existing profile cannot be read.
pub fn parse_profile_options(path: &Path) -> Result<ProfileOptions, ProfileError> {
  let mut visited = HashSet::new();
  parse_with_visited(path, &mut visited)
}

fn parse_with_visited(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<ProfileOptions, ProfileError> {
  if !path.is_file() {
    debug!(path = %path.display(), "profile not found, skipping");
    return Ok(ProfileOptions::new());
  }

  let path = dunce::canonicalize(path).map_err(|source| ProfileError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  if !visited.insert(path.clone()) {
    debug!(path = %path.display(), "profile already included, skipping");
    return Ok(ProfileOptions::new());
  }

  let content = fs::read_to_string(&path).map_err(|source| ProfileError::Read {
    path: path.clone(),
    source,
  })?;
  let profile_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

  let mut options = ProfileOptions::new();
  let mut section: Option<String> = None;

  for raw_line in content.lines() {
    let line = raw_line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    if let Some(target) = include_target(line) {
      // Joining an absolute target replaces the base directory.
      let included = parse_with_visited(&profile_dir.join(target), visited)?;
      options.extend(included);
      continue;
    }

    if let Some(name) = section_name(line) {
      section = Some(name.to_lowercase());
      continue;
    }

    if section.as_deref() != Some("options") {
      continue;
    }

    let Some((key, value)) = line.split_once('=') else {
      continue;
    };
    let key = key.trim();
    let key = key.strip_prefix(ROOT_SCOPE).unwrap_or(key);
    if key.contains('/') || key.contains(':') {
      continue;
    }

    options.insert(key.to_string(), value.trim().to_string());
  }

  debug!(path = %path.display(), count = options.len(), "parsed profile options");
  Ok(options)
}

fn include_target(line: &str) -> Option<&str> {
  let keyword = line.get(..INCLUDE_KEYWORD.len())?;
  if !keyword.eq_ignore_ascii_case(INCLUDE_KEYWORD) || !line.ends_with(')') {
    return None;
  }
  Some(line[INCLUDE_KEYWORD.len()..line.len() - 1].trim())
}

fn section_name(line: &str) -> Option<&str> {
  line.strip_prefix('[')?.strip_suffix(']').map(str::trim)
}
