//! Types describing one build job of the configuration matrix.

use std::fmt;

use serde::Serialize;
use serde::ser::Serializer;

use crate::consts::DEFAULT_PROFILE_PYTHON_VERSION;

const REDACTED: &str = "***";

/// Python-style boolean literal expected by Conan profiles and CMake flags.
pub fn bool_literal(value: bool) -> &'static str {
  if value { "True" } else { "False" }
}

/// How the library exposes `wchar_t`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WcharMode {
  /// `wchar_t` is a native compiler type.
  #[default]
  Builtin,
  /// `wchar_t` is a typedef for `unsigned short` (MSVC `/Zc:wchar_t-`).
  Typedef,
}

impl WcharMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Builtin => "builtin",
      Self::Typedef => "typedef",
    }
  }
}

impl fmt::Display for WcharMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Library options carried by every configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildOptions {
  pub wchar_t: WcharMode,
  pub pybind: bool,
  pub testing: bool,
}

/// Ordered `setting=value` assignments, one per axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings(Vec<(String, String)>);

impl Settings {
  pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.0.push((name.into(), value.into()));
  }

  /// Look up a setting by axis name.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
  }
}

impl Serialize for Settings {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(self.iter())
  }
}

/// Build environment recorded in each profile's `[buildenv]` section.
///
/// Variables without a default that are unset in the process environment
/// stay `None`; they are never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct BuildEnv {
  pub xms_version: Option<String>,
  pub python_target_version: String,
  pub ci_commit_tag: String,
  pub release_python: String,
  pub aquapi_username: Option<String>,
  pub aquapi_password: Option<String>,
  pub aquapi_url: Option<String>,
}

impl BuildEnv {
  /// Capture the build environment from the current process.
  pub fn from_env() -> Self {
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  /// Capture the build environment through an arbitrary variable lookup.
  ///
  /// A tagged CI pipeline (`CI_COMMIT_TAG` set to anything but `False`)
  /// always releases the Python package.
  pub fn from_lookup<F>(lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let ci_commit_tag = lookup("CI_COMMIT_TAG").unwrap_or_else(|| "False".to_string());
    let release_python = if ci_commit_tag != "False" {
      "True".to_string()
    } else {
      lookup("RELEASE_PYTHON").unwrap_or_else(|| "False".to_string())
    };

    Self {
      xms_version: lookup("XMS_VERSION"),
      python_target_version: lookup("PYTHON_TARGET_VERSION")
        .unwrap_or_else(|| DEFAULT_PROFILE_PYTHON_VERSION.to_string()),
      ci_commit_tag,
      release_python,
      aquapi_username: lookup("AQUAPI_USERNAME"),
      aquapi_password: lookup("AQUAPI_PASSWORD"),
      aquapi_url: lookup("AQUAPI_URL"),
    }
  }

  /// Copy with the password masked, for anything printed to a terminal or log.
  pub fn redacted(&self) -> Self {
    Self {
      aquapi_password: self.aquapi_password.as_ref().map(|_| REDACTED.to_string()),
      ..self.clone()
    }
  }

  /// Variables in the order they are written to a profile.
  pub fn entries(&self) -> [(&'static str, Option<&str>); 7] {
    [
      ("XMS_VERSION", self.xms_version.as_deref()),
      ("PYTHON_TARGET_VERSION", Some(self.python_target_version.as_str())),
      ("CI_COMMIT_TAG", Some(self.ci_commit_tag.as_str())),
      ("RELEASE_PYTHON", Some(self.release_python.as_str())),
      ("AQUAPI_USERNAME", self.aquapi_username.as_deref()),
      ("AQUAPI_PASSWORD", self.aquapi_password.as_deref()),
      ("AQUAPI_URL", self.aquapi_url.as_deref()),
    ]
  }
}

/// One fully specified build job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
  pub settings: Settings,
  pub options: BuildOptions,
  pub buildenv: BuildEnv,
}

impl Configuration {
  /// Copy of this configuration with only its options changed.
  pub fn with_options<F>(&self, update: F) -> Self
  where
    F: FnOnce(&mut BuildOptions),
  {
    let mut copy = self.clone();
    update(&mut copy.options);
    copy
  }

  /// Copy with credentials in the build environment masked.
  pub fn redacted(&self) -> Self {
    Self {
      buildenv: self.buildenv.redacted(),
      ..self.clone()
    }
  }

  pub fn setting(&self, name: &str) -> Option<&str> {
    self.settings.get(name)
  }

  pub fn compiler(&self) -> Option<&str> {
    self.setting("compiler")
  }

  pub fn compiler_version(&self) -> Option<&str> {
    self.setting("compiler.version")
  }

  pub fn runtime(&self) -> Option<&str> {
    self.setting("compiler.runtime")
  }

  pub fn build_type(&self) -> Option<&str> {
    self.setting("build_type")
  }
}
