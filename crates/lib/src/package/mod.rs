//! Package builds across the whole configuration matrix.
//!
//! Each configuration is written to a scratch profile and built with
//! `conan create`. A failing configuration does not stop the run; the
//! failures are reported in the [`PackageSummary`].

use std::fmt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;
use tracing::{info, warn};

use crate::consts::TEMP_PROFILE_NAME;
use crate::exec::{CommandRunner, ExecError};
use crate::matrix::{BuildEnv, Configuration, MatrixError, generate_for_platform};
use crate::profile::{ProfileError, write_profile};

/// Errors that can occur while packaging.
#[derive(Debug, Error)]
pub enum PackageError {
  #[error("failed to create temporary directory: {0}")]
  TempDir(#[source] std::io::Error),

  #[error(transparent)]
  Matrix(#[from] MatrixError),

  #[error(transparent)]
  Profile(#[from] ProfileError),

  #[error("failed to upload {reference}: {source}")]
  Upload { reference: String, source: ExecError },
}

/// Outcome of building every configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSummary {
  pub total: usize,
  /// 1-based indices of the configurations that failed.
  pub failed: Vec<usize>,
}

impl PackageSummary {
  pub fn is_success(&self) -> bool {
    self.failed.is_empty()
  }
}

impl fmt::Display for PackageSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_success() {
      return write!(f, "all {} configurations built successfully", self.total);
    }
    let failed: Vec<String> = self.failed.iter().map(usize::to_string).collect();
    write!(f, "one or more configurations failed to build ({})", failed.join(","))
  }
}

/// Builds and uploads Conan packages for one library.
#[derive(Debug)]
pub struct Packager {
  library_name: String,
  conanfile: PathBuf,
  conan: String,
  configurations: Vec<Configuration>,
  temp_dir: TempDir,
}

impl Packager {
  /// Create a packager with its own scratch directory, removed on drop.
  ///
  /// # Errors
  ///
  /// Returns an error if the scratch directory cannot be created.
  pub fn new(library_name: impl Into<String>, conanfile: impl Into<PathBuf>) -> Result<Self, PackageError> {
    Ok(Self {
      library_name: library_name.into(),
      conanfile: conanfile.into(),
      conan: "conan".to_string(),
      configurations: Vec::new(),
      temp_dir: TempDir::new().map_err(PackageError::TempDir)?,
    })
  }

  /// Use a specific `conan` executable.
  pub fn with_conan(mut self, conan: impl Into<String>) -> Self {
    self.conan = conan.into();
    self
  }

  pub fn configurations(&self) -> &[Configuration] {
    &self.configurations
  }

  /// Generate and store the matrix for a platform family.
  ///
  /// # Errors
  ///
  /// Returns an error if the platform family is unknown.
  pub fn generate_configurations(&mut self, family: &str, env: &BuildEnv) -> Result<&[Configuration], PackageError> {
    self.configurations = generate_for_platform(family, env)?;
    info!(
      library = %self.library_name,
      platform = family,
      count = self.configurations.len(),
      "generated configurations"
    );
    Ok(&self.configurations)
  }

  /// Write `config` to the scratch profile, replacing the previous one.
  ///
  /// # Errors
  ///
  /// Returns an error if the profile cannot be written.
  pub fn create_build_profile(&self, config: &Configuration) -> Result<PathBuf, PackageError> {
    let path = self.temp_dir.path().join(TEMP_PROFILE_NAME);
    write_profile(config, &path)?;
    info!(path = %path.display(), "temporary profile created");
    Ok(path)
  }

  fn create_args(&self, profile: &Path) -> Vec<String> {
    vec![
      "create".to_string(),
      self.conanfile.display().to_string(),
      "--profile".to_string(),
      profile.display().to_string(),
    ]
  }

  /// Build every stored configuration in order.
  ///
  /// # Errors
  ///
  /// Returns an error only if a profile cannot be written; build failures
  /// are collected in the summary.
  pub fn run(&self, runner: &mut dyn CommandRunner) -> Result<PackageSummary, PackageError> {
    let total = self.configurations.len();
    let mut summary = PackageSummary { total, failed: Vec::new() };

    for (i, config) in self.configurations.iter().enumerate() {
      let index = i + 1;
      info!("building configuration {index} of {total}");
      let profile = self.create_build_profile(config)?;

      match runner.run(&self.conan, &self.create_args(&profile)) {
        Ok(()) => info!("finished building configuration {index} of {total}"),
        Err(err) => {
          warn!(error = %err, "error building configuration {index} of {total}");
          summary.failed.push(index);
        }
      }
    }

    if summary.is_success() {
      info!("{summary}");
    } else {
      warn!("{summary}");
    }
    Ok(summary)
  }

  /// Conan reference pattern covering every package of `version`.
  pub fn upload_pattern(&self, version: &str) -> String {
    format!("{}/{version}*", self.library_name)
  }

  /// Upload all packages of `version` to `remote`.
  ///
  /// # Errors
  ///
  /// Returns an error if the upload command fails.
  pub fn upload(&self, version: &str, remote: &str, runner: &mut dyn CommandRunner) -> Result<(), PackageError> {
    let reference = self.upload_pattern(version);
    info!(reference = %reference, remote, "uploading packages");

    let args = vec![
      "upload".to_string(),
      reference.clone(),
      "-r".to_string(),
      remote.to_string(),
      "--confirm".to_string(),
    ];
    runner
      .run(&self.conan, &args)
      .map_err(|source| PackageError::Upload { reference, source })?;

    info!("all packages uploaded successfully");
    Ok(())
  }
}
