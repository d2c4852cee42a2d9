//! Local build driver.
//!
//! Turns a Conan profile into two tool invocations: `conan install` to
//! fetch dependencies and write the toolchain, then a CMake configure step
//! with definitions derived from the profile's root options.

mod cmake;
mod generator;
mod profiles;
mod tools;

use std::fmt;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::exec::{CommandRunner, ExecError, command_line};
use crate::profile::{ProfileError, ProfileFlags, parse_profile_options};

pub use cmake::{cmake_options, generate_args, install_args, is_debug_profile};
pub use generator::Generator;
pub use profiles::{bundled_profiles, resolve_profile};
pub use tools::{Tools, find_tool};

/// Errors that can occur while driving a local build.
#[derive(Debug, Error)]
pub enum DriverError {
  #[error("a valid --profile is required, got '{requested}'. Available profiles: [{available}]")]
  InvalidProfile { requested: String, available: String },

  #[error("specified generator not supported \"{name}\". Must be one of [{available}]")]
  UnknownGenerator { name: String, available: String },

  #[error(
    "test files path does not exist: {}\nEither create the directory, specify a valid path with --test_files, \
     or use --allow-missing-test-files to skip this check",
    path.display()
  )]
  TestFilesMissing { path: PathBuf },

  #[error("tool '{tool}' not found. Install it and make sure it is on PATH or in the active Python environment")]
  ToolNotFound { tool: String },

  #[error("failed to resolve {}: {source}", path.display())]
  Canonicalize { path: PathBuf, source: std::io::Error },

  #[error("failed to create build directory {}: {source}", path.display())]
  CreateBuildDir { path: PathBuf, source: std::io::Error },

  #[error("failed to read profile: {0}")]
  Profile(#[from] ProfileError),

  #[error(transparent)]
  ToolFailed(#[from] ExecError),
}

/// Inputs of a local build.
#[derive(Debug, Clone)]
pub struct BuildArgs {
  pub cmake_dir: PathBuf,
  pub build_dir: PathBuf,
  /// Resolved profile path, see [`resolve_profile`].
  pub profile: PathBuf,
  pub generator: Generator,
  pub python_version: Option<String>,
  pub xms_version: Option<String>,
  pub test_files: Option<String>,
  pub allow_missing_test_files: bool,
  pub dry_run: bool,
}

impl BuildArgs {
  pub fn new(profile: PathBuf) -> Self {
    Self {
      cmake_dir: PathBuf::from("."),
      build_dir: PathBuf::from("./builds"),
      profile,
      generator: Generator::default(),
      python_version: None,
      xms_version: None,
      test_files: None,
      allow_missing_test_files: false,
      dry_run: false,
    }
  }
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
  pub program: String,
  pub args: Vec<String>,
}

impl fmt::Display for ToolCommand {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", command_line(&self.program, &self.args))
  }
}

/// The commands a build runs, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
  pub install: ToolCommand,
  pub generate: ToolCommand,
}

/// Build both commands for `args` without running anything.
///
/// # Errors
///
/// Returns an error if the profile cannot be read or the CMake options are
/// invalid.
pub fn plan_build(args: &BuildArgs, tools: &Tools) -> Result<BuildPlan, DriverError> {
  let install = ToolCommand {
    program: tools.conan.clone(),
    args: install_args(args),
  };
  debug!(cmd = %install, "conan command");

  let options = parse_profile_options(&args.profile)?;
  debug!(?options, "profile options");
  let flags = ProfileFlags::from_options(&options);

  let cmake_opts = cmake_options(args, &flags)?;
  for option in &cmake_opts {
    info!(option = %option, "cmake option");
  }

  let generate = ToolCommand {
    program: tools.cmake.clone(),
    args: generate_args(args, &cmake_opts),
  };
  debug!(cmd = %generate, "cmake command");

  Ok(BuildPlan { install, generate })
}

/// Run a plan: create the build directory, then install and configure.
///
/// Stops at the first failing command. In dry-run mode the commands are
/// only logged.
///
/// # Errors
///
/// Returns an error if the build directory cannot be created or a command
/// fails.
pub fn execute_plan(plan: &BuildPlan, args: &BuildArgs, runner: &mut dyn CommandRunner) -> Result<(), DriverError> {
  if args.dry_run {
    info!(cmd = %plan.install, "[dry-run] would run");
    info!(cmd = %plan.generate, "[dry-run] would run");
    return Ok(());
  }

  if !args.build_dir.is_dir() {
    info!(path = %args.build_dir.display(), "creating build directory");
    fs::create_dir_all(&args.build_dir).map_err(|source| DriverError::CreateBuildDir {
      path: args.build_dir.clone(),
      source,
    })?;
  }

  info!(profile = %args.profile.display(), "installing conan dependencies");
  runner.run(&plan.install.program, &plan.install.args)?;

  info!(generator = %args.generator, "configuring cmake");
  runner.run(&plan.generate.program, &plan.generate.args)?;
  Ok(())
}

/// Locate the tools, plan the build and run it.
///
/// # Errors
///
/// Returns an error if a tool is missing (outside dry-run), planning fails,
/// or a command fails.
pub fn run_build(args: &BuildArgs, runner: &mut dyn CommandRunner) -> Result<BuildPlan, DriverError> {
  let tools = Tools::locate(args.dry_run)?;
  let plan = plan_build(args, &tools)?;
  execute_plan(&plan, args, runner)?;
  Ok(plan)
}
