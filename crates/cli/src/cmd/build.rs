//! Implementation of the `xmsconan build` command.
//!
//! Resolves the requested profile, then runs `conan install` and the CMake
//! configure step for a single build directory.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use xmsconan_lib::driver::{BuildArgs, Generator, resolve_profile, run_build};
use xmsconan_lib::exec::SystemRunner;
use xmsconan_lib::platform::paths;

use crate::output::{format_duration, print_info, print_stat, print_success};

#[derive(Debug, Args)]
pub struct BuildCommand {
  /// Directory containing the top-level CMakeLists.txt
  #[arg(short = 'c', long = "cmake_dir", default_value = ".")]
  pub cmake_dir: PathBuf,

  /// Directory to configure the build in
  #[arg(short = 'b', long = "build_dir", default_value = "./builds")]
  pub build_dir: PathBuf,

  /// Bundled profile name or path to a Conan profile
  #[arg(short = 'p', long)]
  pub profile: String,

  /// CMake generator: make, ninja, vs2019, vs2022 or xcode
  #[arg(short = 'g', long)]
  pub generator: Option<String>,

  /// Python version for binding builds
  #[arg(long = "python_version")]
  pub python_version: Option<String>,

  /// Library version passed to CMake
  #[arg(short = 'x', long = "xms_version")]
  pub xms_version: Option<String>,

  /// Test files directory for testing builds, or NONE
  #[arg(short = 't', long = "test_files")]
  pub test_files: Option<String>,

  /// Skip XMS_TEST_PATH instead of failing when test files are missing
  #[arg(long)]
  pub allow_missing_test_files: bool,

  /// Show the commands without running them
  #[arg(long)]
  pub dry_run: bool,
}

pub fn cmd_build(command: BuildCommand) -> Result<()> {
  let start = Instant::now();

  let generator = match command.generator.as_deref() {
    Some(name) => name.parse::<Generator>()?,
    None => Generator::default(),
  };
  let profile = resolve_profile(&command.profile, &paths::profiles_dir())?;
  debug!(requested = %command.profile, profile = %profile.display(), "resolved profile");

  let args = BuildArgs {
    cmake_dir: command.cmake_dir,
    build_dir: command.build_dir,
    profile,
    generator,
    python_version: command.python_version,
    xms_version: command.xms_version,
    test_files: command.test_files,
    allow_missing_test_files: command.allow_missing_test_files,
    dry_run: command.dry_run,
  };

  let plan = run_build(&args, &mut SystemRunner).context("Build failed")?;

  println!();
  if args.dry_run {
    print_info("Dry run - no commands executed");
    println!("{}", plan.install);
    println!("{}", plan.generate);
  } else {
    print_success("Build directory configured");
  }
  print_stat("Profile", &args.profile.display().to_string());
  print_stat("Build directory", &args.build_dir.display().to_string());
  print_stat("Generator", args.generator.as_str());
  print_stat("Duration", &format_duration(start.elapsed()));

  Ok(())
}
