//! Conan and CMake command lines for a build directory.

use std::path::Path;

use tracing::warn;

use crate::consts::{DEFAULT_PYTHON_VERSION, DEFAULT_TEST_FILES, DEFAULT_XMS_VERSION};
use crate::driver::{BuildArgs, DriverError};
use crate::matrix::bool_literal;
use crate::profile::ProfileFlags;

const DISABLED_TEST_FILES: &str = "NONE";

/// Whether a profile selects a Debug build (its path ends with `_d`).
pub fn is_debug_profile(profile: &Path) -> bool {
  profile.to_string_lossy().to_lowercase().ends_with("_d")
}

/// `-D` definitions passed to CMake, in order.
///
/// # Errors
///
/// Returns [`DriverError::TestFilesMissing`] for a testing build whose test
/// file directory does not exist, unless missing test files are allowed.
pub fn cmake_options(args: &BuildArgs, flags: &ProfileFlags) -> Result<Vec<String>, DriverError> {
  let build_dir = args.build_dir.display();
  let build_type = if is_debug_profile(&args.profile) { "Debug" } else { "Release" };

  let mut options = vec![
    format!("-DBUILD_TESTING={}", bool_literal(flags.testing)),
    format!("-DIS_PYTHON_BUILD={}", bool_literal(flags.pybind)),
    format!("-DXMS_BUILD={}", bool_literal(flags.wchar_t)),
    format!("-DCMAKE_INSTALL_PREFIX={}", args.build_dir.join("install").display()),
    format!("-DCMAKE_BUILD_TYPE={build_type}"),
  ];

  if flags.pybind {
    let version = args.python_version.as_deref().unwrap_or(DEFAULT_PYTHON_VERSION);
    options.push(format!("-DPYTHON_TARGET_VERSION={version}"));
  } else if flags.testing {
    if let Some(path) = test_files_path(args)? {
      options.push(format!("-DXMS_TEST_PATH={path}"));
    }
  }

  let xms_version = args.xms_version.as_deref().unwrap_or(DEFAULT_XMS_VERSION);
  options.push(format!("-DXMS_VERSION={xms_version}"));
  options.push(format!(
    "-DCMAKE_TOOLCHAIN_FILE={build_dir}/build/generators/conan_toolchain.cmake"
  ));

  Ok(options)
}

fn test_files_path(args: &BuildArgs) -> Result<Option<String>, DriverError> {
  let requested = args
    .test_files
    .as_deref()
    .filter(|t| !t.is_empty())
    .unwrap_or(DEFAULT_TEST_FILES);
  if requested == DISABLED_TEST_FILES {
    return Ok(None);
  }

  let path = Path::new(requested);
  if !path.is_dir() {
    if !args.allow_missing_test_files {
      return Err(DriverError::TestFilesMissing { path: path.to_path_buf() });
    }
    warn!(path = %path.display(), "test files not found, skipping XMS_TEST_PATH");
    return Ok(None);
  }

  let absolute = std::path::absolute(path).map_err(|source| DriverError::Canonicalize {
    path: path.to_path_buf(),
    source,
  })?;
  Ok(Some(absolute.display().to_string()))
}

/// Arguments to `conan install` for the build directory.
pub fn install_args(args: &BuildArgs) -> Vec<String> {
  vec![
    "install".to_string(),
    "-of".to_string(),
    args.build_dir.display().to_string(),
    "-pr".to_string(),
    args.profile.display().to_string(),
    args.cmake_dir.display().to_string(),
    "--build=missing".to_string(),
  ]
}

/// Arguments to the CMake configure step.
pub fn generate_args(args: &BuildArgs, options: &[String]) -> Vec<String> {
  let mut cmd = Vec::with_capacity(options.len() + 6);
  if let Some(name) = args.generator.cmake_name() {
    cmd.push("-G".to_string());
    cmd.push(name.to_string());
  }
  cmd.extend(options.iter().cloned());
  cmd.push("-S".to_string());
  cmd.push(args.cmake_dir.display().to_string());
  cmd.push("-B".to_string());
  cmd.push(args.build_dir.display().to_string());
  cmd
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::driver::Generator;
  use std::path::PathBuf;
  use tempfile::TempDir;
  use tracing_test::traced_test;

  fn args(profile: &str) -> BuildArgs {
    let mut args = BuildArgs::new(PathBuf::from(profile));
    args.build_dir = PathBuf::from("out");
    args
  }

  fn flags(testing: bool, pybind: bool, wchar_t: bool) -> ProfileFlags {
    ProfileFlags { testing, pybind, wchar_t }
  }

  #[test]
  fn release_option_order() {
    let options = cmake_options(&args("/p/VS2022"), &flags(false, false, false)).unwrap();
    let install = Path::new("out").join("install");

    assert_eq!(
      options,
      vec![
        "-DBUILD_TESTING=False".to_string(),
        "-DIS_PYTHON_BUILD=False".to_string(),
        "-DXMS_BUILD=False".to_string(),
        format!("-DCMAKE_INSTALL_PREFIX={}", install.display()),
        "-DCMAKE_BUILD_TYPE=Release".to_string(),
        "-DXMS_VERSION=99.99.99".to_string(),
        "-DCMAKE_TOOLCHAIN_FILE=out/build/generators/conan_toolchain.cmake".to_string(),
      ]
    );
  }

  #[test]
  fn debug_suffix_is_case_insensitive() {
    assert!(is_debug_profile(Path::new("profiles/VS2022_d")));
    assert!(is_debug_profile(Path::new("profiles/GCC12_D")));
    assert!(!is_debug_profile(Path::new("profiles/GCC12_dynamic")));

    let options = cmake_options(&args("GCC12_D"), &flags(false, false, false)).unwrap();
    assert!(options.contains(&"-DCMAKE_BUILD_TYPE=Debug".to_string()));
  }

  #[test]
  fn pybind_adds_python_version_and_skips_test_path() {
    let mut args = args("VS2022_PYBIND");
    args.test_files = Some("/definitely/missing".to_string());

    let options = cmake_options(&args, &flags(true, true, true)).unwrap();

    assert!(options.contains(&"-DPYTHON_TARGET_VERSION=3.13".to_string()));
    assert!(options.contains(&"-DXMS_BUILD=True".to_string()));
    assert!(!options.iter().any(|o| o.starts_with("-DXMS_TEST_PATH")));

    args.python_version = Some("3.10".to_string());
    let options = cmake_options(&args, &flags(false, true, false)).unwrap();
    assert!(options.contains(&"-DPYTHON_TARGET_VERSION=3.10".to_string()));
  }

  #[test]
  fn testing_uses_absolute_test_path() {
    let temp = TempDir::new().unwrap();
    let mut args = args("GCC12_TESTING");
    args.test_files = Some(temp.path().display().to_string());
    args.xms_version = Some("6.1.0".to_string());

    let options = cmake_options(&args, &flags(true, false, false)).unwrap();

    assert_eq!(options[5], format!("-DXMS_TEST_PATH={}", temp.path().display()));
    assert_eq!(options[6], "-DXMS_VERSION=6.1.0");
  }

  #[test]
  fn none_disables_test_path() {
    let mut args = args("GCC12_TESTING");
    args.test_files = Some("NONE".to_string());

    let options = cmake_options(&args, &flags(true, false, false)).unwrap();

    assert!(!options.iter().any(|o| o.starts_with("-DXMS_TEST_PATH")));
  }

  #[test]
  fn missing_test_files_fail() {
    let mut args = args("GCC12_TESTING");
    args.test_files = Some("/xmsconan/missing/test_files".to_string());

    let err = cmake_options(&args, &flags(true, false, false)).unwrap_err();

    assert!(matches!(err, DriverError::TestFilesMissing { .. }));
    assert!(err.to_string().contains("--allow-missing-test-files"));
  }

  #[test]
  #[traced_test]
  fn missing_test_files_allowed_with_warning() {
    let mut args = args("GCC12_TESTING");
    args.test_files = Some("/xmsconan/missing/test_files".to_string());
    args.allow_missing_test_files = true;

    let options = cmake_options(&args, &flags(true, false, false)).unwrap();

    assert!(!options.iter().any(|o| o.starts_with("-DXMS_TEST_PATH")));
    assert!(logs_contain("skipping XMS_TEST_PATH"));
  }

  #[test]
  fn install_and_generate_arguments() {
    let mut args = args("prof");
    args.cmake_dir = PathBuf::from("src");
    args.generator = Generator::Vs2019;

    assert_eq!(
      install_args(&args),
      vec!["install", "-of", "out", "-pr", "prof", "src", "--build=missing"]
    );
    assert_eq!(
      generate_args(&args, &["-DX=1".to_string()]),
      vec!["-G", "Visual Studio 16 2019", "-DX=1", "-S", "src", "-B", "out"]
    );

    args.generator = Generator::Make;
    assert_eq!(generate_args(&args, &[]), vec!["-S", "src", "-B", "out"]);
  }
}
