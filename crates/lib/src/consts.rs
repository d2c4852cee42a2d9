//! Names and defaults shared by the build driver, packager and renderer.

pub const APP_NAME: &str = "xmsconan";

/// Library version passed to CMake when none is given.
pub const DEFAULT_XMS_VERSION: &str = "99.99.99";

/// Python version targeted by binding builds when none is given.
pub const DEFAULT_PYTHON_VERSION: &str = "3.13";

/// Python version recorded in generated profiles when `PYTHON_TARGET_VERSION` is unset.
pub const DEFAULT_PROFILE_PYTHON_VERSION: &str = "3.12";

/// Test fixture directory used by testing builds when none is given.
pub const DEFAULT_TEST_FILES: &str = "./test_files";

/// Conan remote that packages are uploaded to.
pub const DEFAULT_REMOTE: &str = "aquaveo";

/// Overrides the bundled profile directory.
pub const PROFILES_DIR_ENV: &str = "XMSCONAN_PROFILES_DIR";

/// Overrides the bundled template directory.
pub const TEMPLATES_DIR_ENV: &str = "XMSCONAN_TEMPLATES_DIR";

/// File name of the profile the packager writes for each configuration.
pub const TEMP_PROFILE_NAME: &str = "temp_profile";
