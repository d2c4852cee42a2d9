//! Build matrix generation.
//!
//! The matrix is the Cartesian product of a platform's [`AxisSet`] followed
//! by three overlays, each a copy of some base entries with one option
//! changed:
//! - wide-char: MSVC builds with `wchar_t=typedef`
//! - binding: release builds that can link the Python bindings
//! - testing: every base build with tests enabled
//!
//! Overlays are appended in that order and never de-duplicated.

mod axes;
pub mod table;
mod types;

use thiserror::Error;
use tracing::debug;

pub use axes::{Axis, AxisSet, PLATFORM_FAMILIES, axis_set_for};
pub use types::{BuildEnv, BuildOptions, Configuration, Settings, WcharMode, bool_literal};

/// Compilers treated as the MSVC family.
pub const MSVC_COMPILERS: [&str; 2] = ["msvc", "Visual Studio"];

/// Runtime values that link the C runtime dynamically.
pub const DYNAMIC_RUNTIMES: [&str; 3] = ["dynamic", "MD", "MDd"];

/// Errors that can occur while building a matrix.
#[derive(Debug, Error)]
pub enum MatrixError {
  #[error("no build configuration defined for platform '{family}' (available: {available})")]
  UnknownPlatform { family: String, available: String },
}

fn is_msvc(config: &Configuration) -> bool {
  config.compiler().is_some_and(|c| MSVC_COMPILERS.contains(&c))
}

/// Whether a base configuration gets a `wchar_t=typedef` variant.
pub fn wants_typedef_wchar(config: &Configuration) -> bool {
  is_msvc(config)
}

/// Whether a base configuration gets a Python binding variant.
///
/// Debug builds never do. MSVC builds need a dynamic runtime and a
/// compiler version above 12.
pub fn supports_pybind(config: &Configuration) -> bool {
  if config.build_type() == Some("Debug") {
    return false;
  }
  if !is_msvc(config) {
    return true;
  }
  let dynamic = config.runtime().is_some_and(|r| DYNAMIC_RUNTIMES.contains(&r));
  let too_old = config
    .compiler_version()
    .and_then(|v| v.trim().parse::<u32>().ok())
    .is_some_and(|v| v <= 12);
  dynamic && !too_old
}

/// Expand an axis set into the full list of build jobs.
pub fn generate(axes: &AxisSet, env: &BuildEnv) -> Vec<Configuration> {
  let base: Vec<Configuration> = axes
    .combinations()
    .into_iter()
    .map(|settings| Configuration {
      settings,
      options: BuildOptions::default(),
      buildenv: env.clone(),
    })
    .collect();

  let wchar: Vec<Configuration> = base
    .iter()
    .filter(|c| wants_typedef_wchar(c))
    .map(|c| c.with_options(|o| o.wchar_t = WcharMode::Typedef))
    .collect();

  let pybind: Vec<Configuration> = base
    .iter()
    .filter(|c| supports_pybind(c))
    .map(|c| c.with_options(|o| o.pybind = true))
    .collect();

  let testing: Vec<Configuration> = base.iter().map(|c| c.with_options(|o| o.testing = true)).collect();

  debug!(
    base = base.len(),
    wchar = wchar.len(),
    pybind = pybind.len(),
    testing = testing.len(),
    "generated build matrix"
  );

  let mut all = base;
  all.extend(wchar);
  all.extend(pybind);
  all.extend(testing);
  all
}

/// Build matrix for a named platform family.
///
/// # Errors
///
/// Returns [`MatrixError::UnknownPlatform`] if the family has no axis set.
pub fn generate_for_platform(family: &str, env: &BuildEnv) -> Result<Vec<Configuration>, MatrixError> {
  let axes = axis_set_for(family)?;
  Ok(generate(&axes, env))
}
