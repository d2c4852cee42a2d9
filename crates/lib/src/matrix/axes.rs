//! Per-platform axis sets.

use crate::matrix::MatrixError;
use crate::matrix::types::Settings;
use crate::platform::Os;

/// Platform families with a predefined axis set.
pub const PLATFORM_FAMILIES: [&str; 3] = ["windows", "linux", "darwin"];

/// One dimension of build variation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
  pub name: String,
  pub values: Vec<String>,
}

/// Ordered axes spanning a build matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisSet {
  axes: Vec<Axis>,
}

impl AxisSet {
  pub fn new() -> Self {
    Self::default()
  }

  /// Append an axis; axes are expanded in the order they are added.
  pub fn with_axis<I, V>(mut self, name: impl Into<String>, values: I) -> Self
  where
    I: IntoIterator<Item = V>,
    V: Into<String>,
  {
    self.axes.push(Axis {
      name: name.into(),
      values: values.into_iter().map(Into::into).collect(),
    });
    self
  }

  pub fn axes(&self) -> &[Axis] {
    &self.axes
  }

  /// Number of entries in the Cartesian product.
  pub fn product_len(&self) -> usize {
    self.axes.iter().map(|axis| axis.values.len()).product()
  }

  /// Cartesian product of all axes, first axis varying slowest.
  pub fn combinations(&self) -> Vec<Settings> {
    self.axes.iter().fold(vec![Settings::default()], |prefixes, axis| {
      prefixes
        .iter()
        .flat_map(|prefix| {
          axis.values.iter().map(move |value| {
            let mut settings = prefix.clone();
            settings.push(axis.name.clone(), value.clone());
            settings
          })
        })
        .collect()
    })
  }
}

/// Axis set for a platform family (`windows`, `linux` or `darwin`).
///
/// # Errors
///
/// Returns [`MatrixError::UnknownPlatform`] for any other family name.
pub fn axis_set_for(family: &str) -> Result<AxisSet, MatrixError> {
  match family.trim().to_ascii_lowercase().as_str() {
    "windows" => Ok(windows()),
    "linux" => Ok(linux()),
    "darwin" | "macos" => Ok(darwin()),
    _ => Err(MatrixError::UnknownPlatform {
      family: family.to_string(),
      available: PLATFORM_FAMILIES.join(", "),
    }),
  }
}

fn windows() -> AxisSet {
  AxisSet::new()
    .with_axis("os", [Os::Windows.conan_name()])
    .with_axis("build_type", ["Release", "Debug"])
    .with_axis("arch", ["x86_64"])
    .with_axis("compiler", ["msvc"])
    .with_axis("compiler.cppstd", ["17"])
    .with_axis("compiler.version", ["192"])
    .with_axis("compiler.runtime", ["dynamic", "static"])
}

fn linux() -> AxisSet {
  AxisSet::new()
    .with_axis("os", [Os::Linux.conan_name()])
    .with_axis("build_type", ["Release", "Debug"])
    .with_axis("arch", ["x86_64"])
    .with_axis("compiler", ["gcc"])
    .with_axis("compiler.version", ["12"])
    .with_axis("compiler.cppstd", ["17"])
    .with_axis("compiler.libcxx", ["libstdc++11"])
}

fn darwin() -> AxisSet {
  AxisSet::new()
    .with_axis("os", [Os::MacOs.conan_name()])
    .with_axis("build_type", ["Release", "Debug"])
    .with_axis("arch", ["armv8"])
    .with_axis("compiler", ["apple-clang"])
    .with_axis("compiler.version", ["16"])
    .with_axis("compiler.cppstd", ["gnu17"])
    .with_axis("compiler.libcxx", ["libc++"])
}
