use std::fmt;
use std::str::FromStr;

use crate::driver::DriverError;

/// CMake generators the build driver can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Generator {
  Make,
  Ninja,
  Vs2019,
  Vs2022,
  Xcode,
}

impl Generator {
  pub const ALL: [Generator; 5] = [Self::Make, Self::Ninja, Self::Vs2019, Self::Vs2022, Self::Xcode];

  /// Name accepted on the command line.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Make => "make",
      Self::Ninja => "ninja",
      Self::Vs2019 => "vs2019",
      Self::Vs2022 => "vs2022",
      Self::Xcode => "xcode",
    }
  }

  /// Value for `cmake -G`; `None` keeps CMake's default (Unix Makefiles).
  pub fn cmake_name(&self) -> Option<&'static str> {
    match self {
      Self::Make => None,
      Self::Ninja => Some("Ninja"),
      Self::Vs2019 => Some("Visual Studio 16 2019"),
      Self::Vs2022 => Some("Visual Studio 17 2022"),
      Self::Xcode => Some("Xcode"),
    }
  }
}

impl Default for Generator {
  fn default() -> Self {
    if cfg!(windows) { Self::Vs2022 } else { Self::Ninja }
  }
}

impl fmt::Display for Generator {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Generator {
  type Err = DriverError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|g| g.as_str() == s)
      .ok_or_else(|| DriverError::UnknownGenerator {
        name: s.to_string(),
        available: Self::ALL.map(|g| g.as_str()).join(", "),
      })
  }
}
