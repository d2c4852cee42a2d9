mod build;
mod generate;
mod matrix;
mod package;

use anyhow::{Result, anyhow};

use xmsconan_lib::platform::current_family;

pub use build::{BuildCommand, cmd_build};
pub use generate::cmd_gen;
pub use matrix::cmd_matrix;
pub use package::cmd_package;

/// Requested platform family, defaulting to the host.
fn platform_family(requested: Option<String>) -> Result<String> {
  match requested {
    Some(family) => Ok(family),
    None => current_family()
      .map(str::to_string)
      .ok_or_else(|| anyhow!("No build matrix for this host, pass --platform")),
  }
}
