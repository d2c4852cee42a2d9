//! Implementation of the `xmsconan package` command.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, bail};
use tracing::debug;

use xmsconan_lib::driver::find_tool;
use xmsconan_lib::exec::SystemRunner;
use xmsconan_lib::matrix::BuildEnv;
use xmsconan_lib::matrix::table::render_table;
use xmsconan_lib::package::Packager;
use xmsconan_lib::profile::render_profile;

use crate::cmd::platform_family;
use crate::output::{format_duration, print_info, print_stat, print_success, print_warning};

/// Build every configuration, then upload if requested.
///
/// Packages are only uploaded when every configuration built.
pub fn cmd_package(
  library_name: &str,
  conanfile: PathBuf,
  platform: Option<String>,
  upload: Option<&str>,
  remote: &str,
  dry_run: bool,
) -> Result<()> {
  let start = Instant::now();
  let family = platform_family(platform)?;

  let conan = find_tool("conan")
    .map(|path| path.to_string_lossy().into_owned())
    .unwrap_or_else(|| "conan".to_string());
  debug!(conan = %conan, "using conan executable");
  let mut packager = Packager::new(library_name, conanfile)?.with_conan(conan);
  packager.generate_configurations(&family, &BuildEnv::from_env())?;

  print!("{}", render_table(packager.configurations(), library_name));

  if dry_run {
    for (i, config) in packager.configurations().iter().enumerate() {
      println!();
      println!("# configuration {}", i + 1);
      print!("{}", render_profile(&config.redacted()));
    }
    println!();
    print_info("Dry run - no packages built");
    return Ok(());
  }

  let summary = packager.run(&mut SystemRunner)?;

  println!();
  print_stat("Configurations", &summary.total.to_string());
  print_stat("Duration", &format_duration(start.elapsed()));

  if !summary.is_success() {
    if upload.is_some() {
      print_warning("Skipping upload");
    }
    bail!("{summary}");
  }
  print_success("All configurations built successfully");

  if let Some(version) = upload {
    packager.upload(version, remote, &mut SystemRunner)?;
    print_success(&format!("Uploaded {} to {remote}", packager.upload_pattern(version)));
  }

  Ok(())
}
