use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use xmsconan_lib::matrix::table::render_table;
use xmsconan_lib::matrix::{BuildEnv, BuildOptions, Settings, generate_for_platform};
use xmsconan_lib::profile::write_profile;

use crate::cmd::platform_family;
use crate::output::{OutputFormat, print_json, print_stat, print_success};

/// JSON view of one configuration. The build environment is left out since
/// it may carry credentials.
#[derive(Serialize)]
struct MatrixEntry<'a> {
  index: usize,
  settings: &'a Settings,
  options: &'a BuildOptions,
  #[serde(skip_serializing_if = "Option::is_none")]
  profile: Option<&'a PathBuf>,
}

pub fn cmd_matrix(
  platform: Option<String>,
  library_name: &str,
  output_dir: Option<&Path>,
  format: OutputFormat,
) -> Result<()> {
  let family = platform_family(platform)?;
  let configs = generate_for_platform(&family, &BuildEnv::from_env())?;

  let mut profiles = Vec::new();
  if let Some(dir) = output_dir {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    for (i, config) in configs.iter().enumerate() {
      let path = dir.join(format!("profile_{:02}", i + 1));
      write_profile(config, &path)?;
      profiles.push(path);
    }
  }

  if format.is_json() {
    let entries: Vec<MatrixEntry> = configs
      .iter()
      .enumerate()
      .map(|(i, config)| MatrixEntry {
        index: i + 1,
        settings: &config.settings,
        options: &config.options,
        profile: profiles.get(i),
      })
      .collect();
    return print_json(&entries);
  }

  print!("{}", render_table(&configs, library_name));
  print_stat("Platform", &family);
  print_stat("Configurations", &configs.len().to_string());
  if let Some(dir) = output_dir {
    print_success(&format!("Wrote {} profiles to {}", profiles.len(), dir.display()));
  }

  Ok(())
}
