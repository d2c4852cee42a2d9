//! Implementation of the `xmsconan gen` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use xmsconan_lib::platform::paths;
use xmsconan_lib::render::{RenderOptions, render_templates};

use crate::output::{print_info, print_stat, print_success};

/// Subdirectory of templates rendered into `<output>/_package` when present.
const PACKAGE_TEMPLATES: &str = "_package";

pub fn cmd_gen(
  toml_file: &Path,
  template_dir: Option<PathBuf>,
  output_dir: &Path,
  version: &str,
  dry_run: bool,
) -> Result<()> {
  let template_dir = template_dir.unwrap_or_else(paths::templates_dir);
  let package_dir = template_dir.join(PACKAGE_TEMPLATES);

  let mut options = RenderOptions {
    data_file: toml_file.to_path_buf(),
    template_dir,
    output_dir: output_dir.to_path_buf(),
    version: version.to_string(),
    dry_run,
  };
  let mut outputs = render_templates(&options).context("Failed to render templates")?.outputs;

  if package_dir.is_dir() {
    options.template_dir = package_dir;
    options.output_dir = output_dir.join(PACKAGE_TEMPLATES);
    let report = render_templates(&options).context("Failed to render package templates")?;
    outputs.extend(report.outputs);
  }

  println!();
  if dry_run {
    print_info("Dry run - no files written");
  } else {
    print_success(&format!("Templates rendered using {}", toml_file.display()));
  }
  for output in &outputs {
    print_stat("File", &output.display().to_string());
  }

  Ok(())
}
