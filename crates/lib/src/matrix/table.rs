//! Numbered text table of a build matrix.

use crate::matrix::types::{Configuration, bool_literal};

const WIDTHS: [usize; 10] = [3, 8, 8, 12, 14, 18, 6, 17, 16, 17];

fn separator() -> String {
  let mut line = String::from("+");
  for width in WIDTHS {
    line.push_str(&"-".repeat(width + 2));
    line.push('+');
  }
  line
}

fn row(cells: &[String]) -> String {
  let mut line = String::from("|");
  for (cell, width) in cells.iter().zip(WIDTHS) {
    line.push_str(&format!(" {:^width$} |", cell, width = width));
  }
  line
}

/// Render the build matrix as a table, one numbered row per configuration.
pub fn render_table(configs: &[Configuration], library_name: &str) -> String {
  let header = vec![
    "#".to_string(),
    "cppstd".to_string(),
    "runtime".to_string(),
    "build_type".to_string(),
    "compiler".to_string(),
    "compiler.version".to_string(),
    "arch".to_string(),
    format!("{library_name}:wchar_t"),
    format!("{library_name}:pybind"),
    format!("{library_name}:testing"),
  ];

  let separator = separator();
  let mut lines = vec![separator.clone(), row(&header), separator.clone()];

  for (i, config) in configs.iter().enumerate() {
    let setting = |name: &str| config.setting(name).unwrap_or_default().to_string();
    let cells = [
      (i + 1).to_string(),
      setting("compiler.cppstd"),
      setting("compiler.runtime"),
      setting("build_type"),
      setting("compiler"),
      setting("compiler.version"),
      setting("arch"),
      config.options.wchar_t.to_string(),
      bool_literal(config.options.pybind).to_string(),
      bool_literal(config.options.testing).to_string(),
    ];
    lines.push(row(&cells));
    lines.push(separator.clone());
  }

  let mut table = lines.join("\n");
  table.push('\n');
  table
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::matrix::{BuildEnv, generate_for_platform};

  #[test]
  fn table_has_one_row_per_configuration() {
    let configs = generate_for_platform("windows", &BuildEnv::default()).unwrap();
    let table = render_table(&configs, "xmscore");
    let lines: Vec<_> = table.lines().collect();

    // header block + (row, separator) per configuration
    assert_eq!(lines.len(), 3 + 2 * configs.len());
    assert!(lines[1].contains("xmscore:wchar_t"));
    assert!(lines.iter().all(|l| l.len() == lines[0].len()));
  }

  #[test]
  fn rows_center_values() {
    let configs = generate_for_platform("linux", &BuildEnv::default()).unwrap();
    let table = render_table(&configs[..1], "xmsgrid");
    let first_row = table.lines().nth(3).unwrap();

    assert!(first_row.starts_with("|  1  |"));
    assert!(first_row.contains("|   Release    |"));
    assert!(first_row.contains("|      builtin      |"));
    assert!(first_row.ends_with("|      False       |       False       |"));
  }
}
