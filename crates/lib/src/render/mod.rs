//! Build file generation from Jinja templates and TOML data.
//!
//! Every `*.jinja` file in the template directory is rendered with the
//! library's TOML description and written under its file stem, so
//! `CMakeLists.txt.jinja` becomes `CMakeLists.txt`.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{Environment, UndefinedBehavior};
use thiserror::Error;
use tracing::{debug, info};

const TEMPLATE_EXTENSION: &str = "jinja";

/// Errors that can occur while rendering templates.
#[derive(Debug, Error)]
pub enum RenderError {
  #[error("the specified TOML file does not exist: {}", path.display())]
  DataFileNotFound { path: PathBuf },

  #[error("template directory does not exist: {}", path.display())]
  TemplateDirNotFound { path: PathBuf },

  #[error("no template files (with .jinja extension) were found in {}", path.display())]
  NoTemplates { path: PathBuf },

  #[error("failed to read {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to parse {}: {source}", path.display())]
  ParseData { path: PathBuf, source: toml::de::Error },

  #[error("failed to render {}: {source}", path.display())]
  Render { path: PathBuf, source: minijinja::Error },

  #[error("failed to write {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}

/// Inputs of one render pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
  pub data_file: PathBuf,
  pub template_dir: PathBuf,
  pub output_dir: PathBuf,
  /// Injected into the data as `version`.
  pub version: String,
  pub dry_run: bool,
}

/// Files produced (or, in dry-run, that would be produced) by a render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
  pub outputs: Vec<PathBuf>,
}

/// Load the template data and apply the injected and defaulted keys.
///
/// # Errors
///
/// Returns an error if the file is missing, unreadable or not valid TOML.
pub fn load_data(path: &Path, version: &str) -> Result<toml::Table, RenderError> {
  if !path.is_file() {
    return Err(RenderError::DataFileNotFound { path: path.to_path_buf() });
  }
  let content = fs::read_to_string(path).map_err(|source| RenderError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  let mut data: toml::Table = toml::from_str(&content).map_err(|source| RenderError::ParseData {
    path: path.to_path_buf(),
    source,
  })?;

  data.insert("version".to_string(), toml::Value::String(version.to_string()));
  if !data.contains_key("description") {
    data.insert("description".to_string(), toml::Value::String(String::new()));
  }
  Ok(data)
}

/// `*.jinja` files directly inside `dir`, sorted by name.
///
/// # Errors
///
/// Returns an error if the directory is missing, unreadable or holds no templates.
pub fn find_templates(dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
  if !dir.is_dir() {
    return Err(RenderError::TemplateDirNotFound { path: dir.to_path_buf() });
  }
  let entries = fs::read_dir(dir).map_err(|source| RenderError::Read {
    path: dir.to_path_buf(),
    source,
  })?;

  let mut templates: Vec<PathBuf> = entries
    .filter_map(Result::ok)
    .map(|entry| entry.path())
    .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION))
    .collect();
  if templates.is_empty() {
    return Err(RenderError::NoTemplates { path: dir.to_path_buf() });
  }
  templates.sort();
  Ok(templates)
}

/// Render every template in `options.template_dir` into `options.output_dir`.
///
/// # Errors
///
/// Returns an error if the data or templates cannot be loaded, a template
/// references an undefined value, or an output cannot be written.
pub fn render_templates(options: &RenderOptions) -> Result<RenderReport, RenderError> {
  let data = load_data(&options.data_file, &options.version)?;
  let templates = find_templates(&options.template_dir)?;

  let mut env = Environment::new();
  env.set_undefined_behavior(UndefinedBehavior::Strict);
  env.set_keep_trailing_newline(true);

  if !options.dry_run {
    fs::create_dir_all(&options.output_dir).map_err(|source| RenderError::Write {
      path: options.output_dir.clone(),
      source,
    })?;
  }

  let mut report = RenderReport::default();
  for template in templates {
    let source = fs::read_to_string(&template).map_err(|source| RenderError::Read {
      path: template.clone(),
      source,
    })?;
    let rendered = env.render_str(&source, &data).map_err(|source| RenderError::Render {
      path: template.clone(),
      source,
    })?;
    let rendered = rendered.replace("\r\n", "\n").replace('\r', "\n");

    // file_stem drops only the final `.jinja`
    let name = template.file_stem().unwrap_or_default();
    let output = options.output_dir.join(name);

    if options.dry_run {
      info!(output = %output.display(), "[dry-run] would render");
    } else {
      fs::write(&output, rendered).map_err(|source| RenderError::Write {
        path: output.clone(),
        source,
      })?;
      debug!(template = %template.display(), output = %output.display(), "rendered template");
    }
    report.outputs.push(output);
  }

  info!(data = %options.data_file.display(), count = report.outputs.len(), "templates rendered");
  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  struct Fixture {
    temp: TempDir,
    options: RenderOptions,
  }

  fn fixture(data: &str, templates: &[(&str, &str)]) -> Fixture {
    let temp = TempDir::new().unwrap();
    let data_file = temp.path().join("build.toml");
    fs::write(&data_file, data).unwrap();
    let template_dir = temp.path().join("templates");
    fs::create_dir_all(&template_dir).unwrap();
    for (name, body) in templates {
      fs::write(template_dir.join(name), body).unwrap();
    }

    let options = RenderOptions {
      data_file,
      template_dir,
      output_dir: temp.path().join("out"),
      version: "1.2.3".to_string(),
      dry_run: false,
    };
    Fixture { temp, options }
  }

  #[test]
  fn renders_version_into_stem_named_file() {
    let f = fixture("library_name = \"xmscore\"\n", &[("CMakeLists.txt.jinja", "version={{ version }}\n")]);

    let report = render_templates(&f.options).unwrap();

    let output = f.options.output_dir.join("CMakeLists.txt");
    assert_eq!(report.outputs, vec![output.clone()]);
    assert_eq!(fs::read_to_string(output).unwrap(), "version=1.2.3\n");
  }

  #[test]
  fn dry_run_writes_nothing() {
    let mut f = fixture("", &[("a.txt.jinja", "{{ version }}")]);
    f.options.dry_run = true;

    let report = render_templates(&f.options).unwrap();

    assert_eq!(report.outputs.len(), 1);
    assert!(!f.options.output_dir.exists());
  }

  #[test]
  fn templates_render_in_name_order() {
    let f = fixture(
      "",
      &[("b.py.jinja", "b"), ("a.py.jinja", "a"), ("notes.txt", "ignored")],
    );

    let report = render_templates(&f.options).unwrap();

    let names: Vec<_> = report
      .outputs
      .iter()
      .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
      .collect();
    assert_eq!(names, vec!["a.py", "b.py"]);
    assert!(!f.options.output_dir.join("notes").exists());
  }

  #[test]
  fn nested_data_and_default_description() {
    let f = fixture(
      "library_name = \"xmsgrid\"\n[dependencies]\nboost = \"1.86.0\"\n",
      &[(
        "conanfile.py.jinja",
        "{{ library_name }}|{{ dependencies.boost }}|{{ description }}|{% for name in dependencies %}{{ name }}{% endfor %}",
      )],
    );

    render_templates(&f.options).unwrap();

    let rendered = fs::read_to_string(f.options.output_dir.join("conanfile.py")).unwrap();
    assert_eq!(rendered, "xmsgrid|1.86.0||boost");
  }

  #[test]
  fn crlf_line_endings_are_normalized() {
    let f = fixture("", &[("a.txt.jinja", "one\r\ntwo\r\n")]);

    render_templates(&f.options).unwrap();

    assert_eq!(fs::read_to_string(f.options.output_dir.join("a.txt")).unwrap(), "one\ntwo\n");
  }

  #[test]
  fn lone_carriage_returns_become_newlines() {
    let f = fixture("", &[("a.txt.jinja", "one\rtwo\r\nthree\n")]);

    render_templates(&f.options).unwrap();

    assert_eq!(
      fs::read_to_string(f.options.output_dir.join("a.txt")).unwrap(),
      "one\ntwo\nthree\n"
    );
  }

  #[test]
  fn undefined_variable_is_an_error() {
    let f = fixture("", &[("a.txt.jinja", "{{ missing_key }}")]);

    let err = render_templates(&f.options).unwrap_err();

    assert!(matches!(err, RenderError::Render { .. }));
  }

  #[test]
  fn missing_inputs() {
    let f = fixture("", &[]);
    assert!(matches!(render_templates(&f.options), Err(RenderError::NoTemplates { .. })));

    let mut options = f.options.clone();
    options.template_dir = f.temp.path().join("nope");
    assert!(matches!(render_templates(&options), Err(RenderError::TemplateDirNotFound { .. })));

    let mut options = f.options.clone();
    options.data_file = f.temp.path().join("missing.toml");
    assert!(matches!(render_templates(&options), Err(RenderError::DataFileNotFound { .. })));
  }

  #[test]
  fn invalid_toml_is_reported() {
    let f = fixture("library_name = \n", &[("a.jinja", "x")]);
    assert!(matches!(render_templates(&f.options), Err(RenderError::ParseData { .. })));
  }
}
