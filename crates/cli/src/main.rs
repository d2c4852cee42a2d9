mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xmsconan_lib::consts::{DEFAULT_REMOTE, DEFAULT_XMS_VERSION};

use crate::cmd::{BuildCommand, cmd_build, cmd_gen, cmd_matrix, cmd_package};
use crate::output::{OutputFormat, print_error};

/// xmsconan - build, generate and package Conan-based XMS libraries
#[derive(Parser)]
#[command(name = "xmsconan")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Increase log output (-v for debug)
  #[arg(short, long, global = true, action = ArgAction::Count)]
  verbose: u8,

  /// Only log errors (wins over --verbose)
  #[arg(short, long, global = true)]
  quiet: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Install dependencies and configure a CMake build directory for one profile
  Build(BuildCommand),

  /// Render build files from templates and a TOML description
  Gen {
    /// TOML file describing the library
    toml_file: PathBuf,

    /// Directory containing .jinja templates (default: bundled templates)
    #[arg(long = "template_dir")]
    template_dir: Option<PathBuf>,

    /// Directory to write rendered files into
    #[arg(long = "output_dir", default_value = ".")]
    output_dir: PathBuf,

    /// Library version made available to templates
    #[arg(long, default_value = DEFAULT_XMS_VERSION)]
    version: String,

    /// Render without writing any files
    #[arg(long)]
    dry_run: bool,
  },

  /// Show the build matrix for a platform
  Matrix {
    /// Platform family: windows, linux or darwin (default: host)
    #[arg(long)]
    platform: Option<String>,

    /// Library name used in the table header
    #[arg(long, default_value = "xmscore")]
    library_name: String,

    /// Write one profile per configuration into this directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Build Conan packages for every configuration of the matrix
  Package {
    /// Name of the library being packaged
    #[arg(long)]
    library_name: String,

    /// Path to the conanfile or its directory
    #[arg(long, default_value = ".")]
    conanfile: PathBuf,

    /// Platform family: windows, linux or darwin (default: host)
    #[arg(long)]
    platform: Option<String>,

    /// Upload packages of this version after a successful build
    #[arg(long, value_name = "VERSION")]
    upload: Option<String>,

    /// Conan remote to upload to
    #[arg(long, default_value = DEFAULT_REMOTE)]
    remote: String,

    /// Print the matrix and profiles without building
    #[arg(long)]
    dry_run: bool,
  },
}

fn init_tracing(verbose: u8, quiet: bool) {
  let level = if quiet {
    "error"
  } else if verbose > 0 {
    "debug"
  } else {
    "info"
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .without_time()
    .with_writer(std::io::stderr)
    .init();
}

fn main() -> ExitCode {
  let cli = match Cli::try_parse() {
    Ok(cli) => cli,
    Err(err) => {
      // --help and --version are reported through the same path
      let code = if err.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
      let _ = err.print();
      return code;
    }
  };

  init_tracing(cli.verbose, cli.quiet);

  let result = match cli.command {
    Commands::Build(command) => cmd_build(command),
    Commands::Gen {
      toml_file,
      template_dir,
      output_dir,
      version,
      dry_run,
    } => cmd_gen(&toml_file, template_dir, &output_dir, &version, dry_run),
    Commands::Matrix {
      platform,
      library_name,
      output_dir,
      format,
    } => cmd_matrix(platform, &library_name, output_dir.as_deref(), format),
    Commands::Package {
      library_name,
      conanfile,
      platform,
      upload,
      remote,
      dry_run,
    } => cmd_package(&library_name, conanfile, platform, upload.as_deref(), &remote, dry_run),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{err:#}"));
      ExitCode::FAILURE
    }
  }
}
