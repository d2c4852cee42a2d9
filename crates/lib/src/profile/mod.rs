//! Conan profile handling.
//!
//! - [`parse_profile_options`]: flattened root options of a profile and its includes
//! - [`normalize_bool`]: lossy boolean coercion of option values
//! - [`render_profile`] / [`write_profile`]: serialize a matrix configuration

mod options;
mod parse;
mod write;

use std::path::PathBuf;

use thiserror::Error;

pub use options::{ProfileFlags, is_truthy, normalize_bool};
pub use parse::{ProfileOptions, parse_profile_options};
pub use write::{render_profile, write_profile};

/// Errors that can occur while reading or writing profiles.
#[derive(Debug, Error)]
pub enum ProfileError {
  #[error("failed to read profile {}: {source}", path.display())]
  Read { path: PathBuf, source: std::io::Error },

  #[error("failed to write profile {}: {source}", path.display())]
  Write { path: PathBuf, source: std::io::Error },
}
