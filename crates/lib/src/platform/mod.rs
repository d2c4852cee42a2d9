pub mod os;
pub mod paths;

pub use os::Os;

/// Returns the platform family name for the current system (e.g., "windows")
///
/// Returns `None` if the current OS has no build matrix
pub fn current_family() -> Option<&'static str> {
  Os::current().map(|os| os.as_str())
}
