//! Boolean coercion of profile option values.

use crate::matrix::bool_literal;
use crate::profile::ProfileOptions;

const TRUE_VALUES: [&str; 4] = ["true", "1", "yes", "on"];

/// Whether a raw option value reads as true.
///
/// With `allow_aliases`, the wide-char mode `builtin` also counts as true.
/// Unrecognized values are false.
pub fn is_truthy(value: Option<&str>, allow_aliases: bool) -> bool {
  let Some(value) = value else {
    return false;
  };
  let normalized = value.trim().to_lowercase();
  TRUE_VALUES.contains(&normalized.as_str()) || (allow_aliases && normalized == "builtin")
}

/// Normalize a raw option value to `"True"` or `"False"`.
pub fn normalize_bool(value: Option<&str>, allow_aliases: bool) -> &'static str {
  bool_literal(is_truthy(value, allow_aliases))
}

/// Library flags derived from a parsed profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileFlags {
  pub testing: bool,
  pub pybind: bool,
  /// Read without aliases, so `wchar_t=builtin` is false.
  pub wchar_t: bool,
}

impl ProfileFlags {
  pub fn from_options(options: &ProfileOptions) -> Self {
    let get = |key: &str| options.get(key).map(String::as_str);
    Self {
      testing: is_truthy(get("testing"), true),
      pybind: is_truthy(get("pybind"), true),
      wchar_t: is_truthy(get("wchar_t"), false),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn none_is_false() {
    assert_eq!(normalize_bool(None, false), "False");
    assert_eq!(normalize_bool(None, true), "False");
  }

  #[test]
  fn builtin_alias_only_when_allowed() {
    assert_eq!(normalize_bool(Some("BUILTIN"), true), "True");
    assert_eq!(normalize_bool(Some("BUILTIN"), false), "False");
  }

  #[test]
  fn true_spellings() {
    for value in ["true", "True", " 1 ", "YES", "on"] {
      assert_eq!(normalize_bool(Some(value), false), "True", "{value:?}");
    }
    for value in ["false", "0", "off", "typedef", "", "maybe"] {
      assert_eq!(normalize_bool(Some(value), true), "False", "{value:?}");
    }
  }

  #[test]
  fn flags_from_profile_options() {
    let options: ProfileOptions = [
      ("testing", "True"),
      ("pybind", "builtin"),
      ("wchar_t", "builtin"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let flags = ProfileFlags::from_options(&options);

    assert!(flags.testing);
    assert!(flags.pybind);
    assert!(!flags.wchar_t);
    assert_eq!(ProfileFlags::from_options(&ProfileOptions::new()), ProfileFlags::default());
  }
}
