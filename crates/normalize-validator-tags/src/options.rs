//! Translation options.

use serde::{Deserialize, Serialize};

/// Formats that describe representation only and have no runtime check.
pub const DEFAULT_IGNORED_FORMATS: &[&str] = &[
    "int32",
    "int64",
    "float",
    "double",
    "byte",
    "binary",
    "date",
    "date-time",
    "password",
];

/// Options for tag translation.
///
/// Example config.toml:
/// ```toml
/// # formats that never become a directive
/// ignored_formats = ["int32", "int64", "date-time"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[cfg_attr(feature = "config", derive(schemars::JsonSchema))]
#[serde(default)]
pub struct TagOptions {
    /// Format names that are never emitted as a directive.
    pub ignored_formats: Vec<String>,
}

impl Default for TagOptions {
    fn default() -> Self {
        Self {
            ignored_formats: DEFAULT_IGNORED_FORMATS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl TagOptions {
    /// Parse options from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn is_ignored_format(&self, format: &str) -> bool {
        self.ignored_formats.iter().any(|f| f == format)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid tag options: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_ignore_representation_formats() {
        let options = TagOptions::default();
        for format in DEFAULT_IGNORED_FORMATS {
            assert!(options.is_ignored_format(format));
        }
        assert!(!options.is_ignored_format("email"));
        assert!(!options.is_ignored_format("uuid"));
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let options = TagOptions::from_toml_str("").unwrap();
        assert_eq!(options, TagOptions::default());
    }

    #[test]
    fn toml_replaces_ignored_formats() {
        let options = TagOptions::from_toml_str(r#"ignored_formats = ["uuid"]"#).unwrap();
        assert!(options.is_ignored_format("uuid"));
        assert!(!options.is_ignored_format("date-time"));
    }

    #[test]
    fn toml_type_mismatch_is_an_error() {
        let err = TagOptions::from_toml_str("ignored_formats = 3").unwrap_err();
        assert!(err.to_string().starts_with("invalid tag options"));
    }
}
