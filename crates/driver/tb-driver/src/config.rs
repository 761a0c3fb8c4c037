//! Pipeline configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tb_interfaces::InterfaceConfig;
use tb_rename::RenameConfig;

/// Configuration for one pipeline run
///
/// Every section is optional in TOML; missing keys fall back to their defaults.
///
/// ```toml
/// [interfaces]
/// synthesize_diamonds = true
///
/// [rename]
/// member_style = "camel_case"
/// extra_reserved_words = ["Symbol"]
///
/// [rename.overrides]
/// "app:App.Pair" = "KeyValuePair"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Interface analysis
    pub interfaces: InterfaceConfig,
    /// Renaming
    pub rename: RenameConfig,
}

impl PipelineConfig {
    /// Parse a configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// Load a configuration file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// Render as TOML
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Render`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tb_rename::NameStyle;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(PipelineConfig::from_toml_str("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn test_sections_parsed() {
        let config = PipelineConfig::from_toml_str(
            r#"
[interfaces]
synthesize_diamonds = false

[rename]
type_style = "pascal_case"
extra_reserved_words = ["Symbol"]

[rename.overrides]
"app:App.Pair" = "KeyValuePair"
"#,
        )
        .unwrap();

        assert!(!config.interfaces.synthesize_diamonds);
        assert_eq!(config.rename.type_style, NameStyle::PascalCase);
        assert_eq!(config.rename.extra_reserved_words, ["Symbol"]);
        assert_eq!(config.rename.overrides.len(), 1);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PipelineConfig::from_toml_str("[rename]\nmember_case = \"camel_case\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[rename]\nmax_suffix_attempts = 5").unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.rename.max_suffix_attempts, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        match PipelineConfig::load(&path) {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_render_round_trips() {
        let mut config = PipelineConfig::default();
        config.rename.member_style = NameStyle::CamelCase;
        let rendered = config.to_toml_string().unwrap();
        assert_eq!(PipelineConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
