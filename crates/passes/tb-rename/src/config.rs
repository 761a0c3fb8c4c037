//! Renaming configuration

use crate::style::NameStyle;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default limit on numeric suffix attempts per reservation
pub const DEFAULT_MAX_SUFFIX_ATTEMPTS: u32 = 10_000;

/// How requested names become final names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenameConfig {
    /// Style applied to member names
    pub member_style: NameStyle,
    /// Style applied to type names
    pub type_style: NameStyle,
    /// Explicit final names keyed by stable identity string
    pub overrides: BTreeMap<String, String>,
    /// Words reserved in addition to the target language's own
    pub extra_reserved_words: Vec<String>,
    /// Numeric suffixes tried before a reservation fails
    pub max_suffix_attempts: u32,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            member_style: NameStyle::Preserve,
            type_style: NameStyle::Preserve,
            overrides: BTreeMap::new(),
            extra_reserved_words: Vec::new(),
            max_suffix_attempts: DEFAULT_MAX_SUFFIX_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RenameConfig = toml::from_str(
            r#"
member_style = "camel_case"

[overrides]
"app:App.Pair" = "KeyValuePair"
"#,
        )
        .unwrap();
        assert_eq!(config.member_style, NameStyle::CamelCase);
        assert_eq!(config.type_style, NameStyle::Preserve);
        assert_eq!(config.max_suffix_attempts, DEFAULT_MAX_SUFFIX_ATTEMPTS);
        assert_eq!(config.overrides.get("app:App.Pair").map(String::as_str), Some("KeyValuePair"));
    }
}
