//! Interface analysis configuration

use serde::{Deserialize, Serialize};

/// Knobs for interface analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InterfaceConfig {
    /// Synthesize `_Base` interfaces and intersection aliases for diamonds
    pub synthesize_diamonds: bool,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            synthesize_diamonds: true,
        }
    }
}
