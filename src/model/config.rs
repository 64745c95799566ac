use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory. Everything is
/// optional; a missing or unreadable file means defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Ask before "clear completed" deletes anything
    #[serde(default = "default_true")]
    pub confirm_clear: bool,
    /// Show the key-hint line in the status row
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Color overrides by role name, as `#RRGGBB` strings
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            confirm_clear: true,
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
