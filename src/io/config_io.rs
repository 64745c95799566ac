use std::fs;
use std::path::Path;

use crate::model::config::AppConfig;

/// Read config.toml from the data directory. A missing or invalid file
/// yields defaults — configuration problems never block startup.
pub fn load_config(data_dir: &Path) -> AppConfig {
    let path = data_dir.join("config.toml");
    let Ok(text) = fs::read_to_string(&path) else {
        return AppConfig::default();
    };
    toml::from_str(&text).unwrap_or_default()
}
