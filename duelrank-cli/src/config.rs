/// Config file loading and creation for the duelrank CLI.
///
/// Config lives at ~/.config/duelrank/config.toml.
/// All fields are optional. CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DuelrankConfig {
    pub left_key: Option<String>,
    pub right_key: Option<String>,
    pub quit_key: Option<String>,
    pub json: Option<bool>,
    pub shuffle: Option<bool>,
    pub show_progress_bar: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# duelrank configuration
# All values here can be overridden by CLI flags.

# Key that picks the left item (the one already ranked)
# left_key = \"j\"

# Key that picks the right item (the one being placed)
# right_key = \"k\"

# Key that abandons the session without a result
# quit_key = \"q\"

# Print the final ranking as JSON instead of a table
# json = false

# Shuffle items before ranking
# shuffle = false

# Draw a progress bar next to the progress counter
# show_progress_bar = true
";

/// Returns the default config path: ~/.config/duelrank/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("duelrank").join("config.toml")
}

/// Parse config text.
pub fn parse_config(content: &str) -> Result<DuelrankConfig, String> {
    toml::from_str(content).map_err(|e| e.to_string())
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> DuelrankConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DuelrankConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file at `path`. Errors if it already exists.
pub fn create_default_config(path: &Path) -> Result<(), String> {
    if path.exists() {
        return Err(format!("Config file already exists at {}", path.display()));
    }

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {e}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .map_err(|e| format!("Failed to write config to {}: {e}", path.display()))
}
