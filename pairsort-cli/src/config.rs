/// Config file loading and creation for the pairsort CLI.
///
/// Config lives at ~/.config/pairsort/config.toml.
/// All fields are optional — CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Deserialize, Default)]
pub struct PairsortConfig {
    pub criterion: Option<String>,
    pub shuffle: Option<bool>,
    pub session: Option<String>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# pairsort configuration
# All values here can be overridden by CLI flags.

# Question shown above every comparison
# criterion = \"Which do you prefer?\"

# Shuffle items before ranking starts, so presentation order
# doesn't bias the questions
# shuffle = false

# Where an interrupted session is saved (pairsort resume <file>)
# session = \"pairsort-session.json\"
";

/// Returns the default config path: ~/.config/pairsort/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("pairsort").join("config.toml")
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> PairsortConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            toml::from_str(&content)
                .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => PairsortConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    // Create parent directories
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
