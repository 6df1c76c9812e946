//! Configuration file loading.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::CONFIG_FILENAME;

/// Top-level configuration struct.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// The main configuration section.
    #[serde(default)]
    pub fortir: FortirConfig,
    /// The path the configuration was loaded from; `None` when defaults
    /// are in use.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

/// Options of the `[fortir]` section. Command-line flags override every
/// value here.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FortirConfig {
    /// Directory transformed files are written to.
    pub output_dir: Option<String>,
    /// File extension given to transformed files.
    pub extension: Option<String>,
    /// Process files one at a time instead of in parallel.
    pub sequential: Option<bool>,
}

impl Config {
    /// Loads configuration from the default location (`.fortir.toml` found
    /// upward from the current directory).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                if let Ok(content) = fs::read_to_string(&candidate) {
                    if let Ok(mut config) = toml::from_str::<Self>(&content) {
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                }
            }
            if !current.pop() {
                break;
            }
        }

        Self::default()
    }
}
