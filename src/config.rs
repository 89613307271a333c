use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::domain::Component;
use crate::error::Result;

/// Complete file-based configuration for mono-version
///
/// Everything here can be overridden per invocation from the command line;
/// the file only supplies defaults for repeated runs.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Branch that produces definitive (non-prerelease) versions
    #[serde(default = "default_branch")]
    pub default_branch: String,

    /// Per-component settings, keyed by component identifier
    #[serde(default)]
    pub components: HashMap<String, ComponentConfig>,
}

/// Per-component configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ComponentConfig {
    /// Human-readable label used in release titles
    #[serde(default)]
    pub label: Option<String>,

    /// Version assigned on the component's first release
    #[serde(default = "default_initial_version")]
    pub initial_version: String,
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_initial_version() -> String {
    "1.0.0".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_branch: default_branch(),
            components: HashMap::new(),
        }
    }
}

impl Config {
    /// Build a validated [Component] for an identifier
    ///
    /// Components absent from the file get the default initial version and
    /// no label. Explicit overrides win over both.
    pub fn component(
        &self,
        name: &str,
        label_override: Option<String>,
        initial_version_override: Option<String>,
    ) -> Result<Component> {
        let settings = self.components.get(name).cloned().unwrap_or_default();

        let label = label_override.or(settings.label);
        let initial_version = match initial_version_override {
            Some(version) => version,
            None if settings.initial_version.is_empty() => default_initial_version(),
            None => settings.initial_version,
        };

        Component::new(name, label, initial_version)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `monoversion.toml` in current directory
/// 3. `monoversion.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> std::result::Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./monoversion.toml").exists() {
        fs::read_to_string("./monoversion.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("monoversion.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
