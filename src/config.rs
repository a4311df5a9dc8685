use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime configuration for releasegh.
///
/// Every field has a documented default; the orchestrator receives the
/// config by value so tests can substitute temporary paths.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Changelog source document. Default: `doc/whats_new.rst`.
    #[serde(default = "default_changelog")]
    pub changelog: PathBuf,

    /// Transient staging file holding the rewritten changelog until publish.
    /// Default: `.releasegh_trash`.
    #[serde(default = "default_staging")]
    pub staging: PathBuf,

    /// Git remote to introspect and push to. Default: `origin`.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Forge API base URL. Default: `https://api.github.com`.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable holding the forge access token.
    /// Default: `GH_TOKEN`.
    #[serde(default = "default_token_var")]
    pub token_var: String,
}

fn default_changelog() -> PathBuf {
    PathBuf::from("doc/whats_new.rst")
}

fn default_staging() -> PathBuf {
    PathBuf::from(".releasegh_trash")
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

fn default_token_var() -> String {
    "GH_TOKEN".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            changelog: default_changelog(),
            staging: default_staging(),
            remote: default_remote(),
            api_base: default_api_base(),
            token_var: default_token_var(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasegh.toml` in current directory
/// 3. `.releasegh.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasegh.toml").exists() {
        fs::read_to_string("./releasegh.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasegh.toml");
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
