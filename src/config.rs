//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.vibemaster.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory
/// and the project root.
pub const CONFIG_FILE: &str = ".vibemaster.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Host configuration discovery.
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Provider client settings.
    #[serde(default)]
    pub client: ClientConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Default output format: "text" or "json".
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

/// Where to look for the MCP host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Candidate host config files, tried in order. `~/` is expanded.
    #[serde(default = "default_host_configs")]
    pub host_configs: Vec<String>,

    /// Add the built-in catalogue of well-known providers.
    #[serde(default = "default_true")]
    pub include_catalogue: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            host_configs: default_host_configs(),
            include_catalogue: true,
        }
    }
}

fn default_host_configs() -> Vec<String> {
    vec![
        "~/Library/Application Support/Claude/claude_desktop_config.json",
        "~/.config/Claude/claude_desktop_config.json",
        "~/.cursor/mcp.json",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_true() -> bool {
    true
}

impl DiscoveryConfig {
    /// Candidate paths with `~` expanded.
    pub fn resolved_paths(&self) -> Vec<PathBuf> {
        self.host_configs
            .iter()
            .map(|p| expand_tilde(Path::new(p)))
            .collect()
    }
}

/// Provider client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Confidence reported by dry-run provider responses.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            confidence: default_confidence(),
        }
    }
}

fn default_confidence() -> f64 {
    0.8
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let s = path.to_string_lossy();
    if s.starts_with("~/") || s == "~" {
        if let Some(home) = home_dir() {
            return home.join(s.strip_prefix("~/").unwrap_or(""));
        }
    }
    path.to_path_buf()
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Try to load configuration from a project directory.
    pub fn load_from_project(root: &Path) -> Result<Option<Self>> {
        let config_path = root.join(CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if !args.host_config.is_empty() {
            self.discovery.host_configs = args
                .host_config
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect();
        }

        if args.no_catalogue {
            self.discovery.include_catalogue = false;
        }

        if let Some(format) = args.format {
            self.general.format = format.as_str().to_string();
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Whether JSON output was requested.
    pub fn wants_json(&self) -> bool {
        self.general.format.eq_ignore_ascii_case("json")
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
