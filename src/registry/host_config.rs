//! Host configuration discovery.
//!
//! MCP hosts (Claude Desktop, Cursor) keep their servers in a JSON file
//! with a `mcpServers` map. This module reads that file, read-only, and
//! turns each entry into an installed [`Provider`].

use crate::error::DiscoveryError;
use crate::models::{Invocation, Provider};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Parsed host configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostConfig {
    /// Server entries in file order.
    #[serde(rename = "mcpServers", default)]
    pub mcp_servers: Map<String, Value>,
}

impl HostConfig {
    /// Convert every server entry into an installed provider.
    ///
    /// Entries that are not objects are skipped.
    pub fn providers(&self) -> Vec<Provider> {
        self.mcp_servers
            .iter()
            .filter_map(|(name, entry)| {
                match serde_json::from_value::<Invocation>(entry.clone()) {
                    Ok(invocation) => Some(Provider {
                        name: name.clone(),
                        invocation,
                        capabilities: infer_capabilities(name),
                        installed: true,
                    }),
                    Err(e) => {
                        warn!("Skipping malformed server entry {}: {}", name, e);
                        None
                    }
                }
            })
            .collect()
    }
}

/// Infer capability tags from a server name.
///
/// The rules are fixed: context/doc, memory, github, search, and
/// qdrant/vector. Tags are de-duplicated in first-seen order.
pub fn infer_capabilities(name: &str) -> Vec<String> {
    let lower = name.to_lowercase();
    let mut caps: Vec<&str> = Vec::new();

    if lower.contains("context") || lower.contains("doc") {
        caps.extend(["docs", "context"]);
    }
    if lower.contains("memory") {
        caps.extend(["memory", "persistence"]);
    }
    if lower.contains("github") {
        caps.extend(["github", "issues"]);
    }
    if lower.contains("search") {
        caps.push("search");
    }
    if lower.contains("qdrant") || lower.contains("vector") {
        caps.extend(["semantic", "search"]);
    }

    let mut unique: Vec<String> = Vec::new();
    for cap in caps {
        if !unique.iter().any(|c| c == cap) {
            unique.push(cap.to_string());
        }
    }
    unique
}

/// Load a host configuration file.
///
/// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but
/// can't be read or parsed.
pub fn load_host_config(path: &Path) -> Result<Option<HostConfig>, DiscoveryError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = serde_json::from_str(&content).map_err(|source| DiscoveryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Some(config))
}

/// Try each candidate path in order; the first readable config wins.
///
/// Unreadable or unparseable files are logged and skipped.
pub fn discover_host_config(candidates: &[PathBuf]) -> Option<(PathBuf, HostConfig)> {
    for path in candidates {
        match load_host_config(path) {
            Ok(Some(config)) => {
                debug!("Using host config {}", path.display());
                return Some((path.clone(), config));
            }
            Ok(None) => debug!("No host config at {}", path.display()),
            Err(e) => warn!("{}", e),
        }
    }
    None
}
