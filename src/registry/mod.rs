//! Provider registry.
//!
//! The registry is built once per session from the servers found in the
//! host configuration, followed by catalogue entries whose names were not
//! already discovered. It is read-only afterwards.

pub mod catalogue;
pub mod host_config;

use host_config::discover_host_config;

use crate::config::DiscoveryConfig;
use crate::models::Provider;
use catalogue::KNOWN_PROVIDERS;
use tracing::{debug, info};

/// Known providers, discovered ones first.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    /// Merge discovered providers with the catalogue by name.
    pub fn build(discovered: Vec<Provider>, include_catalogue: bool) -> Self {
        let mut providers = discovered.clone();

        if include_catalogue {
            for known in KNOWN_PROVIDERS {
                if !discovered.iter().any(|p| p.name == known.name) {
                    let provider = known.to_provider(&discovered);
                    debug!(
                        "Adding catalogue provider {} (installed: {})",
                        provider.name, provider.installed
                    );
                    providers.push(provider);
                }
            }
        }

        Self { providers }
    }

    /// Discover the host configuration and build the registry.
    ///
    /// Never fails: a missing or broken host config yields only the
    /// catalogue.
    pub fn discover(config: &DiscoveryConfig) -> Self {
        let discovered = match discover_host_config(&config.resolved_paths()) {
            Some((path, host)) => {
                let providers = host.providers();
                info!(
                    "Found {} MCP servers in {}",
                    providers.len(),
                    path.display()
                );
                providers
            }
            None => {
                info!("No host configuration found; using catalogue only");
                Vec::new()
            }
        };

        Self::build(discovered, config.include_catalogue)
    }

    /// All known providers, installed or not.
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn installed(&self) -> Vec<&Provider> {
        self.providers.iter().filter(|p| p.installed).collect()
    }

    /// Same as [`providers`](Self::providers); named after the listing it feeds.
    pub fn available(&self) -> Vec<&Provider> {
        self.providers.iter().collect()
    }

    #[allow(dead_code)]
    pub fn find(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
