//! Session orchestration.
//!
//! A [`Session`] is the explicit context built once at start-up: the
//! project context, the provider registry, the detector set and the
//! provider client. Analysis and orchestration calls borrow it read-only.

pub mod client;
pub mod combiner;

pub use client::{DryRunClient, ProviderClient};
pub use combiner::{combine, execute_plan};

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::error::DetectorError;
use crate::models::{AnalysisResult, CombinedResult, ProjectContext, Provider, Request};
use crate::registry::ProviderRegistry;
use crate::routing::route;
use crate::scanner::detect_project;
use std::path::Path;
use tracing::info;

pub struct Session {
    project: ProjectContext,
    registry: ProviderRegistry,
    analyzer: Analyzer,
    client: Box<dyn ProviderClient>,
}

impl Session {
    /// Assemble a session from explicit parts.
    pub fn new(
        project: ProjectContext,
        registry: ProviderRegistry,
        analyzer: Analyzer,
        client: Box<dyn ProviderClient>,
    ) -> Self {
        Self {
            project,
            registry,
            analyzer,
            client,
        }
    }

    /// Discover the project at `root` and the host's providers.
    ///
    /// Never fails; discovery problems leave empty or default entries.
    pub fn initialize(root: &Path, config: &Config) -> Self {
        let project = detect_project(root);
        let registry = ProviderRegistry::discover(&config.discovery);
        info!(
            "Session ready: {} providers ({} installed), languages: [{}]",
            registry.len(),
            registry.installed().len(),
            project.stack.languages.join(", ")
        );

        Self::new(
            project,
            registry,
            Analyzer::with_defaults(),
            Box::new(DryRunClient::new(config.client.confidence)),
        )
    }

    /// Rebuild project context and registry in place.
    #[allow(dead_code)] // Long-lived hosts re-run discovery after a config change
    pub fn reinitialize(&mut self, root: &Path, config: &Config) {
        self.project = detect_project(root);
        self.registry = ProviderRegistry::discover(&config.discovery);
    }

    pub fn project(&self) -> &ProjectContext {
        &self.project
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn detector_names(&self) -> Vec<&str> {
        self.analyzer.detector_names()
    }

    /// Classify the tone of a text.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, DetectorError> {
        self.analyzer.analyze(text).await
    }

    /// Route a request, call the selected providers one at a time and
    /// merge their answers. Provider failures never fail the call.
    pub async fn orchestrate(&self, request: &Request) -> CombinedResult {
        let plan = route(request, self.registry.providers());
        info!(
            "Routing '{}' to {} provider(s)",
            request.query,
            plan.len()
        );

        let responses = execute_plan(&plan, request, self.client.as_ref()).await;
        if responses.len() < plan.len() {
            info!(
                "{} of {} provider calls failed",
                plan.len() - responses.len(),
                plan.len()
            );
        }

        combine(request, responses)
    }

    /// Orchestrate the query `Provide context about: {topic}`.
    ///
    /// Routed like any other query. The phrase contains `pr`, so an
    /// installed github provider is selected and the docs and memory
    /// defaults do not apply.
    pub async fn smart_context(&self, topic: &str) -> CombinedResult {
        let request = Request::query(format!("Provide context about: {}", topic));
        self.orchestrate(&request).await
    }

    /// Installed providers, then every known provider.
    pub fn list_providers(&self) -> (Vec<&Provider>, Vec<&Provider>) {
        (self.registry.installed(), self.registry.available())
    }

    /// Inspect a project directory without touching the session.
    pub fn detect_stack(&self, path: &Path) -> ProjectContext {
        detect_project(path)
    }
}
