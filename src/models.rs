//! Data models for the engine.
//!
//! This module contains the value types shared by detectors, the
//! aggregator, the router and the combiner. None of them carry behavior
//! beyond small accessors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Tonal category of a text.
///
/// Declaration order matters: it breaks ties when two categories end up
/// with the same summed confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Professional,
    Casual,
    Aggressive,
    Helpful,
    Sarcastic,
    Enthusiastic,
    Neutral,
}

impl Category {
    /// All categories in declaration order.
    #[allow(dead_code)]
    pub const ALL: [Category; 7] = [
        Category::Professional,
        Category::Casual,
        Category::Aggressive,
        Category::Helpful,
        Category::Sarcastic,
        Category::Enthusiastic,
        Category::Neutral,
    ];

    /// Returns an emoji representation of the category.
    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Professional => "💼",
            Category::Casual => "😎",
            Category::Aggressive => "😠",
            Category::Helpful => "🤝",
            Category::Sarcastic => "🙃",
            Category::Enthusiastic => "🎉",
            Category::Neutral => "😐",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Professional => write!(f, "Professional"),
            Category::Casual => write!(f, "Casual"),
            Category::Aggressive => write!(f, "Aggressive"),
            Category::Helpful => write!(f, "Helpful"),
            Category::Sarcastic => write!(f, "Sarcastic"),
            Category::Enthusiastic => write!(f, "Enthusiastic"),
            Category::Neutral => write!(f, "Neutral"),
        }
    }
}

/// A weighted opinion about the tone of a text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationScore {
    pub category: Category,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Human-readable explanation.
    pub reasoning: String,
}

impl ClassificationScore {
    pub fn new(category: Category, confidence: f64, reasoning: impl Into<String>) -> Self {
        Self {
            category,
            confidence,
            reasoning: reasoning.into(),
        }
    }
}

/// Aggregated outcome of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Category with the highest raw summed confidence.
    pub primary_category: Category,
    /// One entry per category, highest displayed confidence first.
    pub scores: Vec<ClassificationScore>,
    pub summary: String,
}

/// How to launch a provider. Opaque to routing; mirrors a host-config entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

/// An external capability provider (an MCP server).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Unique name; identity for merge purposes.
    pub name: String,
    pub invocation: Invocation,
    /// Declared capability tags, without duplicates.
    pub capabilities: Vec<String>,
    pub installed: bool,
}

impl Provider {
    /// Returns true if the provider declares the given capability tag.
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|c| c == capability)
    }
}

/// Kind of request sent to `orchestrate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    #[default]
    Query,
    Implement,
    Debug,
    Explain,
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Query => write!(f, "query"),
            RequestKind::Implement => write!(f, "implement"),
            RequestKind::Debug => write!(f, "debug"),
            RequestKind::Explain => write!(f, "explain"),
        }
    }
}

/// A natural-language request to be routed to providers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    #[serde(rename = "type", default)]
    pub kind: RequestKind,
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<ProjectContext>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl Request {
    /// Creates a plain query request.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            kind: RequestKind::Query,
            query: query.into(),
            context: None,
            files: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: RequestKind) -> Self {
        self.kind = kind;
        self
    }
}

/// One provider selected for a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingStep {
    pub provider: Provider,
    pub priority: i32,
    pub reason: String,
}

/// Steps ordered by descending priority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutingPlan {
    pub steps: Vec<RoutingStep>,
}

impl RoutingPlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if a step already targets the named provider.
    pub fn contains_provider(&self, name: &str) -> bool {
        self.steps.iter().any(|s| s.provider.name == name)
    }
}

/// Answer returned by a single provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// Name of the provider that answered.
    pub source: String,
    pub payload: Value,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

/// Merged outcome of an orchestration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedResult {
    pub answer: String,
    /// Successful responses in execution order.
    pub sources: Vec<ProviderResponse>,
    pub suggestions: Vec<String>,
}

/// Detected technology stack of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stack {
    pub frameworks: Vec<String>,
    pub languages: Vec<String>,
    pub package_manager: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,
}

impl Default for Stack {
    fn default() -> Self {
        Self {
            frameworks: Vec::new(),
            languages: Vec::new(),
            package_manager: "unknown".to_string(),
            dependencies: BTreeMap::new(),
        }
    }
}

/// GitHub coordinates of a project checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitInfo {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

/// Everything discovered about the project directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    pub root_path: PathBuf,
    pub stack: Stack,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_repo: Option<GitInfo>,
}
