//! Tool-call surface.
//!
//! This module defines the tools an MCP host can call and dispatches
//! those calls onto a [`Session`]. Only fatal failures (bad arguments,
//! unknown tools, detector errors) are reported as error results;
//! orchestration always succeeds.

use crate::models::{Request, RequestKind};
use crate::orchestrator::Session;
use crate::report::{generate_json, render_provider_listing};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::PathBuf;
use tracing::debug;

/// Tool definition as listed to MCP hosts.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// A tool call made by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// Result of executing a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub content: String,
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResult {
    pub fn success(content: String) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            content: format!("Error: {}", message),
            is_error: true,
        }
    }
}

/// Dispatches tool calls onto a session.
pub struct ToolExecutor<'a> {
    session: &'a Session,
}

impl<'a> ToolExecutor<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Execute a tool call and return the result.
    pub async fn execute(&self, call: &ToolCall) -> ToolResult {
        let args = &call.arguments;
        debug!("Executing tool: {} with args: {:?}", call.name, args);

        match call.name.as_str() {
            "analyze" => self.analyze(args).await,
            "orchestrate" => self.orchestrate(args).await,
            "detect_stack" => self.detect_stack(args),
            "list_mcps" => self.list_mcps(),
            "smart_context" => self.smart_context(args).await,
            _ => ToolResult::error(format!("Unknown tool: {}", call.name)),
        }
    }

    async fn analyze(&self, args: &Value) -> ToolResult {
        let Some(text) = args.get("text").and_then(|v| v.as_str()) else {
            return ToolResult::error("Missing required parameter: text".to_string());
        };

        match self.session.analyze(text).await {
            Ok(result) => to_json_result(&result),
            Err(e) => ToolResult::error(e.to_string()),
        }
    }

    async fn orchestrate(&self, args: &Value) -> ToolResult {
        let Some(query) = args.get("query").and_then(|v| v.as_str()) else {
            return ToolResult::error("Missing required parameter: query".to_string());
        };

        let kind = match args.get("type") {
            None | Some(Value::Null) => RequestKind::default(),
            Some(value) => match serde_json::from_value::<RequestKind>(value.clone()) {
                Ok(kind) => kind,
                Err(_) => {
                    return ToolResult::error(format!("Invalid request type: {}", value));
                }
            },
        };

        let request = Request::query(query).with_kind(kind);
        let result = self.session.orchestrate(&request).await;
        ToolResult::success(result.answer)
    }

    fn detect_stack(&self, args: &Value) -> ToolResult {
        let path = args
            .get("path")
            .and_then(|v| v.as_str())
            .map(PathBuf::from)
            .unwrap_or_else(|| self.session.project().root_path.clone());

        let context = self.session.detect_stack(&path);
        to_json_result(&context)
    }

    fn list_mcps(&self) -> ToolResult {
        let (installed, available) = self.session.list_providers();
        ToolResult::success(render_provider_listing(&installed, &available))
    }

    async fn smart_context(&self, args: &Value) -> ToolResult {
        let Some(topic) = args.get("topic").and_then(|v| v.as_str()) else {
            return ToolResult::error("Missing required parameter: topic".to_string());
        };

        let result = self.session.smart_context(topic).await;
        ToolResult::success(result.answer)
    }
}

fn to_json_result<T: Serialize>(value: &T) -> ToolResult {
    match generate_json(value) {
        Ok(json) => ToolResult::success(json),
        Err(e) => ToolResult::error(e.to_string()),
    }
}

/// Get the tool definitions exposed to MCP hosts.
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "analyze".to_string(),
            description: "Classify the tone of a text (professional, casual, aggressive, ...)"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Text to analyze"
                    }
                },
                "required": ["text"]
            }),
        },
        ToolDefinition {
            name: "orchestrate".to_string(),
            description: "Intelligently orchestrates multiple MCPs to answer your query"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Your question or request"
                    },
                    "type": {
                        "type": "string",
                        "enum": ["query", "implement", "debug", "explain"],
                        "description": "Type of request"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: "detect_stack".to_string(),
            description: "Detect the technology stack of current project".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Project path (defaults to current directory)"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "list_mcps".to_string(),
            description: "List all detected MCP servers (installed and available)".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDefinition {
            name: "smart_context".to_string(),
            description: "Get context for coding about a topic from the installed MCPs"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "topic": {
                        "type": "string",
                        "description": "What you want context about"
                    }
                },
                "required": ["topic"]
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;
    use crate::detectors::Detector;
    use crate::error::{DetectorError, ProviderError};
    use crate::models::{
        ClassificationScore, Invocation, ProjectContext, Provider, ProviderResponse, Stack,
    };
    use crate::orchestrator::{DryRunClient, ProviderClient};
    use crate::registry::ProviderRegistry;
    use async_trait::async_trait;
    use tempfile::TempDir;

    struct BrokenDetector;

    #[async_trait]
    impl Detector for BrokenDetector {
        fn name(&self) -> &str {
            "BrokenDetector"
        }

        async fn detect(&self, _text: &str) -> Result<Vec<ClassificationScore>, DetectorError> {
            Err(DetectorError::Failed {
                detector: self.name().to_string(),
                message: "no rules loaded".to_string(),
            })
        }
    }

    /// Refuses calls to `github`, answers the rest like the dry-run client.
    struct GithubDownClient;

    #[async_trait]
    impl ProviderClient for GithubDownClient {
        async fn call(
            &self,
            provider: &Provider,
            request: &Request,
        ) -> Result<ProviderResponse, ProviderError> {
            if provider.name == "github" {
                return Err(ProviderError::CallFailed {
                    provider: provider.name.clone(),
                    message: "rate limited".to_string(),
                });
            }
            DryRunClient::default().call(provider, request).await
        }
    }

    fn provider(name: &str, caps: &[&str]) -> Provider {
        Provider {
            name: name.to_string(),
            invocation: Invocation::default(),
            capabilities: caps.iter().map(|c| c.to_string()).collect(),
            installed: true,
        }
    }

    fn project() -> ProjectContext {
        ProjectContext {
            root_path: ".".into(),
            stack: Stack::default(),
            git_repo: None,
        }
    }

    fn session() -> Session {
        Session::new(
            project(),
            ProviderRegistry::build(vec![provider("github", &["github", "issues"])], true),
            Analyzer::with_defaults(),
            Box::new(DryRunClient::default()),
        )
    }

    fn call(name: &str, arguments: Value) -> ToolCall {
        ToolCall {
            name: name.to_string(),
            arguments,
        }
    }

    #[test]
    fn test_tool_definitions() {
        let tools = get_tool_definitions();
        assert_eq!(tools.len(), 5);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["analyze", "orchestrate", "detect_stack", "list_mcps", "smart_context"]
        );

        let json = serde_json::to_value(&tools[0]).unwrap();
        assert!(json.get("inputSchema").is_some());
    }

    #[tokio::test]
    async fn test_analyze_tool() {
        let session = session();
        let result = ToolExecutor::new(&session)
            .execute(&call("analyze", json!({"text": "hey, cool stuff"})))
            .await;

        assert!(!result.is_error);
        let parsed: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed["primaryCategory"], "casual");
    }

    #[tokio::test]
    async fn test_analyze_detector_failure_is_error() {
        let mut analyzer = Analyzer::with_defaults();
        analyzer.register(Box::new(BrokenDetector));
        let session = Session::new(
            project(),
            ProviderRegistry::build(Vec::new(), false),
            analyzer,
            Box::new(DryRunClient::default()),
        );

        let result = ToolExecutor::new(&session)
            .execute(&call("analyze", json!({"text": "hey"})))
            .await;

        assert!(result.is_error);
        assert_eq!(
            result.content,
            "Error: detector BrokenDetector failed: no rules loaded"
        );
    }

    #[tokio::test]
    async fn test_orchestrate_partial_failure_is_success() {
        let session = Session::new(
            project(),
            ProviderRegistry::build(
                vec![
                    provider("github", &["github", "issues"]),
                    provider("context7", &["docs", "context"]),
                ],
                false,
            ),
            Analyzer::with_defaults(),
            Box::new(GithubDownClient),
        );

        let result = ToolExecutor::new(&session)
            .execute(&call(
                "orchestrate",
                json!({"query": "fix this issue and how to implement it"}),
            ))
            .await;

        assert!(!result.is_error);
        assert!(result
            .content
            .contains("## Sources\n\n- context7 (confidence 0.80)\n\n"));
        assert!(result.content.contains("## context7"));
        assert!(!result.content.contains("## github"));
    }

    #[tokio::test]
    async fn test_orchestrate_tool() {
        let session = session();
        let result = ToolExecutor::new(&session)
            .execute(&call(
                "orchestrate",
                json!({"query": "show me an open issue", "type": "debug"}),
            ))
            .await;

        assert!(!result.is_error);
        assert!(result.content.contains("## github"));
        assert!(result.content.contains("\"request_type\": \"debug\""));
    }

    #[tokio::test]
    async fn test_orchestrate_rejects_bad_type() {
        let session = session();
        let result = ToolExecutor::new(&session)
            .execute(&call("orchestrate", json!({"query": "x", "type": "dance"})))
            .await;
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn test_missing_argument() {
        let session = session();
        let result = ToolExecutor::new(&session)
            .execute(&call("smart_context", json!({})))
            .await;

        assert!(result.is_error);
        assert!(result.content.contains("topic"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let session = session();
        let result = ToolExecutor::new(&session)
            .execute(&call("summon", Value::Null))
            .await;

        assert!(result.is_error);
        assert_eq!(result.content, "Error: Unknown tool: summon");
    }

    #[tokio::test]
    async fn test_list_mcps_tool() {
        let session = session();
        let result = ToolExecutor::new(&session)
            .execute(&call("list_mcps", json!({})))
            .await;

        assert!(result.content.contains("# Installed MCPs (1)"));
        assert!(result.content.contains("# Available MCPs (3)"));
    }

    #[tokio::test]
    async fn test_detect_stack_tool() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("go.mod"), "module x\n").unwrap();

        let session = session();
        let result = ToolExecutor::new(&session)
            .execute(&call(
                "detect_stack",
                json!({"path": temp_dir.path().to_string_lossy()}),
            ))
            .await;

        assert!(!result.is_error);
        assert!(result.content.contains("\"package_manager\": \"go mod\""));
    }
}
