//! Plan execution and response merging.

use super::client::ProviderClient;
use crate::models::{CombinedResult, ProviderResponse, Request, RoutingPlan};
use crate::report::render_answer;
use tracing::{debug, warn};

/// Follow-up hints attached to every combined result.
pub const SUGGESTIONS: [&str; 3] = [
    "Ask a follow-up question to narrow down the answer",
    "Run `vibemaster providers` to see which MCP servers could add context",
    "Mention an issue, an API or earlier work to route to more specific providers",
];

/// Run every step of the plan, one after another.
///
/// A failed call is logged and left out; the remaining responses keep
/// plan order.
pub async fn execute_plan(
    plan: &RoutingPlan,
    request: &Request,
    client: &dyn ProviderClient,
) -> Vec<ProviderResponse> {
    let mut responses = Vec::with_capacity(plan.len());

    for step in &plan.steps {
        debug!(
            "Calling {} (priority {}, {})",
            step.provider.name, step.priority, step.reason
        );
        match client.call(&step.provider, request).await {
            Ok(response) => responses.push(response),
            Err(e) => warn!("Skipping {}: {}", step.provider.name, e),
        }
    }

    responses
}

/// Merge responses into one result.
pub fn combine(request: &Request, responses: Vec<ProviderResponse>) -> CombinedResult {
    CombinedResult {
        answer: render_answer(&request.query, &responses),
        sources: responses,
        suggestions: SUGGESTIONS.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::models::{Invocation, Provider, RoutingStep};
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;

    /// Fails for one provider name, answers for the rest.
    struct FlakyClient {
        failing: &'static str,
    }

    #[async_trait]
    impl ProviderClient for FlakyClient {
        async fn call(
            &self,
            provider: &Provider,
            _request: &Request,
        ) -> Result<ProviderResponse, ProviderError> {
            if provider.name == self.failing {
                return Err(ProviderError::CallFailed {
                    provider: provider.name.clone(),
                    message: "connection reset".to_string(),
                });
            }
            Ok(ProviderResponse {
                source: provider.name.clone(),
                payload: json!(format!("answer from {}", provider.name)),
                confidence: 0.9,
                timestamp: Utc::now(),
            })
        }
    }

    fn plan(names: &[&str]) -> RoutingPlan {
        RoutingPlan {
            steps: names
                .iter()
                .enumerate()
                .map(|(i, name)| RoutingStep {
                    provider: Provider {
                        name: name.to_string(),
                        invocation: Invocation::default(),
                        capabilities: vec![],
                        installed: true,
                    },
                    priority: 10 - i as i32,
                    reason: "test".to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_failed_step_is_skipped() {
        let client = FlakyClient { failing: "memory" };
        let request = Request::query("anything");

        let responses = execute_plan(&plan(&["github", "memory", "docs"]), &request, &client).await;

        let sources: Vec<_> = responses.iter().map(|r| r.source.as_str()).collect();
        assert_eq!(sources, vec!["github", "docs"]);
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_result() {
        let client = FlakyClient { failing: "docs" };
        let request = Request::query("anything");

        let responses = execute_plan(&plan(&["docs"]), &request, &client).await;
        let result = combine(&request, responses);

        assert!(result.sources.is_empty());
        assert_eq!(result.suggestions.len(), 3);
        assert!(result.answer.contains("anything"));
    }

    #[test]
    fn test_combine_renders_answer() {
        let request = Request::query("how to stream responses");
        let responses = vec![ProviderResponse {
            source: "context7".to_string(),
            payload: json!("Use a Body stream."),
            confidence: 0.8,
            timestamp: Utc::now(),
        }];

        let result = combine(&request, responses);
        assert!(result.answer.contains("**Query:** how to stream responses"));
        assert!(result.answer.contains("## context7"));
        assert!(result.answer.contains("Use a Body stream."));
        assert_eq!(result.sources.len(), 1);
    }
}
