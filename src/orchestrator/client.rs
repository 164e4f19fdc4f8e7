//! Provider invocation.
//!
//! Calling a provider is abstract to the engine. The shipped client does
//! not start any server: it answers with a description of the call it
//! would make.

use crate::error::ProviderError;
use crate::models::{Provider, ProviderResponse, Request};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

/// Performs one provider call.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn call(
        &self,
        provider: &Provider,
        request: &Request,
    ) -> Result<ProviderResponse, ProviderError>;
}

/// Answers every call with the invocation it would perform.
#[derive(Debug, Clone)]
pub struct DryRunClient {
    confidence: f64,
}

impl DryRunClient {
    pub fn new(confidence: f64) -> Self {
        Self { confidence }
    }
}

impl Default for DryRunClient {
    fn default() -> Self {
        Self::new(0.8)
    }
}

#[async_trait]
impl ProviderClient for DryRunClient {
    async fn call(
        &self,
        provider: &Provider,
        request: &Request,
    ) -> Result<ProviderResponse, ProviderError> {
        if !provider.installed {
            return Err(ProviderError::NotInstalled(provider.name.clone()));
        }

        Ok(ProviderResponse {
            source: provider.name.clone(),
            payload: json!({
                "provider": provider.name,
                "command": provider.invocation.command,
                "args": provider.invocation.args,
                "capabilities": provider.capabilities,
                "request_type": request.kind.to_string(),
                "query": request.query,
            }),
            confidence: self.confidence,
            timestamp: Utc::now(),
        })
    }
}
