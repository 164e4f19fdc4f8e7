//! Error types for the engine.
//!
//! Each failure class has its own enum so callers can decide locally
//! whether it is fatal: detector errors abort an analysis, provider
//! errors only drop one routing step, discovery errors degrade to
//! "not found".

use std::path::PathBuf;
use thiserror::Error;

/// A detector could not produce scores for a text.
#[allow(dead_code)] // Built-in detectors are infallible
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("detector {detector} failed: {message}")]
    Failed { detector: String, message: String },
}

/// A single provider call failed.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider {0} is not installed")]
    NotInstalled(String),

    #[allow(dead_code)]
    #[error("provider {provider} call failed: {message}")]
    CallFailed { provider: String, message: String },
}

/// Project or host-config discovery failed.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("git inspection failed: {0}")]
    Git(#[from] git2::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DetectorError::Failed {
            detector: "KeywordDetector".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "detector KeywordDetector failed: boom");

        let err = ProviderError::NotInstalled("github".to_string());
        assert_eq!(err.to_string(), "provider github is not installed");
    }
}
