//! Tone detectors.
//!
//! A detector turns a text into zero or more [`ClassificationScore`]s.
//! Detectors are registered in an ordered list; that order fixes the
//! order of scores (and of reasoning strings) before aggregation.

pub mod keyword;
pub mod pattern;

pub use keyword::KeywordDetector;
pub use pattern::PatternDetector;

use crate::error::DetectorError;
use crate::models::ClassificationScore;
use async_trait::async_trait;

/// A pluggable rule producing weighted tone scores.
///
/// Implementations must be free of side effects and must return an empty
/// vector, not an error, when they find no signal.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Score the given text.
    async fn detect(&self, text: &str) -> Result<Vec<ClassificationScore>, DetectorError>;
}

/// The built-in detectors, keyword first.
pub fn default_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(KeywordDetector::default()),
        Box::new(PatternDetector),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_detector_order() {
        let names: Vec<_> = default_detectors()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, vec!["KeywordDetector", "PatternDetector"]);
    }
}
