//! Surface-feature tone detection (capitals, exclamations, ellipses).

use super::Detector;
use crate::error::DetectorError;
use crate::models::{Category, ClassificationScore};
use async_trait::async_trait;

/// Stateless rule set over the shape of the text.
///
/// Rules fire independently and are emitted in a fixed order:
/// shouting, exclamations, ellipses.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDetector;

/// 0.15 per exclamation mark, capped at 0.9.
fn exclamation_confidence(count: usize) -> f64 {
    (count as f64 * 15.0 / 100.0).min(0.9)
}

#[async_trait]
impl Detector for PatternDetector {
    fn name(&self) -> &str {
        "PatternDetector"
    }

    async fn detect(&self, text: &str) -> Result<Vec<ClassificationScore>, DetectorError> {
        let mut scores = Vec::new();

        let letters = text.chars().filter(|c| c.is_ascii_alphabetic()).count();
        let upper = text.chars().filter(|c| c.is_ascii_uppercase()).count();
        if letters > 10 && upper as f64 / letters as f64 > 0.6 {
            scores.push(ClassificationScore::new(
                Category::Aggressive,
                0.8,
                "Excessive use of ALL CAPS.",
            ));
        }

        let exclamations = text.matches('!').count();
        if exclamations > 2 {
            scores.push(ClassificationScore::new(
                Category::Enthusiastic,
                exclamation_confidence(exclamations),
                "Multiple exclamation marks detected.",
            ));
        }

        if text.contains("...") {
            scores.push(ClassificationScore::new(
                Category::Casual,
                0.3,
                "Uses ellipses, conversational style.",
            ));
        }

        Ok(scores)
    }
}
