//! Keyword-based tone detection.

use super::Detector;
use crate::error::DetectorError;
use crate::models::{Category, ClassificationScore};
use async_trait::async_trait;

const NO_MATCH_REASON: &str = "No specific vibe keywords detected.";

/// Matches fixed trigger phrases per category against the lower-cased text.
///
/// Each matched phrase adds 0.2 confidence, capped at 1.0. When nothing
/// matches at all, a single Neutral score of 0.5 is emitted.
pub struct KeywordDetector {
    keywords: Vec<(Category, Vec<&'static str>)>,
}

impl Default for KeywordDetector {
    fn default() -> Self {
        Self {
            keywords: vec![
                (
                    Category::Professional,
                    vec![
                        "regards", "sincerely", "deadline", "objective", "workflow", "leverage",
                        "synergy",
                    ],
                ),
                (
                    Category::Casual,
                    vec!["hey", "lol", "cool", "stuff", "gonna", "wanna", "yeah", "vibes"],
                ),
                (
                    Category::Aggressive,
                    vec![
                        "stupid", "idiot", "wrong", "fail", "bad", "hate", "worst", "shut up",
                    ],
                ),
                (
                    Category::Helpful,
                    vec!["assist", "guide", "help", "support", "solution", "recommend", "tip"],
                ),
                // Sarcasm is context dependent; these are weak hints at best.
                (
                    Category::Sarcastic,
                    vec!["great job", "obviously", "clearly", "sure", "wow"],
                ),
                (
                    Category::Enthusiastic,
                    vec![
                        "awesome", "amazing", "love", "fantastic", "excited", "great!", "wow!",
                    ],
                ),
            ],
        }
    }
}

/// 0.2 per match, capped at 1.0.
fn keyword_confidence(matches: usize) -> f64 {
    (matches as f64 * 2.0 / 10.0).min(1.0)
}

#[async_trait]
impl Detector for KeywordDetector {
    fn name(&self) -> &str {
        "KeywordDetector"
    }

    async fn detect(&self, text: &str) -> Result<Vec<ClassificationScore>, DetectorError> {
        let lower = text.to_lowercase();
        let mut scores = Vec::new();

        for (category, words) in &self.keywords {
            let found: Vec<&str> = words
                .iter()
                .copied()
                .filter(|word| lower.contains(word))
                .collect();

            if !found.is_empty() {
                scores.push(ClassificationScore::new(
                    *category,
                    keyword_confidence(found.len()),
                    format!("Found keywords: {}", found.join(", ")),
                ));
            }
        }

        if scores.is_empty() {
            scores.push(ClassificationScore::new(
                Category::Neutral,
                0.5,
                NO_MATCH_REASON,
            ));
        }

        Ok(scores)
    }
}
