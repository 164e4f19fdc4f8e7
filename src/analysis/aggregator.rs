//! Score aggregation.
//!
//! Merges the raw scores of every detector into one ranked
//! [`AnalysisResult`]: confidences are summed per category, clamped to
//! 1.0 for display, and the primary category is chosen on the raw sums.

use crate::models::{AnalysisResult, Category, ClassificationScore};
use std::cmp::Ordering;

/// Running total for one category.
#[derive(Debug, Clone)]
struct Tally {
    category: Category,
    total: f64,
    reasons: Vec<String>,
}

/// Group scores by category, keeping first-seen order.
fn tally(scores: &[ClassificationScore]) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = Vec::new();

    for score in scores {
        match tallies.iter_mut().find(|t| t.category == score.category) {
            Some(t) => {
                t.total += score.confidence;
                t.reasons.push(score.reasoning.clone());
            }
            None => tallies.push(Tally {
                category: score.category,
                total: score.confidence,
                reasons: vec![score.reasoning.clone()],
            }),
        }
    }

    tallies
}

/// Pick the category with the largest raw sum.
///
/// Equal sums go to the category declared first in [`Category`]. With no
/// tallies at all the result is Neutral with a sum of zero.
fn primary(tallies: &[Tally]) -> (Category, f64) {
    tallies
        .iter()
        .fold(None, |best: Option<&Tally>, t| match best {
            Some(b) if b.total > t.total => Some(b),
            Some(b) if b.total == t.total && b.category < t.category => Some(b),
            _ => Some(t),
        })
        .map(|t| (t.category, t.total))
        .unwrap_or((Category::Neutral, 0.0))
}

/// Aggregate detector scores into a single result.
pub fn aggregate(scores: &[ClassificationScore]) -> AnalysisResult {
    let tallies = tally(scores);
    let (primary_category, max_total) = primary(&tallies);

    let mut merged: Vec<ClassificationScore> = tallies
        .iter()
        .map(|t| ClassificationScore {
            category: t.category,
            confidence: t.total.min(1.0),
            reasoning: t.reasons.join(" | "),
        })
        .collect();

    // Stable: equal confidences keep first-seen order.
    merged.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    let summary = format!(
        "Identified as {} with confidence score {:.2} based on {} indicators.",
        primary_category,
        max_total,
        merged.len()
    );

    AnalysisResult {
        primary_category,
        scores: merged,
        summary,
    }
}
