//! Tone analysis.
//!
//! The [`Analyzer`] runs every registered detector in order and hands the
//! concatenated scores to the aggregator.

pub mod aggregator;

pub use aggregator::aggregate;

use crate::detectors::{default_detectors, Detector};
use crate::error::DetectorError;
use crate::models::AnalysisResult;
use tracing::debug;

/// Ordered collection of detectors.
pub struct Analyzer {
    detectors: Vec<Box<dyn Detector>>,
}

impl Analyzer {
    /// An analyzer with no detectors.
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
        }
    }

    /// An analyzer with the built-in keyword and pattern detectors.
    pub fn with_defaults() -> Self {
        Self {
            detectors: default_detectors(),
        }
    }

    /// Append a detector; it runs after those already registered.
    #[allow(dead_code)]
    pub fn register(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    pub fn detector_names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Analyze a text. Any detector failure aborts the whole analysis.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, DetectorError> {
        let mut scores = Vec::new();

        for detector in &self.detectors {
            let found = detector.detect(text).await?;
            debug!("{} produced {} scores", detector.name(), found.len());
            scores.extend(found);
        }

        Ok(aggregate(&scores))
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}
