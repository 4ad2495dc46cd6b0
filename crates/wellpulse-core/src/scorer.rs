//! Scorer seam: the pipeline only sees this trait, variants live in wellpulse-nlp

use crate::types::{ScorerVariant, Sentiment};

/// Maps raw text to a bounded sentiment value
pub trait SentimentScorer: Send + Sync {
    fn variant(&self) -> ScorerVariant;

    /// Full analysis of one text
    fn analyze(&self, text: &str) -> Sentiment;

    /// Sentiment on the 0-100 scale
    fn score(&self, text: &str) -> f64 {
        self.analyze(text).score
    }
}

/// Rescale a compound polarity in [-1, 1] to [0, 100]
pub fn rescale_compound(compound: f64) -> f64 {
    if !compound.is_finite() {
        return 50.0;
    }
    ((compound.clamp(-1.0, 1.0) + 1.0) * 50.0).clamp(0.0, 100.0)
}
