#![allow(dead_code)]

use std::sync::Arc;
use wellpulse::Pipeline;
use wellpulse_core::{
    AppConfig, Region, RegionProfile, Sample, ScorerVariant, Sentiment, SentimentHint,
    SentimentScorer,
};

/// Scores text by parsing it as a number, so tests control every value
pub struct NumericScorer;

impl SentimentScorer for NumericScorer {
    fn variant(&self) -> ScorerVariant {
        ScorerVariant::Lexicon
    }

    fn analyze(&self, text: &str) -> Sentiment {
        let score: f64 = text.trim().parse().unwrap_or(50.0);
        Sentiment {
            score,
            ..Sentiment::neutral()
        }
    }
}

/// North and South with identical program counts
pub fn north_south_config() -> AppConfig {
    AppConfig::with_regions(vec![
        RegionProfile::new("North", 0.6, 6),
        RegionProfile::new("South", 0.4, 6),
    ])
}

/// Small generated corpus for fast pipeline tests
pub fn small_pipeline() -> Arc<Pipeline> {
    let mut config = north_south_config();
    config.corpus.samples_per_month = 6;
    Arc::new(Pipeline::new(Arc::new(config)))
}

/// Twelve values evenly spaced from `start` to `end`
pub fn ramp(start: f64, end: f64) -> Vec<f64> {
    (0..12)
        .map(|i| start + (end - start) * i as f64 / 11.0)
        .collect()
}

/// Three samples per month whose text is that month's value
pub fn numeric_samples(region: &str, year: i32, monthly: &[f64]) -> Vec<Sample> {
    monthly
        .iter()
        .enumerate()
        .flat_map(|(i, value)| {
            let month = i as u32 + 1;
            (0..3).map(move |n| Sample {
                id: format!("TEST-{}-{:02}-{}", region, month, n),
                region: Region::new(region),
                year,
                month,
                text: value.to_string(),
                sentiment_hint: SentimentHint::Neutral,
            })
        })
        .collect()
}
