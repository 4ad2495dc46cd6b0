//! Seeded corpus generation per (region, month, year)

use crate::templates::template_pool;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use wellpulse_core::{AppConfig, Region, Result, Sample, SentimentHint};
use xxhash_rust::xxh3::xxh3_64_with_seed;

pub const MONTHS: std::ops::RangeInclusive<u32> = 1..=12;

const POSITIVE_SHARE: f64 = 0.6;
const NEUTRAL_BAND: f64 = 0.35;
const MIN_BIAS: f64 = 0.1;
const MAX_BIAS: f64 = 0.9;

/// Seasonal shift applied to a region's bias
pub fn month_adjustment(month: u32) -> f64 {
    match month {
        1 => -0.05, // post-holiday slump
        2 => -0.03,
        3 => 0.02,
        4 => 0.05,
        5 => 0.07,
        6 => 0.06,
        7 => 0.04,
        8 => 0.03,
        9 => 0.01,
        10 => -0.02,
        11 => -0.04,
        12 => -0.06, // holiday stress
        _ => 0.0,
    }
}

/// Produces deterministic synthetic samples from the configured region set
#[derive(Debug, Clone)]
pub struct CorpusGenerator {
    config: Arc<AppConfig>,
}

impl CorpusGenerator {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    fn seed(&self, region: &Region, month: u32, year: i32) -> u64 {
        let key = format!("{}-{}-{}", region, month, year);
        xxh3_64_with_seed(key.as_bytes(), self.config.corpus.seed)
    }

    /// Samples for one month. Months outside 1-12 yield nothing.
    pub fn generate_month(&self, region: &Region, month: u32, year: i32) -> Result<Vec<Sample>> {
        self.config.regions.check(region)?;
        if !MONTHS.contains(&month) {
            return Ok(Vec::new());
        }

        let bias = self
            .config
            .regions
            .profile(region)
            .map(|p| p.bias)
            .unwrap_or(0.5);
        let effective_bias = (bias + month_adjustment(month)).clamp(MIN_BIAS, MAX_BIAS);

        let prefix: String = region.as_str().chars().take(3).collect::<String>().to_uppercase();
        let mut rng = StdRng::seed_from_u64(self.seed(region, month, year));

        let samples = (0..self.config.corpus.samples_per_month)
            .map(|i| {
                let r: f64 = rng.gen();
                let hint = if r < effective_bias * POSITIVE_SHARE {
                    SentimentHint::Positive
                } else if r < effective_bias * POSITIVE_SHARE + NEUTRAL_BAND {
                    SentimentHint::Neutral
                } else {
                    SentimentHint::Negative
                };
                let text = template_pool(hint)
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or_default();

                Sample {
                    id: format!("ANON-{}-{}{:02}-{:04}", prefix, year, month, i),
                    region: region.clone(),
                    year,
                    month,
                    text: text.to_string(),
                    sentiment_hint: hint,
                }
            })
            .collect();

        Ok(samples)
    }

    /// Samples for all twelve months, month ascending
    pub fn generate_year(&self, region: &Region, year: i32) -> Result<Vec<Sample>> {
        self.config.regions.check(region)?;

        let mut samples =
            Vec::with_capacity(self.config.corpus.samples_per_month * MONTHS.count());
        for month in MONTHS {
            samples.extend(self.generate_month(region, month, year)?);
        }

        tracing::debug!(region = %region, year, samples = samples.len(), "generated corpus");
        Ok(samples)
    }

    /// Every region's corpus for `year`, in enumeration order
    pub fn generate_all(&self, year: i32) -> Result<Vec<(Region, Vec<Sample>)>> {
        self.config
            .regions
            .regions()
            .into_iter()
            .map(|region| {
                let samples = self.generate_year(&region, year)?;
                Ok((region, samples))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use wellpulse_core::RegionProfile;

    fn generator() -> CorpusGenerator {
        CorpusGenerator::new(Arc::new(AppConfig::new()))
    }

    #[test]
    fn test_every_month_has_samples() {
        let samples = generator()
            .generate_year(&Region::new("Northeast"), 2024)
            .unwrap();
        assert_eq!(samples.len(), 30 * 12);

        let months: HashSet<u32> = samples.iter().map(|s| s.month).collect();
        assert_eq!(months.len(), 12);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let region = Region::new("Midwest");
        let first = generator().generate_month(&region, 6, 2024).unwrap();
        let second = generator().generate_month(&region, 6, 2024).unwrap();
        assert_eq!(first, second);

        let other_year = generator().generate_month(&region, 6, 2023).unwrap();
        let texts = |s: &[Sample]| s.iter().map(|x| x.text.clone()).collect::<Vec<_>>();
        assert_ne!(texts(&first), texts(&other_year));
    }

    #[test]
    fn test_sample_ids_are_anonymized() {
        let samples = generator()
            .generate_month(&Region::new("West Coast"), 3, 2024)
            .unwrap();
        assert_eq!(samples[0].id, "ANON-WES-202403-0000");
        assert_eq!(samples[29].id, "ANON-WES-202403-0029");
    }

    #[test]
    fn test_unknown_region_rejected() {
        let err = generator()
            .generate_year(&Region::new("Atlantis"), 2024)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_region");
    }

    #[test]
    fn test_bias_shifts_mix() {
        let config = AppConfig::with_regions(vec![
            RegionProfile::new("Sunny", 0.9, 1),
            RegionProfile::new("Gloomy", 0.1, 1),
        ]);
        let generator = CorpusGenerator::new(Arc::new(config));

        let positive_share = |name: &str| {
            let samples = generator.generate_year(&Region::new(name), 2024).unwrap();
            let positive = samples
                .iter()
                .filter(|s| s.sentiment_hint == SentimentHint::Positive)
                .count();
            positive as f64 / samples.len() as f64
        };

        assert!(positive_share("Sunny") > positive_share("Gloomy"));
    }

    #[test]
    fn test_generate_all_follows_enumeration() {
        let all = generator().generate_all(2024).unwrap();
        let names: Vec<_> = all.iter().map(|(r, _)| r.as_str().to_string()).collect();
        assert_eq!(names, AppConfig::new().regions.names());
    }

    #[test]
    fn test_month_adjustment_table() {
        assert_eq!(month_adjustment(5), 0.07);
        assert_eq!(month_adjustment(12), -0.06);
        assert_eq!(month_adjustment(13), 0.0);
    }
}
