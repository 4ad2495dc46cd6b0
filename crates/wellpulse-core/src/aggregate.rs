//! Reduction of scored samples into monthly and national figures

use crate::error::{Error, Result};
use crate::scorer::SentimentScorer;
use crate::types::{
    MonthlySeriesPoint, NationalStats, Region, RegionSeries, Sample, ScoredSample, ScorerVariant,
};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Round to two decimals for reporting
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    var.sqrt()
}

fn month_label(month: u32, year: i32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| chrono::Month::try_from(m).ok())
        .map(|m| &m.name()[..3])
        .unwrap_or("???");
    format!("{} {}", name, year)
}

/// Scores samples with the injected scorer and reduces them per region/month
pub struct Aggregator {
    scorer: Arc<dyn SentimentScorer>,
}

impl Aggregator {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { scorer }
    }

    pub fn variant(&self) -> ScorerVariant {
        self.scorer.variant()
    }

    pub fn score_samples(&self, samples: &[Sample]) -> Vec<ScoredSample> {
        samples
            .iter()
            .map(|sample| {
                let analysis = self.scorer.analyze(&sample.text);
                ScoredSample {
                    sample: sample.clone(),
                    sentiment: analysis.score.clamp(0.0, 100.0),
                    compound: analysis.compound,
                    variant: self.scorer.variant(),
                }
            })
            .collect()
    }

    /// Score then reduce one region's samples for `year`
    pub fn run(&self, region: &Region, year: i32, samples: &[Sample]) -> RegionSeries {
        let scored = self.score_samples(samples);
        self.monthly_series(region, year, &scored)
    }

    /// Reduce scored samples to one point per month, month ascending.
    ///
    /// Samples for other regions or years are ignored. Months without
    /// samples produce no point; with no samples at all the series is empty.
    pub fn monthly_series(
        &self,
        region: &Region,
        year: i32,
        scored: &[ScoredSample],
    ) -> RegionSeries {
        let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for s in scored {
            if &s.sample.region == region && s.sample.year == year {
                by_month.entry(s.sample.month).or_default().push(s.sentiment);
            }
        }

        let points: Vec<MonthlySeriesPoint> = by_month
            .into_iter()
            .map(|(month, scores)| MonthlySeriesPoint {
                region: region.clone(),
                year,
                month,
                month_label: month_label(month, year),
                avg_sentiment: round2(mean(&scores)),
                std_dev: round2(sample_std_dev(&scores)),
                sample_count: scores.len(),
                min_score: round2(scores.iter().copied().fold(f64::INFINITY, f64::min)),
                max_score: round2(scores.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            })
            .collect();

        // Each month counts once regardless of its sample count
        let avg_sentiment = if points.is_empty() {
            None
        } else {
            let monthly: Vec<f64> = points.iter().map(|p| p.avg_sentiment).collect();
            Some(round2(mean(&monthly)))
        };
        let total_samples = points.iter().map(|p| p.sample_count).sum();

        tracing::debug!(
            region = %region,
            year,
            months = points.len(),
            total_samples,
            "aggregated monthly series"
        );

        RegionSeries {
            region: region.clone(),
            year,
            points,
            avg_sentiment,
            total_samples,
        }
    }

    /// National figures over every region's series, given in enumeration order.
    ///
    /// Ties for highest/lowest go to the region listed first. Regions with no
    /// data are counted as monitored but never contribute a score.
    pub fn national_stats(&self, year: i32, series: &[RegionSeries]) -> Result<NationalStats> {
        let scored: Vec<(&Region, f64)> = series
            .iter()
            .filter_map(|s| s.avg_sentiment.map(|avg| (&s.region, avg)))
            .collect();

        let Some(&(first_region, first_avg)) = scored.first() else {
            return Err(Error::EmptySeries(format!("national statistics for {}", year)));
        };

        let mut highest = (first_region, first_avg);
        let mut lowest = (first_region, first_avg);
        for &(region, avg) in &scored[1..] {
            if avg > highest.1 {
                highest = (region, avg);
            }
            if avg < lowest.1 {
                lowest = (region, avg);
            }
        }

        let averages: Vec<f64> = scored.iter().map(|(_, avg)| *avg).collect();

        Ok(NationalStats {
            year,
            national_avg_sentiment: round2(mean(&averages)),
            highest_region: highest.0.clone(),
            lowest_region: lowest.0.clone(),
            highest_score: round2(highest.1),
            lowest_score: round2(lowest.1),
            regions_monitored: series.len(),
            total_samples_processed: series.iter().map(|s| s.total_samples).sum(),
        })
    }
}
