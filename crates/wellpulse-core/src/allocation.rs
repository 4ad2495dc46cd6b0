//! Trend classification and resource-allocation scoring

use crate::aggregate::round2;
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::types::{
    MonthlySeriesPoint, Priority, PriorityTier, RegionSeries, RegionSummary, ResourceTable, Trend,
};
use std::sync::Arc;

/// Improving when the second half's mean strictly exceeds the first half's.
///
/// For odd lengths the middle point belongs to the second half. Fewer than
/// two points is `Declining`.
pub fn classify_trend(points: &[MonthlySeriesPoint]) -> Trend {
    if points.len() < 2 {
        return Trend::Declining;
    }
    let half = points.len() / 2;
    let mean = |ps: &[MonthlySeriesPoint]| {
        ps.iter().map(|p| p.avg_sentiment).sum::<f64>() / ps.len() as f64
    };
    if mean(&points[half..]) > mean(&points[..half]) {
        Trend::Improving
    } else {
        Trend::Declining
    }
}

/// Turns a region's series into a priority and resource recommendation
#[derive(Debug, Clone)]
pub struct AllocationEngine {
    config: Arc<AppConfig>,
}

impl AllocationEngine {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Bounded need score; never decreases as `avg_sentiment` decreases
    pub fn allocation_score(&self, avg_sentiment: f64, trend: Trend, active_programs: u32) -> f64 {
        let policy = &self.config.allocation;

        let need = (100.0 - avg_sentiment.clamp(0.0, 100.0)) * policy.sentiment_weight;
        let trend_term = match trend {
            Trend::Declining => policy.declining_weight,
            Trend::Improving => 0.0,
        };
        let capacity = policy.program_capacity.max(1);
        let coverage = active_programs.min(capacity) as f64 / capacity as f64;
        let program_term = policy.program_weight * (1.0 - coverage);

        round2((need + trend_term + program_term).clamp(0.0, 100.0))
    }

    pub fn priority(&self, allocation_score: f64, trend: Trend) -> Priority {
        let policy = &self.config.allocation;
        Priority {
            tier: PriorityTier::from_score(
                allocation_score,
                policy.high_threshold,
                policy.medium_threshold,
            ),
            indicator: trend.into(),
        }
    }

    pub fn recommended_counselors(&self, allocation_score: f64) -> u32 {
        let policy = &self.config.allocation;
        let score = allocation_score.clamp(0.0, 100.0);
        (policy.counselor_base + score * policy.counselors_per_point)
            .round()
            .max(0.0) as u32
    }

    pub fn budget_allocation_pct(&self, allocation_score: f64) -> f64 {
        let policy = &self.config.allocation;
        let score = allocation_score.clamp(0.0, 100.0);
        let pct = policy.budget_base_pct + score * policy.budget_pct_per_point;
        ((pct * 10.0).round() / 10.0).max(0.0)
    }

    /// Allocation row for one region's series
    pub fn summarize(&self, series: &RegionSeries) -> Result<RegionSummary> {
        let profile = self
            .config
            .regions
            .profile(&series.region)
            .ok_or_else(|| Error::InvalidRegion {
                region: series.region.to_string(),
                available: self.config.regions.names().join(", "),
            })?;

        let avg_sentiment = series.avg_sentiment.ok_or_else(|| {
            Error::EmptySeries(format!("{} in {}", series.region, series.year))
        })?;

        let trend = classify_trend(&series.points);
        let allocation_score = self.allocation_score(avg_sentiment, trend, profile.active_programs);

        tracing::debug!(
            region = %series.region,
            avg_sentiment,
            trend = trend.as_str(),
            allocation_score,
            "scored region"
        );

        Ok(RegionSummary {
            region: series.region.clone(),
            avg_sentiment,
            trend,
            priority: self.priority(allocation_score, trend),
            allocation_score,
            recommended_counselors: self.recommended_counselors(allocation_score),
            active_programs: profile.active_programs,
            budget_allocation_pct: self.budget_allocation_pct(allocation_score),
            samples_analyzed: series.total_samples,
        })
    }

    /// Rows sorted by allocation score, most need first
    pub fn resource_table(&self, year: i32, series: &[RegionSeries]) -> Result<ResourceTable> {
        let mut resources = series
            .iter()
            .map(|s| self.summarize(s))
            .collect::<Result<Vec<_>>>()?;

        resources.sort_by(|a, b| {
            b.allocation_score
                .partial_cmp(&a.allocation_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let total_counselors_needed = resources.iter().map(|r| r.recommended_counselors).sum();
        let total_budget_pct_allocated =
            round2(resources.iter().map(|r| r.budget_allocation_pct).sum());

        Ok(ResourceTable {
            year,
            resources,
            total_counselors_needed,
            total_budget_pct_allocated,
        })
    }
}
