//! Core types for the sentiment pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Region identifier, the partition key for every aggregation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Region {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Polarity of the template a sample was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentHint {
    Positive,
    Neutral,
    Negative,
}

/// One synthetic, anonymized text unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    pub region: Region,
    pub year: i32,
    /// 1-12
    pub month: u32,
    pub text: String,
    pub sentiment_hint: SentimentHint,
}

/// Which scorer produced a sentiment value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerVariant {
    /// Lexicon polarity with a fixed look-back negation window
    Lexicon,
    /// Lexicon polarity with tokenizer-derived negation scopes
    NegationAware,
}

/// Scorer output for one text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Normalized polarity in [-1, 1]
    pub compound: f64,
    /// Compound rescaled to [0, 100]
    pub score: f64,
    /// Share of positive lexical mass (0-100)
    pub positive: f64,
    /// Share of negative lexical mass (0-100)
    pub negative: f64,
    /// Share of tokens with no polarity (0-100)
    pub neutral: f64,
    pub token_count: usize,
    /// Whether a negation cue affected the result
    pub negated: bool,
}

impl Sentiment {
    /// Result for empty or unparseable text
    pub fn neutral() -> Self {
        Self {
            compound: 0.0,
            score: 50.0,
            positive: 0.0,
            negative: 0.0,
            neutral: 100.0,
            token_count: 0,
            negated: false,
        }
    }
}

/// A sample plus its sentiment; never mutated after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSample {
    #[serde(flatten)]
    pub sample: Sample,
    /// Always within [0, 100]
    pub sentiment: f64,
    pub compound: f64,
    pub variant: ScorerVariant,
}

/// Mean sentiment of one region in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeriesPoint {
    pub region: Region,
    pub year: i32,
    pub month: u32,
    /// e.g. "Jan 2024"
    pub month_label: String,
    pub avg_sentiment: f64,
    pub std_dev: f64,
    pub sample_count: usize,
    pub min_score: f64,
    pub max_score: f64,
}

/// Ordered monthly series for one region and year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSeries {
    pub region: Region,
    pub year: i32,
    /// Month ascending, months without samples omitted
    pub points: Vec<MonthlySeriesPoint>,
    /// Mean of the monthly means; `None` when there are no points
    pub avg_sentiment: Option<f64>,
    pub total_samples: usize,
}

impl RegionSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Binary trajectory classification over a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Declining => "declining",
        }
    }
}

/// Priority tier derived from the allocation score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriorityTier {
    Low,
    Medium,
    High,
}

impl PriorityTier {
    pub fn from_score(score: f64, high: f64, medium: f64) -> Self {
        if score >= high {
            PriorityTier::High
        } else if score >= medium {
            PriorityTier::Medium
        } else {
            PriorityTier::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::High => "High",
            PriorityTier::Medium => "Medium",
            PriorityTier::Low => "Low",
        }
    }
}

/// Direction badge shown next to the tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    /// Need is rising (declining sentiment)
    Up,
    /// Need is easing (improving sentiment)
    Down,
}

impl From<Trend> for Indicator {
    fn from(trend: Trend) -> Self {
        match trend {
            Trend::Declining => Indicator::Up,
            Trend::Improving => Indicator::Down,
        }
    }
}

/// Tier plus direction, serialized as a badge label like "↑ High"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub struct Priority {
    pub tier: PriorityTier,
    pub indicator: Indicator,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = match self.indicator {
            Indicator::Up => '↑',
            Indicator::Down => '↓',
        };
        write!(f, "{} {}", arrow, self.tier.as_str())
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.to_string()
    }
}

/// Resource-allocation row for one region and year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionSummary {
    pub region: Region,
    pub avg_sentiment: f64,
    pub trend: Trend,
    pub priority: Priority,
    /// Within [0, 100]; higher means more need
    pub allocation_score: f64,
    pub recommended_counselors: u32,
    pub active_programs: u32,
    /// Advisory share, not normalized across regions
    pub budget_allocation_pct: f64,
    pub samples_analyzed: usize,
}

/// Allocation rows for a set of regions, most need first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceTable {
    pub year: i32,
    pub resources: Vec<RegionSummary>,
    pub total_counselors_needed: u32,
    pub total_budget_pct_allocated: f64,
}

/// Summary across all regions for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalStats {
    pub year: i32,
    pub national_avg_sentiment: f64,
    pub highest_region: Region,
    pub lowest_region: Region,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub regions_monitored: usize,
    pub total_samples_processed: usize,
}
