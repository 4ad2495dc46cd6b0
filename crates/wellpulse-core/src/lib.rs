//! Data model, configuration and aggregation for regional sentiment monitoring

mod aggregate;
mod allocation;
mod config;
mod error;
mod scorer;
mod types;

pub use aggregate::{round2, Aggregator};
pub use allocation::{classify_trend, AllocationEngine};
pub use config::{
    AllocationPolicy, AppConfig, ChartConfig, CorpusConfig, RegionProfile, RegionSet,
    ScorerConfig, ServerConfig, YearRange,
};
pub use error::{Error, Result};
pub use scorer::{rescale_compound, SentimentScorer};
pub use types::{
    Indicator, MonthlySeriesPoint, NationalStats, Priority, PriorityTier, Region, RegionSeries,
    RegionSummary, ResourceTable, Sample, ScoredSample, ScorerVariant, Sentiment, SentimentHint,
    Trend,
};
