//! Regional mental-health sentiment monitoring
//!
//! [`Pipeline`] ties the corpus generator, scorer, aggregator, allocation
//! engine and chart renderer together behind a per-(region, year) corpus
//! cache. [`api`] exposes it over HTTP.

pub mod api;
mod cache;
mod pipeline;
mod report;

pub use cache::CorpusCache;
pub use pipeline::Pipeline;
pub use report::{
    MultiRegionReport, RegionList, RegionReport, SentimentReport, SeriesByRegion,
};
