//! Facade wiring generator, cache, scorer, aggregator, allocation and charts

use crate::cache::CorpusCache;
use crate::report::{MultiRegionReport, RegionList, RegionReport, SentimentReport, SeriesByRegion};
use std::sync::Arc;
use wellpulse_chart::{ChartKind, ChartRenderer};
use wellpulse_core::{
    classify_trend, Aggregator, AllocationEngine, AppConfig, Error, NationalStats, Region,
    RegionSeries, ResourceTable, Result, Sample, ScorerVariant, SentimentScorer,
};
use wellpulse_corpus::CorpusGenerator;
use wellpulse_nlp::select_scorer;

/// Every public entry point validates region and year before any work
/// starts, so a bad request never yields partial output.
pub struct Pipeline {
    config: Arc<AppConfig>,
    generator: CorpusGenerator,
    cache: CorpusCache,
    aggregator: Aggregator,
    allocation: AllocationEngine,
    renderer: ChartRenderer,
    capability_available: bool,
}

impl Pipeline {
    /// Build with the scorer picked from the available capabilities
    pub fn new(config: Arc<AppConfig>) -> Self {
        let selection = select_scorer(&config);
        Self::with_scorer(config, selection.scorer, selection.capability_available)
    }

    pub fn with_scorer(
        config: Arc<AppConfig>,
        scorer: Arc<dyn SentimentScorer>,
        capability_available: bool,
    ) -> Self {
        Self {
            generator: CorpusGenerator::new(Arc::clone(&config)),
            cache: CorpusCache::new(),
            aggregator: Aggregator::new(scorer),
            allocation: AllocationEngine::new(Arc::clone(&config)),
            renderer: ChartRenderer::new(Arc::clone(&config)),
            capability_available,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cache(&self) -> &CorpusCache {
        &self.cache
    }

    pub fn capability_available(&self) -> bool {
        self.capability_available
    }

    pub fn variant(&self) -> ScorerVariant {
        self.aggregator.variant()
    }

    pub fn default_year(&self) -> i32 {
        self.config.years.default
    }

    pub fn regions(&self) -> Vec<Region> {
        self.config.regions.regions()
    }

    pub fn region_list(&self) -> RegionList {
        let regions = self.regions();
        RegionList {
            total: regions.len(),
            regions,
        }
    }

    /// `"all"` or a comma-separated list of region names
    pub fn parse_regions(&self, param: &str) -> Result<Vec<Region>> {
        self.config.regions.parse_list(param)
    }

    fn check(&self, regions: &[Region], year: i32) -> Result<()> {
        self.config.years.check(year)?;
        for region in regions {
            self.config.regions.check(region)?;
        }
        Ok(())
    }

    fn samples(&self, region: &Region, year: i32) -> Result<Arc<Vec<Sample>>> {
        self.cache
            .get_or_populate(region, year, || self.generator.generate_year(region, year))
    }

    fn series(&self, region: &Region, year: i32) -> Result<RegionSeries> {
        let samples = self.samples(region, year)?;
        Ok(self.aggregator.run(region, year, &samples))
    }

    pub fn monthly_series(&self, region: &Region, year: i32) -> Result<RegionSeries> {
        self.check(std::slice::from_ref(region), year)?;
        self.series(region, year)
    }

    /// Series for each requested region, in the order requested
    pub fn series_for(&self, regions: &[Region], year: i32) -> Result<Vec<RegionSeries>> {
        self.check(regions, year)?;
        regions.iter().map(|r| self.series(r, year)).collect()
    }

    /// Series for every region, in enumeration order
    pub fn all_monthly_series(&self, year: i32) -> Result<Vec<RegionSeries>> {
        self.series_for(&self.regions(), year)
    }

    pub fn national_stats(&self, year: i32) -> Result<NationalStats> {
        let series = self.all_monthly_series(year)?;
        let stats = self.aggregator.national_stats(year, &series)?;
        tracing::info!(
            year,
            national_avg = stats.national_avg_sentiment,
            samples = stats.total_samples_processed,
            "computed national stats"
        );
        Ok(stats)
    }

    pub fn resources(&self, regions: &[Region], year: i32) -> Result<ResourceTable> {
        let series = self.series_for(regions, year)?;
        self.allocation.resource_table(year, &series)
    }

    /// Monthly series for one region, or a region-keyed map when `param`
    /// is `"all"` or names several regions
    pub fn sentiment_report(&self, param: &str, year: i32) -> Result<SentimentReport> {
        let regions = self.parse_regions(param)?;
        let all = param.trim().eq_ignore_ascii_case("all");

        match regions.as_slice() {
            [region] if !all => {
                let series = self.monthly_series(region, year)?;
                let overall_avg = series.avg_sentiment.ok_or_else(|| {
                    Error::EmptySeries(format!("{} in {}", series.region, year))
                })?;
                Ok(SentimentReport::Region(RegionReport {
                    region: series.region.clone(),
                    year,
                    trend_direction: classify_trend(&series.points),
                    overall_avg,
                    total_samples: series.total_samples,
                    monthly_data: series.points,
                    enhanced_scorer_available: self.capability_available,
                }))
            }
            _ => {
                let series = self.series_for(&regions, year)?;
                Ok(SentimentReport::Regions(MultiRegionReport {
                    year,
                    message: format!("Data for {} regions", series.len()),
                    regions: SeriesByRegion(series),
                }))
            }
        }
    }

    pub fn trend_chart(&self, regions: &[Region], year: i32) -> Result<Vec<u8>> {
        let series = self.series_for(regions, year)?;
        Ok(self.renderer.render_trend(year, &series)?)
    }

    /// Bars for every region in the set
    pub fn comparison_chart(&self, year: i32) -> Result<Vec<u8>> {
        let series = self.all_monthly_series(year)?;
        Ok(self.renderer.render_comparison(year, &series)?)
    }

    /// Comparison charts always draw every region, but the requested set is
    /// still validated
    pub fn chart(&self, kind: ChartKind, regions: &[Region], year: i32) -> Result<Vec<u8>> {
        match kind {
            ChartKind::Trend => self.trend_chart(regions, year),
            ChartKind::Comparison => {
                self.check(regions, year)?;
                self.comparison_chart(year)
            }
        }
    }

    /// Populate the cache for every region in `year`
    pub fn warm(&self, year: i32) -> Result<()> {
        let regions = self.regions();
        self.check(&regions, year)?;
        for region in &regions {
            self.samples(region, year)?;
        }
        tracing::info!(year, regions = regions.len(), "corpus cache warmed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellpulse_core::RegionProfile;

    fn small_pipeline() -> Pipeline {
        let mut config = AppConfig::with_regions(vec![
            RegionProfile::new("North", 0.6, 4),
            RegionProfile::new("South", 0.4, 4),
        ]);
        config.corpus.samples_per_month = 5;
        Pipeline::new(Arc::new(config))
    }

    #[test]
    fn test_invalid_year_fails_before_generation() {
        let pipeline = small_pipeline();
        let err = pipeline
            .monthly_series(&Region::new("North"), 1990)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_year");
        assert!(pipeline.cache().is_empty());
    }

    #[test]
    fn test_unknown_region_fails_before_generation() {
        let pipeline = small_pipeline();
        let regions = vec![Region::new("North"), Region::new("Atlantis")];
        let err = pipeline.resources(&regions, 2024).unwrap_err();
        assert_eq!(err.kind(), "invalid_region");
        assert!(pipeline.cache().is_empty());
    }

    #[test]
    fn test_comparison_chart_rejects_unknown_region() {
        let pipeline = small_pipeline();
        let regions = vec![Region::new("Atlantis")];
        let err = pipeline
            .chart(ChartKind::Comparison, &regions, 2024)
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_region");
        assert!(pipeline.cache().is_empty());

        let png = pipeline
            .chart(ChartKind::Comparison, &[Region::new("North")], 2024)
            .unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
        assert_eq!(pipeline.cache().len(), 2);
    }

    #[test]
    fn test_warm_populates_every_region() {
        let pipeline = small_pipeline();
        pipeline.warm(2024).unwrap();
        assert_eq!(pipeline.cache().len(), 2);
    }

    #[test]
    fn test_sentiment_report_shapes() {
        let pipeline = small_pipeline();
        match pipeline.sentiment_report("North", 2024).unwrap() {
            SentimentReport::Region(report) => {
                assert_eq!(report.monthly_data.len(), 12);
                assert_eq!(report.total_samples, 60);
            }
            other => panic!("expected single region report, got {:?}", other),
        }
        match pipeline.sentiment_report("all", 2024).unwrap() {
            SentimentReport::Regions(report) => assert_eq!(report.regions.0.len(), 2),
            other => panic!("expected multi region report, got {:?}", other),
        }
    }

    #[test]
    fn test_region_list() {
        let list = small_pipeline().region_list();
        assert_eq!(list.total, 2);
        assert_eq!(list.regions[0].as_str(), "North");
    }
}
