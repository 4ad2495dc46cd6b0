mod common;

use common::small_pipeline;
use std::sync::Arc;
use std::thread;
use wellpulse::{CorpusCache, Pipeline};
use wellpulse_core::{classify_trend, AllocationEngine, AppConfig, Region, Trend};
use wellpulse_corpus::CorpusGenerator;
use wellpulse_nlp::select_scorer;

#[test]
fn test_every_generated_sample_scores_in_range() {
    let config = Arc::new(AppConfig::new());
    let generator = CorpusGenerator::new(Arc::clone(&config));
    let selection = select_scorer(&config);
    let aggregator = wellpulse_core::Aggregator::new(selection.scorer);

    for (_, samples) in generator.generate_all(2024).unwrap() {
        for scored in aggregator.score_samples(&samples) {
            assert!(
                (0.0..=100.0).contains(&scored.sentiment),
                "{} scored {}",
                scored.sample.id,
                scored.sentiment
            );
        }
    }
}

#[test]
fn test_national_extremes_bound_every_region() {
    let pipeline = Pipeline::new(Arc::new(AppConfig::new()));
    let series = pipeline.all_monthly_series(2024).unwrap();
    let stats = pipeline.national_stats(2024).unwrap();

    assert_eq!(stats.regions_monitored, 6);
    for s in &series {
        let avg = s.avg_sentiment.unwrap();
        assert!(stats.highest_score >= avg, "{} above highest", s.region);
        assert!(stats.lowest_score <= avg, "{} below lowest", s.region);
    }
}

#[test]
fn test_reduction_is_idempotent() {
    let pipeline = small_pipeline();
    let north = Region::new("North");
    let first = pipeline.monthly_series(&north, 2024).unwrap();
    let second = pipeline.monthly_series(&north, 2024).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_single_point_defaults_to_declining() {
    let pipeline = small_pipeline();
    let series = pipeline.monthly_series(&Region::new("North"), 2024).unwrap();
    assert_eq!(classify_trend(&series.points[..1]), Trend::Declining);
    assert_eq!(classify_trend(&[]), Trend::Declining);
}

#[test]
fn test_allocation_monotonic_in_sentiment() {
    let engine = AllocationEngine::new(Arc::new(AppConfig::new()));
    for trend in [Trend::Improving, Trend::Declining] {
        for programs in [0, 6, 12, 20] {
            let mut previous = f64::NEG_INFINITY;
            for step in (0..=100).rev() {
                let score = engine.allocation_score(step as f64, trend, programs);
                assert!(score >= previous, "avg {} programs {}", step, programs);
                assert!((0.0..=100.0).contains(&score));
                previous = score;
            }
        }
    }
}

#[test]
fn test_concurrent_requests_generate_once() {
    let pipeline = small_pipeline();
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || pipeline.monthly_series(&Region::new("South"), 2024).unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for r in &results[1..] {
        assert_eq!(r, &results[0]);
    }
    assert_eq!(pipeline.cache().len(), 1);
}

#[test]
fn test_cache_population_guard() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let cache = Arc::new(CorpusCache::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            thread::spawn(move || {
                cache
                    .get_or_populate(&Region::new("North"), 2024, || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(std::time::Duration::from_millis(20));
                        Ok(Vec::new())
                    })
                    .unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
