use std::sync::Arc;
use wellpulse::Pipeline;

pub fn run(pipeline: Arc<Pipeline>, bind: Option<&str>, warm: bool) -> anyhow::Result<()> {
    let bind = bind
        .map(str::to_string)
        .unwrap_or_else(|| pipeline.config().server.bind.clone());

    tracing::info!(
        "WellPulse v{} (scorer: {:?}, enhanced available: {})",
        env!("CARGO_PKG_VERSION"),
        pipeline.variant(),
        pipeline.capability_available()
    );

    if warm {
        let started = std::time::Instant::now();
        pipeline.warm(pipeline.default_year())?;
        tracing::info!(
            duration_ms = started.elapsed().as_millis() as u64,
            "Corpus warm-up finished"
        );
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(wellpulse::api::serve(pipeline, &bind))
}
