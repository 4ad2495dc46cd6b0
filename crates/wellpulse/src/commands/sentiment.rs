use wellpulse::Pipeline;

pub fn run(pipeline: &Pipeline, region: &str, year: i32) -> anyhow::Result<()> {
    let report = pipeline.sentiment_report(region, year)?;
    super::print_json(&report)
}
