use wellpulse::Pipeline;

pub fn run(pipeline: &Pipeline, year: i32) -> anyhow::Result<()> {
    let stats = pipeline.national_stats(year)?;
    super::print_json(&stats)
}
