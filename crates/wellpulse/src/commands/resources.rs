use wellpulse::Pipeline;

pub fn run(pipeline: &Pipeline, region: &str, year: i32) -> anyhow::Result<()> {
    let regions = pipeline.parse_regions(region)?;
    let table = pipeline.resources(&regions, year)?;
    super::print_json(&table)
}
