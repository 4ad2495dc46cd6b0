use wellpulse::Pipeline;

pub fn run(pipeline: &Pipeline) -> anyhow::Result<()> {
    super::print_json(&pipeline.region_list())
}
