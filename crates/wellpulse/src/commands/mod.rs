pub mod chart;
pub mod regions;
pub mod resources;
pub mod sentiment;
pub mod serve;
pub mod stats;
pub mod version;

/// Pretty-print a result as JSON on stdout
pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
