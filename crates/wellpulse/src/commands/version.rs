pub fn run() -> anyhow::Result<()> {
    println!("wellpulse {}", env!("CARGO_PKG_VERSION"));
    println!("Regional mental-health sentiment monitoring");
    Ok(())
}
