use std::path::Path;
use wellpulse::Pipeline;
use wellpulse_chart::ChartKind;

pub fn run(pipeline: &Pipeline, region: &str, year: i32, kind: &str, out: &Path) -> anyhow::Result<()> {
    let kind = ChartKind::parse(kind)
        .ok_or_else(|| anyhow::anyhow!("unknown chart kind '{}': use trend or comparison", kind))?;
    let regions = pipeline.parse_regions(region)?;

    let png = pipeline.chart(kind, &regions, year)?;
    atomic_write(out, &png)?;

    tracing::info!(path = %out.display(), bytes = png.len(), kind = kind.as_str(), "chart written");
    println!("{}", out.display());
    Ok(())
}

/// Write data atomically using temp file + rename
fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("png.tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use wellpulse_core::{AppConfig, RegionProfile};

    fn pipeline() -> Pipeline {
        let mut config = AppConfig::with_regions(vec![
            RegionProfile::new("North", 0.6, 4),
            RegionProfile::new("South", 0.4, 4),
        ]);
        config.corpus.samples_per_month = 4;
        Pipeline::new(Arc::new(config))
    }

    #[test]
    fn test_atomic_write_creates_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("chart.png");
        atomic_write(&path, b"png").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"png");
        assert!(!path.with_extension("png.tmp").exists());
    }

    #[test]
    fn test_writes_trend_chart() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("trend.png");
        run(&pipeline(), "North", 2024, "trend", &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_rejects_unknown_kind_and_region() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("chart.png");
        assert!(run(&pipeline(), "North", 2024, "pie", &path).is_err());
        assert!(run(&pipeline(), "Atlantis", 2024, "trend", &path).is_err());
        assert!(run(&pipeline(), "Atlantis", 2024, "comparison", &path).is_err());
        assert!(!path.exists());
    }
}
