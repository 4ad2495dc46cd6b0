//! Response shapes shared by the HTTP routes and the CLI

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use wellpulse_core::{MonthlySeriesPoint, Region, RegionSeries, Trend};

/// The enumerated region set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionList {
    pub regions: Vec<Region>,
    pub total: usize,
}

/// Monthly series and summary for a single region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionReport {
    pub region: Region,
    pub year: i32,
    pub monthly_data: Vec<MonthlySeriesPoint>,
    pub overall_avg: f64,
    pub trend_direction: Trend,
    pub total_samples: usize,
    pub enhanced_scorer_available: bool,
}

/// Series keyed by region name, serialized in the order given
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesByRegion(pub Vec<RegionSeries>);

impl Serialize for SeriesByRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for series in &self.0 {
            map.serialize_entry(series.region.as_str(), &series.points)?;
        }
        map.end()
    }
}

/// Monthly series for several regions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiRegionReport {
    pub year: i32,
    pub regions: SeriesByRegion,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SentimentReport {
    Region(RegionReport),
    Regions(MultiRegionReport),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(name: &str) -> RegionSeries {
        RegionSeries {
            region: Region::new(name),
            year: 2024,
            points: Vec::new(),
            avg_sentiment: None,
            total_samples: 0,
        }
    }

    #[test]
    fn test_series_keep_given_order() {
        let report = MultiRegionReport {
            year: 2024,
            regions: SeriesByRegion(vec![series("West Coast"), series("Midwest"), series("Alpha")]),
            message: "Data for all 3 regions".to_string(),
        };
        let json = serde_json::to_string(&report).unwrap();
        let west = json.find("West Coast").unwrap();
        let midwest = json.find("Midwest").unwrap();
        let alpha = json.find("Alpha").unwrap();
        assert!(west < midwest && midwest < alpha);
    }

    #[test]
    fn test_single_region_shape() {
        let report = SentimentReport::Region(RegionReport {
            region: Region::new("Midwest"),
            year: 2024,
            monthly_data: Vec::new(),
            overall_avg: 51.2,
            trend_direction: Trend::Improving,
            total_samples: 360,
            enhanced_scorer_available: true,
        });
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["region"], "Midwest");
        assert_eq!(json["trend_direction"], "improving");
        assert_eq!(json["enhanced_scorer_available"], true);
    }
}
