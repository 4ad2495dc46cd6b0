//! Process-wide configuration, built once at startup and shared read-only

use crate::error::{Error, Result};
use crate::types::Region;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One monitored region and its simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionProfile {
    pub name: String,
    /// Positive tendency of generated text (0 = very negative, 1 = very positive)
    #[serde(default = "default_bias")]
    pub bias: f64,
    /// Simulated count of programs already running in the region
    #[serde(default)]
    pub active_programs: u32,
}

fn default_bias() -> f64 {
    0.5
}

impl RegionProfile {
    pub fn new(name: &str, bias: f64, active_programs: u32) -> Self {
        Self {
            name: name.to_string(),
            bias,
            active_programs,
        }
    }
}

/// The enumerated region set; order is the enumeration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionSet {
    profiles: Vec<RegionProfile>,
}

impl RegionSet {
    pub fn new(profiles: Vec<RegionProfile>) -> Self {
        Self { profiles }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn profiles(&self) -> &[RegionProfile] {
        &self.profiles
    }

    /// All regions in enumeration order
    pub fn regions(&self) -> Vec<Region> {
        self.profiles.iter().map(|p| Region::new(&p.name)).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn position(&self, region: &Region) -> Option<usize> {
        self.profiles.iter().position(|p| p.name == region.as_str())
    }

    pub fn profile(&self, region: &Region) -> Option<&RegionProfile> {
        self.profiles.iter().find(|p| p.name == region.as_str())
    }

    pub fn contains(&self, region: &Region) -> bool {
        self.position(region).is_some()
    }

    /// Resolve one region name, tolerating surrounding whitespace
    pub fn resolve(&self, name: &str) -> Result<Region> {
        let name = name.trim();
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .map(|p| Region::new(&p.name))
            .ok_or_else(|| self.invalid(name))
    }

    /// Fail with `InvalidRegion` unless `region` belongs to the set
    pub fn check(&self, region: &Region) -> Result<()> {
        if self.contains(region) {
            Ok(())
        } else {
            Err(self.invalid(region.as_str()))
        }
    }

    /// Parse `"all"` or a comma-separated region list.
    ///
    /// Any unknown name rejects the whole list. Duplicates keep their first
    /// position; empty entries are ignored.
    pub fn parse_list(&self, param: &str) -> Result<Vec<Region>> {
        if param.trim().eq_ignore_ascii_case("all") {
            return Ok(self.regions());
        }

        let mut selected: Vec<Region> = Vec::new();
        for name in param.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let region = self.resolve(name)?;
            if !selected.contains(&region) {
                selected.push(region);
            }
        }

        if selected.is_empty() {
            return Err(self.invalid(param.trim()));
        }
        Ok(selected)
    }

    fn invalid(&self, name: &str) -> Error {
        Error::InvalidRegion {
            region: name.to_string(),
            available: self.names().join(", "),
        }
    }
}

impl Default for RegionSet {
    fn default() -> Self {
        Self::new(vec![
            RegionProfile::new("Northeast", 0.55, 9),
            RegionProfile::new("Southeast", 0.45, 5),
            RegionProfile::new("Midwest", 0.50, 7),
            RegionProfile::new("Southwest", 0.48, 4),
            RegionProfile::new("West Coast", 0.60, 11),
            RegionProfile::new("Pacific Northwest", 0.57, 8),
        ])
    }
}

/// Supported query years (inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
    /// Year used when a query does not name one
    pub default: i32,
}

impl YearRange {
    pub fn check(&self, year: i32) -> Result<i32> {
        if (self.min..=self.max).contains(&year) {
            Ok(year)
        } else {
            Err(Error::InvalidYear {
                year,
                min: self.min,
                max: self.max,
            })
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: 2015,
            max: chrono::Utc::now().year() + 1,
            default: 2024,
        }
    }
}

/// Corpus generation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    pub samples_per_month: usize,
    /// Mixed into every per-(region, month, year) seed
    pub seed: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            samples_per_month: 30,
            seed: 0x5EED_2024,
        }
    }
}

/// Scorer selection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Use the negation-aware scorer when the tokenizer is available
    pub enhanced: bool,
    /// Extra negation cues on top of the built-in list
    pub extra_negations: Vec<String>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            enhanced: true,
            extra_negations: Vec::new(),
        }
    }
}

/// Weights and thresholds for the allocation score.
///
/// `score = sentiment_weight * (100 - avg) + declining_weight * [declining]
///        + program_weight * (1 - min(programs, capacity) / capacity)`,
/// clamped to [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationPolicy {
    pub sentiment_weight: f64,
    pub declining_weight: f64,
    pub program_weight: f64,
    pub program_capacity: u32,
    /// HIGH tier (>= this)
    pub high_threshold: f64,
    /// MEDIUM tier (>= this)
    pub medium_threshold: f64,
    pub counselor_base: f64,
    pub counselors_per_point: f64,
    pub budget_base_pct: f64,
    pub budget_pct_per_point: f64,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            sentiment_weight: 1.2,
            declining_weight: 15.0,
            program_weight: 15.0,
            program_capacity: 12,
            high_threshold: 75.0,
            medium_threshold: 60.0,
            counselor_base: 20.0,
            counselors_per_point: 0.7,
            budget_base_pct: 4.0,
            budget_pct_per_point: 0.16,
        }
    }
}

/// Canvas sizes in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub trend_width: u32,
    pub trend_height: u32,
    pub comparison_width: u32,
    pub comparison_height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            trend_width: 900,
            trend_height: 420,
            comparison_width: 800,
            comparison_height: 380,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub regions: RegionSet,
    pub years: YearRange,
    pub corpus: CorpusConfig,
    pub scorer: ScorerConfig,
    pub allocation: AllocationPolicy,
    pub chart: ChartConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config with a custom region set and every other section defaulted
    pub fn with_regions(profiles: Vec<RegionProfile>) -> Self {
        Self {
            regions: RegionSet::new(profiles),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    /// Load from `path` if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            return Err(Error::Config("region set is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for profile in self.regions.profiles() {
            if profile.name.trim().is_empty() || profile.name.contains(',') {
                return Err(Error::Config(format!(
                    "invalid region name '{}'",
                    profile.name
                )));
            }
            if !seen.insert(profile.name.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate region '{}'",
                    profile.name
                )));
            }
            if !(0.0..=1.0).contains(&profile.bias) {
                return Err(Error::Config(format!(
                    "bias for '{}' must be within [0, 1]",
                    profile.name
                )));
            }
        }

        if self.years.min > self.years.max {
            return Err(Error::Config(format!(
                "year range {}-{} is inverted",
                self.years.min, self.years.max
            )));
        }
        if !(self.years.min..=self.years.max).contains(&self.years.default) {
            return Err(Error::Config(format!(
                "default year {} is outside {}-{}",
                self.years.default, self.years.min, self.years.max
            )));
        }
        if self.corpus.samples_per_month == 0 {
            return Err(Error::Config(
                "samples_per_month must be at least 1".to_string(),
            ));
        }

        let policy = &self.allocation;
        if policy.medium_threshold > policy.high_threshold {
            return Err(Error::Config(
                "medium_threshold must not exceed high_threshold".to_string(),
            ));
        }
        if policy.program_capacity == 0 {
            return Err(Error::Config(
                "program_capacity must be at least 1".to_string(),
            ));
        }
        let weights = [
            policy.sentiment_weight,
            policy.declining_weight,
            policy.program_weight,
            policy.counselors_per_point,
            policy.budget_pct_per_point,
        ];
        if weights.iter().any(|w| *w < 0.0 || !w.is_finite()) {
            return Err(Error::Config(
                "allocation weights must be finite and non-negative".to_string(),
            ));
        }
        if policy.counselor_base < 0.0 || policy.budget_base_pct < 0.0 {
            return Err(Error::Config(
                "allocation bases must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.regions.len(), 6);
        assert_eq!(config.regions.names()[0], "Northeast");
        assert_eq!(config.corpus.samples_per_month, 30);
        assert_eq!(config.allocation.high_threshold, 75.0);
        assert_eq!(config.allocation.medium_threshold, 60.0);
        assert!(config.scorer.enhanced);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_list_tolerates_spaces() {
        let regions = RegionSet::default();
        let parsed = regions.parse_list("Northeast, West Coast ,Midwest").unwrap();
        let names: Vec<_> = parsed.iter().map(|r| r.as_str()).collect();
        assert_eq!(names, vec!["Northeast", "West Coast", "Midwest"]);
    }

    #[test]
    fn test_parse_list_all() {
        let regions = RegionSet::default();
        assert_eq!(regions.parse_list("all").unwrap().len(), 6);
        assert_eq!(regions.parse_list(" ALL ").unwrap().len(), 6);
    }

    #[test]
    fn test_parse_list_rejects_unknown() {
        let regions = RegionSet::default();
        let err = regions.parse_list("Northeast,Atlantis").unwrap_err();
        assert_eq!(err.kind(), "invalid_region");
        assert!(err.to_string().contains("Atlantis"));

        assert!(regions.parse_list(" , ").is_err());
    }

    #[test]
    fn test_parse_list_dedupes() {
        let regions = RegionSet::default();
        let parsed = regions.parse_list("Midwest,Midwest").unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_year_range() {
        let years = YearRange::default();
        assert_eq!(years.check(2024).unwrap(), 2024);
        assert_eq!(years.check(1999).unwrap_err().kind(), "invalid_year");
        assert!(years.check(3000).is_err());
    }

    #[test]
    fn test_partial_json_config() {
        let json = r#"{
            "regions": [
                {"name": "North", "bias": 0.6, "active_programs": 4},
                {"name": "South", "active_programs": 4}
            ],
            "corpus": {"samples_per_month": 5}
        }"#;
        let config = AppConfig::from_json_str(json).unwrap();
        assert_eq!(config.regions.names(), vec!["North", "South"]);
        assert_eq!(config.regions.profiles()[1].bias, 0.5);
        assert_eq!(config.corpus.samples_per_month, 5);
        assert_eq!(config.corpus.seed, CorpusConfig::default().seed);
        assert_eq!(config.allocation, AllocationPolicy::default());
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let config = AppConfig::with_regions(vec![]);
        assert!(config.validate().is_err());

        let config = AppConfig::with_regions(vec![
            RegionProfile::new("North", 0.5, 1),
            RegionProfile::new("North", 0.5, 1),
        ]);
        assert!(config.validate().is_err());

        let mut config = AppConfig::new();
        config.corpus.samples_per_month = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::new();
        config.allocation.medium_threshold = 90.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::new();
        config.years.default = 2014;
        assert!(config.validate().is_err());

        let err = AppConfig::from_json_str(r#"{"years":{"min":2025}}"#).unwrap_err();
        assert_eq!(err.kind(), "config_error");
        assert!(err.to_string().contains("default year 2024"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("wellpulse.json");
        std::fs::write(&path, r#"{"server": {"bind": "0.0.0.0:8080"}}"#).unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.regions.len(), 6);

        let missing = AppConfig::load(Some(&dir.path().join("missing.json")));
        assert_eq!(missing.unwrap_err().kind(), "config_error");
    }
}
