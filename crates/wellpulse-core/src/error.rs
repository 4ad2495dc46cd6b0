//! Error taxonomy shared by every pipeline stage

/// Pipeline errors surfaced to callers as kind + message
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Region '{region}' not found. Available: {available}")]
    InvalidRegion { region: String, available: String },

    #[error("Year {year} outside supported range {min}-{max}")]
    InvalidYear { year: i32, min: i32, max: i32 },

    #[error("No data points to aggregate for {0}")]
    EmptySeries(String),

    #[error("Chart rendering failed: {0}")]
    Render(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Stable machine-readable code for this error
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidRegion { .. } => "invalid_region",
            Error::InvalidYear { .. } => "invalid_year",
            Error::EmptySeries(_) => "empty_series",
            Error::Render(_) => "render_error",
            Error::Config(_) => "config_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
