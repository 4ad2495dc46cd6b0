//! HTTP API routes

use crate::api::error::ApiError;
use crate::pipeline::Pipeline;
use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use wellpulse_chart::ChartKind;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<Pipeline>) -> Self {
        Self { pipeline }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/regions", get(list_regions))
        .route("/api/sentiment", get(sentiment))
        .route("/api/stats", get(stats))
        .route("/api/resources", get(resources))
        .route("/api/chart", get(chart))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
pub struct PipelineQuery {
    region: Option<String>,
    year: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl PipelineQuery {
    fn year(&self, default: i32) -> Result<i32, ApiError> {
        match self.year.as_deref().map(str::trim) {
            None | Some("") => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|_| ApiError::BadRequest(format!("year must be an integer, got '{}'", raw))),
        }
    }

    fn region_or(&self, default: impl FnOnce() -> String) -> String {
        match self.region.as_deref().map(str::trim) {
            Some(region) if !region.is_empty() => region.to_string(),
            _ => default(),
        }
    }

    fn kind(&self) -> Result<ChartKind, ApiError> {
        match self.kind.as_deref() {
            None => Ok(ChartKind::default()),
            Some(raw) => ChartKind::parse(raw).ok_or_else(|| {
                ApiError::BadRequest(format!(
                    "chart type must be 'trend' or 'comparison', got '{}'",
                    raw
                ))
            }),
        }
    }
}

fn first_region(pipeline: &Pipeline) -> String {
    pipeline
        .regions()
        .first()
        .map(|r| r.to_string())
        .unwrap_or_else(|| "all".to_string())
}

/// Run CPU-bound pipeline work off the async workers
async fn run_blocking<T, F>(state: &AppState, work: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Pipeline) -> wellpulse_core::Result<T> + Send + 'static,
{
    let pipeline = Arc::clone(&state.pipeline);
    let result = tokio::task::spawn_blocking(move || work(&pipeline))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(result?)
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "wellpulse",
        "version": env!("CARGO_PKG_VERSION"),
        "scorer": state.pipeline.variant(),
        "enhanced_scorer_available": state.pipeline.capability_available(),
    }))
}

async fn list_regions(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.pipeline.region_list())
}

async fn sentiment(
    State(state): State<AppState>,
    Query(query): Query<PipelineQuery>,
) -> Result<Response, ApiError> {
    let year = query.year(state.pipeline.default_year())?;
    let param = query.region_or(|| first_region(&state.pipeline));
    let report = run_blocking(&state, move |p| p.sentiment_report(&param, year)).await?;
    Ok(Json(report).into_response())
}

async fn stats(
    State(state): State<AppState>,
    Query(query): Query<PipelineQuery>,
) -> Result<Response, ApiError> {
    let year = query.year(state.pipeline.default_year())?;
    let stats = run_blocking(&state, move |p| p.national_stats(year)).await?;
    Ok(Json(stats).into_response())
}

async fn resources(
    State(state): State<AppState>,
    Query(query): Query<PipelineQuery>,
) -> Result<Response, ApiError> {
    let year = query.year(state.pipeline.default_year())?;
    let param = query.region_or(|| "all".to_string());
    let table = run_blocking(&state, move |p| {
        let regions = p.parse_regions(&param)?;
        p.resources(&regions, year)
    })
    .await?;
    Ok(Json(table).into_response())
}

async fn chart(
    State(state): State<AppState>,
    Query(query): Query<PipelineQuery>,
) -> Result<Response, ApiError> {
    let year = query.year(state.pipeline.default_year())?;
    let kind = query.kind()?;
    let param = query.region_or(|| first_region(&state.pipeline));

    let png = run_blocking(&state, move |p| {
        let regions = p.parse_regions(&param)?;
        p.chart(kind, &regions, year)
    })
    .await?;

    let disposition = format!("inline; filename=\"{}_chart.png\"", kind.as_str());
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        png,
    )
        .into_response())
}
