use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Local;
use nt_core::{CategoryCounts, LocationRequest, NewsArticle, RawReport, ReportPrompt};
use nt_inference::prompt;
use nt_parser::unwrap_report;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::AppState;

pub const API_NAME: &str = "Location-Based News API";
pub const API_VERSION: &str = "1.0.0";

/// Location used by the `/test-news` endpoints.
const FIXED_LOCATION: &str = "New York City";
const FIXED_COORDINATES: SearchArea = SearchArea {
    latitude: 40.7128,
    longitude: -74.0060,
    radius: 10.0,
};

const STATUS_SUCCESS: &str = "success";

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SearchArea {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,
}

impl From<&LocationRequest> for SearchArea {
    fn from(request: &LocationRequest) -> Self {
        Self {
            latitude: request.latitude,
            longitude: request.longitude,
            radius: request.radius,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub location_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<SearchArea>,
    pub article: String,
    pub generated_at: String,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StructuredNewsResponse {
    pub location_name: String,
    pub coordinates: SearchArea,
    pub news_articles: Vec<NewsArticle>,
    pub categories: CategoryCounts,
    pub total_articles: usize,
    pub generated_at: String,
    pub status: &'static str,
}

fn now() -> String {
    Local::now().to_rfc3339()
}

async fn resolve_location(state: &AppState, request: &LocationRequest) -> Result<String, ApiError> {
    request.validate()?;
    state
        .geocoder
        .reverse(request.coordinates())
        .await
        .ok_or(ApiError::LocationNotFound {
            latitude: request.latitude,
            longitude: request.longitude,
        })
}

async fn generate(state: &AppState, prompt: &ReportPrompt) -> Result<RawReport, ApiError> {
    let report = state.generator.generate(prompt).await?;
    Ok(report)
}

/// Archive failures are logged and otherwise ignored.
async fn archive(state: &AppState, label: &str, report: &RawReport) {
    if let Err(e) = state.archive.save(label, &report.to_string()).await {
        warn!("Error saving response to file: {}", e);
    }
}

fn structured_response(
    state: &AppState,
    location_name: String,
    coordinates: SearchArea,
    report: &RawReport,
    requested_categories: Option<&[String]>,
) -> StructuredNewsResponse {
    let text = unwrap_report(report);
    let parsed = state.parser.parse(&text, requested_categories);
    info!(
        "📰 Parsed {} articles for {}",
        parsed.total_articles, location_name
    );

    StructuredNewsResponse {
        location_name,
        coordinates,
        news_articles: parsed.articles,
        categories: parsed.categories,
        total_articles: parsed.total_articles,
        generated_at: now(),
        status: STATUS_SUCCESS,
    }
}

pub async fn location_news(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationRequest>,
) -> Result<Json<NewsResponse>, ApiError> {
    let location_name = resolve_location(&state, &request).await?;
    info!("🗺️ Building news report for {}", location_name);

    let report = generate(&state, &prompt::narrative_prompt(&location_name, &request)).await?;
    archive(&state, &location_name, &report).await;

    Ok(Json(NewsResponse {
        location_name,
        coordinates: Some(SearchArea::from(&request)),
        article: unwrap_report(&report),
        generated_at: now(),
        status: STATUS_SUCCESS,
    }))
}

pub async fn structured_location_news(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LocationRequest>,
) -> Result<Json<StructuredNewsResponse>, ApiError> {
    let location_name = resolve_location(&state, &request).await?;
    info!("🗺️ Building structured news report for {}", location_name);

    let report = generate(&state, &prompt::structured_prompt(&location_name, &request)).await?;
    let response = structured_response(
        &state,
        location_name,
        SearchArea::from(&request),
        &report,
        request.categories.as_deref(),
    );
    archive(&state, &format!("{}_structured", response.location_name), &report).await;

    Ok(Json(response))
}

pub async fn test_news(State(state): State<Arc<AppState>>) -> Result<Json<NewsResponse>, ApiError> {
    let report = generate(&state, &prompt::fixed_location_narrative_prompt(FIXED_LOCATION)).await?;
    archive(&state, FIXED_LOCATION, &report).await;

    Ok(Json(NewsResponse {
        location_name: FIXED_LOCATION.to_string(),
        coordinates: None,
        article: unwrap_report(&report),
        generated_at: now(),
        status: STATUS_SUCCESS,
    }))
}

pub async fn test_structured_news(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StructuredNewsResponse>, ApiError> {
    let report = generate(&state, &prompt::fixed_location_structured_prompt(FIXED_LOCATION)).await?;
    let response = structured_response(
        &state,
        FIXED_LOCATION.to_string(),
        FIXED_COORDINATES,
        &report,
        None,
    );
    archive(&state, &format!("{}_structured_test", FIXED_LOCATION), &report).await;

    Ok(Json(response))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": API_VERSION,
        "timestamp": now(),
        "components": {
            "report_generator": "active",
            "parser": "active",
            "geocoding": "active",
            "archive": "active",
        },
        "environment": {
            "openai_configured": state.openai_configured,
            "tmp_directory": state.archive.location(),
            "model": state.generator.name(),
        }
    }))
}

pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "name": API_NAME,
        "description": "News aggregation for a location, split into individually addressable articles",
        "version": API_VERSION,
        "endpoints": {
            "POST /news": "Get news for specific coordinates (markdown format)",
            "POST /news/structured": "Get structured news for UI integration (JSON format)",
            "GET /test-news": "Test endpoint with hardcoded location (markdown)",
            "GET /test-news/structured": "Test endpoint with structured output (JSON)",
            "GET /health": "Health check",
        },
        "features": {
            "structured_output": "Individual articles with metadata for easy UI parsing",
            "markdown_output": "Full narrative report for a location",
            "relevance_scoring": "Articles scored by keywords and recency",
        },
        "powered_by": ["axum", "tokio", state.generator.name()],
    }))
}
