// =============================================================================
// REST API Endpoints — Axum 0.7
// =============================================================================
//
// All endpoints live under `/api/v1/` and are public; the analyzer serves
// read-only derived data and carries no credentials.
//
// CORS is configured permissively for development; tighten `allowed_origins`
// in production.
// =============================================================================

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::analysis::build_report;
use crate::app_state::AppState;
use crate::market_data::mock_price_walk;
use crate::types::DataSource;

// =============================================================================
// Router construction
// =============================================================================

/// Build the full REST API router with CORS middleware and shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/symbols", get(symbols))
        .route("/api/v1/analysis/:symbol", get(analysis))
        .route("/api/v1/errors", get(recent_errors))
        .layer(cors)
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    state_version: u64,
    server_time: i64,
    uptime_seconds: u64,
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let resp = HealthResponse {
        status: "ok",
        state_version: state.current_state_version(),
        server_time: chrono::Utc::now().timestamp_millis(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    };
    Json(resp)
}

// =============================================================================
// Symbols
// =============================================================================

async fn symbols(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let symbols = state.runtime_config.read().symbols.clone();
    Json(serde_json::json!({ "symbols": symbols }))
}

// =============================================================================
// Analysis
// =============================================================================

type ApiError = (StatusCode, Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

/// GET /api/v1/analysis/:symbol
///
/// Fetches the market chart for the symbol, runs the indicator engine over
/// it, and returns the assembled report. On upstream failure the handler
/// substitutes a synthetic price walk (when enabled) and flags the response
/// `"source": "mock"`. The engine itself never sees network failure modes.
async fn analysis(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let symbol = symbol.to_lowercase();

    let (days, period, display_points, mock_fallback) = {
        let config = state.runtime_config.read();
        if !config.symbols.iter().any(|s| s == &symbol) {
            return Err(api_error(
                StatusCode::NOT_FOUND,
                format!("unknown symbol: '{symbol}'"),
            ));
        }
        (
            config.days,
            config.period,
            config.display_points,
            config.enable_mock_fallback,
        )
    };

    let now_ms = chrono::Utc::now().timestamp_millis();

    let (points, source) = match state.market_client.get_market_chart(&symbol, days).await {
        Ok(points) if !points.is_empty() => (points, DataSource::Upstream),
        Ok(_) => {
            warn!(symbol = %symbol, "upstream returned an empty price series");
            state.push_error("upstream returned an empty price series", Some(&symbol));
            if !mock_fallback {
                return Err(api_error(
                    StatusCode::BAD_GATEWAY,
                    "upstream returned no data",
                ));
            }
            (mock_price_walk(&symbol, days, now_ms), DataSource::Mock)
        }
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "upstream fetch failed");
            state.push_error(format!("upstream fetch failed: {e}"), Some(&symbol));
            if !mock_fallback {
                return Err(api_error(
                    StatusCode::BAD_GATEWAY,
                    format!("upstream fetch failed: {e}"),
                ));
            }
            (mock_price_walk(&symbol, days, now_ms), DataSource::Mock)
        }
    };

    let report = build_report(&symbol, &points, period, display_points, source, now_ms)
        .ok_or_else(|| api_error(StatusCode::INTERNAL_SERVER_ERROR, "empty price series"))?;

    info!(
        symbol = %symbol,
        source = %source,
        points = points.len(),
        "analysis served"
    );

    Ok(Json(report))
}

// =============================================================================
// Error log
// =============================================================================

async fn recent_errors(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let errors = state.recent_errors.read().clone();
    Json(errors)
}
