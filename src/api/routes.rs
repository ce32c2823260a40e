use axum::{
    routing::get,
    Router,
    extract::{Json, State},
    response::{Html, IntoResponse},
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;
use chrono::Utc;
use tracing::info;

use crate::airports::{lookup, normalize_icao, AIRPORTS};
use crate::api::models::{AirportsResponse, DeparturesResponse, FetchRequest, SummaryResponse};
use crate::api::response;
use crate::dashboard::NO_DATA_NOTICE;
use crate::error::Result;
use crate::window::{today_utc, TimeWindow, DEFAULT_HOUR};
use crate::AppState;

const INDEX_HTML: &str = include_str!("index.html");

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/airports", get(airports_handler))
        .route("/api/departures", get(current_departures_handler).post(fetch_handler))
        .route("/api/summary", get(current_summary_handler).post(summary_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn airports_handler() -> impl IntoResponse {
    response::success(AirportsResponse {
        airports: AIRPORTS.iter().map(Into::into).collect(),
        default_date: today_utc(),
        default_hour: DEFAULT_HOUR,
    })
}

async fn fetch_handler(
    State(state): State<AppState>,
    Json(req): Json<FetchRequest>,
) -> Result<impl IntoResponse> {
    let airport = normalize_icao(&req.airport)?;

    let date = req.date.unwrap_or_else(today_utc);
    let hour = req.hour.unwrap_or(DEFAULT_HOUR);
    let window = TimeWindow::ending_at(date, hour);
    let name = lookup(&airport).map(|a| a.name).unwrap_or("unlisted");
    info!(%airport, name, %date, hour, begin = window.start, end = window.end, "Fetching flight data");

    let result = state.dashboard.fetch(&airport, window).await?;
    if result.is_empty() {
        return Ok(response::success_with_notice(
            DeparturesResponse::from(result),
            NO_DATA_NOTICE.to_string(),
        ));
    }
    Ok(response::success(DeparturesResponse::from(result)))
}

async fn current_departures_handler(State(state): State<AppState>) -> impl IntoResponse {
    response::success(state.dashboard.current().await.map(DeparturesResponse::from))
}

async fn summary_handler(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let summary = state.dashboard.generate_summary().await?;
    Ok(response::success(SummaryResponse {
        summary,
        generated_at: Utc::now(),
    }))
}

async fn current_summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    response::success(state.dashboard.latest_summary().await)
}
