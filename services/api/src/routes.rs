use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use dealbridge::marketplace::acquisition::{acquisition_router, SharedStore};
use dealbridge::marketplace::matching::{compatibility_score, CompatibilityScore};
use dealbridge::marketplace::profiles::{AcquisitionPreferences, BusinessListing};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct MatchScoreRequest {
    pub(crate) preferences: AcquisitionPreferences,
    pub(crate) listing: BusinessListing,
}

pub(crate) fn with_marketplace_routes(store: SharedStore) -> axum::Router {
    acquisition_router(store)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/matches/score",
            axum::routing::post(match_score_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn match_score_endpoint(
    Json(payload): Json<MatchScoreRequest>,
) -> Json<CompatibilityScore> {
    let MatchScoreRequest {
        preferences,
        listing,
    } = payload;

    Json(compatibility_score(&preferences, &listing))
}
