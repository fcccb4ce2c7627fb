use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use super::blueprint::ProcessBlueprint;
use super::domain::{AcquisitionStep, ProcessId, ProcessStatus, StepId};
use super::process::AcquisitionProcess;
use super::store::AcquisitionStore;
use crate::error::AppError;
use crate::marketplace::matching::MatchId;
use crate::marketplace::profiles::ParticipantId;

/// Store handle shared between HTTP workers. One logical operation holds
/// the lock at a time, matching the single-writer execution model.
pub type SharedStore = Arc<Mutex<AcquisitionStore>>;

#[derive(Debug, Deserialize)]
pub struct CreateProcessRequest {
    pub match_id: String,
    pub buyer_id: String,
    pub seller_id: String,
    #[serde(default)]
    pub kickoff: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: ProcessStatus,
}

/// Router builder exposing the acquisition tracker over HTTP.
pub fn acquisition_router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/v1/acquisitions", post(create_handler))
        .route("/api/v1/acquisitions/:process_id", get(get_handler))
        .route(
            "/api/v1/acquisitions/:process_id/advance",
            post(advance_handler),
        )
        .route(
            "/api/v1/acquisitions/:process_id/status",
            post(status_handler),
        )
        .route(
            "/api/v1/acquisitions/:process_id/steps/:step_id/complete",
            post(complete_step_handler),
        )
        .route(
            "/api/v1/acquisitions/:process_id/steps/:step_id",
            put(update_step_handler),
        )
        .with_state(store)
}

pub(crate) async fn create_handler(
    State(store): State<SharedStore>,
    Json(request): Json<CreateProcessRequest>,
) -> Response {
    let now = Utc::now();
    let kickoff = request.kickoff.unwrap_or(now);
    let blueprint = ProcessBlueprint::standard();
    let process = AcquisitionProcess::from_blueprint(
        MatchId(request.match_id),
        &ParticipantId(request.buyer_id),
        &ParticipantId(request.seller_id),
        &blueprint,
        kickoff,
        now,
    );

    let mut store = store.lock().expect("store mutex poisoned");
    store.add_process(process.clone());

    (StatusCode::CREATED, Json(process)).into_response()
}

pub(crate) async fn get_handler(
    State(store): State<SharedStore>,
    Path(process_id): Path<String>,
) -> Result<Json<AcquisitionProcess>, AppError> {
    let id = ProcessId(process_id);
    let store = store.lock().expect("store mutex poisoned");
    let process = store
        .get(&id)
        .cloned()
        .ok_or(super::store::StoreError::ProcessNotFound(id))?;
    Ok(Json(process))
}

pub(crate) async fn advance_handler(
    State(store): State<SharedStore>,
    Path(process_id): Path<String>,
) -> Result<Json<AcquisitionProcess>, AppError> {
    let id = ProcessId(process_id);
    let mut store = store.lock().expect("store mutex poisoned");
    let process = store.advance_step(&id, Utc::now())?.clone();
    Ok(Json(process))
}

pub(crate) async fn status_handler(
    State(store): State<SharedStore>,
    Path(process_id): Path<String>,
    Json(request): Json<SetStatusRequest>,
) -> Result<Json<AcquisitionProcess>, AppError> {
    let id = ProcessId(process_id);
    let mut store = store.lock().expect("store mutex poisoned");
    let process = store
        .set_process_status(&id, request.status, Utc::now())?
        .clone();
    Ok(Json(process))
}

pub(crate) async fn complete_step_handler(
    State(store): State<SharedStore>,
    Path((process_id, step_id)): Path<(String, String)>,
) -> Result<Json<AcquisitionProcess>, AppError> {
    let id = ProcessId(process_id);
    let step = StepId(step_id);
    let mut store = store.lock().expect("store mutex poisoned");
    let process = store.complete_step(&id, &step, Utc::now())?.clone();
    Ok(Json(process))
}

pub(crate) async fn update_step_handler(
    State(store): State<SharedStore>,
    Path((process_id, step_id)): Path<(String, String)>,
    Json(step): Json<AcquisitionStep>,
) -> Response {
    if step.id.0 != step_id {
        let payload = json!({
            "error": "step id in the body must match the path",
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    }

    let id = ProcessId(process_id);
    let mut store = store.lock().expect("store mutex poisoned");
    match store.update_step(&id, step, Utc::now()) {
        Ok(process) => {
            let process = process.clone();
            drop(store);
            (StatusCode::OK, Json(process)).into_response()
        }
        Err(err) => AppError::from(err).into_response(),
    }
}
