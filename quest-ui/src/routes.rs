//! HTTP route handlers for the UI API.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use serde::Deserialize;

use quest::core::mission::Mission;
use quest::io::service::{RunService, ServiceError};
use quest::session::ViewState;

use crate::state::AppState;

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/missions", get(list_missions))
        .route("/missions/select", post(select_mission))
        .route("/state", get(get_state))
        .route("/run", post(submit_run))
}

async fn health() -> &'static str {
    "ok"
}

/// GET /api/missions - the catalog in display order.
async fn list_missions(State(state): State<AppState>) -> Json<Vec<Mission>> {
    let session = state.session.lock().await;
    Json(session.catalog().missions().to_vec())
}

#[derive(Deserialize)]
struct SelectRequest {
    id: String,
}

/// POST /api/missions/select - make a mission the active one.
///
/// 404 when no mission has that id; the session is left untouched.
async fn select_mission(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<ViewState>, StatusCode> {
    let mut session = state.session.lock().await;
    if session.catalog().get(&request.id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    session.select_mission(&request.id);
    Ok(Json(session.view()))
}

/// GET /api/state - current run state, verdict and active mission.
async fn get_state(State(state): State<AppState>) -> Json<ViewState> {
    let session = state.session.lock().await;
    Json(session.view())
}

#[derive(Deserialize)]
struct RunRequest {
    code: String,
    tests: String,
}

/// POST /api/run - submit code and tests to the execution service.
///
/// 409 while a run is in flight. The session lock is not held for the
/// duration of the service call; the `Running` guard taken up front is what
/// keeps the run singular.
async fn submit_run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<ViewState>, StatusCode> {
    {
        let mut session = state.session.lock().await;
        if session.begin_run().is_err() {
            return Err(StatusCode::CONFLICT);
        }
    }

    let client = state.client.clone();
    let RunRequest { code, tests } = request;
    let tests_for_eval = tests.clone();
    let outcome = match tokio::task::spawn_blocking(move || client.run(&code, &tests)).await {
        Ok(outcome) => outcome,
        // The run must settle even if the worker died, or the session would
        // stay `Running` forever.
        Err(join_err) => Err(ServiceError::Network(format!("worker failed: {join_err}"))),
    };

    let mut session = state.session.lock().await;
    session.finish_run(outcome, &tests_for_eval);
    Ok(Json(session.view()))
}
