use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{error, instrument};

use crate::{roadmap::dto::UserQuery, state::AppState};

use super::dto::{ActiveSessions, ActivityListQuery, ActivityStats, LogActivityRequest};
use super::repo_types::UserActivity;
use super::services;

pub fn activity_routes() -> Router<AppState> {
    Router::new()
        .route("/activity", post(log_activity))
        .route("/activity/:user_id", get(list_activities))
        .route("/activity/:user_id/stats", get(get_activity_stats))
        .route("/activity/:user_id/sessions", get(get_active_sessions))
}

#[instrument(skip(state, body))]
pub async fn log_activity(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
    Json(body): Json<LogActivityRequest>,
) -> Result<Json<UserActivity>, (StatusCode, String)> {
    services::log_activity(state.activities.as_ref(), state.clock.as_ref(), q.user_id, body)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, user_id = q.user_id, "log activity failed");
            internal(e)
        })
}

#[instrument(skip(state))]
pub async fn list_activities(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(q): Query<ActivityListQuery>,
) -> Result<Json<Vec<UserActivity>>, (StatusCode, String)> {
    state
        .activities
        .list_by_user(user_id, q.activity_type.as_deref(), q.limit)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, user_id, "list activities failed");
            internal(e)
        })
}

#[instrument(skip(state))]
pub async fn get_activity_stats(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ActivityStats>, (StatusCode, String)> {
    services::activity_stats(state.activities.as_ref(), state.clock.as_ref(), user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, user_id, "activity stats failed");
            internal(e)
        })
}

#[instrument(skip(state))]
pub async fn get_active_sessions(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<ActiveSessions>, (StatusCode, String)> {
    services::active_sessions(state.activities.as_ref(), state.clock.as_ref(), user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, user_id, "active sessions failed");
            internal(e)
        })
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
