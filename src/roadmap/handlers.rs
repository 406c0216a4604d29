use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::state::AppState;

use super::dto::{RoadmapQuery, RoadmapStats, UpdateDayTaskRequest, UserQuery};
use super::repo_types::DayTask;
use super::services::{self, TaskError};

pub fn roadmap_routes() -> Router<AppState> {
    Router::new()
        .route("/roadmap", get(list_roadmap))
        .route("/roadmap/:day_id", get(get_day).put(update_day))
        .route("/stats", get(read_stats))
}

#[instrument(skip(state))]
pub async fn list_roadmap(
    State(state): State<AppState>,
    Query(q): Query<RoadmapQuery>,
) -> Result<Json<Vec<DayTask>>, (StatusCode, String)> {
    let tasks = state
        .tasks
        .list_by_user(q.user_id, q.limit, q.skip)
        .await
        .map_err(|e| {
            error!(error = %e, user_id = q.user_id, "list roadmap failed");
            internal(e)
        })?;
    Ok(Json(tasks))
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    Path(day_id): Path<i64>,
) -> Result<Json<DayTask>, (StatusCode, String)> {
    services::get_task(state.tasks.as_ref(), day_id)
        .await
        .map(Json)
        .map_err(task_error)
}

#[instrument(skip(state, body))]
pub async fn update_day(
    State(state): State<AppState>,
    Path(day_id): Path<i64>,
    Json(body): Json<UpdateDayTaskRequest>,
) -> Result<Json<DayTask>, (StatusCode, String)> {
    let task = services::update_task(state.tasks.as_ref(), state.clock.as_ref(), day_id, body)
        .await
        .map_err(task_error)?;
    info!(day_id, user_id = task.user_id, status = %task.status, "day task updated");
    Ok(Json(task))
}

#[instrument(skip(state))]
pub async fn read_stats(
    State(state): State<AppState>,
    Query(q): Query<UserQuery>,
) -> Result<Json<RoadmapStats>, (StatusCode, String)> {
    services::roadmap_stats(state.tasks.as_ref(), state.clock.as_ref(), q.user_id)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, user_id = q.user_id, "stats failed");
            internal(e)
        })
}

fn task_error(e: TaskError) -> (StatusCode, String) {
    match e {
        TaskError::NotFound(id) => {
            warn!(day_id = id, "day task not found");
            (StatusCode::NOT_FOUND, "Day not found".into())
        }
        TaskError::Storage(e) => {
            error!(error = %e, "day task storage failure");
            internal(e)
        }
    }
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
