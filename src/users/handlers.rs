use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{error, instrument, warn};

use crate::{
    state::AppState,
    users::{
        dto::{LoginRequest, PublicUser},
        services::{is_valid_email, login_or_register, normalize_email},
    },
};

pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<PublicUser>, (StatusCode, String)> {
    let email = normalize_email(&payload.email);

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err((StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    let user = login_or_register(
        state.users.as_ref(),
        state.tasks.as_ref(),
        state.clock.as_ref(),
        &email,
    )
    .await
    .map_err(|e| {
        error!(error = %e, email = %email, "login failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(user.into()))
}
