use std::net::SocketAddr;

use axum::{
    http::{request::Parts, HeaderValue},
    routing::get,
    Json, Router,
};
use regex::Regex;
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::CorsConfig;
use crate::state::AppState;
use crate::{activity, roadmap, users};

pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);
    Router::new()
        .route("/", get(root))
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api",
            Router::new()
                .merge(users::router())
                .merge(roadmap::router())
                .merge(activity::router()),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to DS-GenAI Tracker API" }))
}

fn cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let origins: Vec<String> = cfg.origins.clone();
    let pattern = cfg.origin_regex.as_deref().and_then(|p| match Regex::new(p) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(error = %e, pattern = p, "ignoring invalid CORS origin regex");
            None
        }
    });

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| origin_allowed(&origins, pattern.as_ref(), origin),
        ))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

fn origin_allowed(origins: &[String], pattern: Option<&Regex>, origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    origins.iter().any(|o| o == origin) || pattern.is_some_and(|re| re.is_match(origin))
}

pub async fn serve(app: Router, addr: &str) -> anyhow::Result<()> {
    let addr: SocketAddr = addr.parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
