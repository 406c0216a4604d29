use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct LogActivityRequest {
    pub activity_type: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub meta_info: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ActivityListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub activity_type: Option<String>,
}
fn default_limit() -> i64 { 50 }

#[derive(Debug, Serialize)]
pub struct ActivityStats {
    pub total_activities: i64,
    pub login_count: i64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,
    pub recent_activities_7d: i64,
}

#[derive(Debug, Serialize)]
pub struct ActiveSessions {
    pub active_sessions: usize,
    pub session_ids: Vec<String>,
}
