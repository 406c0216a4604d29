use serde::{Deserialize, Serialize};

use crate::roadmap::services::STATUS_PENDING;

/// Body of `PUT /roadmap/:day_id`. The client sends the whole day object;
/// only the fields below are applied.
#[derive(Debug, Deserialize)]
pub struct UpdateDayTaskRequest {
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub code_snippet: Option<String>,
}

fn default_status() -> String {
    STATUS_PENDING.to_string()
}

#[derive(Debug, Deserialize)]
pub struct RoadmapQuery {
    pub user_id: i64,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
fn default_limit() -> i64 { 168 }

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: i64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RoadmapStats {
    pub total_days: i64,
    pub completed_days: i64,
    pub pending_days: i64,
    pub in_progress_days: i64,
    pub streak: i64,
    pub completion_percentage: f64,
}
