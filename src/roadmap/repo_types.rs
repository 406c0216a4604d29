use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// Day task row as stored in `day_tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct DayTask {
    pub id: i64,
    pub user_id: i64,
    pub day_number: i32,
    pub topic: String,
    pub description: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub code_snippet: Option<String>,
    pub month: i32,
    pub is_weekend: bool,
    #[serde(with = "time::serde::rfc3339::option")]
    pub completed_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A generated roadmap day, not yet owned by a row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDayTask {
    pub day_number: i32,
    pub topic: String,
    pub month: i32,
    pub is_weekend: bool,
}

/// Values written by a lifecycle update.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub status: String,
    pub notes: Option<String>,
    pub code_snippet: Option<String>,
    pub completed_at: Option<OffsetDateTime>,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct StatusCounts {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub in_progress: i64,
}
