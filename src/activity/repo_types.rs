use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct UserActivity {
    pub id: i64,
    pub user_id: i64,
    pub activity_type: String,
    pub session_id: Option<String>,
    pub meta_info: Option<String>, // client-side JSON, stored opaque
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: i64,
    pub activity_type: String,
    pub session_id: Option<String>,
    pub meta_info: Option<String>,
    pub timestamp: OffsetDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct ActivityCounts {
    pub total_activities: i64,
    pub login_count: i64,
    pub last_login: Option<OffsetDateTime>,
    pub recent_activities: i64,
}
