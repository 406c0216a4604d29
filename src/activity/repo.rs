use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use crate::activity::repo_types::{ActivityCounts, NewActivity, UserActivity};

pub const LOGIN_ACTIVITY: &str = "login";

#[async_trait]
pub trait ActivityRepo: Send + Sync {
    async fn insert(&self, activity: &NewActivity) -> anyhow::Result<UserActivity>;

    /// Newest first, optionally restricted to one activity type.
    async fn list_by_user(
        &self,
        user_id: i64,
        activity_type: Option<&str>,
        limit: i64,
    ) -> anyhow::Result<Vec<UserActivity>>;

    /// Totals, login figures and the number of entries at or after `recent_since`.
    async fn counts(&self, user_id: i64, recent_since: OffsetDateTime)
        -> anyhow::Result<ActivityCounts>;

    /// Distinct non-null session ids seen at or after `since`.
    async fn session_ids_since(
        &self,
        user_id: i64,
        since: OffsetDateTime,
    ) -> anyhow::Result<Vec<String>>;
}

#[derive(Clone)]
pub struct PgActivityRepo {
    db: PgPool,
}

impl PgActivityRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ActivityRepo for PgActivityRepo {
    async fn insert(&self, activity: &NewActivity) -> anyhow::Result<UserActivity> {
        let row = sqlx::query_as::<_, UserActivity>(
            r#"
            INSERT INTO user_activities (user_id, activity_type, session_id, meta_info, occurred_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, activity_type, session_id, meta_info, occurred_at AS "timestamp"
            "#,
        )
        .bind(activity.user_id)
        .bind(&activity.activity_type)
        .bind(&activity.session_id)
        .bind(&activity.meta_info)
        .bind(activity.timestamp)
        .fetch_one(&self.db)
        .await
        .context("insert activity")?;
        Ok(row)
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        activity_type: Option<&str>,
        limit: i64,
    ) -> anyhow::Result<Vec<UserActivity>> {
        let rows = sqlx::query_as::<_, UserActivity>(
            r#"
            SELECT id, user_id, activity_type, session_id, meta_info, occurred_at AS "timestamp"
              FROM user_activities
             WHERE user_id = $1
               AND ($2::TEXT IS NULL OR activity_type = $2)
             ORDER BY occurred_at DESC, id DESC
             LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(activity_type)
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list activities")?;
        Ok(rows)
    }

    async fn counts(
        &self,
        user_id: i64,
        recent_since: OffsetDateTime,
    ) -> anyhow::Result<ActivityCounts> {
        let counts = sqlx::query_as::<_, ActivityCounts>(
            r#"
            SELECT COUNT(*)                                               AS total_activities,
                   COUNT(*) FILTER (WHERE activity_type = $2)             AS login_count,
                   MAX(occurred_at) FILTER (WHERE activity_type = $2)     AS last_login,
                   COUNT(*) FILTER (WHERE occurred_at >= $3)              AS recent_activities
              FROM user_activities
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(LOGIN_ACTIVITY)
        .bind(recent_since)
        .fetch_one(&self.db)
        .await
        .context("count activities")?;
        Ok(counts)
    }

    async fn session_ids_since(
        &self,
        user_id: i64,
        since: OffsetDateTime,
    ) -> anyhow::Result<Vec<String>> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT DISTINCT session_id
              FROM user_activities
             WHERE user_id = $1
               AND occurred_at >= $2
               AND session_id IS NOT NULL
             ORDER BY session_id
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.db)
        .await
        .context("list active sessions")?;
        Ok(rows.into_iter().map(|(s,)| s).collect())
    }
}
