use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use time::OffsetDateTime;

use crate::roadmap::repo_types::{DayTask, NewDayTask, ProgressUpdate, StatusCounts};
use crate::roadmap::services::{STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_PENDING};

const DAY_TASK_COLUMNS: &str = "id, user_id, day_number, topic, description, status, notes, \
     code_snippet, month, is_weekend, completed_at, updated_at";

#[async_trait]
pub trait DayTaskRepo: Send + Sync {
    /// Insert a user's whole roadmap. Either every row lands or none does.
    async fn insert_batch(
        &self,
        user_id: i64,
        days: &[NewDayTask],
        now: OffsetDateTime,
    ) -> anyhow::Result<()>;

    /// A user's tasks ordered by day number.
    async fn list_by_user(&self, user_id: i64, limit: i64, offset: i64)
        -> anyhow::Result<Vec<DayTask>>;

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<DayTask>>;

    /// Overwrite the mutable fields of a task. `None` when the row is gone.
    async fn save_progress(
        &self,
        id: i64,
        update: &ProgressUpdate,
    ) -> anyhow::Result<Option<DayTask>>;

    async fn status_counts(&self, user_id: i64) -> anyhow::Result<StatusCounts>;

    /// Every non-null `completed_at` of the user's tasks.
    async fn completion_times(&self, user_id: i64) -> anyhow::Result<Vec<OffsetDateTime>>;
}

#[derive(Clone)]
pub struct PgDayTaskRepo {
    db: PgPool,
}

impl PgDayTaskRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Insert a single roadmap day within a transaction.
async fn insert_day_task_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    day: &NewDayTask,
    now: OffsetDateTime,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO day_tasks (user_id, day_number, topic, month, is_weekend, status, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(user_id)
    .bind(day.day_number)
    .bind(&day.topic)
    .bind(day.month)
    .bind(day.is_weekend)
    .bind(STATUS_PENDING)
    .bind(now)
    .execute(&mut **tx)
    .await
    .with_context(|| format!("insert day {} for user {}", day.day_number, user_id))?;

    Ok(())
}

#[async_trait]
impl DayTaskRepo for PgDayTaskRepo {
    async fn insert_batch(
        &self,
        user_id: i64,
        days: &[NewDayTask],
        now: OffsetDateTime,
    ) -> anyhow::Result<()> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        for day in days {
            insert_day_task_tx(&mut tx, user_id, day, now).await?;
        }
        tx.commit().await.context("commit tx")?;
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<DayTask>> {
        let rows = sqlx::query_as::<_, DayTask>(&format!(
            r#"
            SELECT {DAY_TASK_COLUMNS}
            FROM day_tasks
            WHERE user_id = $1
            ORDER BY day_number ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .context("list day tasks by user")?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<DayTask>> {
        let row = sqlx::query_as::<_, DayTask>(&format!(
            "SELECT {DAY_TASK_COLUMNS} FROM day_tasks WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find day task")?;
        Ok(row)
    }

    async fn save_progress(
        &self,
        id: i64,
        update: &ProgressUpdate,
    ) -> anyhow::Result<Option<DayTask>> {
        let row = sqlx::query_as::<_, DayTask>(&format!(
            r#"
            UPDATE day_tasks
               SET status = $2,
                   notes = $3,
                   code_snippet = $4,
                   completed_at = $5,
                   updated_at = $6
             WHERE id = $1
            RETURNING {DAY_TASK_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.status)
        .bind(&update.notes)
        .bind(&update.code_snippet)
        .bind(update.completed_at)
        .bind(update.updated_at)
        .fetch_optional(&self.db)
        .await
        .context("update day task")?;
        Ok(row)
    }

    async fn status_counts(&self, user_id: i64) -> anyhow::Result<StatusCounts> {
        let counts = sqlx::query_as::<_, StatusCounts>(
            r#"
            SELECT COUNT(*)                              AS total,
                   COUNT(*) FILTER (WHERE status = $2)   AS completed,
                   COUNT(*) FILTER (WHERE status = $3)   AS pending,
                   COUNT(*) FILTER (WHERE status = $4)   AS in_progress
              FROM day_tasks
             WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(STATUS_COMPLETED)
        .bind(STATUS_PENDING)
        .bind(STATUS_IN_PROGRESS)
        .fetch_one(&self.db)
        .await
        .context("count day tasks by status")?;
        Ok(counts)
    }

    async fn completion_times(&self, user_id: i64) -> anyhow::Result<Vec<OffsetDateTime>> {
        let rows: Vec<(OffsetDateTime,)> = sqlx::query_as(
            r#"
            SELECT completed_at
              FROM day_tasks
             WHERE user_id = $1 AND completed_at IS NOT NULL
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list completion times")?;
        Ok(rows.into_iter().map(|(t,)| t).collect())
    }
}
