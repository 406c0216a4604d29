//! In-memory repositories backing `AppState::fake()` and the service tests.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::activity::repo::{ActivityRepo, LOGIN_ACTIVITY};
use crate::activity::repo_types::{ActivityCounts, NewActivity, UserActivity};
use crate::roadmap::repo::DayTaskRepo;
use crate::roadmap::repo_types::{DayTask, NewDayTask, ProgressUpdate, StatusCounts};
use crate::roadmap::services::{STATUS_COMPLETED, STATUS_IN_PROGRESS, STATUS_PENDING};
use crate::users::repo::UserRepo;
use crate::users::repo_types::User;

fn poisoned<E: std::fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("lock poisoned: {e}")
}

fn page<T: Clone>(rows: &[T], limit: i64, offset: i64) -> Vec<T> {
    rows.iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepo {
    users: RwLock<Vec<User>>,
}

#[async_trait]
impl UserRepo for InMemoryUserRepo {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, email: &str) -> anyhow::Result<User> {
        let mut users = self.users.write().map_err(poisoned)?;
        anyhow::ensure!(
            users.iter().all(|u| u.email != email),
            "duplicate email {email}"
        );
        let user = User {
            id: users.len() as i64 + 1,
            email: email.to_string(),
            is_active: true,
        };
        users.push(user.clone());
        Ok(user)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryDayTaskRepo {
    rows: RwLock<Vec<DayTask>>,
}

#[async_trait]
impl DayTaskRepo for InMemoryDayTaskRepo {
    async fn insert_batch(
        &self,
        user_id: i64,
        days: &[NewDayTask],
        now: OffsetDateTime,
    ) -> anyhow::Result<()> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        let mut taken: HashSet<i32> = rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.day_number)
            .collect();
        for day in days {
            anyhow::ensure!(
                taken.insert(day.day_number),
                "duplicate day {} for user {}",
                day.day_number,
                user_id
            );
        }

        let mut next_id = rows.len() as i64 + 1;
        for day in days {
            rows.push(DayTask {
                id: next_id,
                user_id,
                day_number: day.day_number,
                topic: day.topic.clone(),
                description: None,
                status: STATUS_PENDING.to_string(),
                notes: None,
                code_snippet: None,
                month: day.month,
                is_weekend: day.is_weekend,
                completed_at: None,
                updated_at: now,
            });
            next_id += 1;
        }
        Ok(())
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> anyhow::Result<Vec<DayTask>> {
        let rows = self.rows.read().map_err(poisoned)?;
        let mut owned: Vec<DayTask> = rows.iter().filter(|r| r.user_id == user_id).cloned().collect();
        owned.sort_by_key(|r| r.day_number);
        Ok(page(&owned, limit, offset))
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<DayTask>> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows.iter().find(|r| r.id == id).cloned())
    }

    async fn save_progress(
        &self,
        id: i64,
        update: &ProgressUpdate,
    ) -> anyhow::Result<Option<DayTask>> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        row.status = update.status.clone();
        row.notes = update.notes.clone();
        row.code_snippet = update.code_snippet.clone();
        row.completed_at = update.completed_at;
        row.updated_at = update.updated_at;
        Ok(Some(row.clone()))
    }

    async fn status_counts(&self, user_id: i64) -> anyhow::Result<StatusCounts> {
        let rows = self.rows.read().map_err(poisoned)?;
        let mut counts = StatusCounts::default();
        for r in rows.iter().filter(|r| r.user_id == user_id) {
            counts.total += 1;
            match r.status.as_str() {
                STATUS_COMPLETED => counts.completed += 1,
                STATUS_PENDING => counts.pending += 1,
                STATUS_IN_PROGRESS => counts.in_progress += 1,
                _ => {}
            }
        }
        Ok(counts)
    }

    async fn completion_times(&self, user_id: i64) -> anyhow::Result<Vec<OffsetDateTime>> {
        let rows = self.rows.read().map_err(poisoned)?;
        Ok(rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| r.completed_at)
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryActivityRepo {
    rows: RwLock<Vec<UserActivity>>,
}

#[async_trait]
impl ActivityRepo for InMemoryActivityRepo {
    async fn insert(&self, activity: &NewActivity) -> anyhow::Result<UserActivity> {
        let mut rows = self.rows.write().map_err(poisoned)?;
        let row = UserActivity {
            id: rows.len() as i64 + 1,
            user_id: activity.user_id,
            activity_type: activity.activity_type.clone(),
            session_id: activity.session_id.clone(),
            meta_info: activity.meta_info.clone(),
            timestamp: activity.timestamp,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_by_user(
        &self,
        user_id: i64,
        activity_type: Option<&str>,
        limit: i64,
    ) -> anyhow::Result<Vec<UserActivity>> {
        let rows = self.rows.read().map_err(poisoned)?;
        let mut found: Vec<UserActivity> = rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter(|r| activity_type.map_or(true, |t| r.activity_type == t))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(page(&found, limit, 0))
    }

    async fn counts(
        &self,
        user_id: i64,
        recent_since: OffsetDateTime,
    ) -> anyhow::Result<ActivityCounts> {
        let rows = self.rows.read().map_err(poisoned)?;
        let mut counts = ActivityCounts::default();
        for r in rows.iter().filter(|r| r.user_id == user_id) {
            counts.total_activities += 1;
            if r.activity_type == LOGIN_ACTIVITY {
                counts.login_count += 1;
                counts.last_login = counts.last_login.max(Some(r.timestamp));
            }
            if r.timestamp >= recent_since {
                counts.recent_activities += 1;
            }
        }
        Ok(counts)
    }

    async fn session_ids_since(
        &self,
        user_id: i64,
        since: OffsetDateTime,
    ) -> anyhow::Result<Vec<String>> {
        let rows = self.rows.read().map_err(poisoned)?;
        let mut ids: Vec<String> = rows
            .iter()
            .filter(|r| r.user_id == user_id && r.timestamp >= since)
            .filter_map(|r| r.session_id.clone())
            .collect();
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}
