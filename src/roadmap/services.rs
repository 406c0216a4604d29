use time::{Date, Duration, OffsetDateTime};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::roadmap::dto::{RoadmapStats, UpdateDayTaskRequest};
use crate::roadmap::generator::generate_roadmap;
use crate::roadmap::repo::DayTaskRepo;
use crate::roadmap::repo_types::{DayTask, ProgressUpdate};

pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_IN_PROGRESS: &str = "In Progress";
pub const STATUS_COMPLETED: &str = "Completed";

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("day task {0} not found")]
    NotFound(i64),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Stamps out and persists the 168-day roadmap for a freshly created user.
///
/// Not idempotent: a second call for the same user is rejected by the
/// `(user_id, day_number)` unique constraint and the whole batch rolls back.
pub async fn create_roadmap_for_user(
    repo: &dyn DayTaskRepo,
    clock: &dyn Clock,
    user_id: i64,
) -> anyhow::Result<()> {
    let days = generate_roadmap();
    repo.insert_batch(user_id, &days, clock.now()).await?;
    info!(user_id, days = days.len(), "roadmap generated");
    Ok(())
}

/// `completed_at` after moving from `previous` to `next` status.
pub fn derive_completed_at(
    previous: &str,
    next: &str,
    current: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Option<OffsetDateTime> {
    match (previous == STATUS_COMPLETED, next == STATUS_COMPLETED) {
        (false, true) => Some(now),
        (true, false) => None,
        _ => current,
    }
}

pub async fn update_task(
    repo: &dyn DayTaskRepo,
    clock: &dyn Clock,
    day_id: i64,
    req: UpdateDayTaskRequest,
) -> Result<DayTask, TaskError> {
    let existing = repo
        .find_by_id(day_id)
        .await?
        .ok_or(TaskError::NotFound(day_id))?;

    let now = clock.now();
    let completed_at =
        derive_completed_at(&existing.status, &req.status, existing.completed_at, now);
    debug!(day_id, from = %existing.status, to = %req.status, "task status transition");

    let update = ProgressUpdate {
        status: req.status,
        notes: req.notes,
        code_snippet: req.code_snippet,
        completed_at,
        updated_at: now,
    };
    repo.save_progress(day_id, &update)
        .await?
        .ok_or(TaskError::NotFound(day_id))
}

pub async fn get_task(repo: &dyn DayTaskRepo, day_id: i64) -> Result<DayTask, TaskError> {
    repo.find_by_id(day_id)
        .await?
        .ok_or(TaskError::NotFound(day_id))
}

pub async fn roadmap_stats(
    repo: &dyn DayTaskRepo,
    clock: &dyn Clock,
    user_id: i64,
) -> anyhow::Result<RoadmapStats> {
    let counts = repo.status_counts(user_id).await?;
    let completions = repo.completion_times(user_id).await?;
    let streak = completion_streak(&completions, clock.now().date());

    let completion_percentage = if counts.total > 0 {
        counts.completed as f64 / counts.total as f64 * 100.0
    } else {
        0.0
    };

    Ok(RoadmapStats {
        total_days: counts.total,
        completed_days: counts.completed,
        pending_days: counts.pending,
        in_progress_days: counts.in_progress,
        streak,
        completion_percentage,
    })
}

/// Consecutive UTC days with at least one completion, ending today or
/// yesterday.
pub fn completion_streak(completions: &[OffsetDateTime], today: Date) -> i64 {
    let mut dates: Vec<Date> = completions
        .iter()
        .map(|t| t.to_offset(time::UtcOffset::UTC).date())
        .collect();
    dates.sort_unstable();
    dates.dedup();

    let mut expected = match dates.last() {
        Some(&last) if last == today || Some(last) == today.previous_day() => last,
        _ => return 0,
    };
    let mut streak = 0;
    for &d in dates.iter().rev() {
        if d != expected {
            break;
        }
        streak += 1;
        expected = d - Duration::days(1);
    }
    streak
}
