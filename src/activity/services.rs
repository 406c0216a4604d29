use time::Duration;
use tracing::debug;

use crate::activity::dto::{ActiveSessions, ActivityStats, LogActivityRequest};
use crate::activity::repo::ActivityRepo;
use crate::activity::repo_types::{NewActivity, UserActivity};
use crate::clock::Clock;

const RECENT_WINDOW: Duration = Duration::days(7);
const SESSION_WINDOW: Duration = Duration::hours(24);

pub async fn log_activity(
    repo: &dyn ActivityRepo,
    clock: &dyn Clock,
    user_id: i64,
    req: LogActivityRequest,
) -> anyhow::Result<UserActivity> {
    let activity = NewActivity {
        user_id,
        activity_type: req.activity_type,
        session_id: req.session_id,
        meta_info: req.meta_info,
        timestamp: clock.now(),
    };
    let saved = repo.insert(&activity).await?;
    debug!(user_id, activity_type = %saved.activity_type, "activity logged");
    Ok(saved)
}

pub async fn activity_stats(
    repo: &dyn ActivityRepo,
    clock: &dyn Clock,
    user_id: i64,
) -> anyhow::Result<ActivityStats> {
    let counts = repo.counts(user_id, clock.now() - RECENT_WINDOW).await?;
    Ok(ActivityStats {
        total_activities: counts.total_activities,
        login_count: counts.login_count,
        last_login: counts.last_login,
        recent_activities_7d: counts.recent_activities,
    })
}

pub async fn active_sessions(
    repo: &dyn ActivityRepo,
    clock: &dyn Clock,
    user_id: i64,
) -> anyhow::Result<ActiveSessions> {
    let session_ids = repo
        .session_ids_since(user_id, clock.now() - SESSION_WINDOW)
        .await?;
    Ok(ActiveSessions {
        active_sessions: session_ids.len(),
        session_ids,
    })
}
