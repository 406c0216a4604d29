use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;

use crate::clock::Clock;
use crate::roadmap::repo::DayTaskRepo;
use crate::roadmap::services::create_roadmap_for_user;
use crate::users::repo::UserRepo;
use crate::users::repo_types::User;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Returns the user for `email`, creating it and its roadmap on first login.
///
/// User and roadmap are written in two steps: if roadmap generation fails
/// the user row stays without tasks.
pub async fn login_or_register(
    users: &dyn UserRepo,
    tasks: &dyn DayTaskRepo,
    clock: &dyn Clock,
    email: &str,
) -> anyhow::Result<User> {
    if let Some(user) = users.find_by_email(email).await? {
        info!(user_id = user.id, "user logged in");
        return Ok(user);
    }

    let user = users.create(email).await?;
    info!(user_id = user.id, email = %user.email, "user registered");
    create_roadmap_for_user(tasks, clock, user.id).await?;
    Ok(user)
}
