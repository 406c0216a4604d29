use serde::{Deserialize, Serialize};

use crate::users::repo_types::User;

/// Request body for login. There is no password: the email is the identity.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub is_active: bool,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            is_active: u.is_active,
        }
    }
}
