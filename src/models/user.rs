use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A registered account as stored in the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub login: String,
    /// Lowercased contact address, if one was given at registration.
    pub email: Option<String>,
    /// bcrypt hash; the plaintext password is never stored.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user returned by the registration endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            login: user.login,
            email: user.email,
            created_at: user.created_at,
        }
    }
}
