use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::models::User;

const USER_COLUMNS: &str = "id, login, email, password_hash, created_at";

/// Credential store over the `users` table.
pub struct UserRepository;

impl UserRepository {
    /// Hashes `password` and inserts a new user.
    ///
    /// Fails with `AppError::DuplicateLogin` when `login` is taken and with
    /// `AppError::DuplicateEmail` when `email` is. The unique constraints on
    /// `users` decide, so concurrent registrations cannot both succeed.
    /// `email` is stored lowercased.
    pub async fn create(
        pool: &SqlitePool,
        login: &str,
        email: Option<&str>,
        password: &str,
        bcrypt_cost: u32,
    ) -> Result<User, AppError> {
        let password_hash = hash_password(password, bcrypt_cost).await?;
        let email = email.map(|e| e.trim().to_lowercase());

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (login, email, password_hash, created_at) VALUES ($1, $2, $3, $4) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(login)
        .bind(email)
        .bind(password_hash)
        .bind(chrono::Utc::now())
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_login(pool: &SqlitePool, login: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE login = $1"
        ))
        .bind(login)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
