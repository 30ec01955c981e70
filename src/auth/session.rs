//! Registration and login: the only places a plaintext password is handled.

use sqlx::SqlitePool;

use crate::auth::password::verify_password;
use crate::auth::token::TokenService;
use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::User;

/// Creates an account. Fails with `AppError::DuplicateLogin` when the login is
/// taken and `AppError::DuplicateEmail` when the email is.
pub async fn register(
    pool: &SqlitePool,
    login: &str,
    email: Option<&str>,
    password: &str,
    bcrypt_cost: u32,
) -> Result<User, AppError> {
    let user = UserRepository::create(pool, login, email, password, bcrypt_cost).await?;
    log::info!("Registered user {} ({})", user.id, user.login);
    Ok(user)
}

/// Checks a login/password pair and mints a session token for it.
///
/// An unknown login and a wrong password both fail with
/// `AppError::InvalidCredentials`. An unknown login is still checked against
/// `dummy_hash`, so both paths do the same bcrypt work.
pub async fn login(
    pool: &SqlitePool,
    tokens: &TokenService,
    dummy_hash: &str,
    login: &str,
    password: &str,
) -> Result<String, AppError> {
    let user = match UserRepository::find_by_login(pool, login).await? {
        Some(user) => user,
        None => {
            verify_password(password, dummy_hash).await?;
            log::warn!("Login failed: unknown login");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash).await? {
        log::warn!("Login failed: wrong password for user {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    let token = tokens.issue(user.id)?;
    log::info!("User {} logged in", user.id);
    Ok(token)
}
