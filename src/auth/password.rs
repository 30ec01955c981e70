use crate::error::AppError;
use bcrypt::{hash, verify};

/// Hashes `password` with bcrypt at the given cost.
///
/// bcrypt is CPU-bound, so the work runs on tokio's blocking pool.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Hash of a throwaway password at `cost`.
///
/// Logins for unknown accounts are verified against it so they cost the same
/// bcrypt work as logins with a wrong password.
pub fn dummy_hash(cost: u32) -> Result<String, AppError> {
    Ok(hash("taskforge-dummy-password", cost)?)
}

/// Checks `password` against a stored bcrypt hash.
pub async fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hashed_password = hashed_password.to_owned();
    tokio::task::spawn_blocking(move || verify(password, &hashed_password))
        .await
        .map_err(|e| AppError::InternalServerError(format!("Verification task failed: {}", e)))?
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}
