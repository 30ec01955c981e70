use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{password::dummy_hash, TokenService};
use crate::config::Config;
use crate::error::AppError;

/// Process-wide state shared by every worker, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub tokens: Arc<TokenService>,
    pub bcrypt_cost: u32,
    /// Verified against when a login names no account.
    pub dummy_hash: Arc<str>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            db,
            tokens: Arc::new(TokenService::new(
                &config.jwt_secret,
                config.jwt_expiration_secs,
            )),
            bcrypt_cost: config.bcrypt_cost,
            dummy_hash: dummy_hash(config.bcrypt_cost)?.into(),
        })
    }
}
