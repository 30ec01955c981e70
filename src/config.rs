use std::env;
use std::str::FromStr;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://taskforge.db";
const DEFAULT_JWT_EXPIRATION_SECS: i64 = 60 * 60;
const MAX_JWT_EXPIRATION_SECS: i64 = 60 * 60 * 24 * 365;

/// Process-wide settings, read once at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub server_port: u16,
    pub server_host: String,
    pub jwt_secret: String,
    pub jwt_expiration_secs: i64,
    pub bcrypt_cost: u32,
}

impl Config {
    /// Loads `.env` (if present) and reads the configuration from the environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| AppError::Configuration("JWT_SECRET must be set".into()))?;

        let jwt_expiration_secs: i64 =
            parse_or(&lookup, "JWT_EXPIRATION_SECS", DEFAULT_JWT_EXPIRATION_SECS)?;
        if !(1..=MAX_JWT_EXPIRATION_SECS).contains(&jwt_expiration_secs) {
            return Err(AppError::Configuration(format!(
                "JWT_EXPIRATION_SECS must be between 1 and {}",
                MAX_JWT_EXPIRATION_SECS
            )));
        }

        let bcrypt_cost: u32 = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::Configuration(
                "BCRYPT_COST must be between 4 and 31".into(),
            ));
        }

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            server_port: parse_or(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            jwt_secret,
            jwt_expiration_secs,
            bcrypt_cost,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Configuration(format!("Invalid {}: {}", key, e))),
        None => Ok(default),
    }
}
