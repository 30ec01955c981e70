pub mod extractors;
pub mod middleware;
pub mod password;
pub mod session;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Re-export necessary items
pub use extractors::AuthenticatedUserId;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService, UserIdentity};

lazy_static! {
    // Regex for login validation: alphanumeric, underscores, hyphens
    static ref LOGIN_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// bcrypt only reads the first 72 bytes of its input.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Rejects passwords bcrypt would silently truncate. Counts bytes, not characters.
fn validate_password_bytes(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        let mut error = ValidationError::new("password_too_long");
        error.message = Some("Password must be at most 72 bytes".into());
        return Err(error);
    }
    Ok(())
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    #[validate(length(min = 1, message = "login is required"))]
    pub login: String,
    #[validate(
        length(min = 1, message = "password is required"),
        custom = "validate_password_bytes"
    )]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired login name.
    /// Must be between 3 and 32 characters, alphanumeric, and can include underscores or hyphens.
    #[serde(alias = "username")]
    #[validate(
        length(min = 3, max = 32),
        regex(
            path = "LOGIN_REGEX",
            message = "Login must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub login: String,
    /// Optional contact address, unique across users when given.
    #[validate(email)]
    pub email: Option<String>,
    /// Password for the new account.
    /// Must be at least 6 characters and at most 72 bytes long.
    #[validate(length(min = 6), custom = "validate_password_bytes")]
    pub password: String,
}

/// Response returned by a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Login name the token was issued for.
    pub login: String,
    /// The signed session token.
    pub token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Seconds until the token expires.
    pub expires_in: i64,
}
