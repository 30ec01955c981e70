use crate::{
    auth::{session, LoginRequest, RegisterRequest, TokenResponse},
    error::AppError,
    models::UserResponse,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Creates an account and returns its public fields.
///
/// ## Responses:
/// - `201 Created`: `{id, login, email?, created_at}`.
/// - `400 Bad Request`: Missing or invalid `login`/`email`/`password`.
/// - `409 Conflict`: The login or email is already registered.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let user = session::register(
        &state.db,
        &register_data.login,
        register_data.email.as_deref(),
        &register_data.password,
        state.bcrypt_cost,
    )
    .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Login user
///
/// Verifies the credentials and returns a bearer token.
///
/// ## Responses:
/// - `200 OK`: `{login, token, token_type, expires_in}`.
/// - `400 Bad Request`: Missing `login` or `password`.
/// - `401 Unauthorized`: Unknown login or wrong password, reported identically.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let token = session::login(
        &state.db,
        &state.tokens,
        &state.dummy_hash,
        &login_data.login,
        &login_data.password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        login: login_data.into_inner().login,
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.ttl_secs(),
    }))
}
