#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::test;
use serde_json::json;
use taskforge::{create_app, db, AppState, Config};

pub const TEST_SECRET: &str = "integration_test_secret";

pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .expect("test configuration is valid")
}

/// Fresh state backed by its own in-memory database.
pub async fn test_state() -> AppState {
    let config = test_config();
    let pool = db::connect(&config.database_url, config.db_max_connections)
        .await
        .expect("Failed to open in-memory database");
    db::migrate(&pool).await.expect("Failed to run migrations");
    AppState::new(pool, &config).expect("Failed to build state")
}

pub async fn spawn_app() -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(create_app(test_state().await)).await
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn register(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    login: &str,
    password: &str,
) -> StatusCode {
    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "login": login, "password": password }))
        .to_request();
    test::call_service(app, req).await.status()
}

/// Registers `login` and returns a bearer token for it.
pub async fn register_and_login(
    app: &impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>,
    login: &str,
    password: &str,
) -> String {
    let status = register(app, login, password).await;
    assert_eq!(status, StatusCode::CREATED, "Failed to register {}", login);

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "login": login, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "Failed to log in {}", login);

    let body: serde_json::Value = test::read_body_json(resp).await;
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}
