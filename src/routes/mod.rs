pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;

/// Registers the `/api` routes. Everything under `/tasks` sits behind `AuthMiddleware`.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::register).service(auth::login).service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}

/// JSON body settings: unreadable or incomplete payloads become `ValidationError` (400).
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}
