#![doc = "The `taskforge` library crate."]
#![doc = ""]
#![doc = "A small REST API for per-user task lists: registration, login with JWT"]
#![doc = "bearer tokens, and CRUD over tasks that only their owner can see."]
#![doc = "The binary (`main.rs`) loads the configuration and serves [`create_app`]."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};

pub use crate::config::Config;
pub use crate::error::AppError;
pub use crate::state::AppState;

/// Builds the application: shared state, CORS, request logging, the public
/// index and health routes, and the `/api` routes.
pub fn create_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(routes::json_config())
        .wrap(
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        )
        .wrap(Logger::default())
        .service(routes::health::index)
        .service(routes::health::health)
        .service(web::scope("/api").configure(routes::config))
}
