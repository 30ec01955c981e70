use actix_web::HttpServer;
use log::info;

use taskforge::{create_app, db, AppError, AppState, Config};

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let pool = db::connect(&config.database_url, config.db_max_connections).await?;
    db::migrate(&pool).await?;

    let state = AppState::new(pool, &config)?;

    info!("Starting TaskForge server at {}", config.server_url());
    HttpServer::new(move || create_app(state.clone()))
        .bind((config.server_host.as_str(), config.server_port))
        .map_err(|e| AppError::Configuration(format!("Failed to bind: {}", e)))?
        .run()
        .await
        .map_err(|e| AppError::InternalServerError(format!("Server error: {}", e)))
}
