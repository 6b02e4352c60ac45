//! Tasks API - REST server

use axum::Router;
use axum_helpers::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config, run_migrations};
use domain_tasks::{PgTaskRepository, TaskService, handlers};
use migration::Migrator;
use tracing::info;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        "Connecting to PostgreSQL at {}:{}",
        config.database.host, config.database.port
    );

    let db = connect_from_config(&config.database).await?;
    run_migrations::<Migrator>(&db, config.app.name).await?;

    let repository = PgTaskRepository::new(db);
    let service = TaskService::new(repository);

    let api_routes = Router::new().nest("/tasks", handlers::router(service));
    let router = create_router::<handlers::ApiDoc>(api_routes).merge(health_router(config.app));

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    create_app(router, &config.server).await?;

    info!("Tasks API shutdown complete");
    Ok(())
}
