pub mod app;
pub mod error;
pub mod handlers;
pub mod openapi;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum MigrateDirection {
    Up,
    Down,
    Fresh,
}

use crate::config::ServerConfig;
use crate::database::{connection::*, migrations::Migrator};
use anyhow::Result;
use sea_orm_migration::prelude::*;
use tracing::info;

pub async fn start_server(config: ServerConfig) -> Result<()> {
    let database_url = get_database_url(Some(&config.database));
    let db = establish_connection(&database_url).await?;

    setup_database(&db).await?;

    let app = app::create_app(db, &config).await?;

    log_routes(&config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes(config: &ServerConfig) {
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /plants                     - Plants, with /:id/photos, /:id/waterings, /:id/notes, /:id/children");
    info!("  /waterings                  - Watering events");
    info!("  /photos                     - Photo uploads (multipart)");
    info!("  /notes                      - Care notes");
    info!(
        "  /static                     - Photo files from {}",
        config.photos_dir.display()
    );
    info!("  /api-docs/openapi.json      - OpenAPI document");

    #[cfg(feature = "graphql")]
    {
        info!("  /graphql                    - GraphQL façade & Playground");
        info!("    reading plants from {}", config.api_base_url());
    }
}

pub async fn migrate_database(database_path: &str, direction: MigrateDirection) -> Result<()> {
    let database_url = get_database_url(Some(database_path));
    let db = establish_connection(&database_url).await?;

    match direction {
        MigrateDirection::Up => {
            info!("Running migrations up");
            Migrator::up(&db, None).await?;
        }
        MigrateDirection::Down => {
            info!("Running migrations down");
            Migrator::down(&db, None).await?;
        }
        MigrateDirection::Fresh => {
            info!("Running fresh migrations (down then up)");
            Migrator::down(&db, None).await?;
            Migrator::up(&db, None).await?;
        }
    }

    info!("Database migration completed");
    Ok(())
}
