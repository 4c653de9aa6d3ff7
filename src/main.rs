use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use conservatory::config::ServerConfig;
use conservatory::server::{self, MigrateDirection};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Apply or roll back schema migrations
    Migrate {
        #[clap(short, long, default_value = "conservatory.db")]
        database: String,
        #[clap(subcommand)]
        direction: MigrateDirection,
    },
}

#[derive(clap::Args)]
struct ServeArgs {
    /// TOML file with server settings; flags below take precedence
    #[clap(short, long)]
    config: Option<PathBuf>,
    #[clap(short, long)]
    port: Option<u16>,
    #[clap(short, long)]
    database: Option<String>,
    #[clap(long)]
    photos_dir: Option<PathBuf>,
    #[clap(long)]
    deleted_photos_dir: Option<PathBuf>,
    #[clap(long)]
    cors_origin: Option<String>,
    /// Where the GraphQL façade reaches the REST API
    #[clap(long)]
    api_base_url: Option<String>,
}

impl ServeArgs {
    fn into_config(self) -> Result<ServerConfig> {
        let mut config = ServerConfig::load(self.config.as_deref())?;
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(database) = self.database {
            config.database = database;
        }
        if let Some(dir) = self.photos_dir {
            config.photos_dir = dir;
        }
        if let Some(dir) = self.deleted_photos_dir {
            config.deleted_photos_dir = dir;
        }
        if let Some(origin) = self.cors_origin {
            config.cors_origin = Some(origin);
        }
        if let Some(url) = self.api_base_url {
            config.api_base_url = Some(url);
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Serve(serve_args) => {
            let config = serve_args.into_config()?;
            info!("Starting server on port {}", config.port);
            server::start_server(config).await?;
        }
        Commands::Migrate {
            database,
            direction,
        } => {
            server::migrate_database(&database, direction).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_deref()
        .unwrap_or("info")
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level.to_string()))
        .without_time()
        .init();
}
