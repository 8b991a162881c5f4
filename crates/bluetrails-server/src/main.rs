//! BlueTrails Content Gateway Server
//!
//! Serves the ocean-conservation site's content API: animal encyclopedia
//! entries, home page speeches, quiz content and EPA water-quality
//! predictions, all fetched from Supabase with a single English-fallback
//! retry for translated resources.
//!
//! Usage:
//! ```bash
//! # With environment variables
//! SUPABASE_URL=https://project.supabase.co SUPABASE_KEY=key bluetrails-server
//!
//! # With a config file (env vars override file values)
//! bluetrails-server --config config.yaml
//! ```
//!
//! Test with:
//! ```bash
//! curl http://localhost:8080/api/animals?locale=id
//! curl http://localhost:8080/api/epa/prediction?site_id=12&date=2024-06-01
//! ```

mod config;

use bluetrails_gateway::{AppState, CorsConfig, api_router};
use bluetrails_store::{StoreClient, StoreConfig};
use clap::Parser;
use config::ServerConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// BlueTrails Server - localized content gateway
#[derive(Parser)]
#[command(name = "bluetrails-server")]
#[command(about = "BlueTrails content gateway for the ocean-conservation site", long_about = None)]
struct Cli {
    /// Path to configuration file (YAML or TOML)
    #[arg(short, long, value_name = "FILE", env = "BLUETRAILS_CONFIG")]
    config: Option<String>,

    /// Port to listen on (overrides config file and PORT)
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, then let environment variables override it
    let mut config = if let Some(ref config_path) = cli.config {
        ServerConfig::from_file(config_path)?
    } else {
        ServerConfig::default()
    };
    config.merge_env();

    // CLI port override (highest precedence)
    if let Some(port) = cli.port {
        config.port = port;
    }

    let filter = EnvFilter::new(&config.logging.level);
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Some(ref config_path) = cli.config {
        info!("Loaded configuration from {}", config_path);
    }

    // Missing store credentials abort here, before binding
    config.validate()?;

    let store_url = config.store.url.clone().unwrap_or_default();
    let store_key = config.store.key.clone().unwrap_or_default();
    let store = StoreClient::new(StoreConfig::new(store_url, store_key))?;

    let cors = CorsConfig {
        allowed_origins: config.cors.allowed_origins.clone(),
    };

    let state = AppState::new(Arc::new(store), cors);
    let app = api_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!(
        environment = %config.environment,
        "BlueTrails content gateway listening on {}",
        addr
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
