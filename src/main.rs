use f1_stats_api::config::AppConfig;
use f1_stats_api::store::PostgresProvider;
use f1_stats_api::{build_app, run_server, seed};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with explicit filter to suppress sqlx debug logs
    use env_logger::Builder;
    use log::LevelFilter;

    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter_module("sqlx", LevelFilter::Warn)
        .parse_default_env()
        .init();

    println!("F1 Stats API: read-only championship data");

    let config = AppConfig::load()?;
    log::info!("Configuration loaded: server={}", config.server_address());

    // Serve the bundled dataset from memory instead of PostgreSQL (optional)
    let app = if std::env::var("LOAD_SEED_DATA").unwrap_or_default() == "true" {
        log::info!("Serving seed data from memory");
        let provider = seed::seed_provider()?;
        build_app(Arc::new(provider), config.request_timeout())
    } else {
        log::info!("Connecting to PostgreSQL...");
        let provider =
            PostgresProvider::new(&config.database_url(), config.max_connections()).await?;
        build_app(Arc::new(provider), config.request_timeout())
    };

    run_server(app, &config).await
}
