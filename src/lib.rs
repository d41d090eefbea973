pub mod api;
pub mod config;
pub mod error;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

use std::sync::Arc;
use std::time::Duration;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use logic::{Catalog, YearBounds};
pub use store::{DataProvider, MemoryProvider, PostgresProvider, ProviderError};

/// Build the full application router over `provider`.
pub fn build_app<P: DataProvider + 'static>(
    provider: Arc<P>,
    request_timeout: Option<Duration>,
) -> axum::Router {
    let router = routes::create_router().with_state(Arc::new(Catalog::new(provider)));
    match request_timeout {
        Some(deadline) => router.layer(axum::middleware::from_fn_with_state(
            deadline,
            handlers::request_deadline,
        )),
        None => router,
    }
}

/// Bind to the configured address and serve `app` until the process exits.
pub async fn run_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    use anyhow::Context;
    use tokio::net::TcpListener;

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    log::info!("F1 API server running on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
