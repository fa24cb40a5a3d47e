//! # Flindor Shop
//!
//! Storefront cart & checkout server.
//!
//! ## Usage
//!
//! ```bash
//! # Optional environment variables
//! export HOST=0.0.0.0
//! export PORT=8080
//! export CATALOG_BASE_URL=https://dummyjson.com
//!
//! # Run the server
//! flindor-shop
//! ```

use shop_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    // Fetch the catalog (fallback on provider failure) and set up state
    let state = AppState::new().await?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Products loaded: {}", state.catalog.len());

    let app = routes::create_router(state);

    info!("🛒 Flindor Shop starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("🧺 Products: GET http://{}/api/v1/products", addr);
        info!("🧾 Sessions: POST http://{}/api/v1/sessions", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  🛒 Flindor Shop 🛒
  ━━━━━━━━━━━━━━━━━━
  Cart & checkout engine
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
