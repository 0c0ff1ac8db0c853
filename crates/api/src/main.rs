//! Orchard API server binary

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use orchard_api::{routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; real deployments inject the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "orchard_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("invalid configuration")?;

    let pool = orchard_shared::create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to database")?;

    orchard_shared::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let bind_address = config.bind_address.clone();
    let state = AppState::new(pool, config);
    let app = routes::create_router(state).layer(tower_http::trace::TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    tracing::info!(%bind_address, "orchard-api listening");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}
