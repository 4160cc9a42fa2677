use anyhow::Context;
use shipcheck::config::Config;
use shipcheck::SuiteContext;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_WARM_CITY: &str = "Псков";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("shipcheck={},sqlx=warn", config.app.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting shipping API cache warm-up");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Upstream: {}", config.api.base_url);

    let (context, pool) = SuiteContext::connect(&config)
        .await
        .context("Failed to prepare the cache database")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let token = context
        .tokens
        .token()
        .await
        .context("Failed to obtain an access token")?;
    tracing::info!(expires_at = %token.expired_at, "Access token ready");

    let cities = context
        .locations
        .get_cities()
        .await
        .context("Failed to resolve the city list")?;
    tracing::info!(count = cities.len(), "City list ready");

    let city = std::env::var("WARM_CITY").unwrap_or_else(|_| DEFAULT_WARM_CITY.to_string());
    let route = context
        .locations
        .route_for_city(&city)
        .await
        .with_context(|| format!("Failed to resolve a route for {}", city))?;
    tracing::info!(
        city = %city,
        from_postal_code = ?route.from.postal_code,
        to_postal_code = ?route.to.postal_code,
        "Route ready"
    );

    let modes = context
        .tariffs
        .get_delivery_modes()
        .await
        .context("Failed to resolve the tariff catalogue")?;
    tracing::info!(count = modes.len(), "Delivery modes ready");

    pool.close().await;
    tracing::info!("Cache warm-up finished");

    Ok(())
}
