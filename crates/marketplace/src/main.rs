use anyhow::{Context, Result};
use chrono::Duration;
use dotenv::dotenv;
use marketplace::{
    config::{CacheBackend, Config, StorageBackend},
    di::{ServiceSettings, Stores},
    handler::AppRouter,
    repository::memory::MemoryStore,
    service::OrderServiceConfig,
    state::AppState,
};
use shared::{
    abstract_trait::DynCacheBackend,
    cache::{MemoryCacheBackend, RedisCacheBackend},
    config::{ConnectionManager, ConnectionPool, RedisClient},
    utils::{Telemetry, init_logger},
};
use std::sync::Arc;
use tracing::{error, info, warn};

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("🔄 Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;
    info!("✅ Migrations completed");
    Ok(())
}

async fn build_stores(config: &Config) -> Result<Stores> {
    match config.storage_backend {
        StorageBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;

            let pool = ConnectionManager::new_pool(url, config.db_min_conn, config.db_max_conn)
                .await
                .context("Failed to initialize database pool")?;

            if config.run_migrations {
                run_migrations(&pool).await?;
            }

            Ok(Stores::postgres(pool))
        }
        StorageBackend::Memory => {
            warn!("⚠️ Using the in-memory store; data is lost on restart");
            Ok(Stores::memory(MemoryStore::new()))
        }
    }
}

async fn build_cache(config: &Config) -> Result<DynCacheBackend> {
    match (&config.cache_backend, &config.redis) {
        (CacheBackend::Redis, Some(redis_config)) => {
            let redis = RedisClient::new(redis_config).context("Failed to connect to Redis")?;
            redis.ping().await.context("Failed to ping Redis server")?;
            Ok(Arc::new(RedisCacheBackend::new(redis.pool)))
        }
        (CacheBackend::Redis, None) => anyhow::bail!("REDIS_HOST is required for the redis cache"),
        (CacheBackend::Memory, _) => Ok(Arc::new(MemoryCacheBackend::new())),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::new("marketplace", config.otel_endpoint.clone());
    let providers = telemetry.init().context("Failed to initialize telemetry")?;

    init_logger(
        &providers.logger,
        "marketplace",
        config.is_dev,
        config.enable_file_log,
    );

    let stores = build_stores(&config).await?;
    let cache = build_cache(&config).await?;

    let settings = ServiceSettings {
        cart_cache_ttl: Duration::seconds(config.cart_cache_ttl_secs),
        order: OrderServiceConfig {
            tax_rate: config.tax_rate,
        },
    };

    let state = AppState::new(&config.jwt_secret, stores, cache, settings);
    state.spawn_metrics_collector();

    info!("🚀 Marketplace service starting on port {}", config.port);

    let served = AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server");

    info!("Shutting down servers...");

    if let Err(e) = providers.shutdown() {
        error!("Telemetry shutdown failed: {e}");
    }

    served
}
