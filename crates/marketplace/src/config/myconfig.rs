use anyhow::{Context, Result, anyhow};
use rust_decimal::Decimal;
use shared::config::RedisConfig;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Redis,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    /// Required when `storage_backend` is Postgres.
    pub database_url: Option<String>,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub run_migrations: bool,
    pub jwt_secret: String,
    pub port: u16,
    pub cache_backend: CacheBackend,
    /// Required when `cache_backend` is Redis.
    pub redis: Option<RedisConfig>,
    pub cart_cache_ttl_secs: i64,
    pub tax_rate: Decimal,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

fn parsed<T>(name: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(name, default)
        .parse::<T>()
        .with_context(|| format!("{name} has an invalid value"))
}

impl Config {
    pub fn init() -> Result<Self> {
        let jwt_secret =
            std::env::var("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;
        let port_str = std::env::var("PORT").context("Missing environment variable: PORT")?;
        let port = port_str
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let storage_backend = match var_or("STORAGE_BACKEND", "postgres").as_str() {
            "postgres" => StorageBackend::Postgres,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(anyhow!(
                    "STORAGE_BACKEND must be 'postgres' or 'memory', got '{other}'"
                ));
            }
        };

        let database_url = match storage_backend {
            StorageBackend::Postgres => Some(
                std::env::var("DATABASE_URL")
                    .context("Missing environment variable: DATABASE_URL")?,
            ),
            StorageBackend::Memory => None,
        };

        let run_migrations = match var_or("RUN_MIGRATIONS", "false").as_str() {
            "true" => true,
            "false" => false,
            other => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{other}'"
                ));
            }
        };

        let db_min_conn = parsed::<u32>("DB_MIN_CONNECTION", "1")?;
        let db_max_conn = parsed::<u32>("DB_MAX_CONNECTION", "10")?;

        let cache_backend = match var_or("CACHE_BACKEND", "redis").as_str() {
            "redis" => CacheBackend::Redis,
            "memory" => CacheBackend::Memory,
            other => {
                return Err(anyhow!(
                    "CACHE_BACKEND must be 'redis' or 'memory', got '{other}'"
                ));
            }
        };

        let redis = match cache_backend {
            CacheBackend::Redis => {
                let host =
                    std::env::var("REDIS_HOST").context("Missing environment variable: REDIS_HOST")?;
                let port = parsed::<u16>("REDIS_PORT", "6379")?;
                let db = parsed::<u8>("REDIS_DB", "0")?;
                let password = std::env::var("REDIS_PASSWORD").ok().filter(|p| !p.is_empty());
                Some(RedisConfig::new(host, port, db, password))
            }
            CacheBackend::Memory => None,
        };

        let cart_cache_ttl_secs = parsed::<i64>("CART_CACHE_TTL_SECS", "60")?;

        let tax_rate = parsed::<Decimal>("TAX_RATE", "0")?;
        if tax_rate < Decimal::ZERO || tax_rate >= Decimal::ONE {
            return Err(anyhow!("TAX_RATE must be a fraction in [0, 1), got {tax_rate}"));
        }

        Ok(Self {
            storage_backend,
            database_url,
            db_min_conn,
            db_max_conn,
            run_migrations,
            jwt_secret,
            port,
            cache_backend,
            redis,
            cart_cache_ttl_secs,
            tax_rate,
            otel_endpoint: var_or("OTEL_ENDPOINT", "http://otel-collector:4317"),
            is_dev: flag("DEV_MODE"),
            enable_file_log: flag("ENABLE_FILE_LOG"),
        })
    }
}
