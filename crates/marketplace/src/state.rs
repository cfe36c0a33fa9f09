use crate::di::{DependenciesInject, ServiceSettings, Stores};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynCacheBackend, DynJwtService},
    cache::CacheStore,
    config::JwtConfig,
    utils::{SystemMetrics, run_metrics_collector},
};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: DynJwtService,
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl AppState {
    /// Wires every service over the given stores and cache backend.
    /// System metrics are registered but not collected; see
    /// [`AppState::spawn_metrics_collector`].
    pub fn new(
        jwt_secret: &str,
        stores: Stores,
        cache_backend: DynCacheBackend,
        settings: ServiceSettings,
    ) -> Self {
        let jwt_config = Arc::new(JwtConfig::new(jwt_secret)) as DynJwtService;
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let cache = Arc::new(CacheStore::namespaced(cache_backend, "marketplace"));
        let di_container = DependenciesInject::new(stores, cache, settings, &mut registry);

        registry.register_metrics(&system_metrics);

        Self {
            jwt_config,
            di_container,
            registry: Arc::new(Mutex::new(registry)),
            system_metrics,
        }
    }

    pub fn spawn_metrics_collector(&self) {
        tokio::spawn(run_metrics_collector(self.system_metrics.clone()));
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
