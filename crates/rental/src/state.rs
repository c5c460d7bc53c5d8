use crate::{
    di::{DependenciesInject, DependenciesInjectDeps},
    middleware::admin::AdminGuard,
};
use prometheus_client::registry::Registry;
use shared::utils::{SystemMetrics, run_metrics_collector};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub system_metrics: Arc<SystemMetrics>,
    pub admin: AdminGuard,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("registry", &self.registry)
            .field("system_metrics", &self.system_metrics)
            .field("admin_guard_enabled", &self.admin.is_enabled())
            .finish()
    }
}

impl AppState {
    pub fn new(deps: DependenciesInjectDeps, admin_token: Option<String>) -> Self {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(deps, &mut registry);

        system_metrics.register(&mut registry);

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Self {
            di_container,
            registry: Arc::new(registry),
            system_metrics,
            admin: AdminGuard::new(admin_token),
        }
    }
}
