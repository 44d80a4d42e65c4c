use crate::di::{DependenciesInject, DependenciesInjectDeps};
use prometheus_client::registry::Registry;
use std::{sync::Arc, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Registry>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(deps: DependenciesInjectDeps, request_timeout: Duration) -> Self {
        let mut registry = Registry::default();
        let di_container = DependenciesInject::new(deps, &mut registry);

        Self {
            di_container,
            registry: Arc::new(registry),
            request_timeout,
        }
    }
}
