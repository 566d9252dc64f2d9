use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{
    auth::StaticTokenAuthenticator, memory_store::InMemoryUserStore, rest_store::RestUserStore,
    storage::LocalStorage,
};
use crate::config::{ServerConfig, StoreKind};
use crate::core::catalog::{init_catalog, Catalog};
use crate::core::preferences::PreferenceStore;
use crate::core::service::CategoryService;
use crate::core::{Authenticator, UserId, UserRecord, UserStore};
use crate::utils::error::{AppError, Result};

pub struct AppState {
    pub config: ServerConfig,
    pub service: CategoryService,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub async fn new(config: ServerConfig) -> Result<Arc<Self>> {
        let store = build_store(&config)?;
        let authenticator = Arc::new(build_authenticator(&config));

        tracing::info!("Building category catalog...");
        let catalog = init_catalog(&config, LocalStorage::new(".".to_string())).await;
        tracing::info!("Catalog ready with {} categories", catalog.len());

        Ok(Self::from_parts(config, catalog, store, authenticator))
    }

    pub fn from_parts(
        config: ServerConfig,
        catalog: Catalog,
        store: Arc<dyn UserStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Arc<Self> {
        let service = CategoryService::new(
            Arc::new(catalog),
            PreferenceStore::new(store),
            config.catalog.page_size,
        );

        Arc::new(Self {
            config,
            service,
            authenticator,
        })
    }
}

fn build_store(config: &ServerConfig) -> Result<Arc<dyn UserStore>> {
    match config.store.r#type {
        StoreKind::Memory => {
            let users = config.users.iter().map(|seed| UserRecord {
                id: UserId::new(seed.id.clone()),
                name: seed.name.clone(),
                email: seed.email.clone(),
                categories: seed.categories.clone(),
            });
            let store = InMemoryUserStore::with_users(users);
            tracing::info!("Using in-memory user store with {} users", config.users.len());
            Ok(Arc::new(store))
        }
        StoreKind::Rest => {
            let endpoint = config.store.endpoint.as_deref().ok_or_else(|| AppError::MissingConfigError {
                field: "store.endpoint".to_string(),
            })?;
            let timeout = Duration::from_secs(config.store_timeout_seconds());
            tracing::info!("Using REST user store at {}", endpoint);
            Ok(Arc::new(RestUserStore::new(endpoint, timeout)?))
        }
    }
}

fn build_authenticator(config: &ServerConfig) -> StaticTokenAuthenticator {
    StaticTokenAuthenticator::new(config.users.iter().filter_map(|seed| {
        seed.token
            .as_ref()
            .map(|token| (token.clone(), UserId::new(seed.id.clone())))
    }))
}
