use std::path::PathBuf;
use std::sync::Arc;

use crate::auth::{Argon2Hasher, CredentialHasher, JwtService};
use crate::core::{Config, Result, ServerError};
use crate::orders::OrderLifecycle;
use crate::services::{CatalogService, Mailbox, UserRegistry};
use crate::store::Store;

/// Server state: shared handles to every service
///
/// Cheap to clone (everything behind `Arc`). Services hold no data of
/// their own; the [`Store`] is the single source of truth.
///
/// | Field | Purpose |
/// |-------|---------|
/// | config | immutable configuration |
/// | store | dataset file + write gate |
/// | catalog | items, reference lists, settings |
/// | registry | accounts and login |
/// | orders | order lifecycle engine |
/// | mailbox | notifications |
/// | jwt_service | session tokens |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<Store>,
    pub catalog: CatalogService,
    pub registry: UserRegistry,
    pub orders: OrderLifecycle,
    pub mailbox: Mailbox,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Build the state with an explicit credential hasher
    pub fn with_hasher(config: Config, hasher: Arc<dyn CredentialHasher>) -> Self {
        let store = Arc::new(Store::new(
            config.data_file.clone(),
            config.seed.clone(),
            hasher,
        ));
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            catalog: CatalogService::new(store.clone()),
            registry: UserRegistry::new(store.clone()),
            orders: OrderLifecycle::new(store.clone()),
            mailbox: Mailbox::new(store.clone()),
            config: Arc::new(config),
            store,
            jwt_service,
        }
    }

    /// Initialize server state
    ///
    /// 1. Create the work directory structure
    /// 2. Wire services around one [`Store`]
    /// 3. Load the dataset once (seeding it if missing) so a broken data
    ///    file fails startup instead of the first request
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let state = Self::with_hasher(config.clone(), Arc::new(Argon2Hasher));
        let dataset = state
            .store
            .load()
            .await
            .map_err(|e| ServerError::Data(e.message))?;

        tracing::info!(
            data_file = %config.data_file.display(),
            users = dataset.users.len(),
            items = dataset.items.len(),
            orders = dataset.orders.len(),
            "Dataset ready"
        );
        Ok(state)
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
