use std::sync::Arc;

use tavola_core::{
    backend::StoreBackendBuilder,
    error::{StoreError, StoreResult},
    store::StoreGateway,
};
use tavola_memory::InMemoryStore;
use tracing::{error, info, warn};

use crate::config::{BackendChoice, Config};

/// Shared, read-only request state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no database is configured or the connection could not be set up.
    pub store: Option<StoreGateway>,
}

impl AppState {
    pub fn new(config: Config, store: Option<StoreGateway>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Opens the configured store. A store that cannot be set up is logged and left
    /// absent, so the service still starts and `/test` can report it.
    pub async fn connect(config: Config) -> Self {
        let store = match open_store(&config).await {
            Ok(store) => store,
            Err(e) => {
                error!("Failed to initialize database: {e}");
                None
            }
        };

        Self::new(config, store)
    }

    /// Returns the store handle, or [`StoreError::Unavailable`] if there is none.
    pub fn store(&self) -> StoreResult<&StoreGateway> {
        self.store
            .as_ref()
            .ok_or(StoreError::Unavailable)
    }
}

async fn open_store(config: &Config) -> StoreResult<Option<StoreGateway>> {
    match config.backend() {
        BackendChoice::Disabled => {
            warn!("DATABASE_URL or DATABASE_NAME not set, running without a database");
            Ok(None)
        }
        BackendChoice::Memory => {
            info!("Using in-memory document store");
            let backend = InMemoryStore::builder().build().await?;
            Ok(Some(StoreGateway::new(backend)))
        }
        BackendChoice::MongoDb { url, database } => open_mongodb(url, database).await,
    }
}

#[cfg(feature = "mongodb")]
async fn open_mongodb(url: &str, database: &str) -> StoreResult<Option<StoreGateway>> {
    let backend = tavola_mongodb::MongoDbStore::builder(url, database)
        .build()
        .await?;
    info!(database = backend.database_name(), "Using MongoDB document store");

    Ok(Some(StoreGateway::new(backend)))
}

#[cfg(not(feature = "mongodb"))]
async fn open_mongodb(_url: &str, _database: &str) -> StoreResult<Option<StoreGateway>> {
    Err(StoreError::Initialization(
        "built without the `mongodb` feature".to_string(),
    ))
}
