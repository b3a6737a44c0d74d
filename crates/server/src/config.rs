//! Engine configuration and the wiring it drives.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use data_loader::{source_for, DatasetLoader, DEFAULT_DATASET_PATH, DEFAULT_FETCH_TIMEOUT};
use favorites::{FavoritesStore, FileStore};
use sync_client::SheetSyncClient;
use tracing::{debug, info, warn};

/// Default directory the favorites file lives in
pub const DEFAULT_FAVORITES_DIR: &str = ".reel-recs";

/// Everything needed to build an engine and a favorites store
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// File path or `http(s)://` URL of the dataset
    pub dataset: String,
    pub fetch_timeout: Duration,
    pub favorites_dir: PathBuf,
    /// Base URL of the sheet sync service, if mirroring is wanted
    pub sync_endpoint: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET_PATH.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            favorites_dir: PathBuf::from(DEFAULT_FAVORITES_DIR),
            sync_endpoint: None,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn with_favorites_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.favorites_dir = dir.into();
        self
    }

    /// Blank endpoints are treated as absent
    pub fn with_sync_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.sync_endpoint = endpoint.filter(|e| !e.trim().is_empty());
        self
    }

    /// Loader for the configured dataset. Nothing is fetched yet.
    pub fn build_loader(&self) -> DatasetLoader {
        DatasetLoader::new(source_for(&self.dataset)).with_fetch_timeout(self.fetch_timeout)
    }

    /// Favorites backed by `favorites_dir`, mirrored when a sync endpoint is
    /// configured and answers its health probe.
    ///
    /// An unreachable sync service is logged and leaves mirroring off; it
    /// never prevents local favorites from working.
    pub async fn build_favorites(&self) -> FavoritesStore {
        let files = FileStore::new(&self.favorites_dir);
        debug!("Favorites stored under {}", files.dir().display());
        let store = FavoritesStore::new(Arc::new(files));

        let Some(endpoint) = &self.sync_endpoint else {
            return store;
        };

        let client = match SheetSyncClient::new(endpoint.as_str()) {
            Ok(client) => client,
            Err(e) => {
                warn!("Ignoring sync endpoint {}: {}", endpoint, e);
                return store;
            }
        };

        match client.initialize().await {
            Ok(()) => info!("Mirroring favorites to {}", client.service_address()),
            Err(e) => warn!("Sync service unavailable, favorites stay local: {}", e),
        }
        store.with_remote(Arc::new(client))
    }
}
