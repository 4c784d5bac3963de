//! Application state for the ingestion server

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::providers::{BlobStore, GcsBlobStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: AppConfig,
    /// Shared HTTP client for remote fetches (carries the fetch timeout)
    http: reqwest::Client,
    /// Blob store, present only when archival is enabled
    blob_store: Option<Arc<dyn BlobStore>>,
}

impl AppState {
    /// Create new application state, connecting the blob store when enabled
    pub async fn new(config: AppConfig) -> Result<Self> {
        let blob_store: Option<Arc<dyn BlobStore>> = if config.storage.enabled {
            tracing::info!("blob archival enabled (bucket: {})", config.storage.bucket);
            let store = GcsBlobStore::new(
                config.storage.bucket.clone(),
                config.storage.key_prefix.clone(),
            )
            .await?;
            Some(Arc::new(store))
        } else {
            tracing::info!("blob archival disabled");
            None
        };

        Self::with_blob_store(config, blob_store)
    }

    /// Create state with an explicit blob store (or none). This is the
    /// injection seam used by tests.
    pub fn with_blob_store(
        config: AppConfig,
        blob_store: Option<Arc<dyn BlobStore>>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("failed to build http client: {}", e)))?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                http,
                blob_store,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get the shared HTTP client
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Get the blob store, if archival is enabled
    pub fn blob_store(&self) -> Option<&Arc<dyn BlobStore>> {
        self.inner.blob_store.as_ref()
    }
}
