//! Google Cloud Storage blob store

use async_trait::async_trait;

use google_cloud_storage::client::{Client as GcsClient, ClientConfig};
use google_cloud_storage::http::objects::upload::{Media, UploadObjectRequest, UploadType};

use crate::error::{Error, Result};
use crate::providers::blob_store::BlobStore;

/// Google Cloud Storage blob store
pub struct GcsBlobStore {
    client: GcsClient,
    bucket: String,
    prefix: String,
}

impl GcsBlobStore {
    /// Create a new GCS blob store.
    ///
    /// Credentials are resolved through the client library's standard auth
    /// chain (service account key, metadata server, ...).
    pub async fn new(bucket: String, prefix: String) -> Result<Self> {
        let config = ClientConfig::default()
            .with_auth()
            .await
            .map_err(|e| Error::Config(format!("failed to create GCS client: {}", e)))?;

        Ok(Self {
            client: GcsClient::new(config),
            bucket,
            prefix,
        })
    }

    /// Get the full object path for a key
    fn object_path(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait]
impl BlobStore for GcsBlobStore {
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<Option<String>> {
        let mut media = Media::new(self.object_path(key));
        media.content_type = content_type.to_string().into();
        let upload_type = UploadType::Simple(media);

        let object = self
            .client
            .upload_object(
                &UploadObjectRequest {
                    bucket: self.bucket.clone(),
                    ..Default::default()
                },
                data.to_vec(),
                &upload_type,
            )
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        tracing::debug!(
            "stored gs://{}/{} ({} bytes, etag {})",
            self.bucket,
            self.object_path(key),
            data.len(),
            object.etag
        );

        let fingerprint = if object.etag.is_empty() {
            None
        } else {
            Some(object.etag)
        };
        Ok(fingerprint)
    }

    fn name(&self) -> &str {
        "gcs"
    }
}
