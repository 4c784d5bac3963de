//! Blob store provider trait

use async_trait::async_trait;

use crate::error::Result;

/// Trait for archiving raw document bytes.
///
/// Implementations:
/// - `GcsBlobStore`: Google Cloud Storage
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `key` with the given content type.
    ///
    /// Returns the storage-assigned content fingerprint (ETag) when the
    /// backend provides one.
    async fn put(&self, key: &str, data: &[u8], content_type: &str) -> Result<Option<String>>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Compute the deterministic object name for an owner's upload:
/// `{owner}.{subtype}`, where the subtype is the content-type segment after
/// `/` with any parameters stripped (`text/csv; charset=utf-8` → `csv`).
pub fn object_name(owner_id: &str, content_type: &str) -> String {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    let subtype = essence.rsplit('/').next().unwrap_or("bin");
    format!("{}.{}", owner_id, subtype)
}
