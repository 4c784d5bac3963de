//! Storage providers

pub mod blob_store;
pub mod gcs;

pub use blob_store::{object_name, BlobStore};
pub use gcs::GcsBlobStore;
