//! docingest: document-ingestion HTTP service
//!
//! Given a URL or local path and an owner identifier, the service fetches the
//! document, extracts its text by file type (PDF, Word, spreadsheet/CSV),
//! optionally archives the raw bytes to blob storage, and returns the text as
//! JSON. Format parsing is delegated to `pdf-extract`/`lopdf`, `docx-rs`, and
//! `calamine`/`csv`; this crate orchestrates.

pub mod config;
pub mod error;
pub mod extraction;
pub mod fetch;
pub mod providers;
pub mod server;
pub mod types;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::{DocumentKind, ExtractedText, FetchResult, GetTextRequest, GetTextResponse};
