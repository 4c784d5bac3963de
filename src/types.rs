//! Request-scoped value types for the ingestion pipeline

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Supported document kinds, derived from the source's file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF document
    Pdf,
    /// Word document (.doc, .docx)
    Word,
    /// Spreadsheet or CSV (.csv, .xlsx, .xls)
    Spreadsheet,
    /// Unknown extension
    Unsupported,
}

impl DocumentKind {
    /// Detect document kind from a lowercased extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "doc" | "docx" => Self::Word,
            "csv" | "xlsx" | "xls" => Self::Spreadsheet,
            _ => Self::Unsupported,
        }
    }

    /// Detect document kind from a URL or filesystem path
    pub fn from_source(source: &str) -> Self {
        Self::from_extension(&source_extension(source))
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Word => "Word document",
            Self::Spreadsheet => "spreadsheet",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Extract the lowercased file extension from a URL or path.
///
/// URLs are reduced to their path component first, so query strings and
/// fragments never leak into the extension. A plain filesystem path (which
/// fails URL parsing) is used as-is.
pub fn source_extension(source: &str) -> String {
    let path = match reqwest::Url::parse(source) {
        Ok(url) => url.path().to_string(),
        Err(_) => source.to_string(),
    };
    std::path::Path::new(&path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Inbound request body for `POST /get_text`.
///
/// Fields are optional at the wire level so the handler can name the missing
/// one in its 400 response instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct GetTextRequest {
    /// URL or local path of the document
    #[serde(default)]
    pub path_url: Option<String>,
    /// Identifier of the requesting owner, used as the storage key stem
    #[serde(default)]
    pub email: Option<String>,
}

/// Successful response body for `POST /get_text`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetTextResponse {
    /// Extracted text
    pub text: String,
    /// Name the raw bytes were archived under (upload-enabled deployments only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Raw bytes plus provenance, as produced by the fetcher
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// Document bytes
    pub bytes: Bytes,
    /// Declared (remote) or extension-derived (local) content type
    pub content_type: String,
    /// Whether the bytes came from a network fetch rather than disk
    pub via_network: bool,
}

/// Extracted text, with an optional second reading for PDFs
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Primary extraction result
    pub primary: String,
    /// Independent second pass (dual-extraction PDF path only)
    pub secondary: Option<String>,
}

impl ExtractedText {
    /// Wrap a single-pass result
    pub fn single(primary: String) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }
}

/// Outcome of a successful blob upload
#[derive(Debug, Clone)]
pub struct UploadResult {
    /// Object name the bytes were stored under
    pub stored_key: String,
    /// Storage-assigned content fingerprint (ETag)
    pub fingerprint: Option<String>,
}
