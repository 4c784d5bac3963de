//! Document ingestion endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;

use crate::error::{Error, CANT_EXTRACT_MESSAGE};
use crate::extraction::{self, find_invoice_numbers};
use crate::fetch;
use crate::providers::{object_name, BlobStore};
use crate::server::state::AppState;
use crate::types::{DocumentKind, FetchResult, GetTextRequest, GetTextResponse, UploadResult};

/// POST /get_text - Fetch a document, extract its text, optionally archive it.
///
/// Every pipeline failure is logged at its origin and collapses into the
/// generic 404 body; only request-shape problems get a distinct 400.
pub async fn get_text(
    State(state): State<AppState>,
    payload: Result<Json<GetTextRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("rejected non-json request: {}", rejection);
            return Error::NotJson.into_response();
        }
    };

    let Some(source) = request
        .path_url
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Error::MissingField("path_url").into_response();
    };
    let Some(email) = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Error::MissingField("email").into_response();
    };

    let started = Instant::now();
    let kind = DocumentKind::from_source(source);
    tracing::info!("ingesting '{}' as {}", source, kind.display_name());

    let fetched = match fetch::fetch(state.http(), source).await {
        Ok(fetched) => Some(fetched),
        Err(e) => {
            tracing::warn!("fetch of '{}' failed: {}", source, e);
            None
        }
    };

    let text = fetched
        .as_ref()
        .and_then(|fetched| extract_text(&state, kind, fetched, source))
        .filter(|t| !t.trim().is_empty());

    if let Some(text) = &text {
        let references = find_invoice_numbers(text);
        if !references.is_empty() {
            tracing::debug!(
                "invoice references in '{}': {}",
                source,
                references.join(", ")
            );
        }
    }

    let upload = match (state.blob_store(), fetched.as_ref()) {
        (Some(store), Some(fetched)) => upload_blob(store.as_ref(), fetched, email).await,
        _ => None,
    };

    // An enabled blob store that captured no fingerprint fails the request,
    // same as an extraction failure.
    let upload_ok = state.blob_store().is_none() || upload.is_some();

    match text {
        Some(text) if upload_ok => {
            tracing::info!(
                "served '{}' in {:.1}ms",
                source,
                started.elapsed().as_secs_f64() * 1000.0
            );
            (
                StatusCode::OK,
                Json(GetTextResponse {
                    text,
                    file_name: upload.map(|u| u.stored_key),
                }),
            )
                .into_response()
        }
        _ => {
            tracing::warn!("nothing to serve for '{}'", source);
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": CANT_EXTRACT_MESSAGE })),
            )
                .into_response()
        }
    }
}

/// Run the matching extractor, downgrading failures to an absent result
fn extract_text(
    state: &AppState,
    kind: DocumentKind,
    fetched: &FetchResult,
    source: &str,
) -> Option<String> {
    match extraction::extract(kind, fetched, source, &state.config().extraction) {
        Ok(extracted) => {
            if let Some(secondary) = &extracted.secondary {
                tracing::debug!(
                    "secondary reading of '{}' produced {} chars",
                    source,
                    secondary.len()
                );
            }
            Some(extracted.primary)
        }
        Err(e) => {
            tracing::warn!("extraction from '{}' failed: {}", source, e);
            None
        }
    }
}

/// Archive the raw bytes, downgrading storage failures to an absent result
async fn upload_blob(
    store: &dyn BlobStore,
    fetched: &FetchResult,
    owner_id: &str,
) -> Option<UploadResult> {
    let key = object_name(owner_id, &fetched.content_type);
    match store.put(&key, &fetched.bytes, &fetched.content_type).await {
        Ok(fingerprint) => {
            tracing::info!("archived '{}' to {}", key, store.name());
            Some(UploadResult {
                stored_key: key,
                fingerprint,
            })
        }
        Err(e) => {
            tracing::warn!("archival of '{}' failed: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::error::{Result, NOT_JSON_MESSAGE};
    use crate::server::routes;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use axum::Router;
    use serde_json::json;
    use std::io::Write;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    fn app(state: AppState) -> Router {
        let max_body_size = state.config().server.max_body_size;
        routes::router(max_body_size).with_state(state)
    }

    fn state_without_storage() -> AppState {
        AppState::with_blob_store(AppConfig::default(), None).unwrap()
    }

    fn post_json(value: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/get_text")
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn temp_file(suffix: &str, contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[derive(Default)]
    struct StubBlobStore {
        fail: bool,
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl BlobStore for StubBlobStore {
        async fn put(
            &self,
            key: &str,
            _data: &[u8],
            content_type: &str,
        ) -> Result<Option<String>> {
            if self.fail {
                return Err(Error::Storage("bucket unavailable".to_string()));
            }
            self.calls
                .lock()
                .await
                .push((key.to_string(), content_type.to_string()));
            Ok(Some("\"stub-etag\"".to_string()))
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    #[tokio::test]
    async fn root_reports_running() {
        let response = app(state_without_storage())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Server Running Successfully");
    }

    #[tokio::test]
    async fn non_json_body_gets_fixed_400() {
        let response = app(state_without_storage())
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/get_text")
                    .header("content-type", "text/plain")
                    .body(Body::from("path_url=report.pdf"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], NOT_JSON_MESSAGE);
    }

    #[tokio::test]
    async fn missing_email_is_an_explicit_400() {
        let response = app(state_without_storage())
            .oneshot(post_json(json!({ "path_url": "report.pdf" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing field: email");
    }

    #[tokio::test]
    async fn empty_path_url_is_an_explicit_400() {
        let response = app(state_without_storage())
            .oneshot(post_json(json!({ "path_url": "  ", "email": "a@b.c" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing field: path_url");
    }

    #[tokio::test]
    async fn unsupported_extension_yields_generic_404() {
        let file = temp_file(".txt", b"plain notes");
        let response = app(state_without_storage())
            .oneshot(post_json(json!({
                "path_url": file.path().to_str().unwrap(),
                "email": "a@b.c",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], CANT_EXTRACT_MESSAGE);
    }

    #[tokio::test]
    async fn local_csv_returns_canonical_text_without_file_name() {
        let file = temp_file(".csv", b"name,amount\nalice,10\nbob,20\n");
        let response = app(state_without_storage())
            .oneshot(post_json(json!({
                "path_url": file.path().to_str().unwrap(),
                "email": "a@b.c",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["text"], "name,amount\nalice,10\nbob,20\n");
        assert!(json.get("file_name").is_none());
    }

    #[tokio::test]
    async fn malformed_csv_yields_generic_404() {
        let file = temp_file(".csv", b"name,amount\n\xff\xfe\x00bad,1\n");
        let response = app(state_without_storage())
            .oneshot(post_json(json!({
                "path_url": file.path().to_str().unwrap(),
                "email": "a@b.c",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], CANT_EXTRACT_MESSAGE);
    }

    #[tokio::test]
    async fn missing_file_yields_generic_404() {
        let response = app(state_without_storage())
            .oneshot(post_json(json!({
                "path_url": "/nonexistent/report.pdf",
                "email": "a@b.c",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upload_enabled_returns_deterministic_file_name() {
        let store = Arc::new(StubBlobStore::default());
        let state = AppState::with_blob_store(AppConfig::default(), Some(store.clone())).unwrap();

        let file = temp_file(".csv", b"name,amount\nalice,10\n");
        let response = app(state)
            .oneshot(post_json(json!({
                "path_url": file.path().to_str().unwrap(),
                "email": "user@example.com",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["file_name"], "user@example.com.csv");

        let calls = store.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "user@example.com.csv");
        assert_eq!(calls[0].1, "text/csv");
    }

    #[tokio::test]
    async fn local_pdf_with_upload_returns_wrapped_text_and_file_name() {
        let store = Arc::new(StubBlobStore::default());
        let state = AppState::with_blob_store(AppConfig::default(), Some(store.clone())).unwrap();

        let data = crate::extraction::pdf::testutil::build_pdf(&[
            "first page about invoices",
            "second page about totals",
        ]);
        let file = temp_file(".pdf", &data);
        let response = app(state)
            .oneshot(post_json(json!({
                "path_url": file.path().to_str().unwrap(),
                "email": "user@example.com",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let text = json["text"].as_str().unwrap();
        let first = text.find("first page").unwrap();
        let second = text.find("second page").unwrap();
        assert!(first < second);
        assert_eq!(json["file_name"], "user@example.com.pdf");

        let calls = store.calls.lock().await;
        assert_eq!(calls[0].1, "application/pdf");
    }

    #[tokio::test]
    async fn upload_failure_yields_404_despite_extracted_text() {
        let store = Arc::new(StubBlobStore {
            fail: true,
            ..StubBlobStore::default()
        });
        let state = AppState::with_blob_store(AppConfig::default(), Some(store)).unwrap();

        let file = temp_file(".csv", b"name,amount\nalice,10\n");
        let response = app(state)
            .oneshot(post_json(json!({
                "path_url": file.path().to_str().unwrap(),
                "email": "user@example.com",
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], CANT_EXTRACT_MESSAGE);
    }
}
