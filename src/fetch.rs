//! Document fetcher: network download or local read

use std::io::ErrorKind;

use crate::error::{Error, Result};
use crate::types::FetchResult;

/// Fetch document bytes from a URL or local path.
///
/// `http`/`https` sources are downloaded with the shared client (which
/// carries the configured timeout); anything else is read from disk. The
/// content type comes from the response header for remote fetches and from
/// the extension for local files, falling back to `application/octet-stream`.
pub async fn fetch(client: &reqwest::Client, source: &str) -> Result<FetchResult> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_remote(client, source).await
    } else {
        fetch_local(source).await
    }
}

async fn fetch_remote(client: &reqwest::Client, source: &str) -> Result<FetchResult> {
    let url =
        reqwest::Url::parse(source).map_err(|e| Error::InvalidUrl(format!("{}: {}", source, e)))?;

    tracing::info!("downloading {}", source);

    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            Error::Timeout(source.to_string())
        } else {
            Error::Network(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Network(format!(
            "unexpected status {} from {}",
            status, source
        )));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = response.bytes().await.map_err(|e| {
        if e.is_timeout() {
            Error::Timeout(source.to_string())
        } else {
            Error::Network(e.to_string())
        }
    })?;

    tracing::info!("downloaded {} bytes ({})", bytes.len(), content_type);

    Ok(FetchResult {
        bytes,
        content_type,
        via_network: true,
    })
}

async fn fetch_local(source: &str) -> Result<FetchResult> {
    tracing::info!("reading local file {}", source);

    let data = tokio::fs::read(source).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            Error::NotFound(source.to_string())
        } else {
            Error::Io(e)
        }
    })?;

    let content_type = mime_guess::from_path(source)
        .first_or_octet_stream()
        .to_string();

    Ok(FetchResult {
        bytes: data.into(),
        content_type,
        via_network: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn local_file_roundtrips_bytes_and_content_type() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(b"a,b\n1,2\n").unwrap();

        let result = fetch(&client(), file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(&result.bytes[..], b"a,b\n1,2\n");
        assert_eq!(result.content_type, "text/csv");
        assert!(!result.via_network);
    }

    #[tokio::test]
    async fn missing_local_file_is_not_found() {
        let err = fetch(&client(), "/nonexistent/report.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn malformed_url_is_invalid_url() {
        let err = fetch(&client(), "http://[not-a-host/report.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn unreachable_host_fails_within_timeout() {
        let started = std::time::Instant::now();
        // Port 9 (discard) is closed on any sane test machine; either the
        // connection is refused immediately or the 2s client timeout fires.
        let err = fetch(&client(), "http://127.0.0.1:9/report.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Network(_) | Error::Timeout(_)));
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
