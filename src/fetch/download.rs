//! Single-attempt download with atomic placement.

use std::io::Write;
use std::path::Path;

use log::{debug, info};
use url::Url;

use crate::error_handling::FetchError;

/// Result of [`ensure_local_copy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The local path already existed; no request was made.
    AlreadyPresent,
    /// The file was downloaded and written.
    Downloaded {
        /// Bytes written
        bytes: usize,
    },
}

/// Ensures `path` holds the content of `url`.
///
/// If `path` exists nothing is fetched. Otherwise one GET is issued and the
/// body is written to a temporary sibling file which is then renamed onto
/// `path`, so a failed run never leaves a truncated file behind.
///
/// # Errors
///
/// - `FetchError::InvalidUrl` if `url` is not an absolute http(s) URL
/// - `FetchError::Download` / `FetchError::DownloadStatus` on transport or HTTP failure
/// - `FetchError::Write` if the file cannot be written
pub async fn ensure_local_copy(
    client: &reqwest::Client,
    url: &str,
    path: &Path,
) -> Result<FetchOutcome, FetchError> {
    if tokio::fs::try_exists(path).await.unwrap_or(false) {
        info!("{} already present, skipping download", path.display());
        return Ok(FetchOutcome::AlreadyPresent);
    }

    let parsed = validate_download_url(url)?;
    info!("Downloading {} to {}", parsed, path.display());

    let body = download(client, parsed).await?;
    let bytes = body.len();

    // Directory creation, write and fsync are blocking; keep them off the runtime
    let target = path.to_path_buf();
    tokio::task::spawn_blocking(move || write_atomically(&target, &body))
        .await
        .map_err(|e| FetchError::Write {
            path: path.to_path_buf(),
            source: std::io::Error::other(e),
        })??;

    info!("Wrote {} bytes to {}", bytes, path.display());
    Ok(FetchOutcome::Downloaded { bytes })
}

fn validate_download_url(url: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: url.to_string(),
        reason,
    };
    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(invalid(format!("unsupported scheme {other}"))),
    }
}

async fn download(client: &reqwest::Client, url: Url) -> Result<Vec<u8>, FetchError> {
    let url_string = url.to_string();
    let transport = |source: reqwest::Error| FetchError::Download {
        url: url_string.clone(),
        source,
    };

    let response = client.get(url).send().await.map_err(transport)?;
    let status = response.status();
    debug!("GET {} -> {}", url_string, status);
    if !status.is_success() {
        return Err(FetchError::DownloadStatus {
            url: url_string.clone(),
            status,
        });
    }

    let bytes = response.bytes().await.map_err(transport)?;
    Ok(bytes.to_vec())
}

fn write_atomically(path: &Path, body: &[u8]) -> Result<(), FetchError> {
    let write_error = |source: std::io::Error| FetchError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_error)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".download-")
        .tempfile_in(parent)
        .map_err(write_error)?;
    tmp.write_all(body).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use tempfile::TempDir;

    fn client() -> reqwest::Client {
        reqwest::Client::new()
    }

    #[tokio::test]
    async fn test_downloads_when_missing() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/places.geojson"))
                .respond_with(
                    status_code(200).body(r#"{"type":"FeatureCollection","features":[]}"#),
                ),
        );

        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("nested").join("places.geojson");
        let url = server.url("/places.geojson").to_string();

        let outcome = ensure_local_copy(&client(), &url, &path).await.unwrap();
        assert_eq!(outcome, FetchOutcome::Downloaded { bytes: 42 });
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"{"type":"FeatureCollection","features":[]}"#
        );
    }

    #[tokio::test]
    async fn test_existing_file_is_left_alone() {
        // No expectation registered: any request would fail the server's checks
        let server = Server::run();
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("places.geojson");
        std::fs::write(&path, "local content").unwrap();

        let url = server.url("/places.geojson").to_string();
        let outcome = ensure_local_copy(&client(), &url, &path).await.unwrap();

        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "local content");
    }

    #[tokio::test]
    async fn test_http_error_is_download_error_and_writes_nothing() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/missing.geojson"))
                .respond_with(status_code(404)),
        );

        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("missing.geojson");
        let url = server.url("/missing.geojson").to_string();

        let err = ensure_local_copy(&client(), &url, &path).await.unwrap_err();
        assert!(err.is_download_error(), "got {err}");
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_connection_refused_is_download_error() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join("places.geojson");
        // Port 9 (discard) on loopback is not expected to accept HTTP
        let err = ensure_local_copy(&client(), "http://127.0.0.1:9/x.geojson", &path)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Download { .. }), "got {err}");
    }

    #[tokio::test]
    async fn test_unwritable_target_is_write_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/places.geojson"))
                .respond_with(status_code(200).body("{}")),
        );

        let dir = TempDir::new().expect("Failed to create temp directory");
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("places.geojson");
        let url = server.url("/places.geojson").to_string();

        let err = ensure_local_copy(&client(), &url, &path).await.unwrap_err();
        assert!(err.is_write_error(), "got {err}");
    }

    #[test]
    fn test_validate_download_url() {
        assert!(validate_download_url("https://example.com/a.geojson").is_ok());
        assert!(matches!(
            validate_download_url("ftp://example.com/a.geojson"),
            Err(FetchError::InvalidUrl { .. })
        ));
        assert!(matches!(
            validate_download_url("not a url"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }
}
