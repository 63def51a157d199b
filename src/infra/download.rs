//! Tarball transfer
//!
//! Streams a sysroot tarball over HTTPS into the sysroot directory. A failed
//! transfer is retried with a doubling delay; the last failure is returned
//! and the partial tarball removed. Retries live here only, the install
//! pipeline never restarts as a whole.

use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::DownloadError;

/// Receives (`bytes_written`, `content_length`); length is 0 when the server sends none
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Longest pause between two attempts
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Whole-transfer timeout; sysroot images run to a few hundred MiB
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(1800);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP fetcher for sysroot tarballs
#[derive(Debug, Clone)]
pub struct TarballFetcher {
    client: reqwest::Client,
    attempts: u32,
    retry_delay: Duration,
}

impl TarballFetcher {
    /// `attempts` is clamped to at least one; `retry_delay` doubles after each failure
    pub fn new(attempts: u32, retry_delay: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(TRANSFER_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::debug!("Falling back to default HTTP client: {e}");
                reqwest::Client::new()
            });

        Self {
            client,
            attempts: attempts.max(1),
            retry_delay,
        }
    }

    /// Fetch `url` into `tarball`, returning the number of bytes written
    ///
    /// The parent directory must already exist.
    pub async fn fetch(
        &self,
        url: &str,
        tarball: &Path,
        progress: Option<ProgressCallback>,
    ) -> Result<u64, DownloadError> {
        let mut delay = self.retry_delay;
        let mut attempt = 1;

        loop {
            match self.fetch_once(url, tarball, progress.as_ref()).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if attempt < self.attempts => {
                    tracing::warn!(
                        "Fetching {url} failed (attempt {attempt}/{}): {e}; retrying in {delay:?}",
                        self.attempts
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(MAX_RETRY_DELAY);
                    attempt += 1;
                }
                Err(e) => {
                    if let Err(cleanup) = tokio::fs::remove_file(tarball).await {
                        if cleanup.kind() != std::io::ErrorKind::NotFound {
                            tracing::debug!("Could not remove {}: {cleanup}", tarball.display());
                        }
                    }
                    return Err(e);
                }
            }
        }
    }

    async fn fetch_once(
        &self,
        url: &str,
        tarball: &Path,
        progress: Option<&ProgressCallback>,
    ) -> Result<u64, DownloadError> {
        let request_error = |e: reqwest::Error| DownloadError::Request {
            url: url.to_string(),
            error: e.to_string(),
        };
        let write_error = |e: std::io::Error| DownloadError::Write {
            path: tarball.to_path_buf(),
            error: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let length = response.content_length().unwrap_or(0);
        let mut out = BufWriter::new(File::create(tarball).await.map_err(write_error)?);
        let mut written = 0u64;
        let mut body = response.bytes_stream();

        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(request_error)?;
            out.write_all(&chunk).await.map_err(write_error)?;
            written += chunk.len() as u64;
            if let Some(report) = progress {
                report(written, length);
            }
        }
        out.flush().await.map_err(write_error)?;

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TARBALL_PATH: &str = "/chrome-linux-sysroot/toolchain/r1/debian_wheezy_arm_sysroot.tgz";

    fn fetcher(attempts: u32) -> TarballFetcher {
        TarballFetcher::new(attempts, Duration::from_millis(5))
    }

    #[tokio::test]
    async fn test_fetch_writes_tarball_and_counts_bytes() {
        let server = MockServer::start().await;
        let body = vec![0x1f, 0x8b, 0x08, 0x00, 1, 2, 3, 4];
        Mock::given(method("GET"))
            .and(path(TARBALL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let tarball = temp.path().join("debian_wheezy_arm_sysroot.tgz");
        let written = fetcher(1)
            .fetch(&format!("{}{TARBALL_PATH}", server.uri()), &tarball, None)
            .await
            .unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&tarball).unwrap(), body);
    }

    #[tokio::test]
    async fn test_progress_sees_content_length() {
        let server = MockServer::start().await;
        let body = vec![7u8; 4096];
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(body.clone()))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let last = Arc::new(AtomicU64::new(0));
        let total = Arc::new(AtomicU64::new(0));
        let (last_seen, total_seen) = (last.clone(), total.clone());
        let progress: ProgressCallback = Box::new(move |written, length| {
            last_seen.store(written, Ordering::SeqCst);
            total_seen.store(length, Ordering::SeqCst);
        });

        fetcher(1)
            .fetch(&format!("{}{TARBALL_PATH}", server.uri()), &temp.path().join("t.tgz"), Some(progress))
            .await
            .unwrap();

        assert_eq!(last.load(Ordering::SeqCst), 4096);
        assert_eq!(total.load(Ordering::SeqCst), 4096);
    }

    #[tokio::test]
    async fn test_unavailable_mirror_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(TARBALL_PATH))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(TARBALL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"sysroot".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let tarball = temp.path().join("t.tgz");
        let written = fetcher(3)
            .fetch(&format!("{}{TARBALL_PATH}", server.uri()), &tarball, None)
            .await
            .unwrap();

        assert_eq!(written, 7);
    }

    #[tokio::test]
    async fn test_missing_revision_fails_after_every_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let tarball = temp.path().join("t.tgz");
        let url = format!("{}{TARBALL_PATH}", server.uri());
        let err = fetcher(2).fetch(&url, &tarball, None).await.unwrap_err();

        match err {
            DownloadError::Status { url: failed, status } => {
                assert_eq!(failed, url);
                assert_eq!(status, 404);
            }
            e => panic!("Expected Status, got: {e:?}"),
        }
        assert!(!tarball.exists());
    }

    #[tokio::test]
    async fn test_zero_attempts_still_fetches_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let result = fetcher(0)
            .fetch(&format!("{}{TARBALL_PATH}", server.uri()), &temp.path().join("t.tgz"), None)
            .await;

        assert!(matches!(result, Err(DownloadError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_missing_sysroot_directory_is_write_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let tarball = temp.path().join("debian_wheezy_arm-sysroot").join("t.tgz");
        let result = fetcher(1)
            .fetch(&format!("{}{TARBALL_PATH}", server.uri()), &tarball, None)
            .await;

        assert!(matches!(result, Err(DownloadError::Write { .. })));
    }
}
