//! HTTP transport built on reqwest.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::transport::{Completion, EventHandler, ProgressThrottle, Transport};

/// Streams each download into a scratch file, then hands it to the handler.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    temporary_directory: PathBuf,
    progress_interval: Duration,
}

impl HttpTransport {
    /// Create a transport with the given user agent and connect timeout.
    pub fn new(
        user_agent: &str,
        connect_timeout: Duration,
        temporary_directory: PathBuf,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            temporary_directory,
            progress_interval: Duration::from_millis(100),
        })
    }

    /// Create a transport from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.download.user_agent,
            Duration::from_secs(config.download.connect_timeout_seconds),
            config.temporary_directory(),
        )
    }

    /// Minimum time between two progress events.
    pub fn with_progress_interval(mut self, interval: Duration) -> Self {
        self.progress_interval = interval;
        self
    }
}

impl Transport for HttpTransport {
    fn submit(&self, url: &Url, handler: Arc<dyn EventHandler>) {
        let transport = self.clone();
        let url = url.clone();

        tokio::spawn(async move {
            let completion = transport.fetch(&url, &handler).await;
            if let Err(message) = &completion {
                tracing::debug!("GET {} failed: {}", url, message);
            }
            handler.on_complete(completion);
        });
    }
}

impl HttpTransport {
    async fn fetch(&self, url: &Url, handler: &Arc<dyn EventHandler>) -> Completion {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let expected = response.content_length().unwrap_or(0);
        tracing::debug!("Response status: {} ({} bytes expected)", status, expected);

        let scratch = tempfile::Builder::new()
            .prefix(".pkgfetch-")
            .tempfile_in(&self.temporary_directory)
            .map_err(|e| {
                format!(
                    "Failed to create temporary file in {}: {}",
                    self.temporary_directory.display(),
                    e
                )
            })?;

        let written = self
            .stream_to(&scratch, response, expected, handler.as_ref())
            .await?;
        handler.on_progress(written, expected);

        // The handler relocates synchronously; keep that off the async workers.
        let ready = Arc::clone(handler);
        let scratch = tokio::task::spawn_blocking(move || {
            ready.on_data_ready(scratch.path(), status);
            scratch
        })
        .await
        .map_err(|e| format!("Data handler panicked: {}", e))?;

        // Removes the scratch file unless the handler moved it.
        drop(scratch);

        Ok(status)
    }

    async fn stream_to(
        &self,
        scratch: &NamedTempFile,
        response: reqwest::Response,
        expected: u64,
        handler: &dyn EventHandler,
    ) -> std::result::Result<u64, String> {
        let std_file = scratch.as_file().try_clone().map_err(|e| e.to_string())?;
        let mut file = tokio::fs::File::from_std(std_file);
        let mut stream = response.bytes_stream();
        let mut throttle = ProgressThrottle::new(self.progress_interval);
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| format!("Stream error: {}", e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| format!("Failed to write temporary file: {}", e))?;
            written += chunk.len() as u64;

            if throttle.should_emit() {
                handler.on_progress(written, expected);
            }
        }

        file.flush()
            .await
            .map_err(|e| format!("Failed to write temporary file: {}", e))?;

        Ok(written)
    }
}
