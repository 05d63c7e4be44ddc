//! Fetches one URL and streams its body through the run's hasher

use futures::StreamExt;
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::config::{CHUNK_SIZE, RunConfig};
use crate::digest::algorithm::DigestAlgorithm;
use crate::digest::auth::transfer;
use crate::digest::describe::describe_transport_error;
use crate::digest::progress::TransferProgress;
use crate::error::DownloadFailed;
use crate::session::{Credentials, Session};

/// Digest of a single URL's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestResult {
    pub url: String,
    pub algorithm: DigestAlgorithm,
    /// Lowercase hex
    pub hex: String,
}

#[derive(Debug, Clone)]
pub struct DigestReader {
    algorithm: DigestAlgorithm,
    credentials: Option<Credentials>,
    show_progress: bool,
    debug: bool,
}

impl DigestReader {
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Self {
            algorithm,
            credentials: None,
            show_progress: false,
            debug: false,
        }
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Hash the URL text itself instead of downloading it.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Downloads `url` through `session` and digests the body.
    ///
    /// `label` prefixes the progress bar, typically `" 3/12 "`.
    pub async fn digest_url(
        &self,
        session: &Session,
        url: &str,
        label: &str,
    ) -> Result<DigestResult, DownloadFailed> {
        if self.debug {
            return Ok(self.result(url, self.algorithm.hex_digest(url.as_bytes())));
        }

        let response = transfer(session, url, self.credentials.as_ref())
            .await
            .map_err(|e| transport_failure(url, &e))?;

        let status = response.status();
        info!("GET {} -> {}", url, status);
        if status != StatusCode::OK {
            return Err(DownloadFailed(format!("response was {}", status.as_u16())));
        }

        let mut hasher = self.algorithm.hasher();

        let Some(total) = response.content_length() else {
            debug!("no content length for {}, reading whole body", url);
            let body = response
                .bytes()
                .await
                .map_err(|e| transport_failure(url, &e))?;
            hasher.update(&body);
            return Ok(self.result(url, hex::encode(hasher.finalize())));
        };

        let progress = TransferProgress::new(label, total, self.show_progress);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| transport_failure(url, &e))?;
            for block in chunk.chunks(CHUNK_SIZE) {
                hasher.update(block);
                progress.advance(block.len());
            }
        }

        Ok(self.result(url, hex::encode(hasher.finalize())))
    }

    fn result(&self, url: &str, hex: String) -> DigestResult {
        DigestResult {
            url: url.to_string(),
            algorithm: self.algorithm,
            hex,
        }
    }
}

impl From<&RunConfig> for DigestReader {
    fn from(config: &RunConfig) -> Self {
        Self::new(config.digest)
            .with_credentials(config.credentials.clone())
            .with_progress(config.verbosity > 0)
            .with_debug(config.debug)
    }
}

fn transport_failure(url: &str, error: &reqwest::Error) -> DownloadFailed {
    debug!("transfer of {} failed: {:?}", url, error);
    DownloadFailed(describe_transport_error(error))
}
