//! Byte-fetch collaborator for the embedding pipeline
//!
//! This module provides the `ResourceFetcher` seam and its HTTP implementation.
//!
//! ## Architecture
//!
//! `HttpFetcher::fetch()` turns a reference into raw bytes plus a content type:
//! - `data:` references are decoded locally, no request is made
//! - relative references are resolved against `EmbedOptions::base_url`
//! - responses are streamed with a size limit and a per-request timeout
//! - when an image placeholder is configured, it replaces any failure
//!
//! Every reference is fetched independently; there is no cross-node cache.
//!
//! ## Usage
//!
//! ```ignore
//! use kodegen_tools_snapshot::inline_css::{HttpFetcher, ResourceFetcher};
//! use kodegen_tools_snapshot::EmbedOptions;
//!
//! let fetcher = HttpFetcher::new();
//! let options = EmbedOptions::default();
//! let resource = fetcher.fetch("https://example.com/logo.png", &options).await?;
//! ```

use futures::StreamExt;
use reqwest::Client;
use std::time::{SystemTime, UNIX_EPOCH};
use url::Url;

use super::types::{EmbedError, EmbedResult, FetchedResource};
use super::utils::{is_data_url, resolve_url};
use crate::config::EmbedOptions;
use crate::utils::{CACHE_BUST_PARAM, FALLBACK_CONTENT_TYPE};

/// Turns a resource reference into bytes plus the content type the source reported.
///
/// Options are passed through from the caller unmodified.
#[allow(async_fn_in_trait)]
pub trait ResourceFetcher {
    async fn fetch(&self, url: &str, options: &EmbedOptions) -> EmbedResult<FetchedResource>;
}

/// `ResourceFetcher` backed by reqwest
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing client (shares its connection pool)
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn download(&self, reference: &str, options: &EmbedOptions) -> EmbedResult<FetchedResource> {
        let url = request_url(reference, options)?;

        // Download with timeout and browser-like headers
        let response = self
            .client
            .get(&url)
            .timeout(options.fetch_timeout())
            .header("User-Agent", options.user_agent())
            .header(
                "Accept",
                "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8",
            )
            .send()
            .await
            .map_err(|e| EmbedError::Request {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EmbedError::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();

        // Enforce the limit BEFORE downloading when the server announces a size
        let max = options.max_resource_size();
        let expected_size = response.content_length().unwrap_or(0);
        if expected_size > max as u64 {
            return Err(EmbedError::TooLarge {
                url,
                size: usize::try_from(expected_size).unwrap_or(usize::MAX),
                max,
            });
        }

        let mut buffer = if expected_size > 0 {
            Vec::with_capacity(expected_size as usize)
        } else {
            Vec::new()
        };

        // Stream response with size checking (Content-Length may be absent or wrong)
        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| EmbedError::Request {
                url: url.clone(),
                reason: format!("failed to read body: {e}"),
            })?;

            let new_total = buffer.len() + chunk.len();
            if new_total > max {
                return Err(EmbedError::TooLarge {
                    url,
                    size: new_total,
                    max,
                });
            }
            buffer.extend_from_slice(&chunk);
        }

        log::debug!("Fetched {url} ({} bytes, {content_type})", buffer.len());
        Ok(FetchedResource::new(buffer, content_type))
    }
}

impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, options: &EmbedOptions) -> EmbedResult<FetchedResource> {
        if is_data_url(url) {
            return FetchedResource::from_data_url(url);
        }

        match self.download(url, options).await {
            Ok(resource) => Ok(resource),
            Err(e) => match options.image_placeholder() {
                Some(placeholder) => {
                    log::warn!("Using image placeholder for {url}: {e}");
                    FetchedResource::from_data_url(placeholder)
                }
                None => Err(e),
            },
        }
    }
}

/// Resolve the reference and append the cache-busting parameter when enabled
fn request_url(reference: &str, options: &EmbedOptions) -> EmbedResult<String> {
    let resolved = resolve_url(options.base_url(), reference)?;
    if !options.cache_bust() {
        return Ok(resolved);
    }

    let mut url = Url::parse(&resolved).map_err(|e| EmbedError::InvalidUrl {
        url: resolved.clone(),
        reason: e.to_string(),
    })?;
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    url.query_pairs_mut()
        .append_pair(CACHE_BUST_PARAM, &stamp.to_string());
    Ok(url.to_string())
}
