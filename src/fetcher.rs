use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::GalleryConfig;
use crate::types::ContentManifest;

pub const ACCEPT_GITHUB_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!("github-gallery/", env!("CARGO_PKG_VERSION"));

/// Everything that can go wrong between sending the request and holding a
/// parsed manifest. Callers treat all variants the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(String),
    #[error("GitHub API请求失败: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("response has no `content` field")]
    MissingContent,
    #[error("invalid base64 content: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("content is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// Minimal HTTP GET abstraction so the fetcher can run without a network.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse>;
}

/// `reqwest`-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(t) = timeout { builder = builder.timeout(t); }
        let client = builder.build().context("building http client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, headers: &[(&str, String)]) -> Result<HttpResponse> {
        let mut req = self.client.get(url);
        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }
        let resp = req.send().await.with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        let body = resp.text().await.context("reading response body")?;
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

#[derive(Deserialize)]
struct ContentsResponse {
    content: Option<String>,
}

/// Result of one fetch that was allowed to run. `error` holds the failure
/// that was replaced by the fallback manifest.
#[derive(Debug)]
pub struct Fetched {
    pub manifest: ContentManifest,
    pub error: Option<FetchError>,
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok()?;
        Some(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) { self.flag.store(false, Ordering::Release); }
}

/// A fetch that holds the busy flag but has not started yet.
pub struct FetchSession<'a, T: Transport> {
    fetcher: &'a ContentFetcher<T>,
    _guard: BusyGuard<'a>,
}

impl<T: Transport> FetchSession<'_, T> {
    /// Never fails: errors are logged and swapped for the empty manifest.
    pub async fn run(self) -> Fetched {
        match self.fetcher.try_fetch().await {
            Ok(manifest) => {
                info!(items = manifest.items.len(), "manifest loaded");
                Fetched { manifest, error: None }
            }
            Err(e) => {
                error!(error = %e, "从GitHub获取内容失败");
                Fetched { manifest: ContentManifest::fallback(), error: Some(e) }
            }
        }
    }
}

/// Pulls the manifest file out of a repository through the contents API.
pub struct ContentFetcher<T: Transport> {
    config: GalleryConfig,
    transport: T,
    busy: AtomicBool,
}

impl ContentFetcher<HttpTransport> {
    pub fn from_config(config: GalleryConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.request_timeout_secs.map(Duration::from_secs))?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> ContentFetcher<T> {
    pub fn new(config: GalleryConfig, transport: T) -> Self {
        Self { config, transport, busy: AtomicBool::new(false) }
    }

    pub fn config(&self) -> &GalleryConfig { &self.config }

    /// Configuration values are interpolated verbatim, without URL encoding.
    pub fn api_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.owner,
            self.config.repo,
            self.config.content_path
        )
    }

    pub fn is_busy(&self) -> bool { self.busy.load(Ordering::Acquire) }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T { &self.transport }

    /// Take the busy flag. `None` while another fetch is in flight.
    pub fn begin(&self) -> Option<FetchSession<'_, T>> {
        let guard = BusyGuard::acquire(&self.busy)?;
        Some(FetchSession { fetcher: self, _guard: guard })
    }

    /// Guarded fetch with fallback. `None` means the call was dropped
    /// because another fetch was running.
    pub async fn fetch(&self) -> Option<Fetched> {
        Some(self.begin()?.run().await)
    }

    /// One unguarded request, with errors surfaced.
    pub async fn try_fetch(&self) -> Result<ContentManifest, FetchError> {
        let url = self.api_url();
        let mut headers = vec![("Accept", ACCEPT_GITHUB_V3.to_string())];
        if let Some(token) = &self.config.github_token {
            headers.push(("Authorization", format!("token {}", token)));
        }
        debug!(%url, "requesting manifest");
        let resp = self
            .transport
            .get(&url, &headers)
            .await
            .map_err(|e| FetchError::Transport(format!("{e:#}")))?;
        if !resp.is_success() {
            return Err(FetchError::Status { status: resp.status, reason: resp.reason });
        }
        decode_contents(&resp.body)
    }
}

/// Contents API body -> manifest. The `content` field is base64 wrapped
/// across lines.
pub fn decode_contents(body: &str) -> Result<ContentManifest, FetchError> {
    let parsed: ContentsResponse = serde_json::from_str(body)?;
    let encoded = parsed.content.ok_or(FetchError::MissingContent)?;
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}
