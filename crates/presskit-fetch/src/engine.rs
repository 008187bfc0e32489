use crate::error::{FetchError, Result};
use crate::pacer::HostPacer;
use crate::profile::RequestProfile;
use async_trait::async_trait;
use presskit_core::FetchConfig;
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::{redirect, Client, Response};
use std::time::Duration;
use url::Url;

const MAX_REDIRECTS: usize = 10;

/// A fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// Final URL after redirects
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Decoded body (lossy UTF-8)
    pub body: String,
}

/// Single-page HTTP GET.
///
/// Implementations must apply a timeout and report every problem as a
/// [`FetchError`]; nothing in the crawler retries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<RawPage>;
}

/// reqwest-backed fetcher with the fixed request profile and per-host pacing.
///
/// The age-gate cookie is attached only to requests for the storefront host;
/// developer websites never see it.
pub struct HttpFetcher {
    client: Client,
    pacer: HostPacer,
    timeout: Duration,
    max_body_bytes: usize,
    storefront_host: Option<String>,
    age_gate: Option<HeaderValue>,
}

impl HttpFetcher {
    /// Build a fetcher from configuration.
    ///
    /// `storefront_url` is any URL on the listing source (normally the
    /// discovery base URL); its host receives the age-gate cookie.
    pub fn new(config: &FetchConfig, storefront_url: &str, per_host_interval: Duration) -> Result<Self> {
        let profile = RequestProfile::from_config(config);
        let headers = profile.header_map()?;
        let timeout = Duration::from_secs(config.timeout_secs);
        let storefront_host = parse_http_url(storefront_url)?
            .host_str()
            .map(str::to_ascii_lowercase);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            pacer: HostPacer::new(per_host_interval),
            timeout,
            max_body_bytes: config.max_body_bytes,
            storefront_host,
            age_gate: profile.age_gate_header()?,
        })
    }

    /// The cookie header to send to `url`, if any.
    fn age_gate_for(&self, url: &Url) -> Option<&HeaderValue> {
        let host = url.host_str()?;
        let storefront = self.storefront_host.as_deref()?;
        if host.eq_ignore_ascii_case(storefront) {
            self.age_gate.as_ref()
        } else {
            None
        }
    }

    fn map_error(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                source: error,
            }
        }
    }

    /// Read at most `max_body_bytes` of the body, chunk by chunk.
    async fn read_body(&self, url: &str, mut response: Response) -> Result<String> {
        let limit = self.max_body_bytes;
        if let Some(declared) = response.content_length() {
            if declared > limit as u64 {
                tracing::debug!(url, declared, limit, "declared body exceeds limit");
            }
        }

        let mut body: Vec<u8> = Vec::new();
        let mut truncated = false;
        while let Some(chunk) = response.chunk().await.map_err(|e| self.map_error(url, e))? {
            let room = limit - body.len();
            if chunk.len() > room {
                body.extend_from_slice(&chunk[..room]);
                truncated = true;
                break;
            }
            body.extend_from_slice(&chunk);
        }

        if truncated {
            tracing::warn!(url, limit, "response body truncated");
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<RawPage> {
        let parsed = parse_http_url(url)?;
        if let Some(host) = parsed.host_str() {
            self.pacer.wait_turn(host).await;
        }

        let mut request = self.client.get(parsed.clone()).timeout(self.timeout);
        if let Some(cookie) = self.age_gate_for(&parsed) {
            request = request.header(COOKIE, cookie.clone());
        }

        tracing::debug!(url, "fetching page");
        let response = request.send().await.map_err(|e| self.map_error(url, e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = self.read_body(url, response).await?;
        tracing::debug!(url, final_url = %final_url, bytes = body.len(), "fetched page");

        Ok(RawPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

/// Parse a URL and require an http(s) scheme and a host.
pub fn parse_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(parsed)
}
