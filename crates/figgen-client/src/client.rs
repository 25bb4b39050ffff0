//! reqwest-backed [`FigmaApi`].

use crate::error::{FigmaError, FigmaResult};
use crate::retry::RetryPolicy;
use crate::{FigmaApi, ImageFormat, DEFAULT_API_BASE, TOKEN_HEADER};
use async_trait::async_trait;
use figgen_model::ImageAssets;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Runtime configuration for [`FigmaClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base, e.g. "https://api.figma.com"
    pub api_base: String,
    pub token: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: token.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry: RetryPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FigmaClient {
    http: Client,
    api_base: String,
    token: String,
    retry: RetryPolicy,
}

/// `GET /v1/images/{key}` body.
#[derive(Debug, Deserialize)]
struct ImagesResponse {
    #[serde(default)]
    err: Option<String>,
    #[serde(default)]
    images: ImageAssets,
}

impl FigmaClient {
    pub fn new(cfg: ClientConfig) -> FigmaResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("figgen/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(cfg.connect_timeout)
            .timeout(cfg.timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()?;
        Ok(Self {
            http,
            api_base: cfg.api_base.trim_end_matches('/').to_string(),
            token: cfg.token,
            retry: cfg.retry,
        })
    }

    pub fn file_url(&self, file_id: &str) -> String {
        format!("{}/v1/files/{}", self.api_base, file_id)
    }

    pub fn images_url(&self, file_id: &str) -> String {
        format!("{}/v1/images/{}", self.api_base, file_id)
    }

    /// One authenticated GET decoded as JSON.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> FigmaResult<T> {
        let resp = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .query(query)
            .send()
            .await?;
        let resp = check_status(resp, url)?;
        Ok(resp.json().await?)
    }

    /// One unauthenticated GET of a signed URL.
    async fn get_bytes(&self, url: &str) -> FigmaResult<Vec<u8>> {
        let resp = self.http.get(url).send().await?;
        let resp = check_status(resp, url)?;
        Ok(resp.bytes().await?.to_vec())
    }
}

/// Turn a non-success status into a [`FigmaError`], keeping `Retry-After`.
fn check_status(resp: Response, what: &str) -> FigmaResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let retry_after = resp
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_retry_after);
    Err(FigmaError::from_status(status.as_u16(), what, retry_after))
}

/// Only the delta-seconds form is understood.
fn parse_retry_after(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[async_trait]
impl FigmaApi for FigmaClient {
    async fn file(&self, file_id: &str) -> FigmaResult<serde_json::Value> {
        let url = self.file_url(file_id);
        let url = url.as_str();
        debug!("GET {url}");
        self.retry
            .run("fetch file", move || self.get_json(url, &[]))
            .await
    }

    async fn image_urls(
        &self,
        file_id: &str,
        ids: &[String],
        format: ImageFormat,
    ) -> FigmaResult<ImageAssets> {
        let url = self.images_url(file_id);
        let url = url.as_str();
        let joined = ids.join(",");
        let query = [("ids", joined.as_str()), ("format", format.as_str())];
        let query = &query[..];
        debug!("GET {url} ({} ids, {})", ids.len(), format.as_str());

        let body: ImagesResponse = self
            .retry
            .run("fetch image urls", move || self.get_json(url, query))
            .await?;
        if let Some(err) = body.err {
            return Err(FigmaError::Api(err));
        }
        Ok(body.images)
    }

    async fn download(&self, url: &str) -> FigmaResult<Vec<u8>> {
        self.retry
            .run("download image", move || self.get_bytes(url))
            .await
    }
}
