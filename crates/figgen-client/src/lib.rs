//! figgen Figma client
//!
//! Thin async client over the three Figma endpoints the pipelines use, plus
//! the bounded fan-out downloader for rendered images.
//!
//! Endpoints:
//! - GET /v1/files/{key}
//! - GET /v1/images/{key}?ids=…&format=png|svg
//! - GET <signed render url>
//!
//! The [`FigmaApi`] trait is the seam the pipelines are written against;
//! [`FigmaClient`] is the reqwest-backed implementation.

pub mod client;
pub mod download;
pub mod error;
pub mod retry;

pub use client::{ClientConfig, FigmaClient};
pub use download::{download_all, DownloadJob, DownloadReport};
pub use error::{FigmaError, FigmaResult};
pub use retry::RetryPolicy;

use async_trait::async_trait;
use figgen_model::ImageAssets;

pub const DEFAULT_API_BASE: &str = "https://api.figma.com";

/// Personal access token header.
pub const TOKEN_HEADER: &str = "X-Figma-Token";

/// Upper bound on node ids per `/v1/images` request.
pub const MAX_IDS_PER_REQUEST: usize = 100;

/// Render format for `/v1/images`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// File extension for a downloaded render.
    pub fn extension(self) -> &'static str {
        self.as_str()
    }
}

#[async_trait]
pub trait FigmaApi: Send + Sync {
    /// The raw file document.
    async fn file(&self, file_id: &str) -> FigmaResult<serde_json::Value>;

    /// Signed render URLs for `ids`. One request; see [`image_urls_batched`].
    async fn image_urls(
        &self,
        file_id: &str,
        ids: &[String],
        format: ImageFormat,
    ) -> FigmaResult<ImageAssets>;

    /// Bytes behind a signed render URL.
    async fn download(&self, url: &str) -> FigmaResult<Vec<u8>>;
}

/// Request render URLs in batches of at most `batch_size` ids and merge them.
/// Batches run one after another; the first failing batch aborts.
pub async fn image_urls_batched<A>(
    api: &A,
    file_id: &str,
    ids: &[String],
    format: ImageFormat,
    batch_size: usize,
) -> FigmaResult<ImageAssets>
where
    A: FigmaApi + ?Sized,
{
    let mut merged = ImageAssets::new();
    for chunk in ids.chunks(batch_size.max(1)) {
        let urls = api.image_urls(file_id, chunk, format).await?;
        merged.extend(urls);
    }
    Ok(merged)
}

#[cfg(any(test, feature = "test-util"))]
pub mod testing {
    //! In-memory [`FigmaApi`] for tests.
    //!
    //! Mirrors the real endpoint: every requested id comes back, mapped to
    //! `None` unless a URL was registered for it. Downloads of unregistered
    //! URLs fail with [`FigmaError::NotFound`].

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct FakeApi {
        pub file: serde_json::Value,
        pub urls: ImageAssets,
        pub bodies: HashMap<String, Vec<u8>>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeApi {
        pub fn with_file(file: serde_json::Value) -> Self {
            Self {
                file,
                ..Self::default()
            }
        }

        /// Ids passed to each `image_urls` call, in call order.
        pub fn image_calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl FigmaApi for FakeApi {
        async fn file(&self, _file_id: &str) -> FigmaResult<serde_json::Value> {
            Ok(self.file.clone())
        }

        async fn image_urls(
            &self,
            _file_id: &str,
            ids: &[String],
            _format: ImageFormat,
        ) -> FigmaResult<ImageAssets> {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(ids.to_vec());
            }
            Ok(ids
                .iter()
                .map(|id| (id.clone(), self.urls.get(id).cloned().flatten()))
                .collect())
        }

        async fn download(&self, url: &str) -> FigmaResult<Vec<u8>> {
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| FigmaError::NotFound(url.to_string()))
        }
    }
}
