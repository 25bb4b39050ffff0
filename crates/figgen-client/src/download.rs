//! Bounded concurrent download of rendered images to disk.
//!
//! Failures never abort the batch: every job ends up in exactly one of the
//! report's three buckets.

use crate::error::FigmaError;
use crate::FigmaApi;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One render to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    pub node_id: String,
    /// `None` when the render failed on Figma's side.
    pub url: Option<String>,
    pub dest: PathBuf,
}

#[derive(Debug, Default)]
pub struct DownloadReport {
    /// Node ids written to disk.
    pub downloaded: Vec<String>,
    pub failed: Vec<(String, FigmaError)>,
    /// Node ids with no usable URL.
    pub skipped: Vec<String>,
}

impl DownloadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.skipped.is_empty()
    }

    fn sort(&mut self) {
        self.downloaded.sort();
        self.skipped.sort();
        self.failed.sort_by(|a, b| a.0.cmp(&b.0));
    }
}

enum Outcome {
    Downloaded(String),
    Failed(String, FigmaError),
}

/// Fetch every job with at most `concurrency` requests in flight.
pub async fn download_all<A>(api: &A, jobs: Vec<DownloadJob>, concurrency: usize) -> DownloadReport
where
    A: FigmaApi + ?Sized,
{
    let mut report = DownloadReport::default();
    let mut runnable = Vec::with_capacity(jobs.len());

    for job in jobs {
        match job.url.as_deref().filter(|u| is_usable_url(u)) {
            Some(url) => {
                let url = url.to_string();
                runnable.push((job.node_id, url, job.dest));
            }
            None => {
                warn!("no usable render url for node {}, skipping", job.node_id);
                report.skipped.push(job.node_id);
            }
        }
    }

    let outcomes: Vec<Outcome> = stream::iter(runnable)
        .map(|(node_id, url, dest)| async move {
            match fetch_one(api, &url, &dest).await {
                Ok(()) => {
                    info!("downloaded {} -> {}", node_id, dest.display());
                    Outcome::Downloaded(node_id)
                }
                Err(err) => {
                    warn!("download failed for node {node_id}: {err}");
                    Outcome::Failed(node_id, err)
                }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    for outcome in outcomes {
        match outcome {
            Outcome::Downloaded(id) => report.downloaded.push(id),
            Outcome::Failed(id, err) => report.failed.push((id, err)),
        }
    }
    report.sort();
    report
}

async fn fetch_one<A>(api: &A, url: &str, dest: &Path) -> Result<(), FigmaError>
where
    A: FigmaApi + ?Sized,
{
    let bytes = api.download(url).await?;
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| FigmaError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(dest, bytes)
        .await
        .map_err(|source| FigmaError::Io {
            path: dest.to_path_buf(),
            source,
        })
}

fn is_usable_url(url: &str) -> bool {
    matches!(reqwest::Url::parse(url), Ok(u) if matches!(u.scheme(), "http" | "https"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use pretty_assertions::assert_eq;

    fn job(dir: &std::path::Path, id: &str, url: Option<&str>) -> DownloadJob {
        DownloadJob {
            node_id: id.to_string(),
            url: url.map(str::to_string),
            dest: dir.join("nested").join(format!("{id}.png")),
        }
    }

    #[test]
    fn test_usable_url() {
        assert!(is_usable_url("https://s3.example/render.png"));
        assert!(!is_usable_url("not a url"));
        assert!(!is_usable_url("ftp://host/file"));
        assert!(!is_usable_url(""));
    }

    #[tokio::test]
    async fn test_mixed_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = FakeApi::default();
        api.bodies.insert("https://cdn/a".into(), b"AAA".to_vec());
        api.bodies.insert("https://cdn/c".into(), b"C".to_vec());

        let jobs = vec![
            job(dir.path(), "1:3", Some("https://cdn/c")),
            job(dir.path(), "1:1", Some("https://cdn/a")),
            job(dir.path(), "1:2", None),
            job(dir.path(), "1:4", Some("https://cdn/missing")),
            job(dir.path(), "1:5", Some("garbage")),
        ];
        let report = download_all(&api, jobs, 2).await;

        assert_eq!(report.downloaded, vec!["1:1", "1:3"]);
        assert_eq!(report.skipped, vec!["1:2", "1:5"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "1:4");
        assert!(!report.is_clean());

        let written = std::fs::read(dir.path().join("nested").join("1:1.png")).unwrap();
        assert_eq!(written, b"AAA");
        assert!(!dir.path().join("nested").join("1:4.png").exists());
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = FakeApi::default();
        api.bodies.insert("https://cdn/x".into(), vec![1, 2, 3]);

        let report = download_all(&api, vec![job(dir.path(), "9:9", Some("https://cdn/x"))], 0).await;
        assert_eq!(report.downloaded, vec!["9:9"]);
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let api = FakeApi::default();
        let report = download_all(&api, Vec::new(), 8).await;
        assert!(report.downloaded.is_empty());
        assert!(report.is_clean());
    }
}
