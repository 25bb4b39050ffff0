//! `figgen fetch`: file JSON, PNG renders and the snapshot.

use crate::config::Config;
use crate::error::PipelineResult;
use figgen_client::{
    download_all, image_urls_batched, DownloadJob, DownloadReport, FigmaApi, FigmaError,
    ImageFormat, MAX_IDS_PER_REQUEST,
};
use figgen_model::{collect_ids, snapshot, FigmaFile, ImageAssets};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug)]
pub struct FetchSummary {
    pub snapshot: PathBuf,
    pub renderable: usize,
    pub downloads: DownloadReport,
}

/// Decode the typed view of a raw file payload.
pub fn decode_file(raw: &serde_json::Value) -> Result<FigmaFile, FigmaError> {
    FigmaFile::deserialize(raw).map_err(FigmaError::from)
}

pub async fn run<A>(cfg: &Config, api: &A) -> PipelineResult<FetchSummary>
where
    A: FigmaApi + ?Sized,
{
    info!("fetching Figma file {}", cfg.file_id);
    let raw = api.file(&cfg.file_id).await?;
    let file = decode_file(&raw)?;
    info!("file \"{}\" loaded", file.name);

    let ids = collect_ids(&file.document, |n| n.kind.is_renderable());
    info!("found {} frames, components and instances", ids.len());

    let assets = if ids.is_empty() {
        ImageAssets::new()
    } else {
        image_urls_batched(api, &cfg.file_id, &ids, ImageFormat::Png, MAX_IDS_PER_REQUEST)
            .await?
    };

    let jobs = ids
        .iter()
        .map(|id| DownloadJob {
            node_id: id.clone(),
            url: assets.get(id).cloned().flatten(),
            dest: cfg
                .paths
                .figma_assets_dir
                .join(format!("{id}.{}", ImageFormat::Png.extension())),
        })
        .collect();
    let downloads = download_all(api, jobs, cfg.http.concurrency).await;

    let path = cfg.snapshot_path();
    snapshot::save(&path, raw, &assets)?;
    info!("saved snapshot to {}", path.display());

    if !downloads.is_clean() {
        warn!(
            "{} image(s) failed, {} had no render url",
            downloads.failed.len(),
            downloads.skipped.len()
        );
    }
    info!("downloaded {} of {} images", downloads.downloaded.len(), ids.len());

    Ok(FetchSummary {
        snapshot: path,
        renderable: ids.len(),
        downloads,
    })
}
