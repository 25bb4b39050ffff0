//! `figgen assets`: SVG renders of components and instances, plus one icon
//! component per successfully downloaded COMPONENT render.

use crate::config::{Config, ICONS_PUBLIC_ROOT};
use crate::error::{write_file, PipelineResult};
use crate::fetch::decode_file;
use figgen_client::{
    download_all, image_urls_batched, DownloadJob, DownloadReport, FigmaApi, ImageFormat,
    MAX_IDS_PER_REQUEST,
};
use figgen_codegen::{plan_icons, tsx};
use figgen_model::NodeType;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct AssetsSummary {
    pub downloads: DownloadReport,
    pub icon_components: Vec<PathBuf>,
}

pub async fn run<A>(cfg: &Config, api: &A) -> PipelineResult<AssetsSummary>
where
    A: FigmaApi + ?Sized,
{
    info!("fetching Figma file {}", cfg.file_id);
    let raw = api.file(&cfg.file_id).await?;
    let file = decode_file(&raw)?;

    let plans = plan_icons(&file.document, ICONS_PUBLIC_ROOT)?;
    for node in &plans.skipped {
        warn!("no icon component for node {} (\"{}\"): {}", node.node_id, node.node_name, node.reason);
    }
    if plans.entries.is_empty() {
        info!("no components or instances to export");
        return Ok(AssetsSummary::default());
    }
    info!("exporting {} components and instances as SVG", plans.entries.len());

    let ids: Vec<String> = plans.entries.iter().map(|p| p.node_id.clone()).collect();
    let urls = image_urls_batched(api, &cfg.file_id, &ids, ImageFormat::Svg, MAX_IDS_PER_REQUEST)
        .await?;

    let jobs = plans
        .entries
        .iter()
        .map(|plan| {
            let dir = match plan.kind {
                NodeType::Component => &cfg.paths.icons_dir,
                _ => &cfg.paths.images_dir,
            };
            DownloadJob {
                node_id: plan.node_id.clone(),
                url: urls.get(&plan.node_id).cloned().flatten(),
                dest: dir.join(plan.file_name()),
            }
        })
        .collect();
    let downloads = download_all(api, jobs, cfg.http.concurrency).await;

    let ok: HashSet<&str> = downloads.downloaded.iter().map(String::as_str).collect();
    let mut icon_components = Vec::new();
    for plan in &plans.entries {
        let Some(icon) = &plan.component else { continue };
        if !ok.contains(plan.node_id.as_str()) {
            continue;
        }
        let path = write_file(
            &cfg.paths.icon_components_dir,
            &icon.file_name(),
            &tsx::render_icon(icon),
        )?;
        debug!("wrote {}", path.display());
        icon_components.push(path);
    }

    info!(
        "downloaded {} of {} SVGs, wrote {} icon component(s)",
        downloads.downloaded.len(),
        plans.entries.len(),
        icon_components.len()
    );

    Ok(AssetsSummary {
        downloads,
        icon_components,
    })
}
