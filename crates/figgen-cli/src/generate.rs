//! `figgen generate`: snapshot → TSX components. Never touches the network.

use crate::config::{Config, FIGMA_PUBLIC_ROOT};
use crate::error::{write_file, PipelineError, PipelineResult};
use figgen_client::ImageFormat;
use figgen_codegen::{compile, AssetIndex};
use figgen_model::snapshot;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct GenerateSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
}

pub fn run(cfg: &Config) -> PipelineResult<GenerateSummary> {
    let path = cfg.snapshot_path();
    let file = snapshot::load(&path)?;
    info!("loaded snapshot {}", path.display());

    let assets = scan_assets(&cfg.paths.figma_assets_dir, ImageFormat::Png.extension())?;
    debug!("{} rendered assets on disk", assets.len());

    let output = compile(&file.document, &assets)?;
    for node in &output.skipped {
        warn!("skipping node {} (\"{}\"): {}", node.node_id, node.node_name, node.reason);
    }

    let dir = &cfg.paths.generated_dir;
    let mut written = Vec::with_capacity(output.components.len() + 1);
    for generated in output.components.iter().chain([&output.index]) {
        let path = write_file(dir, &generated.file_name, &generated.contents)?;
        debug!("wrote {}", path.display());
        written.push(path);
    }
    info!(
        "generated {} component(s) in {}",
        output.components.len(),
        dir.display()
    );

    Ok(GenerateSummary {
        written,
        skipped: output.skipped.len(),
    })
}

/// Index the renders already on disk. A missing directory means no renders.
fn scan_assets(dir: &Path, extension: &str) -> PipelineResult<AssetIndex> {
    let mut index = AssetIndex::new(FIGMA_PUBLIC_ROOT, extension);
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(index),
        Err(source) => {
            return Err(PipelineError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            index.insert(stem);
        }
    }
    Ok(index)
}
