//! On-disk snapshot of a Figma file.
//!
//! The snapshot is the raw `GET /v1/files/{key}` JSON with an extra
//! `imageAssets` member. It is the only input of the generation pipeline.

use crate::node::{FigmaFile, ImageAssets};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub const IMAGE_ASSETS_KEY: &str = "imageAssets";

/// Snapshot load/save error.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot not found at {}", path.display())]
    Missing { path: PathBuf },

    #[error("malformed snapshot {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("I/O error on snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `<json_dir>/figma-file-<file_id>.json`
pub fn snapshot_path(json_dir: &Path, file_id: &str) -> PathBuf {
    json_dir.join(format!("figma-file-{file_id}.json"))
}

/// Attach `assets` to the raw file JSON and write it pretty-printed.
pub fn save(path: &Path, mut raw: Value, assets: &ImageAssets) -> Result<(), SnapshotError> {
    let Some(obj) = raw.as_object_mut() else {
        return Err(SnapshotError::Malformed {
            path: path.to_path_buf(),
            message: "file payload is not a JSON object".into(),
        });
    };
    let assets = serde_json::to_value(assets).map_err(|e| SnapshotError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    obj.insert(IMAGE_ASSETS_KEY.to_string(), assets);

    let text = serde_json::to_string_pretty(&raw).map_err(|e| SnapshotError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| SnapshotError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, text).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and decode a snapshot.
pub fn load(path: &Path) -> Result<FigmaFile, SnapshotError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SnapshotError::Missing {
                path: path.to_path_buf(),
            })
        }
        Err(source) => {
            return Err(SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    serde_json::from_str(&text).map_err(|e| SnapshotError::Malformed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
