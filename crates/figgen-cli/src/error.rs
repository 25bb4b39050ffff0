use crate::config::ConfigError;
use figgen_client::FigmaError;
use figgen_codegen::CodegenError;
use figgen_model::SnapshotError;
use std::path::PathBuf;
use thiserror::Error;

/// A fatal pipeline error. Anything that reaches `main` exits with status 1.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Figma(#[from] FigmaError),

    #[error("{0}; run `figgen fetch` first")]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Create `dir` and write `contents` to `dir/file_name`.
pub fn write_file(dir: &std::path::Path, file_name: &str, contents: &str) -> PipelineResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(file_name);
    std::fs::write(&path, contents).map_err(|source| PipelineError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
