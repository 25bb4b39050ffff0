//! `figgen check`: connectivity probe. Writes nothing.

use crate::config::Config;
use crate::error::PipelineResult;
use crate::fetch::decode_file;
use figgen_client::FigmaApi;
use figgen_model::{FigmaFile, NodeType};
use std::collections::BTreeMap;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub name: String,
    pub version: Option<String>,
    pub last_modified: Option<String>,
    pub counts: BTreeMap<NodeType, usize>,
}

impl FileReport {
    pub fn from_file(file: &FigmaFile) -> Self {
        let mut counts = BTreeMap::new();
        for node in file.document.descendants() {
            *counts.entry(node.kind).or_insert(0) += 1;
        }
        Self {
            name: file.name.clone(),
            version: file.version.clone(),
            last_modified: file.last_modified.clone(),
            counts,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

pub async fn run<A>(cfg: &Config, api: &A) -> PipelineResult<FileReport>
where
    A: FigmaApi + ?Sized,
{
    let raw = api.file(&cfg.file_id).await?;
    let report = FileReport::from_file(&decode_file(&raw)?);

    info!("connected to Figma file {}", cfg.file_id);
    info!("name: {}", report.name);
    info!("version: {}", report.version.as_deref().unwrap_or("-"));
    info!("last modified: {}", report.last_modified.as_deref().unwrap_or("-"));
    for (kind, count) in &report.counts {
        info!("{:>16}: {count}", kind.as_str());
    }
    info!("{:>16}: {}", "total", report.total());

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpSettings;
    use figgen_client::testing::FakeApi;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_check_counts_nodes() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::new(Some("KEY".into()), Some("tok".into()), dir.path(), HttpSettings::default())
            .unwrap();
        let api = FakeApi::with_file(json!({
            "name": "Design System",
            "version": "4711",
            "lastModified": "2024-05-01T10:00:00Z",
            "document": {
                "id": "0:0",
                "type": "DOCUMENT",
                "children": [{
                    "id": "0:1",
                    "type": "CANVAS",
                    "children": [
                        { "id": "1:1", "type": "FRAME" },
                        { "id": "1:2", "type": "COMPONENT" },
                        { "id": "1:3", "type": "COMPONENT" },
                        { "id": "1:4", "type": "SHINY_NEW_THING" }
                    ]
                }]
            }
        }));

        let report = run(&cfg, &api).await.unwrap();

        assert_eq!(report.name, "Design System");
        assert_eq!(report.version.as_deref(), Some("4711"));
        assert_eq!(report.last_modified.as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(report.counts[&NodeType::Component], 2);
        assert_eq!(report.counts[&NodeType::Unknown], 1);
        assert_eq!(report.total(), 6);
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }
}
