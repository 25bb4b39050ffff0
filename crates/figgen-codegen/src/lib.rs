//! figgen Code Generator
//!
//! Turns COMPONENT nodes of a Figma document into React/TSX sources styled
//! with Tailwind utility classes. Generation is split into an IR stage
//! ([`component`]) and a printing stage ([`tsx`]).
//!
//! ```text
//! Node tree → compile() → CompilerOutput { components, index, skipped }
//! ```
//!
//! Nothing here touches the file system; writing the output is the caller's
//! job.

pub mod component;
pub mod icon;
pub mod naming;
pub mod style;
pub mod tsx;

use component::{ComponentSpec, ImageRef};
use figgen_model::Node;
use std::collections::{BTreeSet, HashMap};

pub use icon::{plan_icons, IconPlan, IconPlans};

/// Name of the barrel file written next to the components.
pub const INDEX_FILE: &str = "index.ts";

/// One file to be written, relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub file_name: String,
    pub contents: String,
}

/// A node that was not turned into a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedNode {
    pub node_id: String,
    pub node_name: String,
    pub reason: String,
}

/// The result of [`compile`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerOutput {
    /// One file per component, in document pre-order.
    pub components: Vec<GeneratedFile>,
    pub index: GeneratedFile,
    pub skipped: Vec<SkippedNode>,
}

impl CompilerOutput {
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .filter_map(|f| f.file_name.strip_suffix(".tsx"))
    }
}

/// Code generation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodegenError {
    /// Two nodes map to the same component identifier.
    #[error("nodes {first_id} and {second_id} both generate component `{name}`; rename one of them in Figma")]
    NameConflict {
        name: String,
        first_id: String,
        second_id: String,
    },
}

/// Node ids whose rendered asset is available, plus where it is served from.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    root: String,
    extension: String,
    present: BTreeSet<String>,
}

impl AssetIndex {
    pub fn new(root: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            present: BTreeSet::new(),
        }
    }

    pub fn insert(&mut self, node_id: impl Into<String>) {
        self.present.insert(node_id.into());
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.present.contains(node_id)
    }

    pub fn len(&self) -> usize {
        self.present.len()
    }

    pub fn is_empty(&self) -> bool {
        self.present.is_empty()
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// A reference to the asset for `node_id`, if it exists.
    pub fn image_ref(&self, node_id: &str) -> Option<ImageRef> {
        self.contains(node_id).then(|| ImageRef {
            root: self.root.clone(),
            node_id: node_id.to_string(),
            extension: self.extension.clone(),
        })
    }
}

/// Plan and print one component per COMPONENT node under `root`.
///
/// Nodes whose sanitized name is not a usable identifier are skipped and
/// reported. Two nodes sharing a sanitized name abort the whole run so no
/// file silently overwrites another.
pub fn compile(root: &Node, assets: &AssetIndex) -> Result<CompilerOutput, CodegenError> {
    let mut specs = Vec::new();
    let mut skipped = Vec::new();
    let mut owners: HashMap<String, String> = HashMap::new();

    for node in root.descendants().filter(|n| n.is_component()) {
        let spec = ComponentSpec::from_node(node, assets.image_ref(&node.id));

        if !naming::is_valid_component_name(&spec.name) {
            skipped.push(SkippedNode {
                node_id: node.id.clone(),
                node_name: node.name.clone(),
                reason: format!("`{}` is not a valid component identifier", spec.name),
            });
            continue;
        }

        if let Some(first_id) = owners.get(&spec.name) {
            return Err(CodegenError::NameConflict {
                name: spec.name,
                first_id: first_id.clone(),
                second_id: node.id.clone(),
            });
        }
        owners.insert(spec.name.clone(), node.id.clone());
        specs.push(spec);
    }

    let components = specs
        .iter()
        .map(|spec| GeneratedFile {
            file_name: spec.file_name(),
            contents: tsx::render(spec),
        })
        .collect();

    let index = GeneratedFile {
        file_name: INDEX_FILE.to_string(),
        contents: tsx::render_index(specs.iter().map(|s| s.name.as_str())),
    };

    Ok(CompilerOutput {
        components,
        index,
        skipped,
    })
}

/// Single-quoted JS string literal.
pub fn js_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Node {
        serde_json::from_value(value).unwrap()
    }

    fn no_assets() -> AssetIndex {
        AssetIndex::new("/assets/figma", "png")
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn test_js_string() {
        assert_eq!(js_string("1:2"), "'1:2'");
        assert_eq!(js_string("a'b\\c"), "'a\\'b\\\\c'");
    }

    #[test]
    fn test_asset_index() {
        let mut idx = no_assets();
        assert!(idx.is_empty());
        idx.insert("1:1");
        assert_eq!(idx.len(), 1);
        assert_eq!(idx.image_ref("1:1").unwrap().src(), "/assets/figma/1:1.png");
        assert_eq!(idx.image_ref("2:2"), None);
    }

    // =========================================================================
    // Integration: compile()
    // =========================================================================

    #[test]
    fn test_compile_empty() {
        let out = compile(&doc(json!({ "id": "0:0", "type": "DOCUMENT" })), &no_assets()).unwrap();
        assert!(out.components.is_empty());
        assert_eq!(out.index.file_name, "index.ts");
        assert_eq!(out.index.contents, "");
        assert!(out.skipped.is_empty());
    }

    #[test]
    fn test_compile_white_card() {
        let root = doc(json!({
            "id": "1",
            "type": "COMPONENT",
            "name": "Card",
            "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1, "a": 1 } }]
        }));
        let out = compile(&root, &no_assets()).unwrap();

        assert_eq!(out.components.len(), 1);
        let card = &out.components[0];
        assert_eq!(card.file_name, "Card.tsx");
        assert!(card.contents.contains("export { Card };"));

        let base = card
            .contents
            .lines()
            .skip_while(|l| !l.contains("// Base styles"))
            .nth(1)
            .unwrap();
        assert_eq!(base.trim(), "\"relative bg-[rgb(255 255 255)]\",");
        assert!(!base.contains("border"));
        assert!(!base.contains("shadow"));

        assert_eq!(out.index.contents, "export { Card } from './Card';");
    }

    #[test]
    fn test_compile_walks_whole_tree_in_order() {
        let root = doc(json!({
            "id": "0:0",
            "type": "DOCUMENT",
            "children": [{
                "id": "1:0",
                "type": "CANVAS",
                "children": [
                    { "id": "2:0", "type": "FRAME", "name": "Wrapper", "children": [
                        { "id": "3:0", "type": "COMPONENT", "name": "switch container" }
                    ]},
                    { "id": "2:1", "type": "COMPONENT", "name": "Tab" },
                    { "id": "2:2", "type": "INSTANCE", "name": "Tab" }
                ]
            }]
        }));
        let out = compile(&root, &no_assets()).unwrap();
        let names: Vec<&str> = out.component_names().collect();
        assert_eq!(names, vec!["Switchcontainer", "Tab"]);
        assert_eq!(
            out.index.contents,
            "export { Switchcontainer } from './Switchcontainer';\nexport { Tab } from './Tab';"
        );
    }

    #[test]
    fn test_compile_name_conflict() {
        let root = doc(json!({
            "id": "0:0",
            "type": "DOCUMENT",
            "children": [
                { "id": "1:1", "type": "COMPONENT", "name": "Btn-1" },
                { "id": "1:2", "type": "COMPONENT", "name": "Btn 1" }
            ]
        }));
        let err = compile(&root, &no_assets()).unwrap_err();
        assert_eq!(
            err,
            CodegenError::NameConflict {
                name: "Btn1".into(),
                first_id: "1:1".into(),
                second_id: "1:2".into(),
            }
        );
    }

    #[test]
    fn test_compile_skips_invalid_identifiers() {
        let root = doc(json!({
            "id": "0:0",
            "type": "DOCUMENT",
            "children": [
                { "id": "1:1", "type": "COMPONENT", "name": "✨" },
                { "id": "1:2", "type": "COMPONENT", "name": "7207 frame" },
                { "id": "1:3", "type": "COMPONENT", "name": "ok" }
            ]
        }));
        let out = compile(&root, &no_assets()).unwrap();
        assert_eq!(out.component_names().collect::<Vec<_>>(), vec!["Ok"]);
        let skipped: Vec<&str> = out.skipped.iter().map(|s| s.node_id.as_str()).collect();
        assert_eq!(skipped, vec!["1:1", "1:2"]);
    }

    #[test]
    fn test_compile_image_requires_asset() {
        let root = doc(json!({
            "id": "0:0",
            "type": "DOCUMENT",
            "children": [
                { "id": "5:1", "type": "COMPONENT", "name": "Hero",
                  "fills": [{ "type": "IMAGE", "imageRef": "r" }] },
                { "id": "5:2", "type": "COMPONENT", "name": "Banner",
                  "fills": [{ "type": "IMAGE", "imageRef": "r" }] }
            ]
        }));
        let mut assets = no_assets();
        assets.insert("5:1");
        let out = compile(&root, &assets).unwrap();

        assert!(out.components[0].contents.contains("src={`/assets/figma/${imageId}.png`}"));
        assert!(!out.components[1].contents.contains("<Image"));
    }
}
