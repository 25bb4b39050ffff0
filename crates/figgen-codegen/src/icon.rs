//! Icon asset planning.
//!
//! COMPONENT and INSTANCE nodes are exported as SVG. Components land in the
//! icon directory and get a wrapper component; instances land in the image
//! directory with no wrapper.

use crate::component::IconSpec;
use crate::naming::{is_valid_component_name, sanitize_component_name, sanitize_file_name};
use crate::{CodegenError, SkippedNode};
use figgen_model::{Node, NodeType};
use std::collections::{HashMap, HashSet};

/// What to do with one exported node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPlan {
    pub node_id: String,
    pub kind: NodeType,
    /// File stem, unique among plans of the same kind.
    pub file_stem: String,
    /// Present for COMPONENT nodes with a usable name.
    pub component: Option<IconSpec>,
}

impl IconPlan {
    pub fn file_name(&self) -> String {
        format!("{}.svg", self.file_stem)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IconPlans {
    pub entries: Vec<IconPlan>,
    pub skipped: Vec<SkippedNode>,
}

/// Plan SVG exports for every COMPONENT/INSTANCE node under `root`.
///
/// Instances frequently share a layer name, so clashing file stems get the
/// node id appended instead of failing. Clashing component identifiers fail
/// with [`CodegenError::NameConflict`].
pub fn plan_icons(root: &Node, href_root: &str) -> Result<IconPlans, CodegenError> {
    let href_root = href_root.trim_end_matches('/');
    let mut plans = IconPlans::default();
    let mut stems: HashSet<(NodeType, String)> = HashSet::new();
    let mut owners: HashMap<String, String> = HashMap::new();

    for node in root.descendants().filter(|n| n.kind.is_icon_source()) {
        let Some(file_stem) = unique_stem(node, &mut stems) else {
            plans.skipped.push(SkippedNode {
                node_id: node.id.clone(),
                node_name: node.name.clone(),
                reason: "duplicate node id".into(),
            });
            continue;
        };

        let component = if node.kind == NodeType::Component {
            let name = sanitize_component_name(&node.name);
            if !is_valid_component_name(&name) {
                plans.skipped.push(SkippedNode {
                    node_id: node.id.clone(),
                    node_name: node.name.clone(),
                    reason: format!("`{name}` is not a valid component identifier"),
                });
                None
            } else if let Some(first_id) = owners.get(&name) {
                return Err(CodegenError::NameConflict {
                    name,
                    first_id: first_id.clone(),
                    second_id: node.id.clone(),
                });
            } else {
                owners.insert(name.clone(), node.id.clone());
                Some(IconSpec {
                    name,
                    href: format!("{href_root}/{file_stem}.svg"),
                })
            }
        } else {
            None
        };

        plans.entries.push(IconPlan {
            node_id: node.id.clone(),
            kind: node.kind,
            file_stem,
            component,
        });
    }

    Ok(plans)
}

fn unique_stem(node: &Node, taken: &mut HashSet<(NodeType, String)>) -> Option<String> {
    let id_stem = sanitize_file_name(&node.id);
    let name_stem = sanitize_file_name(&node.name);
    let base = if name_stem.is_empty() {
        id_stem.clone()
    } else {
        name_stem
    };

    let candidates = [base.clone(), format!("{base}-{id_stem}")];
    candidates
        .into_iter()
        .find(|stem| taken.insert((node.kind, stem.clone())))
}
