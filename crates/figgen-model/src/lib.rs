//! figgen document model
//!
//! Typed, read-only view of a Figma file tree, the pre-order node collector
//! used by both pipelines, and the JSON snapshot that sits between them.
//!
//! ```text
//! GET /v1/files/{key} → snapshot::save() → figma-file-<key>.json → snapshot::load() → FigmaFile
//! ```

pub mod collect;
pub mod node;
pub mod snapshot;

pub use collect::{collect, collect_ids, Descendants};
pub use node::{
    Color, Effect, EffectType, FigmaFile, ImageAssets, LayoutMode, Node, NodeType, Paint,
    PaintType, Rect, ScaleMode,
};
pub use snapshot::SnapshotError;
