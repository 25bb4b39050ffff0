//! Typed view of the Figma document tree.
//!
//! Only the attributes the generators read are modelled. Everything else in
//! the REST payload is ignored here (the raw JSON is what gets persisted, so
//! nothing is lost). Enumerations carry an `Unknown`/`Other` catch-all so a
//! new node or paint type added by Figma degrades to "no styling" instead of
//! failing the whole decode.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Node id → signed render URL. `None` when Figma could not render the node.
pub type ImageAssets = BTreeMap<String, Option<String>>;

/// The typed part of a `GET /v1/files/{key}` response (or of a snapshot).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub last_modified: Option<String>,
    pub document: Node,
    /// Added by the fetch pipeline; absent in a raw API response.
    #[serde(default)]
    pub image_assets: ImageAssets,
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    #[serde(default)]
    pub children: Vec<Node>,
    #[serde(default)]
    pub absolute_bounding_box: Option<Rect>,
    #[serde(default)]
    pub layout_mode: Option<LayoutMode>,
    #[serde(default)]
    pub padding_top: Option<f64>,
    #[serde(default)]
    pub padding_right: Option<f64>,
    #[serde(default)]
    pub padding_bottom: Option<f64>,
    #[serde(default)]
    pub padding_left: Option<f64>,
    #[serde(default)]
    pub item_spacing: Option<f64>,
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub strokes: Vec<Paint>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl Node {
    /// First image fill that references an uploaded image.
    pub fn image_fill(&self) -> Option<&Paint> {
        self.fills
            .iter()
            .find(|p| p.kind == PaintType::Image && p.image_ref.is_some())
    }

    pub fn is_component(&self) -> bool {
        self.kind == NodeType::Component
    }
}

/// Figma node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    Document,
    Canvas,
    Frame,
    Group,
    Section,
    Component,
    ComponentSet,
    Instance,
    Text,
    Rectangle,
    Ellipse,
    Vector,
    Line,
    Star,
    RegularPolygon,
    BooleanOperation,
    Slice,
    #[serde(other)]
    Unknown,
}

impl NodeType {
    /// Nodes the fetch pipeline renders to PNG.
    pub fn is_renderable(self) -> bool {
        matches!(self, Self::Frame | Self::Component | Self::Instance)
    }

    /// Nodes the asset pipeline renders to SVG.
    pub fn is_icon_source(self) -> bool {
        matches!(self, Self::Component | Self::Instance)
    }

    /// The wire name, e.g. `COMPONENT_SET`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Document => "DOCUMENT",
            Self::Canvas => "CANVAS",
            Self::Frame => "FRAME",
            Self::Group => "GROUP",
            Self::Section => "SECTION",
            Self::Component => "COMPONENT",
            Self::ComponentSet => "COMPONENT_SET",
            Self::Instance => "INSTANCE",
            Self::Text => "TEXT",
            Self::Rectangle => "RECTANGLE",
            Self::Ellipse => "ELLIPSE",
            Self::Vector => "VECTOR",
            Self::Line => "LINE",
            Self::Star => "STAR",
            Self::RegularPolygon => "REGULAR_POLYGON",
            Self::BooleanOperation => "BOOLEAN_OPERATION",
            Self::Slice => "SLICE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Auto-layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutMode {
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A fill or stroke layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintType,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub scale_mode: Option<ScaleMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintType {
    Solid,
    Image,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Emoji,
    Video,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScaleMode {
    Fill,
    Fit,
    Tile,
    Stretch,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectType,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectType {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    #[serde(other)]
    Other,
}

/// RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Color {
    /// Channels scaled to `0..=255`, each rounded on its own.
    pub fn rgb255(&self) -> [u8; 3] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b)]
    }

    /// Alpha as a whole percentage.
    pub fn opacity_percent(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 100.0).round() as u8
    }

    pub fn is_translucent(&self) -> bool {
        self.a < 1.0
    }
}

fn to_byte(channel: f64) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}
