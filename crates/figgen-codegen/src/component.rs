//! Component IR.
//!
//! Describes what a generated file contains, independent of how it is
//! printed. [`crate::tsx`] turns a [`ComponentSpec`] into source text.

use crate::naming::sanitize_component_name;
use crate::style;
use figgen_model::Node;

/// Visual variants every generated component accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Outline,
    Ghost,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Default, Variant::Outline, Variant::Ghost];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Outline => "outline",
            Self::Ghost => "ghost",
        }
    }

    /// Extra classes layered on top of the base list. Empty for `default`.
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Outline => "border-2",
            Self::Ghost => "hover:bg-muted/50",
        }
    }
}

/// Size presets every generated component accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Sm,
    Md,
    Lg,
}

impl Size {
    pub const ALL: [Size; 3] = [Size::Sm, Size::Md, Size::Lg];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }

    pub fn classes(self) -> &'static str {
        match self {
            Self::Sm => "min-h-[150px] p-2",
            Self::Md => "min-h-[200px] p-4",
            Self::Lg => "min-h-[300px] p-6",
        }
    }
}

/// Reference to a rendered asset served from `root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Public URL prefix, e.g. `/assets/figma`.
    pub root: String,
    pub node_id: String,
    pub extension: String,
}

impl ImageRef {
    /// `<root>/<node_id>.<extension>`
    pub fn src(&self) -> String {
        format!("{}/{}.{}", self.root.trim_end_matches('/'), self.node_id, self.extension)
    }
}

/// Everything needed to print one component file.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentSpec {
    pub name: String,
    pub node_id: String,
    pub classes: Vec<String>,
    pub variants: Vec<Variant>,
    pub default_variant: Variant,
    pub sizes: Vec<Size>,
    pub default_size: Size,
    pub image: Option<ImageRef>,
}

impl ComponentSpec {
    /// Build the IR for a COMPONENT node.
    ///
    /// `image` is attached only when the node has an image fill; the caller
    /// decides whether the asset actually exists.
    pub fn from_node(node: &Node, image: Option<ImageRef>) -> Self {
        let image = image.filter(|_| node.image_fill().is_some());
        Self {
            name: sanitize_component_name(&node.name),
            node_id: node.id.clone(),
            classes: style::derive(node),
            variants: Variant::ALL.to_vec(),
            default_variant: Variant::Default,
            sizes: Size::ALL.to_vec(),
            default_size: Size::Md,
            image,
        }
    }

    /// Base classes joined for a `className` string.
    pub fn class_string(&self) -> String {
        self.classes.join(" ")
    }

    pub fn file_name(&self) -> String {
        format!("{}.tsx", self.name)
    }
}

/// An SVG icon component wrapping a downloaded sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub name: String,
    /// Public URL of the SVG file, without the `#icon` fragment.
    pub href: String,
}

impl IconSpec {
    pub fn file_name(&self) -> String {
        format!("{}.tsx", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        serde_json::from_value(value).unwrap()
    }

    fn image_ref(id: &str) -> ImageRef {
        ImageRef {
            root: "/assets/figma".into(),
            node_id: id.into(),
            extension: "png".into(),
        }
    }

    #[test]
    fn test_from_node_basic() {
        let n = node(json!({
            "id": "1:1",
            "name": "primary card",
            "type": "COMPONENT",
            "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1, "a": 1 } }]
        }));
        let spec = ComponentSpec::from_node(&n, None);
        assert_eq!(spec.name, "Primarycard");
        assert_eq!(spec.node_id, "1:1");
        assert_eq!(spec.class_string(), "relative bg-[rgb(255 255 255)]");
        assert_eq!(spec.variants, Variant::ALL.to_vec());
        assert_eq!(spec.default_size, Size::Md);
        assert_eq!(spec.file_name(), "Primarycard.tsx");
        assert_eq!(spec.image, None);
    }

    #[test]
    fn test_image_kept_for_image_fill() {
        let n = node(json!({
            "id": "4:2",
            "name": "Hero",
            "type": "COMPONENT",
            "fills": [{ "type": "IMAGE", "imageRef": "r1" }]
        }));
        let spec = ComponentSpec::from_node(&n, Some(image_ref("4:2")));
        assert_eq!(spec.image.unwrap().src(), "/assets/figma/4:2.png");
    }

    #[test]
    fn test_image_dropped_without_image_fill() {
        let n = node(json!({ "id": "4:3", "name": "Plain", "type": "COMPONENT" }));
        let spec = ComponentSpec::from_node(&n, Some(image_ref("4:3")));
        assert_eq!(spec.image, None);
    }

    #[test]
    fn test_image_src_trims_trailing_slash() {
        let r = ImageRef {
            root: "/assets/icons/".into(),
            node_id: "9:9".into(),
            extension: "svg".into(),
        };
        assert_eq!(r.src(), "/assets/icons/9:9.svg");
    }

    #[test]
    fn test_variant_and_size_tables() {
        assert_eq!(Variant::Default.classes(), "");
        assert_eq!(Variant::Outline.classes(), "border-2");
        assert_eq!(Variant::Ghost.as_str(), "ghost");
        assert_eq!(Size::Sm.classes(), "min-h-[150px] p-2");
        assert_eq!(Size::Lg.as_str(), "lg");
    }
}
