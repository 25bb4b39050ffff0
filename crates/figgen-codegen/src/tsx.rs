//! TSX printer.
//!
//! Turns the component IR into React source text. Pure string building; no
//! file system access.

use crate::component::{ComponentSpec, IconSpec};
use crate::js_string;

/// Print a container component.
pub fn render(spec: &ComponentSpec) -> String {
    let name = &spec.name;
    let mut out = String::new();

    out.push_str("import * as React from \"react\"\n");
    if spec.image.is_some() {
        out.push_str("import Image from \"next/image\"\n");
    }
    out.push_str("import { cn } from \"@/lib/utils\"\n\n");

    // Props
    out.push_str(&format!(
        "interface {name}Props extends React.HTMLAttributes<HTMLDivElement> {{\n"
    ));
    out.push_str("  className?: string;\n");
    out.push_str("  children?: React.ReactNode;\n");
    out.push_str(&format!("  variant?: {};\n", union(spec.variants.iter().map(|v| v.as_str()))));
    out.push_str(&format!("  size?: {};\n", union(spec.sizes.iter().map(|s| s.as_str()))));
    if spec.image.is_some() {
        out.push_str("  imageId?: string;\n");
    }
    out.push_str("}\n\n");

    // Signature
    let mut params = format!(
        "className, children, variant = '{}', size = '{}'",
        spec.default_variant.as_str(),
        spec.default_size.as_str()
    );
    if spec.image.is_some() {
        params.push_str(&format!(", imageId = {}", js_string(&spec.node_id)));
    }
    out.push_str(&format!(
        "const {name} = React.forwardRef<HTMLDivElement, {name}Props>(\n"
    ));
    out.push_str(&format!("  ({{ {params}, ...props }}, ref) => {{\n"));
    out.push_str("    return (\n");
    out.push_str("      <div\n");
    out.push_str("        ref={ref}\n");
    out.push_str("        className={cn(\n");

    out.push_str("          // Base styles\n");
    out.push_str(&format!("          \"{}\",\n", spec.class_string()));

    out.push_str("          // Variant styles\n");
    for variant in spec.variants.iter().filter(|v| !v.classes().is_empty()) {
        out.push_str(&format!(
            "          variant === '{}' && \"{}\",\n",
            variant.as_str(),
            variant.classes()
        ));
    }

    out.push_str("          // Size styles\n");
    for size in &spec.sizes {
        out.push_str(&format!(
            "          size === '{}' && \"{}\",\n",
            size.as_str(),
            size.classes()
        ));
    }

    out.push_str("          // Custom classes\n");
    out.push_str("          className\n");
    out.push_str("        )}\n");
    out.push_str("        {...props}\n");
    out.push_str("      >\n");

    if let Some(image) = &spec.image {
        let root = image.root.trim_end_matches('/');
        out.push_str("        <Image\n");
        out.push_str(&format!(
            "          src={{`{root}/${{imageId}}.{}`}}\n",
            image.extension
        ));
        out.push_str(&format!("          alt=\"{name} image\"\n"));
        out.push_str("          fill\n");
        out.push_str("          className=\"object-cover\"\n");
        out.push_str("          priority\n");
        out.push_str("        />\n");
    }

    out.push_str("        {children || (\n");
    out.push_str(
        "          <div className=\"relative flex h-full w-full items-center justify-center\">\n",
    );
    out.push_str("            <span className=\"text-sm text-muted-foreground\">\n");
    out.push_str(&format!("              {name} Component\n"));
    out.push_str("            </span>\n");
    out.push_str("          </div>\n");
    out.push_str("        )}\n");
    out.push_str("      </div>\n");
    out.push_str("    );\n");
    out.push_str("  }\n");
    out.push_str(");\n\n");

    out.push_str(&format!("{name}.displayName = \"{name}\";\n\n"));
    out.push_str(&format!("export {{ {name} }};\n"));

    out
}

/// Print an SVG icon component.
pub fn render_icon(spec: &IconSpec) -> String {
    let name = &spec.name;
    let mut out = String::new();

    out.push_str("import React from 'react';\n");
    out.push_str("import { cn } from '@/lib/utils';\n\n");
    out.push_str(&format!(
        "interface {name}Props extends React.SVGAttributes<SVGElement> {{\n"
    ));
    out.push_str("  className?: string;\n");
    out.push_str("}\n\n");
    out.push_str(&format!(
        "export const {name} = React.forwardRef<SVGSVGElement, {name}Props>(\n"
    ));
    out.push_str("  ({ className, ...props }, ref) => {\n");
    out.push_str("    return (\n");
    out.push_str("      <svg\n");
    out.push_str("        ref={ref}\n");
    out.push_str("        className={cn('h-6 w-6', className)}\n");
    out.push_str("        viewBox=\"0 0 24 24\"\n");
    out.push_str("        fill=\"none\"\n");
    out.push_str("        xmlns=\"http://www.w3.org/2000/svg\"\n");
    out.push_str("        {...props}\n");
    out.push_str("      >\n");
    out.push_str(&format!("        <use href=\"{}#icon\" />\n", spec.href));
    out.push_str("      </svg>\n");
    out.push_str("    );\n");
    out.push_str("  }\n");
    out.push_str(");\n\n");
    out.push_str(&format!("{name}.displayName = '{name}';\n"));

    out
}

/// Print the barrel file re-exporting every component, in the given order.
/// Lines are newline-separated with no trailing newline.
pub fn render_index<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(|name| format!("export {{ {name} }} from './{name}';"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `'a' | 'b' | 'c'`
fn union<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items
        .map(|s| format!("'{s}'"))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ImageRef, Size, Variant};
    use pretty_assertions::assert_eq;

    fn spec(image: Option<ImageRef>) -> ComponentSpec {
        ComponentSpec {
            name: "Card".into(),
            node_id: "1:2".into(),
            classes: vec!["relative".into(), "bg-[rgb(255 255 255)]".into()],
            variants: Variant::ALL.to_vec(),
            default_variant: Variant::Default,
            sizes: Size::ALL.to_vec(),
            default_size: Size::Md,
            image,
        }
    }

    // =========================================================================
    // Container components
    // =========================================================================

    #[test]
    fn test_render_without_image() {
        let out = render(&spec(None));
        assert!(out.starts_with("import * as React from \"react\"\nimport { cn }"));
        assert!(!out.contains("next/image"));
        assert!(!out.contains("imageId"));
        assert!(out.contains("interface CardProps extends React.HTMLAttributes<HTMLDivElement> {"));
        assert!(out.contains("  variant?: 'default' | 'outline' | 'ghost';\n"));
        assert!(out.contains("  size?: 'sm' | 'md' | 'lg';\n"));
        assert!(out.contains(
            "  ({ className, children, variant = 'default', size = 'md', ...props }, ref) => {\n"
        ));
        assert!(out.contains("          \"relative bg-[rgb(255 255 255)]\",\n"));
        assert!(out.contains("              Card Component\n"));
        assert!(out.ends_with("Card.displayName = \"Card\";\n\nexport { Card };\n"));
    }

    #[test]
    fn test_render_variant_and_size_lines() {
        let out = render(&spec(None));
        assert!(!out.contains("variant === 'default'"));
        assert!(out.contains("          variant === 'outline' && \"border-2\",\n"));
        assert!(out.contains("          variant === 'ghost' && \"hover:bg-muted/50\",\n"));
        assert!(out.contains("          size === 'sm' && \"min-h-[150px] p-2\",\n"));
        assert!(out.contains("          size === 'md' && \"min-h-[200px] p-4\",\n"));
        assert!(out.contains("          size === 'lg' && \"min-h-[300px] p-6\",\n"));
    }

    #[test]
    fn test_render_with_image() {
        let out = render(&spec(Some(ImageRef {
            root: "/assets/figma".into(),
            node_id: "1:2".into(),
            extension: "png".into(),
        })));
        assert!(out.contains("import Image from \"next/image\"\n"));
        assert!(out.contains("  imageId?: string;\n"));
        assert!(out.contains("size = 'md', imageId = '1:2', ...props }"));
        assert!(out.contains("          src={`/assets/figma/${imageId}.png`}\n"));
        assert!(out.contains("          alt=\"Card image\"\n"));
    }

    #[test]
    fn test_render_escapes_node_id() {
        let mut s = spec(Some(ImageRef {
            root: "/a".into(),
            node_id: "it's".into(),
            extension: "png".into(),
        }));
        s.node_id = "it's".into();
        let out = render(&s);
        assert!(out.contains("imageId = 'it\\'s'"));
    }

    // =========================================================================
    // Icons / index
    // =========================================================================

    #[test]
    fn test_render_icon() {
        let out = render_icon(&IconSpec {
            name: "ArrowLeft".into(),
            href: "/assets/icons/arrow-left.svg".into(),
        });
        assert!(out.contains("interface ArrowLeftProps extends React.SVGAttributes<SVGElement> {"));
        assert!(out.contains(
            "export const ArrowLeft = React.forwardRef<SVGSVGElement, ArrowLeftProps>("
        ));
        assert!(out.contains("        <use href=\"/assets/icons/arrow-left.svg#icon\" />\n"));
        assert!(out.ends_with("ArrowLeft.displayName = 'ArrowLeft';\n"));
    }

    #[test]
    fn test_render_index() {
        assert_eq!(
            render_index(["Card", "Button"]),
            "export { Card } from './Card';\nexport { Button } from './Button';"
        );
    }

    #[test]
    fn test_render_index_empty() {
        assert_eq!(render_index(std::iter::empty::<&str>()), "");
    }
}
