//! Tailwind class derivation.
//!
//! Maps a node's layout and paint attributes to an ordered list of atomic
//! utility classes. Each rule is independent; the order below is the order
//! the tokens appear in the generated `className`.

use figgen_model::{EffectType, LayoutMode, Node, ScaleMode};

/// Widths above this become a centered, capped, full-width container.
pub const RESPONSIVE_BREAKPOINT: f64 = 768.0;

/// Cap applied to responsive containers.
pub const RESPONSIVE_MAX_WIDTH: &str = "max-w-[1200px]";

/// Spacing grid in pixels.
const GRID: f64 = 4.0;

/// Derive the base class list for a node.
pub fn derive(node: &Node) -> Vec<String> {
    let mut classes = vec!["relative".to_string()];

    image_classes(node, &mut classes);
    layout_classes(node, &mut classes);
    spacing_classes(node, &mut classes);
    padding_classes(node, &mut classes);
    size_classes(node, &mut classes);
    fill_classes(node, &mut classes);
    stroke_classes(node, &mut classes);
    effect_classes(node, &mut classes);

    classes
}

/// Round to the nearest multiple of [`GRID`].
pub fn snap_to_grid(px: f64) -> i64 {
    ((px / GRID).round() * GRID) as i64
}

fn push(out: &mut Vec<String>, tokens: &[&str]) {
    out.extend(tokens.iter().map(|t| t.to_string()));
}

fn image_classes(node: &Node, out: &mut Vec<String>) {
    let Some(fill) = node.image_fill() else {
        return;
    };
    push(out, &["bg-cover", "bg-center", "bg-no-repeat"]);
    if fill.scale_mode == Some(ScaleMode::Fit) {
        push(out, &["object-contain"]);
    } else {
        push(out, &["object-cover"]);
    }
}

fn layout_classes(node: &Node, out: &mut Vec<String>) {
    match node.layout_mode {
        Some(LayoutMode::Vertical) => push(out, &["flex", "flex-col"]),
        Some(LayoutMode::Horizontal) => push(out, &["flex", "flex-row"]),
        _ => {}
    }
}

fn spacing_classes(node: &Node, out: &mut Vec<String>) {
    let Some(spacing) = node.item_spacing.filter(|s| *s != 0.0) else {
        return;
    };
    let px = snap_to_grid(spacing);
    if node.layout_mode == Some(LayoutMode::Vertical) {
        out.push(format!("space-y-[{px}px]"));
    } else {
        out.push(format!("space-x-[{px}px]"));
    }
}

/// A side that is absent, zero, or snaps to zero counts as unset.
fn padding_side(value: Option<f64>) -> Option<i64> {
    value.map(snap_to_grid).filter(|px| *px != 0)
}

fn padding_classes(node: &Node, out: &mut Vec<String>) {
    let sides = [
        ("pt", padding_side(node.padding_top)),
        ("pr", padding_side(node.padding_right)),
        ("pb", padding_side(node.padding_bottom)),
        ("pl", padding_side(node.padding_left)),
    ];

    if sides.iter().all(|(_, v)| v.is_none()) {
        return;
    }

    let first = sides[0].1;
    if sides.iter().all(|(_, v)| *v == first) {
        if let Some(px) = first {
            out.push(format!("p-[{px}px]"));
        }
        return;
    }

    for (prefix, value) in sides {
        if let Some(px) = value {
            out.push(format!("{prefix}-[{px}px]"));
        }
    }
}

fn size_classes(node: &Node, out: &mut Vec<String>) {
    let Some(bbox) = node.absolute_bounding_box else {
        return;
    };
    if bbox.width > RESPONSIVE_BREAKPOINT {
        push(out, &["w-full", RESPONSIVE_MAX_WIDTH, "mx-auto"]);
    } else {
        out.push(format!("max-w-[{}px]", format_number(bbox.width)));
    }
    if bbox.height > 0.0 {
        out.push(format!("min-h-[{}px]", format_number(bbox.height)));
    }
}

fn fill_classes(node: &Node, out: &mut Vec<String>) {
    let Some(color) = node.fills.first().and_then(|p| p.color) else {
        return;
    };
    let [r, g, b] = color.rgb255();
    out.push(format!("bg-[rgb({r} {g} {b})]"));
    if color.is_translucent() {
        out.push(format!("bg-opacity-[{}]", color.opacity_percent()));
    }
}

fn stroke_classes(node: &Node, out: &mut Vec<String>) {
    let Some(color) = node.strokes.first().and_then(|p| p.color) else {
        return;
    };
    let [r, g, b] = color.rgb255();
    out.push("border".to_string());
    out.push(format!("border-[rgb({r} {g} {b})]"));
    if color.is_translucent() {
        out.push(format!("border-opacity-[{}]", color.opacity_percent()));
    }
}

fn effect_classes(node: &Node, out: &mut Vec<String>) {
    let has_shadow = node
        .effects
        .iter()
        .any(|e| e.kind == EffectType::DropShadow && e.radius.is_some_and(|r| r != 0.0));
    if has_shadow {
        push(out, &["shadow-lg"]);
    }
}

/// Format a pixel value, removing `.0` for integers.
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
