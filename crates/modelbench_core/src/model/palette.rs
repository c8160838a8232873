//! Kind to color table shared with canvas renderers.
//!
//! Presentation only; the graph store never consults it.

use crate::model::element::ElementKind;

/// Color used for kind labels outside the closed set.
pub const NEUTRAL_COLOR: &str = "#95a5a6";

/// Returns the fill color for one element kind.
pub fn kind_color(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Block => "#3498db",
        ElementKind::Requirement => "#e74c3c",
        ElementKind::Port => "#f39c12",
        ElementKind::Action => "#27ae60",
    }
}

/// Returns the fill color for a free-form kind label.
///
/// Unknown labels fall back to [`NEUTRAL_COLOR`].
pub fn color_for_label(label: &str) -> &'static str {
    label
        .parse::<ElementKind>()
        .map(kind_color)
        .unwrap_or(NEUTRAL_COLOR)
}
