//! Utility functions for SVG conversion: escaping, unit conversion and color formatting.

use super::constants::*;
use crate::models::{
    colors::OptionalColor,
    common::{Dimension, Rect},
};

// --- Text Escaping ---

/// Escapes special XML characters for use in SVG text content.
pub fn escape_svg_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes a value for use inside a double-quoted attribute.
pub fn escape_svg_attr(value: &str) -> String {
    escape_svg_text(value).replace('"', "&quot;")
}

// --- Unit Conversion ---

/// Converts an optional `Dimension` to points (pt).
/// Returns 0.0 if the dimension is `None` or has no magnitude.
pub fn dimension_to_pt(dim: Option<&Dimension>) -> f64 {
    dim.map_or(0.0, Dimension::to_pt)
}

/// Converts an EMU length to points.
pub fn emu_to_pt(emu: f64) -> f64 {
    emu / EMU_PER_PT
}

/// An element rectangle in points, as `(x, y, width, height)`.
pub fn rect_to_pt(rect: &Rect) -> (f64, f64, f64, f64) {
    (
        emu_to_pt(rect.left),
        emu_to_pt(rect.top),
        emu_to_pt(rect.width),
        emu_to_pt(rect.height),
    )
}

// --- Color Formatting ---

/// Converts an `OptionalColor` to SVG fill/opacity attribute values.
/// An `OptionalColor` without an opaque color is transparent; a missing one
/// falls back to the default text color.
pub fn format_optional_color(optional_color: Option<&OptionalColor>) -> (String, String) {
    match optional_color {
        Some(opt_color) => match &opt_color.opaque_color {
            Some(opaque) => (opaque.rgb_color.to_hex(), "1".to_string()),
            None => ("none".to_string(), "0".to_string()),
        },
        None => (DEFAULT_TEXT_COLOR.to_string(), "1".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attributes_escape_quotes() {
        assert_eq!(escape_svg_attr(r#"a "b" & <c>"#), "a &quot;b&quot; &amp; &lt;c&gt;");
    }

    #[test]
    fn transparent_and_default_colors() {
        let transparent = OptionalColor { opaque_color: None };
        assert_eq!(
            format_optional_color(Some(&transparent)),
            ("none".to_string(), "0".to_string())
        );
        assert_eq!(format_optional_color(None).0, DEFAULT_TEXT_COLOR);
        assert_eq!(
            format_optional_color(Some(&OptionalColor::rgb8(255, 0, 0))).0,
            "#ff0000"
        );
    }

    #[test]
    fn points_from_emu() {
        assert_eq!(emu_to_pt(914_400.0), 72.0);
        assert_eq!(dimension_to_pt(Some(&Dimension::pt(12.0))), 12.0);
        assert_eq!(dimension_to_pt(None), 0.0);
    }
}
