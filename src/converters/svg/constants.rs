//! Defines constants used throughout the SVG conversion process.

pub use crate::models::common::EMU_PER_PT;

// Default values used when specific properties are missing or cannot be resolved.
pub const DEFAULT_FONT_SIZE_PT: f64 = 18.0;
pub const DEFAULT_FONT_FAMILY: &str = "Calibri";
pub const DEFAULT_TEXT_COLOR: &str = "#000000";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";

// Placeholder text sizes of the default template.
pub const CENTERED_TITLE_FONT_SIZE_PT: f64 = 60.0;
pub const TITLE_FONT_SIZE_PT: f64 = 44.0;
pub const SUBTITLE_FONT_SIZE_PT: f64 = 24.0;
pub const BODY_FONT_SIZE_PT: f64 = 28.0;

/// Line height as a multiple of the font size when no spacing is set.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;
/// Average glyph advance as a multiple of the font size, used for wrapping.
pub const GLYPH_WIDTH_FACTOR: f64 = 0.5;
/// Indentation per bullet nesting level.
pub const BULLET_INDENT_PT: f64 = 27.0;
pub const BULLET_GLYPH: &str = "\u{2022}";
/// Inner margin of text shapes.
pub const TEXT_INSET_PT: f64 = 7.2;
