// src/models/properties.rs

use serde::{Deserialize, Serialize};

use crate::models::colors::OptionalColor;
use crate::models::common::Dimension;

/// Represents the styling that can be applied to a TextRun.
/// Unset properties are inherited from the enclosing shape's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// The foreground color of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,

    /// The font family of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// The size of the text's font.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,

    /// Whether the text is rendered as bold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,

    /// Whether the text is italicized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,

    /// Whether the text is underlined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
}

impl TextStyle {
    /// Overlays `self` on top of `base`: set fields win, unset fields inherit.
    pub fn merged_over(&self, base: &TextStyle) -> TextStyle {
        TextStyle {
            foreground_color: self
                .foreground_color
                .clone()
                .or_else(|| base.foreground_color.clone()),
            font_family: self.font_family.clone().or_else(|| base.font_family.clone()),
            font_size: self.font_size.clone().or_else(|| base.font_size.clone()),
            bold: self.bold.or(base.bold),
            italic: self.italic.or(base.italic),
            underline: self.underline.or(base.underline),
        }
    }
}

/// The text alignment for a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    /// Aligned to the start of the line.
    Start,
    /// Centered.
    Center,
    /// Aligned to the end of the line.
    End,
}

/// Styles that apply to a whole paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    /// The text alignment for this paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    /// The amount of space between lines, as a percentage of normal (100.0 corresponds to 100%).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
}
