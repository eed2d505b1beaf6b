// src/models/text_element.rs

use serde::{Deserialize, Serialize};

use crate::models::bullet::Bullet;
use crate::models::properties::{ParagraphStyle, TextStyle};

/// Represents a segment of text with consistent styling within a paragraph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// The text content of this run.
    pub content: Option<String>,
    /// The styling applied to this run. If unset, the value is inherited from
    /// the parent paragraph's style or placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<TextStyle>,
}

/// Represents the beginning of a new paragraph in the text element stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphMarker {
    /// The paragraph's style. If unset, the value is inherited from the parent shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParagraphStyle>,
    /// The bullet for this paragraph. If unset, the bullet is inherited from the parent shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bullet: Option<Bullet>,
}

/// A single logical element in the text stream of a Shape.
/// Every paragraph starts with a `ParagraphMarker` followed by its runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextElement {
    /// A run of text with consistent styling.
    TextRun(TextRun),
    /// A marker indicating the beginning of a paragraph and its properties.
    ParagraphMarker(ParagraphMarker),
}
