use serde::{Deserialize, Serialize};

use crate::models::placeholder::Placeholder;
use crate::models::text::TextContent;

/// The type of a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    /// Text box shape.
    TextBox,
    /// Rectangle shape. Placeholders created from a layout use this type.
    Rectangle,
}

/// A PageElement kind representing a generic shape that holds text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// The type of the shape.
    pub shape_type: Option<ShapeType>,

    /// The text content of the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,

    /// Placeholders are page elements that inherit from corresponding placeholders on layouts.
    /// If set, the shape is a placeholder shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
}

impl Shape {
    /// Text of the shape, created empty on first access.
    pub fn text_mut(&mut self) -> &mut TextContent {
        self.text.get_or_insert_with(TextContent::default)
    }

    /// The placeholder index, if this shape is a placeholder.
    pub fn placeholder_index(&self) -> Option<i32> {
        self.placeholder.as_ref().and_then(|p| p.index)
    }
}
