use serde::{Deserialize, Serialize};

/// The type of placeholder. Identifies the role a layout reserves for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceholderType {
    /// Body text placeholder.
    Body,
    /// Centered title placeholder.
    CenteredTitle,
    /// Subtitle placeholder.
    Subtitle,
    /// Title placeholder.
    Title,
}

impl PlaceholderType {
    /// Whether this placeholder holds the slide title.
    pub fn is_title(self) -> bool {
        matches!(self, Self::Title | Self::CenteredTitle)
    }
}

/// The placeholder information that uniquely identifies a placeholder shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// The type of the placeholder.
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_type: Option<PlaceholderType>,
    /// The index of the placeholder within its layout. Index 0 is the title,
    /// index 1 the content region (body or subtitle).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}
