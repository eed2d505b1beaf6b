use serde::{Deserialize, Serialize};

/// Describes the bullet of a paragraph.
///
/// A paragraph without a `Bullet` inherits bullets from its shape (body
/// placeholders are bulleted, text boxes are not). A bullet with `hidden` set
/// explicitly suppresses the inherited glyph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    /// The nesting level of this paragraph in the list (0-8).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nesting_level: Option<i32>,

    /// The bullet glyph for this paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glyph: Option<String>,

    /// Whether the bullet is switched off for this paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl Bullet {
    /// A bullet that switches the inherited glyph off.
    pub fn none() -> Self {
        Self {
            nesting_level: None,
            glyph: None,
            hidden: Some(true),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }
}
