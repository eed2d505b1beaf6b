// src/models/elements.rs

use serde::{Deserialize, Serialize};

use crate::models::audio::Audio;
use crate::models::common::{AffineTransform, Rect, Size};
use crate::models::image::Image;
use crate::models::shape::Shape;

/// The specific kind of PageElement represented as an enum with associated data.
/// The JSON representation uses the field name as the key (e.g., "shape": {...}, "image": {...}).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageElementKind {
    /// A generic shape.
    Shape(Shape),
    /// An image page element.
    Image(Image),
    /// A narration clip.
    Audio(Audio),
}

/// A visual element rendered on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// The object ID for this page element. Object IDs used by Page and PageElement
    /// share the same namespace.
    pub object_id: String,

    /// The size of the page element.
    pub size: Option<Size>,

    /// The transform of the page element.
    pub transform: Option<AffineTransform>,

    /// The description of the page element, used as alt text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The specific kind of element and its properties.
    #[serde(flatten)]
    pub element_kind: PageElementKind,
}

impl PageElement {
    /// Places `kind` in `rect`.
    pub fn new(object_id: impl Into<String>, rect: Rect, kind: PageElementKind) -> Self {
        Self {
            object_id: object_id.into(),
            size: Some(rect.size()),
            transform: Some(rect.transform()),
            description: None,
            element_kind: kind,
        }
    }

    /// The element's bounding box in EMU.
    pub fn rect(&self) -> Rect {
        Rect::from_parts(self.transform.as_ref(), self.size.as_ref())
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match &self.element_kind {
            PageElementKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut Shape> {
        match &mut self.element_kind {
            PageElementKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }
}
