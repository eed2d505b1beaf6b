//! The slide layouts a deck can be built from, with the placeholder geometry
//! each one reserves on a 16:9 page.

use serde::{Deserialize, Serialize};

use crate::models::common::Rect;
use crate::models::elements::{PageElement, PageElementKind};
use crate::models::placeholder::{Placeholder, PlaceholderType};
use crate::models::shape::{Shape, ShapeType};

/// Page width in EMU (13.333 in).
pub const SLIDE_WIDTH_EMU: f64 = 12_192_000.0;
/// Page height in EMU (7.5 in).
pub const SLIDE_HEIGHT_EMU: f64 = 6_858_000.0;

/// A slide layout. The numeric index is the position in the layout list of
/// the default template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutKind {
    /// Centered title with a subtitle underneath.
    Title,
    /// Title bar with a body region.
    TitleContent,
    /// No placeholders.
    Blank,
}

impl LayoutKind {
    /// Placeholder slots as `(type, index, region)`.
    pub fn placeholders(self) -> &'static [(PlaceholderType, i32, Rect)] {
        const TITLE: &[(PlaceholderType, i32, Rect)] = &[
            (
                PlaceholderType::CenteredTitle,
                0,
                Rect::new(1_524_000.0, 1_122_363.0, 9_144_000.0, 2_387_600.0),
            ),
            (
                PlaceholderType::Subtitle,
                1,
                Rect::new(1_524_000.0, 3_602_038.0, 9_144_000.0, 1_655_762.0),
            ),
        ];
        const TITLE_CONTENT: &[(PlaceholderType, i32, Rect)] = &[
            (
                PlaceholderType::Title,
                0,
                Rect::new(838_200.0, 365_125.0, 10_515_600.0, 1_325_563.0),
            ),
            (
                PlaceholderType::Body,
                1,
                Rect::new(838_200.0, 1_825_625.0, 10_515_600.0, 4_351_338.0),
            ),
        ];
        match self {
            Self::Title => TITLE,
            Self::TitleContent => TITLE_CONTENT,
            Self::Blank => &[],
        }
    }

    /// The region free text boxes are placed in when a slide needs one.
    pub fn text_box_region() -> Rect {
        LayoutKind::TitleContent.placeholders()[1].2
    }

    /// Instantiates empty placeholder shapes for a slide with id `slide_id`.
    pub fn placeholder_elements(self, slide_id: &str) -> Vec<PageElement> {
        self.placeholders()
            .iter()
            .map(|(kind, index, rect)| {
                PageElement::new(
                    format!("{slide_id}_ph{index}"),
                    *rect,
                    PageElementKind::Shape(Shape {
                        shape_type: Some(ShapeType::Rectangle),
                        text: None,
                        placeholder: Some(Placeholder {
                            placeholder_type: Some(*kind),
                            index: Some(*index),
                        }),
                    }),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_fit_on_page() {
        for layout in [LayoutKind::Title, LayoutKind::TitleContent] {
            for (_, _, rect) in layout.placeholders() {
                assert!(rect.left + rect.width <= SLIDE_WIDTH_EMU);
                assert!(rect.bottom() <= SLIDE_HEIGHT_EMU);
            }
        }
        assert!(LayoutKind::Blank.placeholder_elements("s").is_empty());
    }
}
