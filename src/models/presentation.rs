use serde::{Deserialize, Serialize};

use crate::models::common::Size;
use crate::models::layout::{SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};
use crate::models::page::Page;

/// A narrated slide deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// The ID of the presentation.
    pub presentation_id: String,

    /// The size of pages in the presentation.
    pub page_size: Option<Size>,

    /// The slides in presentation order.
    #[serde(default)]
    pub slides: Vec<Page>,

    /// The title of the presentation.
    pub title: Option<String>,

    /// The locale of the presentation, as an IETF BCP 47 language tag (e.g., "en-US").
    pub locale: Option<String>,
}

impl Presentation {
    /// An empty 16:9 deck.
    pub fn new(presentation_id: impl Into<String>) -> Self {
        Self {
            presentation_id: presentation_id.into(),
            page_size: Some(Size::emu(SLIDE_WIDTH_EMU, SLIDE_HEIGHT_EMU)),
            slides: Vec::new(),
            title: None,
            locale: Some("en-US".to_string()),
        }
    }

    /// Page size in EMU, falling back to the 16:9 default.
    pub fn page_size_emu(&self) -> (f64, f64) {
        let dim = |d: Option<&crate::models::common::Dimension>, fallback: f64| {
            d.map_or(fallback, |d| d.to_emu())
        };
        match &self.page_size {
            Some(size) => (
                dim(size.width.as_ref(), SLIDE_WIDTH_EMU),
                dim(size.height.as_ref(), SLIDE_HEIGHT_EMU),
            ),
            None => (SLIDE_WIDTH_EMU, SLIDE_HEIGHT_EMU),
        }
    }
}
