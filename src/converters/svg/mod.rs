//! Converts a baked deck to Scalable Vector Graphics (SVG), one document per slide.
//!
//! # Current Features & Limitations:
//! *   Text in placeholders and text boxes, with run styling (font, size, color, bold, italic, underline).
//! *   Paragraph alignment, bullets with nesting, and greedy word wrapping from estimated glyph widths.
//! *   Pictures referenced by path or data URI.
//! *   Audio elements are not drawn.

mod constants;
mod elements;
mod error;
mod structure;
mod text;
mod utils;

pub use error::{Result, SvgConversionError};

use crate::models::presentation::Presentation;
use structure::convert_slide_to_svg;

/// Converts a `Presentation` into a vector of SVG strings, one per slide.
///
/// Errors during individual slide conversion halt the process and are returned
/// with the slide's position attached.
pub fn convert_presentation_to_svg(presentation: &Presentation) -> Result<Vec<String>> {
    let page_size = presentation.page_size_emu();
    if presentation.slides.is_empty() {
        log::warn!("Presentation has no slides to convert.");
    }

    let mut svg_slides = Vec::with_capacity(presentation.slides.len());
    for (index, slide) in presentation.slides.iter().enumerate() {
        match convert_slide_to_svg(slide, page_size) {
            Ok(svg_content) => svg_slides.push(svg_content),
            Err(e) => {
                log::error!(
                    "Error converting slide {} (ID: {}): {}",
                    index + 1,
                    slide.object_id,
                    e
                );
                return Err(SvgConversionError::Internal(format!(
                    "Failed to convert slide {} (ID: {}): {}",
                    index + 1,
                    slide.object_id,
                    e
                )));
            }
        }
    }
    Ok(svg_slides)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layout::LayoutKind;
    use crate::models::page::Page;

    #[test]
    fn one_svg_per_slide() {
        let mut deck = Presentation::new("deck");
        deck.slides.push(Page::from_layout("slide_0001", LayoutKind::Title));
        deck.slides.push(Page::from_layout("slide_0002", LayoutKind::Blank));
        let svgs = convert_presentation_to_svg(&deck).unwrap();
        assert_eq!(svgs.len(), 2);
        assert!(svgs.iter().all(|s| s.starts_with("<svg")));
    }
}
