//! Handles the overall structure of the conversion: placeholder defaults and
//! the per-slide SVG canvas.

use super::{
    constants::*,
    elements::convert_page_element_to_svg,
    error::{Result, SvgConversionError},
    utils::emu_to_pt,
};
use crate::models::{
    common::Dimension,
    page::Page,
    placeholder::PlaceholderType,
    properties::TextStyle,
};
use std::fmt::Write;

/// The default text style a placeholder of the given type gives its runs.
/// Shapes that are not placeholders use the plain template default.
pub(crate) fn placeholder_default_text_style(placeholder_type: Option<PlaceholderType>) -> TextStyle {
    let size = match placeholder_type {
        Some(PlaceholderType::CenteredTitle) => CENTERED_TITLE_FONT_SIZE_PT,
        Some(PlaceholderType::Title) => TITLE_FONT_SIZE_PT,
        Some(PlaceholderType::Subtitle) => SUBTITLE_FONT_SIZE_PT,
        Some(PlaceholderType::Body) => BODY_FONT_SIZE_PT,
        None => DEFAULT_FONT_SIZE_PT,
    };
    TextStyle {
        font_family: Some(DEFAULT_FONT_FAMILY.to_string()),
        font_size: Some(Dimension::pt(size)),
        ..TextStyle::default()
    }
}

/// Converts a single slide into an SVG document of `page_size_emu`.
pub(crate) fn convert_slide_to_svg(slide: &Page, page_size_emu: (f64, f64)) -> Result<String> {
    let mut svg_string = String::new();

    let page_width_pt = emu_to_pt(page_size_emu.0);
    let page_height_pt = emu_to_pt(page_size_emu.1);
    if page_width_pt <= 0.0 || page_height_pt <= 0.0 {
        return Err(SvgConversionError::MissingData(
            "Invalid or missing presentation page size".to_string(),
        ));
    }

    writeln!(
        svg_string,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{0}pt" height="{1}pt" viewBox="0 0 {0} {1}">"#,
        page_width_pt, page_height_pt
    )?;
    writeln!(
        svg_string,
        r#"  <rect width="100%" height="100%" fill="{}" />"#,
        DEFAULT_BACKGROUND_COLOR
    )?;

    // Elements are drawn in insertion order; later elements sit on top.
    for element in slide.elements() {
        convert_page_element_to_svg(element, &mut svg_string)?;
        writeln!(svg_string)?;
    }

    writeln!(svg_string, "</svg>")?;
    Ok(svg_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layout::{LayoutKind, SLIDE_HEIGHT_EMU, SLIDE_WIDTH_EMU};

    #[test]
    fn canvas_matches_the_page() {
        let slide = Page::from_layout("slide_0001", LayoutKind::Blank);
        let svg = convert_slide_to_svg(&slide, (SLIDE_WIDTH_EMU, SLIDE_HEIGHT_EMU)).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 960 540""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn zero_page_is_rejected() {
        let slide = Page::from_layout("slide_0001", LayoutKind::Blank);
        assert!(matches!(
            convert_slide_to_svg(&slide, (0.0, 0.0)),
            Err(SvgConversionError::MissingData(_))
        ));
    }

    #[test]
    fn titles_are_larger_than_body() {
        let size = |t| {
            placeholder_default_text_style(Some(t))
                .font_size
                .map(|d| d.to_pt())
                .unwrap_or_default()
        };
        assert!(size(PlaceholderType::Title) > size(PlaceholderType::Body));
    }
}
