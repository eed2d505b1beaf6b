//! Handles the conversion of specific `PageElement` types (Shape, Image)
//! into their corresponding SVG representations.

use log::{debug, warn};

use super::{
    error::Result,
    structure::placeholder_default_text_style,
    text::{convert_text_content_to_svg, TextFrame},
    utils::{escape_svg_attr, rect_to_pt},
};
use crate::models::{
    elements::{PageElement, PageElementKind},
    image::Image,
    placeholder::PlaceholderType,
    shape::Shape,
};
use std::fmt::Write;

/// Converts a Shape element's text. Shapes in this deck have no visible geometry.
fn convert_shape_to_svg(element: &PageElement, shape: &Shape, svg_output: &mut String) -> Result<()> {
    let Some(text) = shape.text.as_ref().filter(|t| !t.is_empty()) else {
        return Ok(());
    };
    let (x, y, width, height) = rect_to_pt(&element.rect());
    let placeholder_type = shape.placeholder.as_ref().and_then(|p| p.placeholder_type);
    let base_style = placeholder_default_text_style(placeholder_type);
    // Only body placeholders inherit bullets; free text boxes never do.
    let default_bullets = placeholder_type == Some(PlaceholderType::Body);

    write!(svg_output, r#"<g data-object-id="{}">"#, escape_svg_attr(&element.object_id))?;
    convert_text_content_to_svg(
        text,
        &base_style,
        default_bullets,
        TextFrame {
            x,
            y,
            width,
            height,
        },
        svg_output,
    )?;
    write!(svg_output, "</g>")?;
    Ok(())
}

/// Converts an Image element to an SVG `<image>` tag.
fn convert_image_to_svg(element: &PageElement, image: &Image, svg_output: &mut String) -> Result<()> {
    let (x, y, width, height) = rect_to_pt(&element.rect());
    if width <= 0.0 || height <= 0.0 {
        warn!(
            "Skipping image element {} with zero dimensions ({}x{} pt).",
            element.object_id, width, height
        );
        return Ok(());
    }

    match image.location() {
        Some(url) => write!(
            svg_output,
            r#"<image x="{}" y="{}" width="{}" height="{}" xlink:href="{}" preserveAspectRatio="xMidYMid meet" data-object-id="{}"/>"#,
            x,
            y,
            width,
            height,
            escape_svg_attr(url),
            escape_svg_attr(&element.object_id)
        )?,
        None => {
            warn!("Image element {} has no location.", element.object_id);
            write!(
                svg_output,
                r#"<rect x="{}" y="{}" width="{}" height="{}" style="fill:#e0e0e0; stroke:gray; fill-opacity:0.5;" />"#,
                x, y, width, height
            )?;
        }
    }
    Ok(())
}

/// Converts a single `PageElement` to an SVG fragment. Audio has no visual form.
pub(crate) fn convert_page_element_to_svg(element: &PageElement, svg_output: &mut String) -> Result<()> {
    match &element.element_kind {
        PageElementKind::Shape(shape) => convert_shape_to_svg(element, shape, svg_output)?,
        PageElementKind::Image(image) => convert_image_to_svg(element, image, svg_output)?,
        PageElementKind::Audio(_) => {
            debug!("Audio element {} is not drawn", element.object_id);
        }
    }
    Ok(())
}
