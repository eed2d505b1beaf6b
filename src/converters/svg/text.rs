//! Lays out `TextContent` as native SVG `<text>` lines.
//!
//! Layout is approximate: glyph advances are estimated from the font size and
//! lines are wrapped greedily at spaces to fit the shape width.

use std::fmt::Write;

use super::{
    constants::*,
    error::Result,
    utils::{dimension_to_pt, escape_svg_attr, escape_svg_text, format_optional_color},
};
use crate::models::{
    properties::{Alignment, ParagraphStyle, TextStyle},
    text::TextContent,
    text_element::{ParagraphMarker, TextElement, TextRun},
};

/// Region a text body is laid out in, in points.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Appends `TextStyle` properties as CSS declarations to `svg_style`.
pub(crate) fn apply_text_style(style: &TextStyle, svg_style: &mut String) -> Result<()> {
    write!(
        svg_style,
        "font-family:'{}'; ",
        escape_svg_attr(style.font_family.as_deref().unwrap_or(DEFAULT_FONT_FAMILY))
    )?;
    write!(svg_style, "font-size:{}pt; ", font_size_pt(style))?;

    let (fg_color, fg_opacity) = format_optional_color(style.foreground_color.as_ref());
    write!(svg_style, "fill:{}; fill-opacity:{}; ", fg_color, fg_opacity)?;

    if style.bold.unwrap_or(false) {
        write!(svg_style, "font-weight:bold; ")?;
    }
    if style.italic.unwrap_or(false) {
        write!(svg_style, "font-style:italic; ")?;
    }
    if style.underline.unwrap_or(false) {
        write!(svg_style, "text-decoration:underline; ")?;
    }
    Ok(())
}

/// Writes the `text-anchor` for the paragraph alignment and returns the anchor x.
pub(crate) fn apply_paragraph_style(
    style: Option<&ParagraphStyle>,
    svg_attrs: &mut String,
    x: f64,
    width: f64,
) -> Result<f64> {
    let (anchor, adjusted_x) = match style.and_then(|s| s.alignment.as_ref()) {
        Some(Alignment::Center) => ("middle", x + width / 2.0),
        Some(Alignment::End) => ("end", x + width),
        _ => ("start", x),
    };
    write!(svg_attrs, r#" text-anchor="{}""#, anchor)?;
    Ok(adjusted_x)
}

fn font_size_pt(style: &TextStyle) -> f64 {
    let size = dimension_to_pt(style.font_size.as_ref());
    if size > 0.0 {
        size
    } else {
        DEFAULT_FONT_SIZE_PT
    }
}

/// One styled fragment of a laid-out line.
#[derive(Debug, Clone, PartialEq)]
struct Segment {
    text: String,
    style: TextStyle,
}

/// A paragraph and its runs, grouped from the flat element stream.
struct Paragraph<'a> {
    marker: Option<&'a ParagraphMarker>,
    runs: Vec<&'a TextRun>,
}

fn paragraphs(text: &TextContent) -> Vec<Paragraph<'_>> {
    let mut out: Vec<Paragraph<'_>> = Vec::new();
    for element in text.text_elements.iter().flatten() {
        match element {
            TextElement::ParagraphMarker(marker) => out.push(Paragraph {
                marker: Some(marker),
                runs: Vec::new(),
            }),
            TextElement::TextRun(run) => match out.last_mut() {
                Some(paragraph) => paragraph.runs.push(run),
                None => out.push(Paragraph {
                    marker: None,
                    runs: vec![run],
                }),
            },
        }
    }
    out
}

fn estimated_width(text: &str, style: &TextStyle) -> f64 {
    text.chars().count() as f64 * font_size_pt(style) * GLYPH_WIDTH_FACTOR
}

/// Breaks runs into lines no wider than `max_width`, honoring embedded newlines.
fn wrap_runs(runs: &[&TextRun], base: &TextStyle, max_width: f64) -> Vec<Vec<Segment>> {
    let mut lines: Vec<Vec<Segment>> = vec![Vec::new()];
    let mut line_width = 0.0;

    for run in runs {
        let style = run
            .style
            .as_ref()
            .map_or_else(|| base.clone(), |s| s.merged_over(base));
        let content = run.content.as_deref().unwrap_or("");
        for (i, hard_line) in content.split('\n').enumerate() {
            if i > 0 {
                lines.push(Vec::new());
                line_width = 0.0;
            }
            for word in hard_line.split_inclusive(' ') {
                let width = estimated_width(word, &style);
                let line_has_content = lines.last().is_some_and(|l| !l.is_empty());
                if line_has_content && line_width + width > max_width && !word.trim().is_empty() {
                    lines.push(Vec::new());
                    line_width = 0.0;
                }
                line_width += width;
                if let Some(line) = lines.last_mut() {
                    match line.last_mut() {
                        Some(last) if last.style == style => last.text.push_str(word),
                        _ => line.push(Segment {
                            text: word.to_string(),
                            style: style.clone(),
                        }),
                    }
                }
            }
        }
    }
    lines
}

/// Converts text content into SVG `<text>` elements inside `frame`.
///
/// `base_style` is the placeholder default the runs inherit from. Paragraphs
/// without an explicit bullet get one when `default_bullets` is set.
pub(crate) fn convert_text_content_to_svg(
    text_content: &TextContent,
    base_style: &TextStyle,
    default_bullets: bool,
    frame: TextFrame,
    svg_output: &mut String,
) -> Result<()> {
    let mut current_y = frame.y + TEXT_INSET_PT;
    let bottom = frame.y + frame.height;

    for paragraph in paragraphs(text_content) {
        let para_style = paragraph.marker.and_then(|m| m.style.as_ref());
        let bullet = paragraph.marker.and_then(|m| m.bullet.as_ref());
        let show_bullet = match bullet {
            Some(b) => !b.is_hidden(),
            None => default_bullets,
        };
        let indent = bullet
            .and_then(|b| b.nesting_level)
            .map_or(0.0, |level| f64::from(level.max(0)) * BULLET_INDENT_PT);
        let glyph = bullet
            .and_then(|b| b.glyph.as_deref())
            .unwrap_or(BULLET_GLYPH);

        let first_style = paragraph
            .runs
            .first()
            .and_then(|r| r.style.as_ref())
            .map_or_else(|| base_style.clone(), |s| s.merged_over(base_style));
        let size = font_size_pt(&first_style);
        let spacing = para_style
            .and_then(|s| s.line_spacing)
            .map_or(1.0, |pct| f64::from(pct) / 100.0);
        let line_height = size * LINE_HEIGHT_FACTOR * spacing;

        let bullet_width = if show_bullet { size } else { 0.0 };
        let text_x = frame.x + TEXT_INSET_PT + indent + bullet_width;
        let text_width = (frame.width - 2.0 * TEXT_INSET_PT - indent - bullet_width).max(size);

        let lines = wrap_runs(&paragraph.runs, base_style, text_width);
        for (index, line) in lines.iter().enumerate() {
            let baseline = current_y + size;
            if baseline > bottom {
                log::debug!("Text overflows its frame at y={baseline:.1}pt");
            }
            if index == 0 && show_bullet && !line.is_empty() {
                let mut bullet_style = String::new();
                apply_text_style(&first_style, &mut bullet_style)?;
                write!(
                    svg_output,
                    r#"<text x="{}" y="{}" style="{}">{}</text>"#,
                    frame.x + TEXT_INSET_PT + indent,
                    baseline,
                    bullet_style.trim_end(),
                    escape_svg_text(glyph)
                )?;
            }
            if !line.is_empty() {
                let mut para_attrs = String::new();
                let x = apply_paragraph_style(para_style, &mut para_attrs, text_x, text_width)?;
                write!(
                    svg_output,
                    r#"<text x="{}" y="{}"{} xml:space="preserve">"#,
                    x, baseline, para_attrs
                )?;
                for segment in line {
                    let mut style_attr = String::new();
                    apply_text_style(&segment.style, &mut style_attr)?;
                    write!(
                        svg_output,
                        r#"<tspan style="{}">{}</tspan>"#,
                        style_attr.trim_end(),
                        escape_svg_text(&segment.text)
                    )?;
                }
                writeln!(svg_output, "</text>")?;
            }
            current_y += line_height;
        }
    }
    Ok(())
}
