//! Fenced code rendering: short blocks become styled runs, long ones a picture.

use std::fmt::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::converters::raster::rasterize_svg;
use crate::errors::Result;
use crate::models::bullet::Bullet;
use crate::models::colors::OptionalColor;
use crate::models::image::{Image, ImageFit};
use crate::models::properties::{ParagraphStyle, TextStyle};
use crate::models::text::TextContent;
use crate::models::text_element::ParagraphMarker;
use crate::render::highlight::{Highlighter, Token};
use crate::render::slide_builder::SlideBuilder;

/// Blocks with this many newlines or more are rendered as a picture.
pub const LONG_CODE_LINES: usize = 14;
/// Font of inline code runs.
pub const CODE_FONT: &str = "Courier New";
/// Line spacing of inline code, in percent.
const CODE_LINE_SPACING: f32 = 50.0;

// Picture metrics, in pixels.
const IMAGE_FONT_SIZE: f32 = 30.0;
const IMAGE_LINE_PAD: f32 = 8.0;
const IMAGE_PAD: f32 = 0.0;
const IMAGE_CHAR_WIDTH: f32 = IMAGE_FONT_SIZE * 0.6;
const TAB_WIDTH: usize = 4;

pub struct CodeBlockRenderer {
    highlighter: Highlighter,
}

impl Default for CodeBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBlockRenderer {
    pub fn new() -> Self {
        Self {
            highlighter: Highlighter::new(),
        }
    }

    /// Renders `code` onto the current slide and returns its markup.
    pub fn render(
        &self,
        code: &str,
        language: Option<&str>,
        slides: &mut SlideBuilder,
    ) -> Result<String> {
        let syntax = self.highlighter.resolve(code, language);
        let line_count = code.matches('\n').count();

        if line_count < LONG_CODE_LINES {
            let tokens = self.highlighter.tokens(code, syntax)?;
            match slides.current_text() {
                Some(text) => write_runs(text, &tokens),
                None => log::warn!("Throwing away code block: no text container"),
            }
            return Ok(String::new());
        }

        let lines = self.highlighter.token_lines(code, syntax)?;
        let svg = code_svg(&lines, self.highlighter.background())?;
        let raster = rasterize_svg(&svg, None, None)?;
        let picture = Image {
            content_url: Some(format!(
                "data:image/png;base64,{}",
                STANDARD.encode(&raster.png)
            )),
            source_url: None,
            image_properties: None,
        };
        if !slides.place_picture(picture, (raster.width, raster.height), ImageFit::MaxSize) {
            log::warn!("Throwing away {line_count}-line code block: no room on slide");
        }
        self.highlighter.html(code, syntax)
    }
}

/// Replaces `text` with one unbulleted paragraph holding a run per token.
fn write_runs(text: &mut TextContent, tokens: &[Token]) {
    text.clear();
    text.push_paragraph(ParagraphMarker {
        style: Some(ParagraphStyle {
            alignment: None,
            line_spacing: Some(CODE_LINE_SPACING),
        }),
        bullet: Some(Bullet::none()),
    });
    for token in tokens {
        let (r, g, b) = token.rgb;
        text.push_run(
            token.text.clone(),
            Some(TextStyle {
                foreground_color: Some(OptionalColor::rgb8(r, g, b)),
                font_family: Some(CODE_FONT.to_string()),
                font_size: None,
                bold: Some(token.bold),
                italic: Some(token.italic),
                underline: Some(token.underline),
            }),
        );
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn expand_tabs(text: &str) -> String {
    text.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Lays highlighted lines out as monospace SVG text on the theme background.
fn code_svg(lines: &[Vec<Token>], background: (u8, u8, u8)) -> Result<String> {
    let line_height = IMAGE_FONT_SIZE + IMAGE_LINE_PAD;
    let widest = lines
        .iter()
        .map(|line| {
            line.iter()
                .map(|t| expand_tabs(&t.text).chars().count())
                .sum::<usize>()
        })
        .max()
        .unwrap_or(0)
        .max(1);
    let width = (widest as f32 * IMAGE_CHAR_WIDTH + 2.0 * IMAGE_PAD).ceil();
    let height = (lines.len().max(1) as f32 * line_height + 2.0 * IMAGE_PAD).ceil();

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;
    let (r, g, b) = background;
    writeln!(
        svg,
        r#"<rect width="100%" height="100%" fill="rgb({r},{g},{b})"/>"#
    )?;
    for (index, line) in lines.iter().enumerate() {
        let baseline = IMAGE_PAD + index as f32 * line_height + IMAGE_FONT_SIZE;
        write!(
            svg,
            r#"<text x="{IMAGE_PAD}" y="{baseline}" font-family="DejaVu Sans Mono, {CODE_FONT}, monospace" font-size="{IMAGE_FONT_SIZE}" xml:space="preserve">"#
        )?;
        for token in line {
            let (r, g, b) = token.rgb;
            write!(svg, r#"<tspan fill="rgb({r},{g},{b})""#)?;
            if token.bold {
                svg.push_str(r#" font-weight="bold""#);
            }
            if token.italic {
                svg.push_str(r#" font-style="italic""#);
            }
            if token.underline {
                svg.push_str(r#" text-decoration="underline""#);
            }
            write!(svg, ">{}</tspan>", escape_xml(&expand_tabs(&token.text)))?;
        }
        svg.push_str("</text>\n");
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}
