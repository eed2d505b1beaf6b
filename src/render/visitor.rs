//! Single-pass walk over the Markdown tree that builds slides and narration.
//!
//! Every handler returns the markup for the node (written to the `.html`
//! output) and, as a side effect, updates the deck through the
//! [`SlideBuilder`] and the pending narration through the
//! [`NarrationRecorder`].
//!
//! Headings are slide boundaries: they voice whatever narration the previous
//! slide collected before opening a new one. A heading whose text is exactly
//! `Summary` switches off notes and body content for the rest of the document.

use std::mem;

use crate::config::RenderConfig;
use crate::converters::raster::image_pixel_size;
use crate::errors::Result;
use crate::markdown::{MarkdownNode, NodeKind};
use crate::models::image::{Image, ImageFit};
use crate::models::layout::LayoutKind;
use crate::models::presentation::Presentation;
use crate::render::code_block::CodeBlockRenderer;
use crate::render::narration::NarrationRecorder;
use crate::render::slide_builder::{SlideBuilder, CONTENT_PLACEHOLDER};
use crate::speech::SpeechSynthesizer;

/// Heading text that suppresses the remaining content.
pub const SUMMARY_HEADING: &str = "Summary";
/// Markup for a hard line break. Slide text and notes get a bare newline.
const HARD_BREAK_MARKUP: &str = "<br />\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderMode {
    Markup,
    /// Text only, no side effects. Used for alt text.
    PlainText,
}

#[derive(Debug, Clone, Copy)]
struct ListContext {
    ordered: bool,
    start: u64,
}

/// Everything a finished traversal produced.
#[derive(Debug)]
pub struct RenderOutput {
    pub presentation: Presentation,
    /// One joined narration string per narrated slide.
    pub transcript: Vec<String>,
    /// Whole-second slide durations, parallel to `transcript`.
    pub durations: Vec<u32>,
}

pub struct DocumentVisitor<'a> {
    config: &'a RenderConfig,
    synthesizer: &'a dyn SpeechSynthesizer,
    slides: SlideBuilder,
    narration: NarrationRecorder,
    code: CodeBlockRenderer,
    lists: Vec<ListContext>,
    seen_summary: bool,
    mode: RenderMode,
}

impl<'a> DocumentVisitor<'a> {
    pub fn new(
        presentation_id: impl Into<String>,
        config: &'a RenderConfig,
        synthesizer: &'a dyn SpeechSynthesizer,
    ) -> Self {
        Self {
            config,
            synthesizer,
            slides: SlideBuilder::new(presentation_id),
            narration: NarrationRecorder::new(),
            code: CodeBlockRenderer::new(),
            lists: Vec::new(),
            seen_summary: false,
            mode: RenderMode::Markup,
        }
    }

    /// Renders `node`, returning its markup.
    pub fn render(&mut self, node: &MarkdownNode) -> Result<String> {
        if self.mode == RenderMode::PlainText {
            return Ok(node.plain_text());
        }
        match &node.kind {
            NodeKind::Heading(level) => self.render_heading(node, *level),
            NodeKind::Paragraph => self.render_paragraph(node),
            NodeKind::List { ordered, start } => self.render_list(
                node,
                ListContext {
                    ordered: *ordered,
                    start: *start,
                },
            ),
            NodeKind::ListItem => self.render_list_item(node),
            NodeKind::Image { destination } => self.render_image(node, destination),
            NodeKind::FencedCode { language, code } => {
                self.code.render(code, language.as_deref(), &mut self.slides)
            }
            NodeKind::IndentedCode(code) | NodeKind::CodeSpan(code) => Ok(code.clone()),
            NodeKind::Text(text) => Ok(text.clone()),
            NodeKind::SoftBreak => Ok("\n".to_string()),
            NodeKind::HardBreak => Ok(HARD_BREAK_MARKUP.to_string()),
            NodeKind::Document
            | NodeKind::Emphasis
            | NodeKind::StrongEmphasis
            | NodeKind::Link { .. }
            | NodeKind::Container => self.render_children(node),
        }
    }

    fn render_children(&mut self, node: &MarkdownNode) -> Result<String> {
        let mut out = String::new();
        for child in &node.children {
            out.push_str(&self.render(child)?);
        }
        Ok(out)
    }

    fn finish_previous_slide(&mut self) -> Result<()> {
        self.narration
            .finalize(&mut self.slides, self.synthesizer, self.config)
    }

    fn render_heading(&mut self, node: &MarkdownNode, level: u8) -> Result<String> {
        self.finish_previous_slide()?;
        let children = self.render_children(node)?;
        if node.first_text() == Some(SUMMARY_HEADING) {
            log::debug!("Summary heading reached; suppressing remaining content");
            self.seen_summary = true;
            return Ok(children);
        }

        if level == 1 {
            self.slides.add_slide(LayoutKind::Title);
            self.narration.queue(children.clone());
        } else {
            self.slides.add_slide(LayoutKind::TitleContent);
        }
        self.slides.set_title(&children);
        if level == 1 {
            self.slides
                .set_placeholder_text(CONTENT_PLACEHOLDER, &self.config.subtitle);
        }
        Ok(format!("<h{level}>{children}</h{level}>\n"))
    }

    fn render_paragraph(&mut self, node: &MarkdownNode) -> Result<String> {
        let children = self.render_children(node)?;
        if !self.lists.is_empty() || self.seen_summary {
            return Ok(children);
        }
        // Image-only paragraphs render to nothing and carry no narration.
        if !children.is_empty() {
            let notes = slide_text(&children);
            self.slides.append_notes(&notes);
            self.narration.queue(notes);
            self.slides.mark_filled();
        }
        Ok(format!("<p>{children}</p>\n"))
    }

    fn render_list(&mut self, node: &MarkdownNode, context: ListContext) -> Result<String> {
        if self.seen_summary {
            return Ok(String::new());
        }
        log::trace!(
            "Entering {} list (start {}) at depth {}",
            if context.ordered { "ordered" } else { "bulleted" },
            context.start,
            self.lists.len()
        );
        self.lists.push(context);
        let children = self.render_children(node);
        self.lists.pop();
        let children = children?;

        match self.slides.current_text() {
            Some(text) => text.append_text(&slide_text(&children)),
            None => log::warn!("No text container for list; dropping {children:?}"),
        }
        Ok(String::new())
    }

    fn render_list_item(&mut self, node: &MarkdownNode) -> Result<String> {
        let children = self.render_children(node)?;
        let sep = if node.is_tight_item() { "" } else { "\n" };
        Ok(format!("{sep}{children}\n"))
    }

    fn render_image(&mut self, node: &MarkdownNode, destination: &str) -> Result<String> {
        let path = self.config.graphics_folder.join(destination);
        let pixel_size = image_pixel_size(&path)?;
        let picture = Image {
            content_url: None,
            source_url: Some(path.to_string_lossy().into_owned()),
            image_properties: None,
        };
        if !self.slides.place_picture(picture, pixel_size, ImageFit::Fit) {
            log::warn!("No room for image {}", path.display());
        }

        let previous = mem::replace(&mut self.mode, RenderMode::PlainText);
        let alt = self.render_children(node);
        self.mode = previous;
        alt?;
        Ok(String::new())
    }

    /// Voices the last slide's narration and hands back the deck.
    pub fn finish(mut self) -> Result<RenderOutput> {
        self.finish_previous_slide()?;
        let (transcript, durations) = self.narration.into_parts();
        Ok(RenderOutput {
            presentation: self.slides.into_presentation(),
            transcript,
            durations,
        })
    }
}

/// Renders a whole document: returns the markup and the finished output.
pub fn render_document(
    root: &MarkdownNode,
    presentation_id: &str,
    config: &RenderConfig,
    synthesizer: &dyn SpeechSynthesizer,
) -> Result<(String, RenderOutput)> {
    let mut visitor = DocumentVisitor::new(presentation_id, config, synthesizer);
    let markup = visitor.render(root)?;
    let output = visitor.finish()?;
    Ok((markup, output))
}

fn slide_text(markup: &str) -> String {
    markup.replace(HARD_BREAK_MARKUP, "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parse_markdown;
    use crate::models::elements::{PageElement, PageElementKind};
    use crate::models::shape::ShapeType;
    use crate::models::text::TextContent;
    use crate::speech::testing::FakeSynthesizer;

    fn bake(source: &str) -> (String, RenderOutput, FakeSynthesizer) {
        bake_with(source, &RenderConfig::default())
    }

    fn bake_with(source: &str, config: &RenderConfig) -> (String, RenderOutput, FakeSynthesizer) {
        let synth = FakeSynthesizer::default();
        let (markup, output) =
            render_document(&parse_markdown(source), "deck", config, &synth).unwrap();
        (markup, output, synth)
    }

    fn body_text(page: &crate::models::page::Page) -> String {
        page.elements()
            .iter()
            .filter_map(PageElement::as_shape)
            .filter(|s| {
                s.placeholder_index() == Some(CONTENT_PLACEHOLDER)
                    || s.shape_type == Some(ShapeType::TextBox)
            })
            .filter_map(|s| s.text.as_ref().map(TextContent::plain_text))
            .collect()
    }

    #[test]
    fn transcript_and_durations_stay_parallel() {
        let source = "\
intro before any heading

# Title

Opening words.

## Loops

Loops repeat.

- a
- b

## Empty

## Functions

```python
def f():
    return 1
```

Functions name code.
";
        let (_, output, _) = bake(source);
        assert_eq!(output.transcript.len(), output.durations.len());
        assert_eq!(output.transcript.len(), 4);
        assert!(output.durations.iter().all(|d| *d == 10));
    }

    #[test]
    fn heading_and_paragraph_make_one_narrated_title_slide() {
        let (markup, output, synth) = bake("# Welcome\n\nHello and welcome.\n");
        assert_eq!(output.presentation.slides.len(), 1);
        let slide = &output.presentation.slides[0];
        assert_eq!(slide.layout, Some(LayoutKind::Title));
        assert_eq!(slide.title_text().as_deref(), Some("Welcome"));
        assert_eq!(slide.notes_text(), "Hello and welcome.");
        assert_eq!(output.transcript.len(), 1);
        assert!(output.transcript[0].ends_with("Hello and welcome."));
        assert_eq!(synth.texts().len(), 1);
        assert_eq!(markup, "<h1>Welcome</h1>\n<p>Hello and welcome.</p>\n");
    }

    #[test]
    fn title_slides_carry_the_subtitle() {
        let config = RenderConfig {
            subtitle: "Course Name".to_string(),
            ..RenderConfig::default()
        };
        let (_, output, _) = bake_with("# Start\n", &config);
        let slide = &output.presentation.slides[0];
        let subtitle = slide
            .placeholder(CONTENT_PLACEHOLDER)
            .and_then(PageElement::as_shape)
            .and_then(|s| s.text.as_ref())
            .map(TextContent::plain_text);
        assert_eq!(subtitle.as_deref(), Some("Course Name"));
    }

    #[test]
    fn consecutive_subheadings_have_no_narration() {
        let (_, output, synth) = bake("## First\n\n## Second\n");
        assert_eq!(output.presentation.slides.len(), 2);
        assert!(output
            .presentation
            .slides
            .iter()
            .all(|s| s.layout == Some(LayoutKind::TitleContent)));
        assert!(output.transcript.is_empty());
        assert!(output.durations.is_empty());
        assert!(synth.texts().is_empty());
    }

    #[test]
    fn narration_is_flushed_at_the_next_heading() {
        let (_, output, _) = bake("## One\n\nFirst part.\n\nSecond part.\n\n## Two\n\nOther.\n");
        assert_eq!(
            output.transcript,
            vec!["First part.\nSecond part.".to_string(), "Other.".to_string()]
        );
        let first = &output.presentation.slides[0];
        assert_eq!(first.notes_text(), "First part.\nSecond part.");
        assert_eq!(first.transition().and_then(|t| t.advance_after_ms), Some(10_000));
    }

    #[test]
    fn lists_fill_the_body_without_narration() {
        let (markup, output, _) = bake("## Points\n\n- alpha\n- beta\n");
        assert_eq!(markup, "<h2>Points</h2>\n");
        assert!(output.transcript.is_empty());
        assert_eq!(body_text(&output.presentation.slides[0]), "alpha\nbeta\n");
    }

    #[test]
    fn hard_breaks_are_tags_only_in_markup() {
        let (markup, output, _) = bake("## Lines\n\nFirst line  \nsecond line.\n");
        assert_eq!(markup, "<h2>Lines</h2>\n<p>First line<br />\nsecond line.</p>\n");
        assert_eq!(output.transcript, vec!["First line\nsecond line.".to_string()]);
        assert_eq!(
            output.presentation.slides[0].notes_text(),
            "First line\nsecond line."
        );
    }

    #[test]
    fn summary_suppresses_following_content() {
        let source = "## Topic\n\nSpoken.\n\n## Summary\n\nNot spoken.\n\n- hidden\n";
        let (markup, output, _) = bake(source);
        assert!(markup.contains("Summary"));
        assert!(!markup.contains("<h2>Summary</h2>"));
        assert_eq!(output.presentation.slides.len(), 1);
        assert_eq!(output.transcript, vec!["Spoken.".to_string()]);
        let slide = &output.presentation.slides[0];
        assert_eq!(slide.notes_text(), "Spoken.");
        assert!(!body_text(slide).contains("hidden"));
    }

    #[test]
    fn content_before_headings_gets_a_blank_slide() {
        let (_, output, _) = bake("Just talk.\n");
        assert_eq!(output.presentation.slides.len(), 1);
        assert_eq!(output.presentation.slides[0].layout, Some(LayoutKind::Blank));
        assert_eq!(output.transcript, vec!["Just talk.".to_string()]);
    }

    #[test]
    fn code_threshold_switches_rendering() {
        let short: String = (0..13).map(|i| format!("x = {i}\n")).collect();
        let long: String = (0..14).map(|i| format!("x = {i}\n")).collect();

        let (_, output, _) = bake(&format!("## Short\n\n```python\n{short}```\n"));
        let slide = &output.presentation.slides[0];
        assert_eq!(body_text(slide), short);
        assert!(!slide
            .elements()
            .iter()
            .any(|e| matches!(e.element_kind, PageElementKind::Image(_))));

        let (markup, output, _) = bake(&format!("## Long\n\n```python\n{long}```\n"));
        let slide = &output.presentation.slides[0];
        assert!(slide
            .elements()
            .iter()
            .any(|e| matches!(e.element_kind, PageElementKind::Image(_))));
        assert!(markup.contains("<pre"));
    }

    #[test]
    fn images_replace_the_body_and_drop_alt_text() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbaImage::new(4, 2)
            .save(dir.path().join("chart.png"))
            .unwrap();
        let config = RenderConfig {
            graphics_folder: dir.path().to_path_buf(),
            ..RenderConfig::default()
        };
        let (markup, output, synth) = bake_with("## Chart\n\n![*big* chart](chart.png)\n", &config);
        assert_eq!(markup, "<h2>Chart</h2>\n<p></p>\n");
        assert!(synth.texts().is_empty());
        let slide = &output.presentation.slides[0];
        assert!(slide.placeholder(CONTENT_PLACEHOLDER).is_none());
        let image = slide
            .elements()
            .iter()
            .find(|e| matches!(e.element_kind, PageElementKind::Image(_)))
            .unwrap();
        let rect = image.rect();
        assert!((rect.width - 2.0 * rect.height).abs() <= 2.0);
    }

    #[test]
    fn missing_image_file_is_an_error() {
        let synth = FakeSynthesizer::default();
        let config = RenderConfig {
            graphics_folder: "/definitely/not/here".into(),
            ..RenderConfig::default()
        };
        let result = render_document(
            &parse_markdown("## A\n\n![x](missing.png)\n"),
            "deck",
            &config,
            &synth,
        );
        assert!(result.is_err());
    }
}
