//! Incremental construction of the deck with lazily created slide and text cursors.

use std::path::Path;

use crate::models::audio::{Audio, AudioProperties};
use crate::models::common::{inches, Rect};
use crate::models::elements::{PageElement, PageElementKind};
use crate::models::image::{Image, ImageFit, ImageProperties};
use crate::models::layout::LayoutKind;
use crate::models::page::Page;
use crate::models::presentation::Presentation;
use crate::models::shape::{Shape, ShapeType};
use crate::models::text::TextContent;
use crate::models::transition::SlideTransition;

/// Placeholder index of the slide title.
pub const TITLE_PLACEHOLDER: i32 = 0;
/// Placeholder index of the body or subtitle region.
pub const CONTENT_PLACEHOLDER: i32 = 1;

/// Seconds of padding added to every narration clip before the slide advances.
const NARRATION_PADDING_SECONDS: f64 = 2.0;
/// Delay before a narration clip starts playing.
const NARRATION_START_DELAY_MS: u32 = 1000;

/// Owns the presentation under construction plus the current slide and text cursors.
#[derive(Debug)]
pub struct SlideBuilder {
    presentation: Presentation,
    current_slide: Option<usize>,
    /// Object id of the shape text is written into, on the current slide.
    current_text: Option<String>,
    is_blank: bool,
    element_counter: usize,
}

impl SlideBuilder {
    pub fn new(presentation_id: impl Into<String>) -> Self {
        Self {
            presentation: Presentation::new(presentation_id),
            current_slide: None,
            current_text: None,
            is_blank: true,
            element_counter: 0,
        }
    }

    /// Appends a slide with `layout`'s placeholders and moves the cursors onto it.
    /// On `TitleContent` slides the text cursor starts at the body placeholder.
    pub fn add_slide(&mut self, layout: LayoutKind) -> &mut Page {
        if let (Some(previous), true) = (self.current_slide, self.is_blank) {
            log::debug!(
                "Slide {} has no notes, narration or picture",
                self.presentation.slides[previous].object_id
            );
        }
        let object_id = format!("slide_{:04}", self.presentation.slides.len() + 1);
        let page = Page::from_layout(object_id, layout);
        self.current_text = match layout {
            LayoutKind::TitleContent => page
                .placeholder(CONTENT_PLACEHOLDER)
                .map(|e| e.object_id.clone()),
            _ => None,
        };
        log::debug!("Added {:?} slide {}", layout, page.object_id);
        self.presentation.slides.push(page);
        let index = self.presentation.slides.len() - 1;
        self.current_slide = Some(index);
        self.is_blank = true;
        &mut self.presentation.slides[index]
    }

    fn ensure_slide(&mut self) -> usize {
        match self.current_slide {
            Some(index) => index,
            None => {
                self.add_slide(LayoutKind::Blank);
                self.current_text = None;
                self.presentation.slides.len() - 1
            }
        }
    }

    /// The slide being built, a `Blank` one is created on first access.
    pub fn current_slide(&mut self) -> &mut Page {
        let index = self.ensure_slide();
        &mut self.presentation.slides[index]
    }

    #[cfg(test)]
    pub(crate) fn has_slide(&self) -> bool {
        self.current_slide.is_some()
    }

    fn next_element_id(&mut self, page_id: &str) -> String {
        self.element_counter += 1;
        format!("{page_id}_e{:03}", self.element_counter)
    }

    /// The text container being written to. A text box is added to the
    /// current slide when there is none. `None` only if the cursor points at
    /// something that cannot hold text.
    pub fn current_text(&mut self) -> Option<&mut TextContent> {
        let index = self.ensure_slide();
        let cursor_valid = self.current_text.as_deref().is_some_and(|id| {
            self.presentation.slides[index]
                .element(id)
                .is_some_and(|e| e.as_shape().is_some())
        });
        if !cursor_valid {
            let page_id = self.presentation.slides[index].object_id.clone();
            let id = self.next_element_id(&page_id);
            let textbox = PageElement::new(
                id.clone(),
                LayoutKind::text_box_region(),
                PageElementKind::Shape(Shape {
                    shape_type: Some(ShapeType::TextBox),
                    text: Some(TextContent::default()),
                    placeholder: None,
                }),
            );
            self.presentation.slides[index].elements_mut().push(textbox);
            self.current_text = Some(id);
        }

        let id = self.current_text.as_deref()?;
        self.presentation.slides[index]
            .element_mut(id)?
            .as_shape_mut()
            .map(Shape::text_mut)
    }

    /// Writes `text` into placeholder `index` of the current slide.
    /// Returns false when the slide has no such placeholder.
    pub fn set_placeholder_text(&mut self, index: i32, text: &str) -> bool {
        let page = self.current_slide();
        match page.placeholder_mut(index).and_then(PageElement::as_shape_mut) {
            Some(shape) => {
                shape.text_mut().set_text(text);
                true
            }
            None => {
                log::warn!(
                    "Slide {} has no placeholder {index}; dropping text {text:?}",
                    page.object_id
                );
                false
            }
        }
    }

    pub fn set_title(&mut self, text: &str) -> bool {
        self.set_placeholder_text(TITLE_PLACEHOLDER, text)
    }

    /// Adds `text` to the current slide's speaker notes, on a new line when
    /// notes already exist.
    pub fn append_notes(&mut self, text: &str) {
        let page = self.current_slide();
        let had_notes = page.has_notes();
        let notes = page.notes_mut();
        if had_notes {
            notes.append_text("\n");
        }
        notes.append_text(text);
    }

    /// Replaces the content placeholder of the current slide with `picture`,
    /// whose bitmap is `pixel_size` large. Returns false when the slide has
    /// no content placeholder to replace.
    pub fn place_picture(&mut self, mut picture: Image, pixel_size: (u32, u32), fit: ImageFit) -> bool {
        let (_, slide_height) = self.presentation.page_size_emu();
        let index = self.ensure_slide();
        let page = &mut self.presentation.slides[index];

        let Some(placeholder) = page.placeholder(CONTENT_PLACEHOLDER) else {
            log::warn!(
                "Slide {} has no content placeholder; dropping picture",
                page.object_id
            );
            return false;
        };
        let region = placeholder.rect();
        let placeholder_id = placeholder.object_id.clone();

        let (pixel_width, pixel_height) = (
            f64::from(pixel_size.0.max(1)),
            f64::from(pixel_size.1.max(1)),
        );
        let rect = match fit {
            ImageFit::Fit => fit_into(region, pixel_width, pixel_height),
            ImageFit::MaxSize => {
                let start = page
                    .placeholder(TITLE_PLACEHOLDER)
                    .map_or(region.top, |title| title.rect().bottom());
                let height = slide_height - start - inches(0.5);
                let width = height * pixel_width / pixel_height;
                Rect::new(region.left, start, width, height)
            }
        };

        let image_properties = picture
            .image_properties
            .get_or_insert_with(|| ImageProperties {
                pixel_width: None,
                pixel_height: None,
                fit: None,
            });
        image_properties.pixel_width = Some(pixel_size.0);
        image_properties.pixel_height = Some(pixel_size.1);
        image_properties.fit = Some(fit);

        let page_id = page.object_id.clone();
        let id = self.next_element_id(&page_id);
        let page = &mut self.presentation.slides[index];
        page.elements_mut()
            .push(PageElement::new(id, rect, PageElementKind::Image(picture)));
        page.remove_element(&placeholder_id);
        if self.current_text.as_deref() == Some(placeholder_id.as_str()) {
            self.current_text = None;
        }
        true
    }

    /// Attaches a narration clip to the current slide: a timed transition
    /// and an auto-playing, invisible audio element. Returns the slide's
    /// duration in whole seconds.
    pub fn add_narration_overlay(&mut self, audio_path: &Path, length_seconds: f64) -> u32 {
        let seconds = (length_seconds + NARRATION_PADDING_SECONDS).ceil().max(0.0) as u32;
        let index = self.ensure_slide();
        let page_id = self.presentation.slides[index].object_id.clone();
        let id = self.next_element_id(&page_id);

        let page = &mut self.presentation.slides[index];
        page.set_transition(SlideTransition::narrated(seconds));
        page.elements_mut().push(PageElement::new(
            id,
            Rect::new(0.0, 0.0, 0.0, 0.0),
            PageElementKind::Audio(Audio {
                source_url: audio_path.to_string_lossy().into_owned(),
                audio_properties: Some(AudioProperties {
                    auto_play: Some(true),
                    start_delay_ms: Some(NARRATION_START_DELAY_MS),
                    length_seconds: Some(length_seconds),
                }),
            }),
        ));
        self.is_blank = false;
        seconds
    }

    #[cfg(test)]
    fn is_blank(&self) -> bool {
        self.is_blank
    }

    pub fn mark_filled(&mut self) {
        self.is_blank = false;
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn into_presentation(self) -> Presentation {
        self.presentation
    }
}

/// Scales a `width` x `height` bitmap uniformly into `region` and centers it.
fn fit_into(region: Rect, width: f64, height: f64) -> Rect {
    let ratio = (region.width / width).min(region.height / height);
    let scaled_width = (width * ratio).floor();
    let scaled_height = (height * ratio).floor();
    Rect::new(
        region.left + ((region.width - scaled_width) / 2.0).floor(),
        region.top + ((region.height - scaled_height) / 2.0).floor(),
        scaled_width,
        scaled_height,
    )
}
