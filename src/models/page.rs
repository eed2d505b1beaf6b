// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::{PageElement, PageElementKind};
use crate::models::layout::LayoutKind;
use crate::models::shape::Shape;
use crate::models::text::TextContent;
use crate::models::transition::SlideTransition;

/// Properties specific to slide pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideProperties {
    /// The speaker notes of the slide. Absent until something writes to them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<TextContent>,

    /// The transition into the slide.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<SlideTransition>,
}

/// A slide in a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// The object ID for this page. Object IDs used by Page and PageElement share
    /// the same namespace.
    pub object_id: String,

    /// The layout the slide was created from.
    pub layout: Option<LayoutKind>,

    /// The page elements rendered on the page, back to front.
    pub page_elements: Option<Vec<PageElement>>,

    /// Slide specific properties.
    pub slide_properties: Option<SlideProperties>,
}

impl Page {
    /// A new slide with the layout's empty placeholders.
    pub fn from_layout(object_id: impl Into<String>, layout: LayoutKind) -> Self {
        let object_id = object_id.into();
        let elements = layout.placeholder_elements(&object_id);
        Self {
            object_id,
            layout: Some(layout),
            page_elements: Some(elements),
            slide_properties: None,
        }
    }

    pub fn elements(&self) -> &[PageElement] {
        self.page_elements.as_deref().unwrap_or(&[])
    }

    pub fn elements_mut(&mut self) -> &mut Vec<PageElement> {
        self.page_elements.get_or_insert_with(Vec::new)
    }

    pub fn element(&self, object_id: &str) -> Option<&PageElement> {
        self.elements().iter().find(|e| e.object_id == object_id)
    }

    pub fn element_mut(&mut self, object_id: &str) -> Option<&mut PageElement> {
        self.elements_mut()
            .iter_mut()
            .find(|e| e.object_id == object_id)
    }

    /// The placeholder shape with the given index.
    pub fn placeholder(&self, index: i32) -> Option<&PageElement> {
        self.elements()
            .iter()
            .find(|e| e.as_shape().and_then(Shape::placeholder_index) == Some(index))
    }

    pub fn placeholder_mut(&mut self, index: i32) -> Option<&mut PageElement> {
        self.elements_mut()
            .iter_mut()
            .find(|e| e.as_shape().and_then(Shape::placeholder_index) == Some(index))
    }

    /// Removes and returns the element with `object_id`.
    pub fn remove_element(&mut self, object_id: &str) -> Option<PageElement> {
        let elements = self.elements_mut();
        let position = elements.iter().position(|e| e.object_id == object_id)?;
        Some(elements.remove(position))
    }

    /// Plain text of the title placeholder, if any.
    pub fn title_text(&self) -> Option<String> {
        self.placeholder(0)
            .and_then(PageElement::as_shape)
            .and_then(|s| s.text.as_ref())
            .map(TextContent::plain_text)
    }

    pub fn has_notes(&self) -> bool {
        self.slide_properties
            .as_ref()
            .is_some_and(|p| p.notes.is_some())
    }

    /// The notes, created empty on first access.
    pub fn notes_mut(&mut self) -> &mut TextContent {
        self.slide_properties
            .get_or_insert_with(SlideProperties::default)
            .notes
            .get_or_insert_with(TextContent::default)
    }

    pub fn notes_text(&self) -> String {
        self.slide_properties
            .as_ref()
            .and_then(|p| p.notes.as_ref())
            .map(TextContent::plain_text)
            .unwrap_or_default()
    }

    pub fn set_transition(&mut self, transition: SlideTransition) {
        self.slide_properties
            .get_or_insert_with(SlideProperties::default)
            .transition = Some(transition);
    }

    pub fn transition(&self) -> Option<&SlideTransition> {
        self.slide_properties
            .as_ref()
            .and_then(|p| p.transition.as_ref())
    }

    /// Narration clips attached to the slide.
    pub fn audio_elements(&self) -> impl Iterator<Item = &crate::models::audio::Audio> {
        self.elements().iter().filter_map(|e| match &e.element_kind {
            PageElementKind::Audio(audio) => Some(audio),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_are_created_lazily() {
        let mut page = Page::from_layout("slide_0001", LayoutKind::TitleContent);
        assert!(!page.has_notes());
        page.notes_mut().append_text("hello");
        assert!(page.has_notes());
        assert_eq!(page.notes_text(), "hello");
    }

    #[test]
    fn placeholders_are_found_by_index() {
        let mut page = Page::from_layout("slide_0001", LayoutKind::Title);
        assert!(page.placeholder(0).is_some());
        let id = page.placeholder(1).map(|e| e.object_id.clone());
        assert_eq!(id.as_deref(), Some("slide_0001_ph1"));
        page.remove_element("slide_0001_ph1");
        assert!(page.placeholder(1).is_none());
    }
}
