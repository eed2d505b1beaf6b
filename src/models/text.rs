// src/models/text.rs

use serde::{Deserialize, Serialize};

use crate::models::properties::TextStyle;
use crate::models::text_element::{ParagraphMarker, TextElement, TextRun};

/// Represents the textual content of a Shape or of a slide's speaker notes.
///
/// The content is a flat stream of `TextElement`s: each paragraph opens with a
/// `ParagraphMarker` and is followed by zero or more `TextRun`s. Paragraph
/// boundaries map to `'\n'` in the plain-text view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    /// The text contents broken down into its component parts, including styling information.
    pub text_elements: Option<Vec<TextElement>>,
}

impl TextContent {
    /// Builds content holding `text`, one unstyled paragraph per line.
    #[cfg(test)]
    pub(crate) fn from_plain(text: &str) -> Self {
        let mut content = Self::default();
        content.set_text(text);
        content
    }

    /// Concatenates every run, joining paragraphs with `'\n'`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        let mut paragraphs = 0usize;
        for element in self.text_elements.iter().flatten() {
            match element {
                TextElement::ParagraphMarker(_) => {
                    if paragraphs > 0 {
                        out.push('\n');
                    }
                    paragraphs += 1;
                }
                TextElement::TextRun(run) => {
                    if let Some(content) = &run.content {
                        out.push_str(content);
                    }
                }
            }
        }
        out
    }

    /// Replaces all content with `text`. Each `'\n'` starts a new paragraph.
    /// Any styling previously present is discarded.
    pub fn set_text(&mut self, text: &str) {
        let mut elements = Vec::new();
        for line in text.split('\n') {
            elements.push(TextElement::ParagraphMarker(ParagraphMarker::default()));
            if !line.is_empty() {
                elements.push(TextElement::TextRun(TextRun {
                    content: Some(line.to_string()),
                    style: None,
                }));
            }
        }
        self.text_elements = Some(elements);
    }

    /// Appends `text` to the plain-text view and rebuilds the paragraphs.
    pub fn append_text(&mut self, text: &str) {
        let mut combined = self.plain_text();
        combined.push_str(text);
        self.set_text(&combined);
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.text_elements = Some(Vec::new());
    }

    /// Starts a new paragraph with the given marker.
    pub fn push_paragraph(&mut self, marker: ParagraphMarker) {
        self.text_elements
            .get_or_insert_with(Vec::new)
            .push(TextElement::ParagraphMarker(marker));
    }

    /// Appends a styled run to the last paragraph, opening one if needed.
    pub fn push_run(&mut self, content: impl Into<String>, style: Option<TextStyle>) {
        let elements = self.text_elements.get_or_insert_with(Vec::new);
        if elements.is_empty() {
            elements.push(TextElement::ParagraphMarker(ParagraphMarker::default()));
        }
        elements.push(TextElement::TextRun(TextRun {
            content: Some(content.into()),
            style,
        }));
    }

    /// All runs in document order.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.text_elements.iter().flatten().filter_map(|e| match e {
            TextElement::TextRun(run) => Some(run),
            TextElement::ParagraphMarker(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.plain_text().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_text_splits_paragraphs() {
        let content = TextContent::from_plain("first\nsecond\n");
        assert_eq!(content.plain_text(), "first\nsecond\n");
        let markers = content
            .text_elements
            .iter()
            .flatten()
            .filter(|e| matches!(e, TextElement::ParagraphMarker(_)))
            .count();
        assert_eq!(markers, 3);
    }

    #[test]
    fn append_extends_plain_text() {
        let mut content = TextContent::default();
        content.append_text("one");
        content.append_text("\ntwo");
        assert_eq!(content.plain_text(), "one\ntwo");
    }

    #[test]
    fn clear_then_runs_keep_styles() {
        let mut content = TextContent::from_plain("old");
        content.clear();
        assert!(content.is_empty());
        let style = TextStyle {
            font_family: Some("Courier New".to_string()),
            ..TextStyle::default()
        };
        content.push_run("fn", Some(style.clone()));
        content.push_run(" main", Some(style));
        assert_eq!(content.plain_text(), "fn main");
        assert_eq!(content.runs().count(), 2);
    }
}
