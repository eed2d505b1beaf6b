use crate::models::{
    elements::{PageElement, PageElementKind},
    page::Page,
    presentation::Presentation,
    shape::Shape,
    text::TextContent,
};
use std::cmp::Ordering;
use std::fmt::Write;

// --- Helper Function for Sorting ---

/// Extracts the top edge of a PageElement in EMU.
/// Elements without a transform sort last.
fn get_translate_y(element: &PageElement) -> f64 {
    element
        .transform
        .as_ref()
        .and_then(|t| t.translate_y)
        .unwrap_or(f64::MAX)
}

/// Compares two PageElements based on their vertical position.
fn compare_elements_by_y(a: &PageElement, b: &PageElement) -> Ordering {
    get_translate_y(a)
        .partial_cmp(&get_translate_y(b))
        .unwrap_or(Ordering::Equal)
}

// --- Text Extraction Logic ---

/// Trimmed plain text of a TextContent block, `None` when blank.
fn extract_text_from_text_content(text_content: &TextContent) -> Option<String> {
    let text = text_content.plain_text();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Text of a shape that is not the title placeholder.
fn extract_text_from_shape(shape: &Shape) -> Option<String> {
    let is_title = shape
        .placeholder
        .as_ref()
        .and_then(|p| p.placeholder_type)
        .is_some_and(|t| t.is_title());
    if is_title {
        return None;
    }
    shape.text.as_ref().and_then(extract_text_from_text_content)
}

/// Extracts text from a single PageElement. Only shapes carry visible text.
fn extract_text_from_page_element(element: &PageElement) -> Option<String> {
    match &element.element_kind {
        PageElementKind::Shape(shape) => extract_text_from_shape(shape),
        PageElementKind::Image(_) | PageElementKind::Audio(_) => None,
    }
}

/// Body text of a slide, elements ordered top to bottom.
fn extract_text_from_slide(slide: &Page) -> Option<String> {
    let mut sorted_elements: Vec<&PageElement> = slide.elements().iter().collect();
    sorted_elements.sort_by(|a, b| compare_elements_by_y(a, b));

    let slide_parts: Vec<String> = sorted_elements
        .into_iter()
        .filter_map(extract_text_from_page_element)
        .collect();
    (!slide_parts.is_empty()).then(|| slide_parts.join("\n"))
}

// --- Public API Function ---

/// Extracts the visible text and speaker notes of every slide as a Markdown outline.
///
/// Each slide with any text becomes a `## Slide N` section headed by its title,
/// followed by its body text and a `> ` quoted notes block. Slides are separated
/// by `---` rules.
pub fn extract_text_from_presentation(presentation: &Presentation) -> String {
    let mut full_text = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(full_text, "# Presentation");
    match &presentation.title {
        Some(title) => {
            let _ = writeln!(full_text, "{}\n", title);
        }
        None => full_text.push('\n'),
    }

    let mut first_slide = true;
    for (index, slide) in presentation.slides.iter().enumerate() {
        let title = slide
            .title_text()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let body = extract_text_from_slide(slide);
        let notes = slide.notes_text();
        let notes = notes.trim();

        if title.is_none() && body.is_none() && notes.is_empty() {
            continue;
        }

        if !first_slide {
            let _ = writeln!(full_text, "\n---\n");
        }
        first_slide = false;

        match &title {
            Some(title) => {
                let _ = writeln!(full_text, "## Slide {}: {}\n", index + 1, title);
            }
            None => {
                let _ = writeln!(full_text, "## Slide {}\n", index + 1);
            }
        }
        if let Some(body) = body {
            let _ = writeln!(full_text, "{}", body);
        }
        if !notes.is_empty() {
            full_text.push('\n');
            for line in notes.lines() {
                let _ = writeln!(full_text, "> {}", line);
            }
        }
    }

    full_text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::common::Rect;
    use crate::models::layout::LayoutKind;
    use crate::models::shape::ShapeType;

    fn set_placeholder(page: &mut Page, index: i32, text: &str) {
        if let Some(shape) = page.placeholder_mut(index).and_then(PageElement::as_shape_mut) {
            shape.text = Some(TextContent::from_plain(text));
        }
    }

    #[test]
    fn outline_lists_titles_body_and_notes() {
        let mut deck = Presentation::new("deck");
        deck.title = Some("Lesson".to_string());

        let mut first = Page::from_layout("slide_0001", LayoutKind::TitleContent);
        set_placeholder(&mut first, 0, "Loops");
        set_placeholder(&mut first, 1, "for\nwhile");
        first.notes_mut().append_text("Loops repeat work.");
        deck.slides.push(first);

        deck.slides
            .push(Page::from_layout("slide_0002", LayoutKind::Blank));

        let mut third = Page::from_layout("slide_0003", LayoutKind::Blank);
        third.elements_mut().push(PageElement::new(
            "slide_0003_e001",
            Rect::new(0.0, 100.0, 10.0, 10.0),
            PageElementKind::Shape(Shape {
                shape_type: Some(ShapeType::TextBox),
                text: Some(TextContent::from_plain("  free text  ")),
                placeholder: None,
            }),
        ));
        deck.slides.push(third);

        let outline = extract_text_from_presentation(&deck);
        assert!(outline.starts_with("# Presentation\nLesson\n"));
        assert!(outline.contains("## Slide 1: Loops\n\nfor\nwhile\n\n> Loops repeat work.\n"));
        assert!(!outline.contains("## Slide 2"));
        assert!(outline.contains("\n---\n\n## Slide 3\n\nfree text\n"));
    }

    #[test]
    fn elements_are_read_top_to_bottom() {
        let mut page = Page::from_layout("s", LayoutKind::Blank);
        for (id, top, text) in [("low", 500.0, "second"), ("high", 10.0, "first")] {
            page.elements_mut().push(PageElement::new(
                id,
                Rect::new(0.0, top, 10.0, 10.0),
                PageElementKind::Shape(Shape {
                    shape_type: Some(ShapeType::TextBox),
                    text: Some(TextContent::from_plain(text)),
                    placeholder: None,
                }),
            ));
        }
        assert_eq!(extract_text_from_slide(&page).as_deref(), Some("first\nsecond"));
    }
}
