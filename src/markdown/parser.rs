//! Builds a [`MarkdownNode`] tree from pulldown-cmark events.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::markdown::ast::{MarkdownNode, NodeKind};

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn kind_for_tag(tag: Tag<'_>) -> NodeKind {
    match tag {
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::Heading { level, .. } => NodeKind::Heading(heading_level(level)),
        Tag::List(start) => NodeKind::List {
            ordered: start.is_some(),
            start: start.unwrap_or(1),
        },
        Tag::Item => NodeKind::ListItem,
        Tag::Emphasis => NodeKind::Emphasis,
        Tag::Strong => NodeKind::StrongEmphasis,
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => NodeKind::FencedCode {
            language: info.split_whitespace().next().map(str::to_string),
            code: String::new(),
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => NodeKind::IndentedCode(String::new()),
        Tag::Image { dest_url, .. } => NodeKind::Image {
            destination: dest_url.to_string(),
        },
        Tag::Link { dest_url, .. } => NodeKind::Link {
            destination: dest_url.to_string(),
        },
        _ => NodeKind::Container,
    }
}

/// Appends `node` to `parent`, merging runs of adjacent text.
fn push_child(parent: &mut MarkdownNode, node: MarkdownNode) {
    if let NodeKind::Text(text) = &node.kind {
        if let Some(MarkdownNode {
            kind: NodeKind::Text(previous),
            ..
        }) = parent.children.last_mut()
        {
            previous.push_str(text);
            return;
        }
    }
    parent.children.push(node);
}

/// Parses Markdown `source` (front matter already removed) into a tree rooted
/// at a `Document` node.
pub fn parse_markdown(source: &str) -> MarkdownNode {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut stack = vec![MarkdownNode::new(NodeKind::Document)];
    for event in Parser::new_ext(source, options) {
        match event {
            Event::Start(tag) => stack.push(MarkdownNode::new(kind_for_tag(tag))),
            Event::End(_) => {
                // The document root is never popped by an End event.
                if stack.len() > 1 {
                    if let Some(node) = stack.pop() {
                        if let Some(parent) = stack.last_mut() {
                            push_child(parent, node);
                        }
                    }
                }
            }
            Event::Text(text) => {
                let Some(top) = stack.last_mut() else { continue };
                match &mut top.kind {
                    NodeKind::FencedCode { code, .. } | NodeKind::IndentedCode(code) => {
                        code.push_str(&text)
                    }
                    _ => push_child(top, MarkdownNode::text(text.to_string())),
                }
            }
            Event::Code(code) => {
                if let Some(top) = stack.last_mut() {
                    push_child(top, MarkdownNode::new(NodeKind::CodeSpan(code.to_string())));
                }
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                if let Some(top) = stack.last_mut() {
                    push_child(top, MarkdownNode::text(html.to_string()));
                }
            }
            Event::SoftBreak => {
                if let Some(top) = stack.last_mut() {
                    push_child(top, MarkdownNode::new(NodeKind::SoftBreak));
                }
            }
            Event::HardBreak => {
                if let Some(top) = stack.last_mut() {
                    push_child(top, MarkdownNode::new(NodeKind::HardBreak));
                }
            }
            _ => {}
        }
    }

    // Unbalanced input cannot come out of pulldown-cmark, but fold any leftovers.
    while stack.len() > 1 {
        if let Some(node) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                push_child(parent, node);
            }
        }
    }
    stack
        .pop()
        .unwrap_or_else(|| MarkdownNode::new(NodeKind::Document))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_and_paragraphs() {
        let doc = parse_markdown("# Title\n\nHello *there*.\n");
        assert_eq!(doc.kind, NodeKind::Document);
        assert_eq!(doc.children.len(), 2);
        assert_eq!(doc.children[0].kind, NodeKind::Heading(1));
        assert_eq!(doc.children[0].first_text(), Some("Title"));
        let paragraph = &doc.children[1];
        assert_eq!(paragraph.kind, NodeKind::Paragraph);
        assert_eq!(paragraph.children[1].kind, NodeKind::Emphasis);
        assert_eq!(paragraph.plain_text(), "Hello there.");
    }

    #[test]
    fn fenced_code_keeps_language_and_text() {
        let doc = parse_markdown("```python extra\nprint(1)\nprint(2)\n```\n");
        match &doc.children[0].kind {
            NodeKind::FencedCode { language, code } => {
                assert_eq!(language.as_deref(), Some("python"));
                assert_eq!(code, "print(1)\nprint(2)\n");
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn tight_and_loose_lists() {
        let tight = parse_markdown("- a\n- b\n");
        let list = &tight.children[0];
        assert_eq!(
            list.kind,
            NodeKind::List {
                ordered: false,
                start: 1
            }
        );
        assert!(list.children[0].is_tight_item());

        let loose = parse_markdown("3. a\n\n4. b\n");
        let list = &loose.children[0];
        assert_eq!(
            list.kind,
            NodeKind::List {
                ordered: true,
                start: 3
            }
        );
        assert!(!list.children[0].is_tight_item());
    }

    #[test]
    fn images_carry_destination_and_alt() {
        let doc = parse_markdown("![a chart](chart.png)\n");
        let image = &doc.children[0].children[0];
        assert_eq!(
            image.kind,
            NodeKind::Image {
                destination: "chart.png".to_string()
            }
        );
        assert_eq!(image.plain_text(), "a chart");
    }
}
