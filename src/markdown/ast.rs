//! Owned Markdown tree handed to the document visitor.

/// The construct a [`MarkdownNode`] stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading(u8),
    Paragraph,
    List { ordered: bool, start: u64 },
    ListItem,
    Emphasis,
    StrongEmphasis,
    CodeSpan(String),
    FencedCode { language: Option<String>, code: String },
    IndentedCode(String),
    Image { destination: String },
    Link { destination: String },
    Text(String),
    SoftBreak,
    HardBreak,
    /// Block quotes, tables, strikethrough and other constructs that only
    /// contribute their children.
    Container,
}

/// A node of the parsed document. Leaves carry their payload in `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownNode {
    pub kind: NodeKind,
    pub children: Vec<MarkdownNode>,
}

impl MarkdownNode {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    /// Text of the first child, when that child is a plain text node.
    pub fn first_text(&self) -> Option<&str> {
        match self.children.first().map(|c| &c.kind) {
            Some(NodeKind::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn is_block(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::Paragraph
                | NodeKind::Heading(_)
                | NodeKind::List { .. }
                | NodeKind::FencedCode { .. }
                | NodeKind::IndentedCode(_)
        )
    }

    /// A list item holding only inline content, i.e. a single tight line.
    pub fn is_tight_item(&self) -> bool {
        !self.children.iter().any(MarkdownNode::is_block)
    }

    /// Concatenated text of the subtree, breaks rendered as newlines.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::CodeSpan(text) | NodeKind::IndentedCode(text) => {
                out.push_str(text)
            }
            NodeKind::FencedCode { code, .. } => out.push_str(code),
            NodeKind::SoftBreak | NodeKind::HardBreak => out.push('\n'),
            _ => {}
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}
