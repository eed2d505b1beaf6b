//! Markdown front end: front matter splitting and tree construction.

pub mod ast;
pub mod front_matter;
pub mod parser;

pub use ast::{MarkdownNode, NodeKind};
pub use front_matter::{extract_front_matter, FrontMatter};
pub use parser::parse_markdown;
