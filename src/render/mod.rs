//! Markdown tree to deck rendering.

pub mod code_block;
pub mod highlight;
pub mod narration;
pub mod slide_builder;
pub mod visitor;

pub use code_block::CodeBlockRenderer;
pub use narration::NarrationRecorder;
pub use slide_builder::SlideBuilder;
pub use visitor::{render_document, DocumentVisitor, RenderOutput};
