//! Bakes annotated Markdown lessons into narrated slide decks, with optional
//! video export and WebVTT captions.

pub mod build_cache;
pub mod captions;
pub mod config;
pub mod converters;
pub mod errors;
pub mod export;
pub mod markdown;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod speech;

pub use errors::{BakeError, Result};
pub use models::presentation::Presentation;
pub use pipeline::{bake, Progress};
