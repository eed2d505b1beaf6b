use std::path::PathBuf;

use thiserror::Error;

use crate::converters::svg::SvgConversionError;

/// Represents errors that can occur while baking a Markdown document into a deck.
#[derive(Error, Debug)]
pub enum BakeError {
    /// An I/O error occurred, often related to reading the input or writing outputs.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error occurred while (de)serializing JSON (deck, dub index, hash index).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML front matter at the top of the document could not be parsed.
    #[error("Invalid front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    /// No cached clip exists for the text and remote synthesis is not allowed.
    #[error("Missing local speech file {path:?} for voice {voice} (text: {text:?})")]
    LocalAssetMissing {
        path: PathBuf,
        voice: String,
        text: String,
    },

    /// The remote text-to-speech service rejected the request.
    #[error("Speech synthesis failed: {0}")]
    SpeechSynthesis(String),

    /// Error originating from the underlying HTTP client (`reqwest`).
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The length of an audio clip could not be determined.
    #[error("Could not probe audio length of {path:?}: {message}")]
    AudioProbe { path: PathBuf, message: String },

    /// A picture referenced by the document could not be read or decoded.
    #[error("Failed to load image {path:?}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Rendering an SVG to pixels failed.
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// Converting the deck to SVG failed.
    #[error(transparent)]
    Svg(#[from] SvgConversionError),

    /// Syntax highlighting failed.
    #[error("Highlighting failed: {0}")]
    Highlight(#[from] syntect::Error),

    /// An external encoder run failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// A JSON index on disk is not valid. The backup copy is named so it can be restored.
    #[error("Corrupted index {path:?} (backup at {backup:?}): {source}")]
    CacheCorruption {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing markup into a string buffer failed.
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// A type alias for `Result<T, BakeError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, BakeError>;
