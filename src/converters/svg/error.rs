use thiserror::Error;

/// Errors that can occur while drawing a deck as SVG.
#[derive(Error, Debug)]
pub enum SvgConversionError {
    #[error("Formatting error during SVG generation: {0}")]
    FormatError(#[from] std::fmt::Error),
    #[error("Missing expected data necessary for conversion: {0}")]
    MissingData(String),
    #[error("An internal error occurred during conversion: {0}")]
    Internal(String),
}

/// A specialized Result type for SVG conversion operations.
pub type Result<T> = std::result::Result<T, SvgConversionError>;
