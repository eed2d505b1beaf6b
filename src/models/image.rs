use serde::{Deserialize, Serialize};

/// How a picture was sized into the region it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageFit {
    /// Scaled uniformly to fit inside the region and centered in it.
    Fit,
    /// Scaled to the largest height the slide allows below its title.
    MaxSize,
}

/// The properties of an Image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageProperties {
    /// Width of the source bitmap in pixels.
    pub pixel_width: Option<u32>,
    /// Height of the source bitmap in pixels.
    pub pixel_height: Option<u32>,
    /// The sizing strategy used on placement.
    pub fit: Option<ImageFit>,
}

/// A PageElement kind representing an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Embedded content, usually a `data:image/png;base64,...` URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,

    /// The location the image was inserted from (a file path for local graphics).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// The properties of the image.
    pub image_properties: Option<ImageProperties>,
}

impl Image {
    /// The best available location to read the picture from.
    pub fn location(&self) -> Option<&str> {
        self.content_url
            .as_deref()
            .or(self.source_url.as_deref())
    }
}
